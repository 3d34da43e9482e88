//! Client facade for the remote job service.

use reqwest::{
    Method, RequestBuilder, Url,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::{
    config::JobClientConfig,
    job::api::{Job, JobResult, Jobs},
    prelude::*,
};

const JOBS_PATH: &str = "jobs";
const APPLICATION_JSON: &str = "application/json";

/// HTTP client bound to `{base_uri}/jobs`.
#[derive(Debug)]
struct WebTarget {
    client: reqwest::Client,
    jobs_url: Url,
}

impl WebTarget {
    fn new(base_uri: &str) -> Result<Self> {
        let mut jobs_url = Url::parse(base_uri)
            .map_err(|err| Error::InvalidBaseUri(format!("{base_uri} ({err})")))?;
        jobs_url
            .path_segments_mut()
            .map_err(|_| Error::InvalidBaseUri(base_uri.to_string()))?
            .pop_if_empty()
            .push(JOBS_PATH);

        let client = reqwest::ClientBuilder::new().build()?;
        Ok(Self { client, jobs_url })
    }

    /// Appends `job_id` as a relative path: `/` separates segments and
    /// existing `%XX` escapes are kept, everything else is encoded.
    fn job_url(&self, job_id: &str) -> Url {
        let mut url = self.jobs_url.clone();
        let job_path = escape_stray_percent(job_id.trim_start_matches('/'));
        url.set_path(&format!("{}/{job_path}", self.jobs_url.path()));
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{method} {url}");
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))
    }
}

/// Forwards job operations to the job service.
///
/// The underlying HTTP target is built on the first call and reused by every
/// later call on the same instance.
#[derive(Debug, Default)]
pub struct JobClient {
    config: JobClientConfig,
    target: OnceCell<WebTarget>,
}

impl JobClient {
    pub fn new(config: JobClientConfig) -> Self {
        Self {
            config,
            target: OnceCell::new(),
        }
    }

    /// Client configured from `GATEWAY_JOB_BASE_URI`.
    pub fn from_env() -> Self {
        Self::new(JobClientConfig::from_env())
    }

    pub fn base_uri(&self) -> &str {
        &self.config.base_uri
    }

    /// `GET {base_uri}/jobs`
    pub async fn get_jobs(&self) -> Result<Jobs> {
        let target = self.web_target().await?;
        send(target.request(Method::GET, target.jobs_url.clone())).await
    }

    /// `GET {base_uri}/jobs/{job_id}`
    ///
    /// `job_id` is not validated. It is appended as a relative path, so `/`
    /// inside it adds segments and existing `%XX` escapes pass through.
    pub async fn get_job(&self, job_id: &str) -> Result<JobResult> {
        let target = self.web_target().await?;
        send(target.request(Method::GET, target.job_url(job_id))).await
    }

    /// `POST {base_uri}/jobs` with an empty body.
    pub async fn create_job(&self) -> Result<Job> {
        let target = self.web_target().await?;
        send(target.request(Method::POST, target.jobs_url.clone()).body("")).await
    }

    /// Returns the cached target, building it on first use.
    /// Concurrent first calls wait for a single build; a failed build is not cached.
    async fn web_target(&self) -> Result<&WebTarget> {
        self.target
            .get_or_try_init(|| async {
                let target = WebTarget::new(&self.config.base_uri)?;
                info!("Job service target {}", target.jobs_url);
                Ok::<_, Error>(target)
            })
            .await
    }
}

/// Encodes `%` signs that do not start an `%XX` escape.
fn escape_stray_percent(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut escaped = String::with_capacity(value.len());
    for (i, ch) in value.char_indices() {
        let starts_escape = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if ch == '%' && !starts_escape {
            escaped.push_str("%25");
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?.error_for_status()?;
    Ok(response.json::<T>().await?)
}
