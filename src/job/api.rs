//! Payloads exchanged with the job service.

use serde::{Deserialize, Serialize};

/// A job the service has just accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
}

/// Status of a single job. `result` stays empty until the job completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub job_id: String,
    #[serde(default)]
    pub result: Option<i32>,
}

impl JobResult {
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}

/// Listing of completed jobs with summary figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jobs {
    #[serde(default)]
    pub results: Vec<JobResult>,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub average_result: Option<f64>,
}
