//! Client for the remote job service.
//!
//! [`JobClient`] forwards the three job operations (list, fetch one, create)
//! to the job service over JSON/REST.
//!
//! # Usage
//!
//! ```rust,no_run
//! use job_gateway::{JobClient, JobClientConfig};
//!
//! # async fn example() -> job_gateway::prelude::Result<()> {
//! let client = JobClient::new(JobClientConfig::new("http://localhost:9082"));
//! let created = client.create_job().await?;
//! let result = client.get_job(&created.job_id).await?;
//! println!("{} -> {:?}", result.job_id, result.result);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod job_client;
pub mod prelude;

pub use config::JobClientConfig;
pub use job::api::{Job, JobResult, Jobs};
pub use job_client::JobClient;
