//! rotify playlist rotation worker
//!
//! Scheduled job that promotes each user's "Tomorrow" queue playlist
//! into their "Today" playlist, batched to the provider's mutation
//! limits, with per-user failure isolation.

pub mod config;
pub mod error;
pub mod jobs;
pub mod orchestrator;
pub mod token_store;

pub use config::Config;
pub use error::{RotationError, RotationResult};
pub use jobs::RotationOutcome;
pub use orchestrator::RunSummary;
pub use token_store::UserCredential;
