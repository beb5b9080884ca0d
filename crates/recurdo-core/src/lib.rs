//! # Recurdo Core Library
//!
//! Keeps hierarchical to-do items recurring in a remote task service. Tasks
//! tagged with a `recur_<ISO-8601 period>` label have their whole subtree
//! copied one period ahead, and the label moves from the original to the
//! copy, until no labeled task is due before a cutoff date.
//!
//! ## Core Modules
//!
//! - [`models`]: Tasks, labels, recurrence rules and creation requests
//! - [`period`]: ISO-8601 calendar periods and date arithmetic
//! - [`forest`]: Flat task snapshot to ordered parent/child forest
//! - [`selection`]: Recurrence root selection and subtree validation
//! - [`propagation`]: Subtree copying and label stripping
//! - [`recurrence`]: The pass loop that runs until nothing is due
//! - [`repository`]: Remote service interface and its REST implementation
//! - [`error`]: Error types with the offending task attached
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use recurdo_core::{
//!     period::Period,
//!     recurrence::{cutoff_from, RecurrenceEngine},
//!     repository::{RestConfig, RestRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = RestRepository::new(RestConfig::new("api-token"));
//!     let cutoff = cutoff_from(Local::now().date_naive(), Period::months(4))?;
//!
//!     let engine = RecurrenceEngine::new(repo, cutoff);
//!     let summary = engine.run_until_converged().await?;
//!     println!("Processed {} tasks in {} passes", summary.processed, summary.passes);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod forest;
pub mod models;
pub mod period;
pub mod propagation;
pub mod recurrence;
pub mod repository;
pub mod selection;
