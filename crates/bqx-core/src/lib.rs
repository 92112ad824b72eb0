//! bqx-core - Core library for bqx
//!
//! This crate provides the types shared by the template resolver, the
//! warehouse backends and the CLI: the process-wide [`ExportConfig`], the
//! parsed [`JobInvocation`], and the [`StagingTableRef`] naming scheme with
//! its injectable [`IdGenerator`].

pub mod config;
pub mod error;
pub mod invocation;
pub mod staging;

pub use config::ExportConfig;
pub use error::{CoreError, CoreResult};
pub use invocation::{parse_execution_date, JobInvocation};
pub use staging::{IdGenerator, StagingTableRef, UuidGenerator};
