//! cs-core: Core library for the csync CLI
//!
//! This crate provides the storage-SDK-independent parts of csync:
//! - The `FileEntry` data model shared by local and remote listings
//! - Exclude-pattern filtering
//! - Local directory scanning and remote container listing
//! - The reconciler that turns two listings into an action list
//! - The bounded-concurrency executor and run summary
//!
//! The `ObjectStore` trait decouples all of the above from any specific
//! storage SDK, allowing the reconciliation and execution logic to be
//! tested against a mock store.

pub mod entry;
pub mod error;
pub mod exclude;
pub mod executor;
pub mod lister;
pub mod plan;
pub mod report;
pub mod scanner;
pub mod store;

pub use entry::FileEntry;
pub use error::{Error, Result};
pub use exclude::ExcludeSet;
pub use executor::Executor;
pub use lister::list_container;
pub use plan::{plan_restore, plan_sync, Action};
pub use report::{ActionResult, Outcome, RunSummary};
pub use scanner::scan;
pub use store::{ListPage, ObjectStore};
