//! Status report assembly.

pub mod aggregator;
pub mod entry;

pub use aggregator::{audit_entry, deployment_entry, package_entry, StatusAggregator, DEPLOYMENT_LABEL};
pub use entry::{StatColor, StatEntry};
