//! Deployment information: last commit or release marker.

pub mod reader;
pub mod relative;

pub use reader::{
    parse_git_line, parse_release_line, DeploymentReader, DeploymentRecord, DeploymentSource,
    NOT_AVAILABLE,
};
pub use relative::format_relative_time;
