use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a required argument that was not supplied.
pub const EXIT_MISSING_ARGUMENT: i32 = 121;
/// Exit code for two or more flags given from an exclusive group.
pub const EXIT_MUTUALLY_EXCLUSIVE: i32 = 122;
/// Exit code for a mandatory group with no flag given.
pub const EXIT_REQUIRED_GROUP: i32 = 123;
/// Exit code when the backend executable could not be started.
pub const EXIT_LAUNCH_FAILURE: i32 = 124;
/// Exit code when the backend ended without an exit status (killed by a signal).
pub const EXIT_BACKEND_NO_STATUS: i32 = 125;

#[derive(Error, Debug)]
pub enum SegmenterError {
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(&'static str),

    #[error("Mutually exclusive options in {group} group: {} may not be used together", .flags.join(", "))]
    MutuallyExclusiveViolation {
        group: &'static str,
        flags: Vec<&'static str>,
    },

    #[error("One of the {group} options is required: {}", .flags.join(", "))]
    RequiredGroupUnsatisfied {
        group: &'static str,
        flags: &'static [&'static str],
    },

    #[error("Failed to launch segmentation backend {}", .program.display())]
    BackendLaunchFailure {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Segmentation backend failed ({})", describe_status(.code))]
    BackendExecutionFailure { code: Option<i32> },
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl SegmenterError {
    /// The name of the error kind, as reported in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SegmenterError::MissingRequiredArgument(_) => "MissingRequiredArgument",
            SegmenterError::MutuallyExclusiveViolation { .. } => "MutuallyExclusiveViolation",
            SegmenterError::RequiredGroupUnsatisfied { .. } => "RequiredGroupUnsatisfied",
            SegmenterError::BackendLaunchFailure { .. } => "BackendLaunchFailure",
            SegmenterError::BackendExecutionFailure { .. } => "BackendExecutionFailure",
        }
    }

    /// The process exit code this error maps to.
    ///
    /// Backend exit codes are passed through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            SegmenterError::MissingRequiredArgument(_) => EXIT_MISSING_ARGUMENT,
            SegmenterError::MutuallyExclusiveViolation { .. } => EXIT_MUTUALLY_EXCLUSIVE,
            SegmenterError::RequiredGroupUnsatisfied { .. } => EXIT_REQUIRED_GROUP,
            SegmenterError::BackendLaunchFailure { .. } => EXIT_LAUNCH_FAILURE,
            SegmenterError::BackendExecutionFailure { code } => {
                code.unwrap_or(EXIT_BACKEND_NO_STATUS)
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SegmenterError::MissingRequiredArgument(_)
                | SegmenterError::MutuallyExclusiveViolation { .. }
                | SegmenterError::RequiredGroupUnsatisfied { .. }
        )
    }

    /// The backend's own exit status, if the backend ran and reported one.
    pub fn backend_status(&self) -> Option<i32> {
        match self {
            SegmenterError::BackendExecutionFailure { code } => *code,
            _ => None,
        }
    }
}
