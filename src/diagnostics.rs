//! Machine-readable failure reports for `--json`.

use crate::error::SegmenterError;
use serde::Serialize;

/// Where in the pipeline a failure happened.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Validation,
    Launch,
    Backend,
    Internal,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub kind: String,
    pub message: String,
    pub exit_code: i32,
    pub backend_status: Option<i32>,
}

impl Diagnostic {
    /// Builds a report from any error surfaced by `run`.
    ///
    /// Errors that are not a `SegmenterError` are reported as internal with
    /// exit code 1.
    pub fn from_error(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        match err.downcast_ref::<SegmenterError>() {
            Some(e) => Diagnostic {
                stage: stage_of(e),
                kind: e.kind().to_string(),
                message,
                exit_code: e.exit_code(),
                backend_status: e.backend_status(),
            },
            None => Diagnostic {
                stage: Stage::Internal,
                kind: "Internal".to_string(),
                message,
                exit_code: 1,
                backend_status: None,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The stderr line and process exit code for a failed run.
///
/// With `json` set the line is the serialized `Diagnostic`; otherwise it is
/// `Error: ` followed by the error chain.
pub fn failure_output(err: &anyhow::Error, json: bool) -> (String, i32) {
    let diagnostic = Diagnostic::from_error(err);
    let line = match diagnostic.to_json() {
        Ok(line) if json => line,
        _ => format!("Error: {:#}", err),
    };
    (line, diagnostic.exit_code)
}

fn stage_of(err: &SegmenterError) -> Stage {
    match err {
        SegmenterError::BackendLaunchFailure { .. } => Stage::Launch,
        SegmenterError::BackendExecutionFailure { .. } => Stage::Backend,
        _ => Stage::Validation,
    }
}
