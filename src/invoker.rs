use crate::composer::BackendCommand;
use crate::error::SegmenterError;
use std::process::Command;

/// Runs the backend and blocks until it exits.
///
/// No retry and no timeout: segmentation time grows with the dataset and the
/// caller is expected to wait for it.
pub fn invoke(cmd: &BackendCommand) -> Result<(), SegmenterError> {
    log::debug!("Launching {}", cmd.program().display());

    let status = Command::new(cmd.program())
        .args(cmd.args())
        .status()
        .map_err(|source| SegmenterError::BackendLaunchFailure {
            program: cmd.program().to_path_buf(),
            source,
        })?;

    if status.success() {
        log::debug!("Backend finished successfully");
        Ok(())
    } else {
        Err(SegmenterError::BackendExecutionFailure {
            code: status.code(),
        })
    }
}
