//! Best-effort look at the input directory before the backend runs.
//!
//! Nothing here can fail an invocation or alter the composed command; it only
//! produces log output so an empty or mistyped input is visible early.

use crate::config::{Configuration, TraversalMode};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Files under `input` whose name ends with `extension`, found lazily.
///
/// Without a recursive traversal mode only the top level of `input` is
/// scanned, matching what the backend will read. Returns `None` if `input`
/// does not exist or is not a directory.
fn candidate_images<'a>(
    input: &Path,
    extension: &'a str,
    traversal: TraversalMode,
) -> Option<impl Iterator<Item = DirEntry> + 'a> {
    if !input.is_dir() {
        return None;
    }

    let walker = match traversal {
        TraversalMode::None => WalkDir::new(input).max_depth(1),
        TraversalMode::SimpleRecursive | TraversalMode::LargeScaleRecursive => WalkDir::new(input),
    };

    Some(
        walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(move |entry| entry.file_name().to_string_lossy().ends_with(extension)),
    )
}

/// Counts every matching file. Walks the whole tree in recursive modes.
pub fn count_candidate_images(
    input: &Path,
    extension: &str,
    traversal: TraversalMode,
) -> Option<usize> {
    candidate_images(input, extension, traversal).map(|files| files.count())
}

/// Whether at least one matching file exists. Stops at the first match.
pub fn has_candidate_image(
    input: &Path,
    extension: &str,
    traversal: TraversalMode,
) -> Option<bool> {
    candidate_images(input, extension, traversal).map(|mut files| files.next().is_some())
}

/// Logs what the backend is about to find in the input directory.
///
/// The full count is only taken when debug logging is on; otherwise the
/// walk ends at the first matching file.
pub fn report(config: &Configuration) {
    let input = &config.input_path;
    let extension = config.extension.as_str();

    let found = if log::log_enabled!(log::Level::Debug) {
        count_candidate_images(input, extension, config.traversal_mode).map(|count| {
            log::debug!(
                "Found {} '{}' files in '{}'",
                count,
                extension,
                input.display()
            );
            count > 0
        })
    } else {
        has_candidate_image(input, extension, config.traversal_mode)
    };

    match found {
        Some(true) => {}
        Some(false) => log::warn!("No '{}' files found in '{}'", extension, input.display()),
        None => log::warn!(
            "Input path '{}' is not a readable directory",
            input.display()
        ),
    }
}
