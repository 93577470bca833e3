//! Maps a validated `Configuration` onto the backend's command-line protocol.

use crate::config::{Configuration, ResizeSpec, SegmentationSpec, TraversalMode};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory searched for the backend executable unless overridden.
pub const DEFAULT_BIN_DIR: &str = "bin";
/// File name of the segmentation backend inside the binary directory.
pub const BACKEND_EXECUTABLE: &str = "slic_image_segmenter";

/// A fully composed backend invocation: the program and its arguments, one
/// argv element per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl BackendCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        BackendCommand {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    fn flag_value(&mut self, flag: &str, value: impl Into<OsString>) -> &mut Self {
        self.arg(flag).arg(value)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.as_os_str().to_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Lossy UTF-8 rendering of `argv`, used for logs and JSON output.
    pub fn argv_lossy(&self) -> Vec<String> {
        self.argv()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for BackendCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv_lossy().join(" "))
    }
}

/// Builds the backend invocation for `config`.
///
/// Flags are always emitted in the same order: paths and extension,
/// segmentation spec, color space, traversal, iterations, coherence weight,
/// connectivity, verbosity, resize spec. Float values are forwarded in the
/// spelling the user typed them in.
pub fn compose(config: &Configuration, bin_dir: &Path) -> BackendCommand {
    let mut cmd = BackendCommand::new(bin_dir.join(BACKEND_EXECUTABLE));

    cmd.flag_value("--input_path", config.input_path.as_os_str())
        .flag_value("--output_path", config.output_path.as_os_str())
        .flag_value("--ext", OsStr::new(&config.extension));

    match config.segmentation_spec {
        SegmentationSpec::NumSegments(n) => cmd.flag_value("--num_segs", n.to_string()),
        SegmentationSpec::SpixelSize(n) => cmd.flag_value("--spixel_size", n.to_string()),
    };

    cmd.flag_value("--color_space", config.color_space.backend_name());

    match config.traversal_mode {
        TraversalMode::None => {}
        TraversalMode::SimpleRecursive => {
            cmd.arg("--recursive");
        }
        TraversalMode::LargeScaleRecursive => {
            cmd.arg("--large_scale");
        }
    }

    if let Some(iters) = config.num_iterations {
        cmd.flag_value("--num_iters", iters.to_string());
    }
    if let Some(weight) = &config.coherence_weight {
        cmd.flag_value("--coh_weight", weight.as_str());
    }
    if !config.enforce_connectivity {
        cmd.arg("--no_enforce");
    }
    if config.verbose {
        cmd.arg("--verbose");
    }

    match &config.resize_spec {
        Some(ResizeSpec::Scale(scale)) => {
            cmd.flag_value("--scale", scale.as_str());
        }
        Some(ResizeSpec::SideLength(len)) => {
            cmd.flag_value("--max_sidelen", len.to_string());
        }
        None => {}
    }

    cmd
}
