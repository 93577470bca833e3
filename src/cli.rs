use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::composer::DEFAULT_BIN_DIR;
use crate::config::FloatValue;

/// Raw command-line surface.
///
/// Every grouped or required option is left optional here; the rules about
/// which combinations are legal live in `config::Configuration::from_cli`.
/// Repeating the same option is allowed and the last occurrence wins.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Validate SLIC superpixel parameters and run the slic_image_segmenter backend.",
    allow_negative_numbers = true,
    args_override_self = true
)]
pub struct Cli {
    /// Input image directory.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output image directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extension of image files to segment (WITH leading period).
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Fully recursive traversal of the file tree (faster for large-scale datasets).
    /// Also accepted as `-ls`.
    #[arg(long, default_value_t = false)]
    pub large_scale: bool,

    /// Simple recursive traversal of the file tree (for small datasets).
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of segments to determine the segmentation. Defaults to 128 when given bare.
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub num: Option<Option<i32>>,

    /// Size of segments in pixels to determine the segmentation. Defaults to 256 when given bare.
    #[arg(long, value_name = "N", num_args = 0..=1)]
    pub size: Option<Option<i32>>,

    /// Use XYZ space for clustering.
    #[arg(long = "XYZ", default_value_t = false)]
    pub xyz: bool,

    /// Use RGB space for clustering.
    #[arg(long = "RGB", default_value_t = false)]
    pub rgb: bool,

    /// Use CIELAB space for clustering.
    #[arg(long = "LAB", default_value_t = false)]
    pub lab: bool,

    /// Scale to resize images by.
    #[arg(short, long)]
    pub scale: Option<FloatValue>,

    /// Maximum side-length to resize images to.
    #[arg(long)]
    pub sidelen: Option<i32>,

    /// Number of iterations of SLIC to run.
    #[arg(long)]
    pub itt: Option<i32>,

    /// Coherence weight (float in range [0,1]).
    #[arg(long)]
    pub coh: Option<FloatValue>,

    /// Don't enforce connectivity within each superpixel.
    #[arg(long, default_value_t = false)]
    pub no_enforce: bool,

    /// Verbose output (also passed to the backend).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Directory containing the slic_image_segmenter executable.
    #[arg(long, env = "SLIC_BIN_DIR", default_value = DEFAULT_BIN_DIR)]
    pub bin_dir: PathBuf,

    /// Print the backend command without running it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Report failures as a JSON object on stderr.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// Parses the process arguments, accepting the two-letter `-ls` short form.
    pub fn parse_normalized() -> Self {
        Cli::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrites tokens clap cannot express natively.
///
/// A standalone `-ls` becomes `--large-scale`. Everything after a `--`
/// terminator is left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                arg
            } else if arg == "-ls" {
                OsString::from("--large-scale")
            } else {
                arg
            }
        })
        .collect()
}
