//! Validated segmentation configuration.
//!
//! `Configuration::from_cli` is the only way to build one, so every value that
//! reaches the composer already satisfies the group rules: exactly one
//! segmentation spec, exactly one color space, at most one traversal mode and
//! at most one resize spec.

use crate::cli::Cli;
use crate::error::SegmenterError;
use std::fmt;
use std::num::ParseFloatError;
use std::path::PathBuf;
use std::str::FromStr;

/// Segment count used when `--num` is given without a value.
pub const DEFAULT_NUM_SEGMENTS: i32 = 128;
/// Superpixel size used when `--size` is given without a value.
pub const DEFAULT_SPIXEL_SIZE: i32 = 256;

const SEGMENTATION_FLAGS: &[&str] = &["--num", "--size"];
const COLOR_SPACE_FLAGS: &[&str] = &["--XYZ", "--RGB", "--LAB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    #[default]
    None,
    SimpleRecursive,
    LargeScaleRecursive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationSpec {
    NumSegments(i32),
    SpixelSize(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    Xyz,
    Rgb,
    Cielab,
}

impl ColorSpace {
    /// The name the backend expects for `--color_space`.
    pub fn backend_name(self) -> &'static str {
        match self {
            ColorSpace::Xyz => "XYZ",
            ColorSpace::Rgb => "RGB",
            ColorSpace::Cielab => "CIELAB",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backend_name())
    }
}

/// A floating-point argument that remembers how the user wrote it.
///
/// The text is checked to parse as `f64`, but the backend receives the
/// original token unchanged (`1.0` stays `1.0`, `0.50` stays `0.50`).
#[derive(Debug, Clone, PartialEq)]
pub struct FloatValue {
    value: f64,
    text: String,
}

impl FloatValue {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for FloatValue {
    type Err = ParseFloatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FloatValue {
            value: s.parse()?,
            text: s.to_string(),
        })
    }
}

impl fmt::Display for FloatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResizeSpec {
    Scale(FloatValue),
    SideLength(i32),
}

/// Everything needed to compose one backend invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// File extension including the leading period, e.g. `.png`.
    pub extension: String,
    pub traversal_mode: TraversalMode,
    pub segmentation_spec: SegmentationSpec,
    pub color_space: ColorSpace,
    pub resize_spec: Option<ResizeSpec>,
    pub num_iterations: Option<i32>,
    /// Nominally in [0, 1]; the backend is responsible for rejecting other values.
    pub coherence_weight: Option<FloatValue>,
    pub enforce_connectivity: bool,
    pub verbose: bool,
}

impl Configuration {
    /// Validates parsed arguments and builds a configuration.
    ///
    /// Checks run in a fixed order (required fields, then segmentation, color
    /// space, traversal and resize groups) and stop at the first failure.
    pub fn from_cli(cli: &Cli) -> Result<Self, SegmenterError> {
        let input_path = cli
            .input
            .clone()
            .ok_or(SegmenterError::MissingRequiredArgument("--input"))?;
        let output_path = cli
            .output
            .clone()
            .ok_or(SegmenterError::MissingRequiredArgument("--output"))?;
        let extension = cli
            .ext
            .clone()
            .ok_or(SegmenterError::MissingRequiredArgument("--ext"))?;

        let segmentation_spec = select_required(
            "segmentation",
            SEGMENTATION_FLAGS,
            [
                cli.num
                    .map(|n| SegmentationSpec::NumSegments(n.unwrap_or(DEFAULT_NUM_SEGMENTS))),
                cli.size
                    .map(|n| SegmentationSpec::SpixelSize(n.unwrap_or(DEFAULT_SPIXEL_SIZE))),
            ],
        )?;

        let color_space = select_required(
            "color space",
            COLOR_SPACE_FLAGS,
            [
                cli.xyz.then_some(ColorSpace::Xyz),
                cli.rgb.then_some(ColorSpace::Rgb),
                cli.lab.then_some(ColorSpace::Cielab),
            ],
        )?;

        let traversal_mode = select_optional(
            "traversal",
            &["--large-scale", "--recursive"],
            [
                cli.large_scale.then_some(TraversalMode::LargeScaleRecursive),
                cli.recursive.then_some(TraversalMode::SimpleRecursive),
            ],
        )?
        .unwrap_or_default();

        let resize_spec = select_optional(
            "resize",
            &["--scale", "--sidelen"],
            [
                cli.scale.clone().map(ResizeSpec::Scale),
                cli.sidelen.map(ResizeSpec::SideLength),
            ],
        )?;

        Ok(Configuration {
            input_path,
            output_path,
            extension,
            traversal_mode,
            segmentation_spec,
            color_space,
            resize_spec,
            num_iterations: cli.itt,
            coherence_weight: cli.coh.clone(),
            enforce_connectivity: !cli.no_enforce,
            verbose: cli.verbose,
        })
    }
}

/// Returns the single supplied option of an exclusive group, if any.
///
/// `candidates[i]` corresponds to `flags[i]`.
fn select_optional<T, const N: usize>(
    group: &'static str,
    flags: &'static [&'static str],
    candidates: [Option<T>; N],
) -> Result<Option<T>, SegmenterError> {
    let mut supplied = Vec::new();
    let mut chosen = None;
    for (flag, candidate) in flags.iter().zip(candidates) {
        if let Some(value) = candidate {
            supplied.push(*flag);
            chosen = Some(value);
        }
    }
    if supplied.len() > 1 {
        return Err(SegmenterError::MutuallyExclusiveViolation {
            group,
            flags: supplied,
        });
    }
    Ok(chosen)
}

/// Like `select_optional`, but the group is mandatory.
fn select_required<T, const N: usize>(
    group: &'static str,
    flags: &'static [&'static str],
    candidates: [Option<T>; N],
) -> Result<T, SegmenterError> {
    select_optional(group, flags, candidates)?
        .ok_or(SegmenterError::RequiredGroupUnsatisfied { group, flags })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::normalize_args;
    use clap::Parser;

    fn validate(args: &[&str]) -> Result<Configuration, SegmenterError> {
        let mut argv = vec!["slic-runner"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(normalize_args(argv)).expect("arguments should parse");
        Configuration::from_cli(&cli)
    }

    const REQUIRED: [&str; 6] = ["-i", "/a", "-o", "/b", "-e", ".png"];

    fn with_required<'a>(extra: &[&'a str]) -> Vec<&'a str> {
        let mut args = REQUIRED.to_vec();
        args.extend_from_slice(extra);
        args
    }

    #[test]
    fn minimal_valid_configuration() {
        let config = validate(&with_required(&["--num", "--RGB"])).unwrap();
        assert_eq!(config.input_path, PathBuf::from("/a"));
        assert_eq!(config.output_path, PathBuf::from("/b"));
        assert_eq!(config.extension, ".png");
        assert_eq!(config.segmentation_spec, SegmentationSpec::NumSegments(128));
        assert_eq!(config.color_space, ColorSpace::Rgb);
        assert_eq!(config.traversal_mode, TraversalMode::None);
        assert_eq!(config.resize_spec, None);
        assert_eq!(config.num_iterations, None);
        assert_eq!(config.coherence_weight, None);
        assert!(config.enforce_connectivity);
        assert!(!config.verbose);
    }

    #[test]
    fn each_missing_required_field_is_named() {
        let cases = [
            (vec!["-o", "/b", "-e", ".png"], "--input"),
            (vec!["-i", "/a", "-e", ".png"], "--output"),
            (vec!["-i", "/a", "-o", "/b"], "--ext"),
        ];
        for (mut args, field) in cases {
            args.extend(["--num", "--XYZ"]);
            match validate(&args) {
                Err(SegmenterError::MissingRequiredArgument(name)) => assert_eq!(name, field),
                other => panic!("expected missing {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn bare_size_uses_default() {
        let config = validate(&with_required(&["--size", "--LAB"])).unwrap();
        assert_eq!(config.segmentation_spec, SegmentationSpec::SpixelSize(256));
        assert_eq!(config.color_space, ColorSpace::Cielab);
    }

    #[test]
    fn explicit_segment_values_are_kept() {
        let config = validate(&with_required(&["--num=500", "--XYZ"])).unwrap();
        assert_eq!(config.segmentation_spec, SegmentationSpec::NumSegments(500));
        let config = validate(&with_required(&["--size", "64", "--XYZ"])).unwrap();
        assert_eq!(config.segmentation_spec, SegmentationSpec::SpixelSize(64));
    }

    #[test]
    fn num_and_size_conflict() {
        match validate(&with_required(&["--num", "--size", "--RGB"])) {
            Err(SegmenterError::MutuallyExclusiveViolation { group, flags }) => {
                assert_eq!(group, "segmentation");
                assert_eq!(flags, vec!["--num", "--size"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn segmentation_group_is_required() {
        match validate(&with_required(&["--RGB"])) {
            Err(SegmenterError::RequiredGroupUnsatisfied { group, .. }) => {
                assert_eq!(group, "segmentation")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn color_space_group_rules() {
        match validate(&with_required(&["--num", "--XYZ", "--LAB"])) {
            Err(SegmenterError::MutuallyExclusiveViolation { group, flags }) => {
                assert_eq!(group, "color space");
                assert_eq!(flags, vec!["--XYZ", "--LAB"]);
            }
            other => panic!("unexpected {:?}", other),
        }
        match validate(&with_required(&["--num", "--XYZ", "--RGB", "--LAB"])) {
            Err(SegmenterError::MutuallyExclusiveViolation { flags, .. }) => {
                assert_eq!(flags.len(), 3)
            }
            other => panic!("unexpected {:?}", other),
        }
        match validate(&with_required(&["--num"])) {
            Err(SegmenterError::RequiredGroupUnsatisfied { group, flags }) => {
                assert_eq!(group, "color space");
                assert_eq!(flags, COLOR_SPACE_FLAGS);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn traversal_modes() {
        let config = validate(&with_required(&["--num", "--RGB", "-r"])).unwrap();
        assert_eq!(config.traversal_mode, TraversalMode::SimpleRecursive);
        let config = validate(&with_required(&["--num", "--RGB", "-ls"])).unwrap();
        assert_eq!(config.traversal_mode, TraversalMode::LargeScaleRecursive);
        assert!(matches!(
            validate(&with_required(&["--num", "--RGB", "-ls", "-r"])),
            Err(SegmenterError::MutuallyExclusiveViolation { group: "traversal", .. })
        ));
    }

    #[test]
    fn resize_specs() {
        let config = validate(&with_required(&["--num", "--RGB", "-s", "0.5"])).unwrap();
        match config.resize_spec {
            Some(ResizeSpec::Scale(scale)) => assert_eq!(scale.value(), 0.5),
            other => panic!("unexpected {:?}", other),
        }
        let config = validate(&with_required(&["--num", "--RGB", "--sidelen", "480"])).unwrap();
        assert_eq!(config.resize_spec, Some(ResizeSpec::SideLength(480)));
        assert!(matches!(
            validate(&with_required(&["--num", "--RGB", "-s", "2", "--sidelen", "480"])),
            Err(SegmenterError::MutuallyExclusiveViolation { group: "resize", .. })
        ));
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let config =
            validate(&with_required(&["--num", "--RGB", "--coh", "7.5", "--itt", "0"])).unwrap();
        assert_eq!(config.coherence_weight.map(|w| w.value()), Some(7.5));
        assert_eq!(config.num_iterations, Some(0));
    }

    #[test]
    fn float_values_keep_their_spelling() {
        let config =
            validate(&with_required(&["--num", "--RGB", "--coh", "1.0", "-s", "0.50"])).unwrap();
        let weight = config.coherence_weight.unwrap();
        assert_eq!(weight.value(), 1.0);
        assert_eq!(weight.as_str(), "1.0");
        match config.resize_spec {
            Some(ResizeSpec::Scale(scale)) => assert_eq!(scale.to_string(), "0.50"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn float_value_rejects_non_numbers() {
        assert!("half".parse::<FloatValue>().is_err());
        assert_eq!("nan".parse::<FloatValue>().unwrap().as_str(), "nan");
    }

    #[test]
    fn required_fields_are_checked_before_groups() {
        assert!(matches!(
            validate(&["--num", "--size"]),
            Err(SegmenterError::MissingRequiredArgument("--input"))
        ));
    }
}
