//! Command line arguments shared by both figure programs.
//!
//! Usage:
//!   clip_space  [FIGURE] [--shaders DIR] [--list] [-h|--help]
//!   camera_view [FIGURE] [--shaders DIR] [--list] [-h|--help]

use std::fmt;
use std::path::PathBuf;

pub const VERTEX_SHADER_FILE: &str = "figure.vert.wgsl";
pub const FRAGMENT_SHADER_FILE: &str = "figure.frag.wgsl";

/// Directory holding the shipped shader pair.
pub fn default_shader_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders")
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudioArgs {
    /// Preset name; `None` selects the program's default figure.
    pub figure: Option<String>,
    pub shader_dir: PathBuf,
    /// Print the presets and exit.
    pub list: bool,
    pub help: bool,
}

impl Default for StudioArgs {
    fn default() -> Self {
        Self {
            figure: None,
            shader_dir: default_shader_dir(),
            list: false,
            help: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue(&'static str),
    UnknownFlag(String),
    UnexpectedArgument(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue(flag) => write!(f, "{flag} expects a value"),
            ArgsError::UnknownFlag(flag) => write!(f, "unknown option {flag}"),
            ArgsError::UnexpectedArgument(arg) => write!(f, "unexpected argument {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl StudioArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--shaders" => {
                    let dir = args.next().ok_or(ArgsError::MissingValue("--shaders"))?;
                    out.shader_dir = PathBuf::from(dir);
                }
                "--list" => out.list = true,
                "-h" | "--help" => out.help = true,
                flag if flag.starts_with('-') => return Err(ArgsError::UnknownFlag(arg)),
                _ if out.figure.is_none() => out.figure = Some(arg),
                _ => return Err(ArgsError::UnexpectedArgument(arg)),
            }
        }

        Ok(out)
    }

    pub fn from_env() -> Result<Self, ArgsError> {
        Self::parse(std::env::args().skip(1))
    }

    pub fn vertex_shader(&self) -> PathBuf {
        self.shader_dir.join(VERTEX_SHADER_FILE)
    }

    pub fn fragment_shader(&self) -> PathBuf {
        self.shader_dir.join(FRAGMENT_SHADER_FILE)
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} [FIGURE] [--shaders DIR] [--list] [-h|--help]\n\
         \n  FIGURE          preset to draw (default: the first one listed)\
         \n  --shaders DIR   directory containing {VERTEX_SHADER_FILE} and {FRAGMENT_SHADER_FILE}\
         \n  --list          print the available presets and exit\
         \n  -h, --help      print this message and exit"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StudioArgs, ArgsError> {
        StudioArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_selects_defaults() {
        assert_eq!(parse(&[]).unwrap(), StudioArgs::default());
    }

    #[test]
    fn figure_and_shader_dir() {
        let args = parse(&["orbit", "--shaders", "/tmp/shaders"]).unwrap();
        assert_eq!(args.figure.as_deref(), Some("orbit"));
        assert_eq!(args.vertex_shader(), PathBuf::from("/tmp/shaders/figure.vert.wgsl"));
        assert_eq!(args.fragment_shader(), PathBuf::from("/tmp/shaders/figure.frag.wgsl"));
    }

    #[test]
    fn flags_may_precede_the_figure() {
        let args = parse(&["--list", "far"]).unwrap();
        assert!(args.list);
        assert_eq!(args.figure.as_deref(), Some("far"));
    }

    #[test]
    fn shaders_flag_needs_a_value() {
        assert_eq!(parse(&["--shaders"]), Err(ArgsError::MissingValue("--shaders")));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert_eq!(parse(&["--fov", "60"]), Err(ArgsError::UnknownFlag("--fov".into())));
    }

    #[test]
    fn second_positional_is_rejected() {
        assert_eq!(
            parse(&["near", "far"]),
            Err(ArgsError::UnexpectedArgument("far".into()))
        );
    }

    #[test]
    fn usage_lists_every_accepted_flag() {
        let text = usage("clip_space");
        assert!(text.starts_with("usage: clip_space "));
        for flag in ["--shaders", "--list", "-h", "--help"] {
            assert!(text.contains(flag), "{flag} missing from usage");
        }
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn default_shader_dir_ships_both_stages() {
        let args = StudioArgs::default();
        assert!(args.vertex_shader().is_file());
        assert!(args.fragment_shader().is_file());
    }
}
