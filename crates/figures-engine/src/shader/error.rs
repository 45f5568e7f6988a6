use std::fmt;
use std::path::PathBuf;

use super::ShaderStage;

/// Shader loading, compilation or link failure.
///
/// `log` fields carry the compiler's diagnostic text verbatim.
#[derive(Debug)]
pub enum ShaderError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Compile {
        name: String,
        stage: ShaderStage,
        log: String,
    },
    MissingEntryPoint {
        name: String,
        stage: ShaderStage,
    },
    Link {
        log: String,
    },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Io { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
            ShaderError::Compile { name, stage, log } => {
                write!(f, "{stage} shader {name} failed to compile:\n{log}")
            }
            ShaderError::MissingEntryPoint { name, stage } => {
                write!(f, "{name} declares no @{stage} entry point")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
