use std::fmt;
use std::path::{Path, PathBuf};

use super::ShaderError;

/// Pipeline stage a shader file provides.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// WGSL source text for one stage.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// File path, or a descriptive label for in-memory sources.
    pub origin: PathBuf,
    pub stage: ShaderStage,
    pub code: String,
}

impl ShaderSource {
    /// Reads a WGSL file.
    pub fn load(path: impl AsRef<Path>, stage: ShaderStage) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded {stage} shader {} ({} bytes)", path.display(), code.len());

        Ok(Self {
            origin: path.to_path_buf(),
            stage,
            code,
        })
    }

    /// Wraps in-memory WGSL text.
    pub fn from_code(label: impl Into<PathBuf>, stage: ShaderStage, code: impl Into<String>) -> Self {
        Self {
            origin: label.into(),
            stage,
            code: code.into(),
        }
    }

    /// Short name for labels and messages.
    pub fn name(&self) -> String {
        self.origin
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.origin.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ShaderSource::load("does/not/exist.wgsl", ShaderStage::Vertex).unwrap_err();
        assert!(matches!(err, ShaderError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.wgsl"));
    }

    #[test]
    fn name_is_the_file_name() {
        let src = ShaderSource::from_code("shaders/figure.vert.wgsl", ShaderStage::Vertex, "");
        assert_eq!(src.name(), "figure.vert.wgsl");
    }
}
