//! Shader loading, compilation and linking.
//!
//! Shaders are WGSL files read from disk at startup. "Compiling" parses and
//! validates each file with naga; "linking" checks that the fragment stage
//! only reads what the vertex stage writes. Both happen before any GPU object
//! exists, so failures surface with the compiler's own diagnostic text.

mod error;
mod interface;
mod program;
mod source;

pub use error::ShaderError;
pub use program::{CompiledStage, ShaderProgram};
pub use source::{ShaderSource, ShaderStage};
