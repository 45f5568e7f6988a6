use std::path::Path;

use super::interface::{self, Slot};
use super::{ShaderError, ShaderSource, ShaderStage};

/// A parsed and validated shader stage.
#[derive(Debug)]
pub struct CompiledStage {
    pub source: ShaderSource,
    /// Name of the stage's entry point function.
    pub entry_point: String,
    entry_index: usize,
    module: naga::Module,
}

impl CompiledStage {
    /// Parses and validates `source`, then locates its entry point.
    pub fn compile(source: ShaderSource) -> Result<Self, ShaderError> {
        let name = source.name();
        let stage = source.stage;
        let compile_err = |log: String| ShaderError::Compile {
            name: name.clone(),
            stage,
            log,
        };

        let module = naga::front::wgsl::parse_str(&source.code)
            .map_err(|e| compile_err(e.emit_to_string(&source.code)))?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|e| compile_err(e.emit_to_string(&source.code)))?;

        let (entry_index, entry_point) = module
            .entry_points
            .iter()
            .enumerate()
            .find(|(_, ep)| ep.stage == stage.naga())
            .map(|(i, ep)| (i, ep.name.clone()))
            .ok_or_else(|| ShaderError::MissingEntryPoint {
                name: name.clone(),
                stage,
            })?;

        log::debug!("compiled {stage} shader {name} (entry point `{entry_point}`)");

        Ok(Self {
            source,
            entry_point,
            entry_index,
            module,
        })
    }

    fn function(&self) -> &naga::Function {
        &self.module.entry_points[self.entry_index].function
    }

    pub(crate) fn inputs(&self) -> Vec<Slot> {
        interface::inputs(&self.module, self.function())
    }

    pub(crate) fn outputs(&self) -> Vec<Slot> {
        interface::outputs(&self.module, self.function())
    }

    /// Creates the GPU module. The source is already validated.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        let label = format!("figures {} shader", self.source.name());
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(self.source.code.as_str().into()),
        })
    }
}

/// A linked vertex + fragment pair.
#[derive(Debug)]
pub struct ShaderProgram {
    pub vertex: CompiledStage,
    pub fragment: CompiledStage,
}

impl ShaderProgram {
    /// Loads, compiles and links two WGSL files.
    pub fn load(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self, ShaderError> {
        Self::compile_and_link(
            ShaderSource::load(vertex, ShaderStage::Vertex)?,
            ShaderSource::load(fragment, ShaderStage::Fragment)?,
        )
    }

    /// Compiles both stages and links them.
    pub fn compile_and_link(vertex: ShaderSource, fragment: ShaderSource) -> Result<Self, ShaderError> {
        let vertex = CompiledStage::compile(vertex)?;
        let fragment = CompiledStage::compile(fragment)?;
        link(&vertex, &fragment)?;

        log::info!(
            "linked shader program {} + {}",
            vertex.source.name(),
            fragment.source.name()
        );

        Ok(Self { vertex, fragment })
    }

    /// Checks that the vertex stage reads `@location(location)` as a float
    /// vector of `components` (or an `f32` scalar when `components == 1`).
    pub fn require_vertex_input(&self, location: u32, components: u8) -> Result<(), ShaderError> {
        let inputs = self.vertex.inputs();
        let Some(slot) = inputs.iter().find(|s| s.location == location) else {
            return Err(ShaderError::Link {
                log: format!(
                    "{}: vertex attribute @location({location}) is not consumed",
                    self.vertex.source.name()
                ),
            });
        };

        let f32_scalar = naga::Scalar::F32;
        let matches = match &slot.ty {
            naga::TypeInner::Scalar(s) => components == 1 && *s == f32_scalar,
            naga::TypeInner::Vector { size, scalar } => *size as u8 == components && *scalar == f32_scalar,
            _ => false,
        };

        if matches {
            Ok(())
        } else {
            Err(ShaderError::Link {
                log: format!(
                    "{}: {} does not match the {components}-component f32 vertex buffer",
                    self.vertex.source.name(),
                    slot.describe()
                ),
            })
        }
    }
}

/// Every location the fragment stage reads must be written by the vertex
/// stage with the same type and interpolation.
fn link(vertex: &CompiledStage, fragment: &CompiledStage) -> Result<(), ShaderError> {
    let written = vertex.outputs();
    let mut problems = Vec::new();

    for input in fragment.inputs() {
        match written.iter().find(|o| o.location == input.location) {
            None => problems.push(format!(
                "{} reads {} which {} never writes",
                fragment.source.name(),
                input.describe(),
                vertex.source.name()
            )),
            Some(output) if output.ty != input.ty => problems.push(format!(
                "{} reads {} but {} writes {}",
                fragment.source.name(),
                input.describe(),
                vertex.source.name(),
                output.describe()
            )),
            Some(output)
                if output.interpolation != input.interpolation || output.sampling != input.sampling =>
            {
                problems.push(format!(
                    "{} reads {} interpolated as {} but {} writes it as {}",
                    fragment.source.name(),
                    input.describe(),
                    input.describe_interpolation(),
                    vertex.source.name(),
                    output.describe_interpolation()
                ))
            }
            Some(_) => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShaderError::Link {
            log: problems.join("\n"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) color: vec3<f32>, @location(1) position: vec4<f32>) -> VsOut {
    var out: VsOut;
    out.clip = position;
    out.color = color;
    return out;
}
"#;

    const FS: &str = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
"#;

    fn vs(code: &str) -> ShaderSource {
        ShaderSource::from_code("test.vert.wgsl", ShaderStage::Vertex, code)
    }

    fn fs(code: &str) -> ShaderSource {
        ShaderSource::from_code("test.frag.wgsl", ShaderStage::Fragment, code)
    }

    #[test]
    fn valid_pair_links() {
        let program = ShaderProgram::compile_and_link(vs(VS), fs(FS)).unwrap();
        assert_eq!(program.vertex.entry_point, "vs_main");
        assert_eq!(program.fragment.entry_point, "fs_main");
    }

    #[test]
    fn syntax_error_reports_compiler_log() {
        let err = ShaderProgram::compile_and_link(vs("fn broken( {"), fs(FS)).unwrap_err();
        let ShaderError::Compile { name, stage, log } = &err else {
            panic!("expected compile error, got {err}");
        };
        assert_eq!(name, "test.vert.wgsl");
        assert_eq!(*stage, ShaderStage::Vertex);
        assert!(!log.is_empty());
    }

    #[test]
    fn type_error_is_a_compile_error() {
        let bad = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let x: f32 = true;
    return vec4<f32>(x);
}
"#;
        let err = ShaderProgram::compile_and_link(vs(VS), fs(bad)).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn wrong_stage_has_no_entry_point() {
        let err = ShaderProgram::compile_and_link(vs(FS), fs(FS)).unwrap_err();
        assert!(matches!(err, ShaderError::MissingEntryPoint { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn unwritten_fragment_input_fails_to_link() {
        let reads_uv = r#"
@fragment
fn fs_main(@location(0) color: vec3<f32>, @location(3) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, uv.x);
}
"#;
        let err = ShaderProgram::compile_and_link(vs(VS), fs(reads_uv)).unwrap_err();
        let ShaderError::Link { log } = &err else {
            panic!("expected link error, got {err}");
        };
        assert!(log.contains("@location(3) vec2<f32>"), "{log}");
    }

    #[test]
    fn mismatched_types_fail_to_link() {
        let reads_vec4 = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;
        let err = ShaderProgram::compile_and_link(vs(VS), fs(reads_vec4)).unwrap_err();
        let ShaderError::Link { log } = &err else {
            panic!("expected link error, got {err}");
        };
        assert!(log.contains("writes @location(0) vec3<f32>"), "{log}");
    }

    #[test]
    fn mismatched_interpolation_fails_to_link() {
        let flat_vs = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) @interpolate(flat) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) color: vec3<f32>, @location(1) position: vec4<f32>) -> VsOut {
    var out: VsOut;
    out.clip = position;
    out.color = color;
    return out;
}
"#;
        let err = ShaderProgram::compile_and_link(vs(flat_vs), fs(FS)).unwrap_err();
        let ShaderError::Link { log } = &err else {
            panic!("expected link error, got {err}");
        };
        assert!(log.contains("interpolated as"), "{log}");
    }

    #[test]
    fn vertex_inputs_are_checked_against_buffers() {
        let program = ShaderProgram::compile_and_link(vs(VS), fs(FS)).unwrap();
        program.require_vertex_input(0, 3).unwrap();
        program.require_vertex_input(1, 4).unwrap();
        assert!(program.require_vertex_input(1, 3).is_err());
        assert!(program.require_vertex_input(2, 4).is_err());
    }
}
