//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! [`load_shader_source`] for reading shader text from disk, and [`Locations`] for the resolved
//! uniform and attribute locations of a linked program.
//! This module also provides the [`Uniform`] trait for setting uniform variables.

use std::{path::Path, sync::Arc};

use fxhash::FxHashMap;
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

use crate::error::{ShaderError, ShaderStage};

/// Reads the full text of a shader source file.
///
/// The returned buffer is owned by the caller and freed on every path, including errors.
pub fn load_shader_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShaderError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ShaderError::Read {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the compiler log is carried in the error and the shader object is deleted.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(ShaderError::Create)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }

            log::debug!("compiled {stage} shader");
            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        log::trace!("deleting {} shader", self.stage);
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Uploads the value to the given location of the currently bound program.
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self);
        }
    }
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform for Vec3 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform for Vec4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_4_f32(Some(location), self.x, self.y, self.z, self.w);
        }
    }
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

/// Uniform and attribute locations looked up by name after linking.
///
/// A name the program does not use maps to `None`. That is not an error: drivers strip
/// unused inputs, and callers are expected to skip them.
#[derive(Debug, Default)]
pub struct Locations {
    uniforms: FxHashMap<String, Option<glow::UniformLocation>>,
    attributes: FxHashMap<String, Option<u32>>,
}

impl Locations {
    /// Sentinel reported for a name that was not found.
    pub const NOT_FOUND: i32 = -1;

    pub fn insert_uniform(&mut self, name: &str, location: Option<glow::UniformLocation>) {
        self.uniforms.insert(name.to_string(), location);
    }

    pub fn insert_attribute(&mut self, name: &str, location: Option<u32>) {
        self.attributes.insert(name.to_string(), location);
    }

    pub fn uniform(&self, name: &str) -> Option<&glow::UniformLocation> {
        self.uniforms.get(name).and_then(Option::as_ref)
    }

    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied().flatten()
    }

    /// The attribute index as GL reports it, [`Self::NOT_FOUND`] when missing.
    pub fn attribute_index(&self, name: &str) -> i32 {
        self.attribute(name)
            .map_or(Self::NOT_FOUND, |index| index as i32)
    }

    /// Names that were queried but not found.
    pub fn missing(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .uniforms
            .iter()
            .filter(|(_, loc)| loc.is_none())
            .map(|(name, _)| name.as_str())
            .chain(
                self.attributes
                    .iter()
                    .filter(|(_, loc)| loc.is_none())
                    .map(|(name, _)| name.as_str()),
            )
            .collect();
        missing.sort_unstable();
        missing
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl.create_program().map_err(ShaderError::Create)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            log::debug!("linked program from {} shaders", shaders.len());
            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Reads, compiles and links a vertex/fragment pair.
    ///
    /// Both files are read before any GL object is created. The intermediate shader objects
    /// are deleted once linking finishes, whatever the outcome.
    pub fn from_files(gl: &Arc<glow::Context>, vertex: &Path, fragment: &Path) -> Result<Self, ShaderError> {
        let vertex_source = load_shader_source(vertex)?;
        let fragment_source = load_shader_source(fragment)?;

        let vert = Shader::new(gl, ShaderStage::Vertex, &vertex_source)?;
        let frag = Shader::new(gl, ShaderStage::Fragment, &fragment_source)?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Looks up the given uniform and attribute names.
    pub fn resolve_locations(&self, uniforms: &[&str], attributes: &[&str]) -> Locations {
        let mut locations = Locations::default();
        unsafe {
            for name in uniforms {
                locations.insert_uniform(name, self.gl.get_uniform_location(self.id, name));
            }
            for name in attributes {
                locations.insert_attribute(name, self.gl.get_attrib_location(self.id, name));
            }
        }
        let missing = locations.missing();
        if !missing.is_empty() {
            log::debug!("inputs not used by program: {}", missing.join(", "));
        }
        locations
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform on the bound program. A missing location is silently skipped.
    pub fn set_uniform<T: Uniform>(&self, location: Option<&glow::UniformLocation>, value: T) {
        if let Some(location) = location {
            value.set_uniform(&self.gl, location);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.use_program(None);
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hellogl-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_shader_source_reads_everything() {
        let path = temp_path("vert.glsl");
        let source = "#version 330 core\nin vec3 a_position;\nvoid main() { gl_Position = vec4(a_position, 1.0); }\n";
        std::fs::write(&path, source).unwrap();
        let loaded = load_shader_source(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_load_missing_shader_source() {
        let path = temp_path("missing.glsl");
        match load_shader_source(&path) {
            Err(ShaderError::FileNotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_utf8_is_read_error() {
        let path = temp_path("binary.glsl");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let result = load_shader_source(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ShaderError::Read { .. })));
    }

    #[test]
    fn test_missing_attribute_reports_sentinel() {
        let mut locations = Locations::default();
        locations.insert_attribute("a_position", Some(0));
        locations.insert_attribute("a_normal", None);

        assert_eq!(locations.attribute_index("a_position"), 0);
        assert_eq!(locations.attribute_index("a_normal"), Locations::NOT_FOUND);
        assert_eq!(locations.attribute_index("never_queried"), Locations::NOT_FOUND);
    }

    #[test]
    fn test_missing_names_are_listed() {
        let mut locations = Locations::default();
        locations.insert_uniform("u_model", None);
        locations.insert_attribute("a_uv", None);
        locations.insert_attribute("a_position", Some(2));

        assert!(locations.uniform("u_model").is_none());
        assert_eq!(locations.missing(), vec!["a_uv", "u_model"]);
    }
}
