//! Error types for every stage that can fail.
//!
//! Bootstrap errors are fatal to the process. Shader and scene errors only abort scene
//! initialization; the window keeps running so the user can close it.

use std::{fmt, io, path::PathBuf};

/// Failure while bringing up SDL, the window, or the GL function loader.
#[derive(Debug)]
pub enum BootstrapError {
    Init(String),
    Video(String),
    Window(String),
    Context(String),
    Loader(String),
    EventPump(String),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "failed to initialize SDL: {e}"),
            Self::Video(e) => write!(f, "failed to initialize the video subsystem: {e}"),
            Self::Window(e) => write!(f, "failed to create window: {e}"),
            Self::Context(e) => write!(f, "failed to create OpenGL context: {e}"),
            Self::Loader(e) => write!(f, "failed to load OpenGL functions: {e}"),
            Self::EventPump(e) => write!(f, "failed to obtain the event pump: {e}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

/// The pipeline stage a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum for this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// File name of this stage's source inside a shader directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Vertex => "vert.glsl",
            Self::Fragment => "frag.glsl",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure while loading, compiling, or linking shaders.
#[derive(Debug)]
pub enum ShaderError {
    FileNotFound { path: PathBuf },
    Read { path: PathBuf, source: io::Error },
    Create(String),
    Compile { stage: ShaderStage, log: String },
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "file not found: {}", path.display()),
            Self::Read { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Create(e) => write!(f, "failed to create shader object: {e}"),
            Self::Compile { stage, log } => write!(f, "{stage} shader failed to compile:\n{log}"),
            Self::Link { log } => write!(f, "program failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure while building the scene's GPU resources.
#[derive(Debug)]
pub enum SceneError {
    Shader(ShaderError),
    Buffer(String),
    Texture(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shader(e) => write!(f, "{e}"),
            Self::Buffer(e) => write!(f, "failed to create GPU buffer: {e}"),
            Self::Texture(e) => write!(f, "failed to create texture: {e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shader(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShaderError> for SceneError {
    fn from(e: ShaderError) -> Self {
        Self::Shader(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_message() {
        let err = ShaderError::FileNotFound {
            path: PathBuf::from("shaders/quad/vert.glsl"),
        };
        assert_eq!(err.to_string(), "file not found: shaders/quad/vert.glsl");
    }

    #[test]
    fn test_compile_message_names_stage() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".to_string(),
        };
        assert!(err.to_string().starts_with("fragment shader failed to compile"));
        assert!(err.to_string().ends_with("0:3: syntax error"));
    }

    #[test]
    fn test_scene_error_wraps_shader_error() {
        let err: SceneError = ShaderError::Link {
            log: "undefined varying".to_string(),
        }
        .into();
        assert!(matches!(err, SceneError::Shader(ShaderError::Link { .. })));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_stage_files() {
        assert_eq!(ShaderStage::Vertex.file_name(), "vert.glsl");
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }
}
