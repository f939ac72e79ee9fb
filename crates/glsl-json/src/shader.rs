//! Shader identity and the per-shader record written to the output document

use serde::Serialize;

use crate::source::{Declarations, ShaderPatterns};

/// `GL_VERTEX_SHADER` enum value
pub const GL_VERTEX_SHADER: u32 = 0x8B31;
/// `GL_FRAGMENT_SHADER` enum value
pub const GL_FRAGMENT_SHADER: u32 = 0x8B30;

/// Pipeline stage of a shader, derived from its file suffix
///
/// Serialized as the matching GL shader type enum so consumers can pass it
/// straight to `glCreateShader`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum ShaderType {
    /// `.vs` files
    Vertex,
    /// `.fs` files
    Fragment,
}

impl ShaderType {
    /// Maps a file suffix (`vs` or `fs`) to a shader type
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "vs" => Some(ShaderType::Vertex),
            "fs" => Some(ShaderType::Fragment),
            _ => None,
        }
    }

    /// The file suffix used for this shader type
    pub fn suffix(&self) -> &'static str {
        match self {
            ShaderType::Vertex => "vs",
            ShaderType::Fragment => "fs",
        }
    }

    /// The GL enum value for this shader type
    pub fn gl_enum(&self) -> u32 {
        match self {
            ShaderType::Vertex => GL_VERTEX_SHADER,
            ShaderType::Fragment => GL_FRAGMENT_SHADER,
        }
    }
}

impl From<ShaderType> for u32 {
    fn from(value: ShaderType) -> Self {
        value.gl_enum()
    }
}

/// Name and type of a shader, parsed from its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderFileName {
    /// File stem without the `.vs`/`.fs` and optional `.glsl` suffixes
    pub name: String,
    pub r#type: ShaderType,
}

impl ShaderFileName {
    /// Parses a shader path of the form `<dir><sep><name>.(vs|fs)[.glsl]`
    ///
    /// Both `\` and `/` are accepted as the separator, but one has to be present:
    /// a bare `basic.vs` is rejected.
    pub fn parse(patterns: &ShaderPatterns, path: &str) -> Option<Self> {
        let caps = patterns.file_name.captures(path)?;
        let r#type = ShaderType::from_suffix(&caps[2])?;
        Some(Self {
            name: caps[1].to_string(),
            r#type,
        })
    }

    /// Document key for this shader, `<name>.<vs|fs>`
    pub fn id(&self) -> String {
        format!("{}.{}", self.name, self.r#type.suffix())
    }
}

/// Everything the output document records about one shader
///
/// Fields serialize in declaration order; `id` is the document key and is not
/// repeated inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShaderRecord {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: ShaderType,
    pub attributes: Vec<String>,
    pub uniforms: Vec<String>,
    /// Normalized source, one kept line per `\n`-terminated line
    pub source: String,
}

impl ShaderRecord {
    pub fn new(file_name: ShaderFileName, declarations: Declarations, source: String) -> Self {
        Self {
            id: file_name.id(),
            name: file_name.name,
            r#type: file_name.r#type,
            attributes: declarations.attributes,
            uniforms: declarations.uniforms,
            source,
        }
    }
}
