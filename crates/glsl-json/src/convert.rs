//! Conversion of a single shader file into a [`ShaderRecord`]

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shader::{ShaderFileName, ShaderRecord};
use crate::source::{Declarations, HeaderPolicy, LineNormalizer, ShaderPatterns};

/// Reasons a shader file is skipped
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Could not open file: {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read file: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unrecognised file type: {}", .path.display())]
    UnrecognisedFileType { path: PathBuf },
}

/// Settings that change how shader sources are filtered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Which first-line headers are accepted
    pub header_policy: HeaderPolicy,
}

/// Turns shader files into records
///
/// Owns the compiled [`ShaderPatterns`], so a single converter should be reused for
/// every file of a run.
#[derive(Debug, Clone, Default)]
pub struct ShaderConverter {
    patterns: ShaderPatterns,
    options: ConvertOptions,
}

impl ShaderConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            patterns: ShaderPatterns::new(),
            options,
        }
    }

    /// Converts the shader file at `path`
    ///
    /// Syntax errors inside the file are logged and the offending lines dropped;
    /// only problems with the file itself are returned as errors.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - The path does not follow the `<dir>/<name>.(vs|fs)[.glsl]` convention
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<ShaderRecord, ConvertError> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("convert", path = %path.display()).entered();

        let mut file = File::open(path).map_err(|source| ConvertError::Open { path: path.to_path_buf(), source })?;

        let file_name = ShaderFileName::parse(&self.patterns, &path.to_string_lossy())
            .ok_or_else(|| ConvertError::UnrecognisedFileType { path: path.to_path_buf() })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|source| ConvertError::Read { path: path.to_path_buf(), source })?;

        // Invalid UTF-8 becomes U+FFFD, which the shape check then rejects
        let text = String::from_utf8_lossy(&bytes);

        let record = self.convert_source(file_name, &text);
        tracing::debug!(
            id = %record.id,
            attributes = record.attributes.len(),
            uniforms = record.uniforms.len(),
            "Converted shader"
        );
        Ok(record)
    }

    /// Converts shader source text that has already been read
    ///
    /// # Arguments
    /// * `file_name` - Name and type of the shader, usually parsed from its path
    /// * `text` - Complete shader source
    pub fn convert_source(&self, file_name: ShaderFileName, text: &str) -> ShaderRecord {
        let normalizer = LineNormalizer::new(&self.patterns, self.options.header_policy);
        let mut declarations = Declarations::default();
        let mut source = String::new();

        for (index, raw_line) in text.lines().enumerate() {
            let Some(line) = normalizer.normalize(raw_line, index + 1) else {
                continue;
            };

            declarations.collect(&self.patterns, &line);
            source.push_str(&line);
            source.push('\n');
        }

        ShaderRecord::new(file_name, declarations, source)
    }
}
