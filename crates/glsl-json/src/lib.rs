//! GLSL to JSON shader bundling
//!
//! This crate turns a list of GLSL vertex (`.vs`) and fragment (`.fs`) shader files into a
//! single JSON document. Every line of a shader is trimmed of comments and whitespace and
//! checked against a conservative shape filter, and the names of its `attribute`/`in` and
//! `uniform` declarations are collected alongside the cleaned-up source.

mod convert;
mod document;
mod shader;

pub mod source;

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use convert::{ConvertError, ConvertOptions, ShaderConverter};
pub use document::{OUTPUT_FILE_NAME, OutputDocument, module_file_name, to_module};
pub use shader::{GL_FRAGMENT_SHADER, GL_VERTEX_SHADER, ShaderFileName, ShaderRecord, ShaderType};

/// Failures that abort a whole run
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not open the output file: {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize shader document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Everything a run needs to know
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Shader files to convert, in output order
    pub inputs: Vec<PathBuf>,
    /// Prefix that output file names are appended to
    ///
    /// No separator is inserted, so `out` writes `outshader-source.json` while
    /// `out/` writes `out/shader-source.json`.
    pub output_dir: PathBuf,
    /// Also write one ES module per shader next to the document
    pub emit_modules: bool,
    pub options: ConvertOptions,
}

/// Converts every input file, skipping the ones that cannot be converted
///
/// Skipped files are reported through `tracing` and leave no trace in the document.
/// Inputs that share an id collapse to a single entry: the last one wins and takes the
/// position of the first.
pub fn convert_files<P: AsRef<Path>>(converter: &ShaderConverter, inputs: &[P]) -> OutputDocument {
    let mut document = OutputDocument::new();
    for input in inputs {
        match converter.convert_file(input) {
            Ok(record) => {
                if let Some(replaced) = document.insert(record) {
                    tracing::warn!(id = %replaced.id, "Duplicate shader id, keeping {}", input.as_ref().display());
                }
            }
            Err(e) => tracing::warn!("{e}"),
        }
    }
    document
}

/// Joins the output directory and a file name by plain concatenation
pub fn output_path(output_dir: &Path, file_name: &str) -> PathBuf {
    let mut path = OsString::from(output_dir.as_os_str());
    path.push(file_name);
    PathBuf::from(path)
}

/// Converts all inputs and writes `shader-source.json`
///
/// Every output is rendered in memory before anything is written. Modules are written
/// first and the document last, so `shader-source.json` only appears once the whole run
/// has succeeded. Unconvertible inputs are skipped; only output failures end the run.
///
/// # Returns
/// The document that was written
///
/// # Errors
/// Returns an error if the document or a module cannot be serialized or written
pub fn run(config: &RunConfig) -> Result<OutputDocument, Error> {
    let converter = ShaderConverter::new(config.options);
    let document = convert_files(&converter, &config.inputs);

    let json = document.to_json()?;
    let modules = if config.emit_modules {
        document
            .records()
            .iter()
            .map(|record| Ok((output_path(&config.output_dir, &module_file_name(record)), to_module(record)?)))
            .collect::<Result<Vec<_>, Error>>()?
    } else {
        Vec::new()
    };

    for (module_path, module) in &modules {
        write_output(module_path, module)?;
        tracing::debug!("Wrote module {}", module_path.display());
    }

    let document_path = output_path(&config.output_dir, OUTPUT_FILE_NAME);
    write_output(&document_path, &json)?;
    tracing::info!("Wrote {} shaders to {}", document.len(), document_path.display());

    Ok(document)
}

fn write_output(path: &Path, contents: &str) -> Result<(), Error> {
    std::fs::write(path, contents).map_err(|source| Error::Output { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BASIC_VS: &str = "#include <glsl-300-es.h>\nin vec3 position;\nuniform mat4 mvp;\n";
    const BASIC_FS: &str = "\
#include <glsl-300-es.h>
precision mediump float; // default precision
in vec3 color;
out vec4 fragColor;
void main() {
    fragColor = vec4(color, 1.0);
}
";

    /// Output prefix with a trailing separator, the way callers usually pass it
    fn prefix(dir: &Path) -> PathBuf {
        output_path(dir, std::path::MAIN_SEPARATOR_STR)
    }

    #[test]
    fn test_output_path_concatenates() {
        assert_eq!(output_path(Path::new("out/"), OUTPUT_FILE_NAME), PathBuf::from("out/shader-source.json"));
        assert_eq!(output_path(Path::new("out"), OUTPUT_FILE_NAME), PathBuf::from("outshader-source.json"));
        assert_eq!(output_path(Path::new(""), OUTPUT_FILE_NAME), PathBuf::from("shader-source.json"));
    }

    #[test]
    fn test_run_end_to_end() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let vs = dir.join("basic.vs");
        let fs_path = dir.join("basic.fs.glsl");
        fs::write(&vs, BASIC_VS).unwrap();
        fs::write(&fs_path, BASIC_FS).unwrap();

        let config = RunConfig {
            inputs: vec![vs, fs_path],
            output_dir: prefix(dir),
            ..Default::default()
        };
        let document = run(&config).unwrap();
        assert_eq!(document.len(), 2);

        let written = fs::read_to_string(dir.join(OUTPUT_FILE_NAME)).unwrap();
        assert_eq!(written, document.to_json().unwrap());

        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["basic.vs"]["name"], "basic");
        assert_eq!(value["basic.vs"]["type"], 35633);
        assert_eq!(value["basic.vs"]["attributes"], serde_json::json!(["position"]));
        assert_eq!(value["basic.vs"]["uniforms"], serde_json::json!(["mvp"]));
        assert_eq!(value["basic.vs"]["source"], "#version 300 es\nin vec3 position;\nuniform mat4 mvp;\n");
        assert_eq!(value["basic.fs"]["type"], 35632);
        assert_eq!(value["basic.fs"]["attributes"], serde_json::json!(["color"]));
        assert_eq!(value["basic.fs"]["uniforms"], serde_json::json!([]));
        assert_eq!(
            value["basic.fs"]["source"],
            "#version 300 es\nprecision mediump float;\nin vec3 color;\nout vec4 fragColor;\nvoid main() {\nfragColor = vec4(color, 1.0);\n}\n"
        );
    }

    #[test]
    fn test_run_skips_unopenable_inputs() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let vs = dir.join("basic.vs");
        fs::write(&vs, BASIC_VS).unwrap();
        let unnamed = dir.join("notes.txt");
        fs::write(&unnamed, "not a shader").unwrap();

        let config = RunConfig {
            inputs: vec![vs, dir.join("missing.fs"), unnamed],
            output_dir: prefix(dir),
            ..Default::default()
        };
        let document = run(&config).unwrap();
        assert_eq!(document.len(), 1);
        assert!(document.get("basic.vs").is_some());

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.join(OUTPUT_FILE_NAME)).unwrap()).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_run_without_inputs() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let config = RunConfig {
            output_dir: prefix(dir),
            ..Default::default()
        };
        run(&config).unwrap();
        assert_eq!(fs::read_to_string(dir.join(OUTPUT_FILE_NAME)).unwrap(), "{\n}");
    }

    #[test]
    fn test_run_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let vs = dir.join("basic.vs");
        fs::write(&vs, BASIC_VS).unwrap();

        let config = RunConfig {
            inputs: vec![vs],
            output_dir: prefix(dir),
            ..Default::default()
        };
        run(&config).unwrap();
        let first = fs::read(dir.join(OUTPUT_FILE_NAME)).unwrap();
        run(&config).unwrap();
        let second = fs::read(dir.join(OUTPUT_FILE_NAME)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_emits_modules() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let vs = dir.join("basic.vs");
        fs::write(&vs, BASIC_VS).unwrap();

        let config = RunConfig {
            inputs: vec![vs],
            output_dir: prefix(dir),
            emit_modules: true,
            ..Default::default()
        };
        let document = run(&config).unwrap();

        let module = fs::read_to_string(dir.join("basic.vs.ts")).unwrap();
        assert_eq!(module, to_module(&document.records()[0]).unwrap());
        assert!(module.starts_with("export default {\n"));
    }

    #[test]
    fn test_run_fails_on_unwritable_output() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let config = RunConfig {
            output_dir: prefix(&dir.join("does-not-exist")),
            ..Default::default()
        };

        let result = run(&config);
        assert!(matches!(result, Err(Error::Output { .. })));
        assert!(!dir.join("does-not-exist").exists());
    }

    #[test]
    fn test_run_module_failure_leaves_no_document() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        let vs = dir.join("basic.vs");
        fs::write(&vs, BASIC_VS).unwrap();
        // A directory where the module file should go makes the module write fail
        fs::create_dir(dir.join("basic.vs.ts")).unwrap();

        let config = RunConfig {
            inputs: vec![vs],
            output_dir: prefix(dir),
            emit_modules: true,
            ..Default::default()
        };

        let result = run(&config);
        assert!(matches!(result, Err(Error::Output { ref path, .. }) if path.ends_with("basic.vs.ts")));
        assert!(!dir.join(OUTPUT_FILE_NAME).exists());
    }
}
