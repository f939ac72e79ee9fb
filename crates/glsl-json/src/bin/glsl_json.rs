//! GLSL to JSON converter
//!
//! Bundles GLSL vertex and fragment shaders into a single `shader-source.json` document
//! listing, per shader, its type, attribute names, uniform names and normalized source.
//!
//! # Usage
//! ```bash
//! glsl-json --input shaders/basic.vs shaders/basic.fs --output build/
//! ```

use clap::Parser;
use glsl_json::{ConvertOptions, RunConfig, source::HeaderPolicy};
use std::path::PathBuf;
use std::process;

/// Command-line arguments for the converter
#[derive(Parser)]
#[command(version, about = "Converts GLSL vertex and fragment shaders into a single JSON document")]
struct Args {
    /// Shader files to convert (`.vs`, `.fs`, `.vs.glsl` or `.fs.glsl`)
    #[arg(long, short, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Output directory. `shader-source.json` is appended as-is, so include the trailing separator
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only accept `#include <glsl-DDD.h>` headers on the first line, not `#version`
    #[arg(long)]
    include_only: bool,

    /// Also write one `<name>.<vs|fs>.ts` ES module per shader
    #[arg(long)]
    emit_modules: bool,

    /// Log per-file progress
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    fn header_policy(&self) -> HeaderPolicy {
        if self.include_only { HeaderPolicy::IncludeOnly } else { HeaderPolicy::AcceptVersion }
    }

    fn into_run_config(self) -> RunConfig {
        let header_policy = self.header_policy();
        RunConfig {
            inputs: self.input,
            output_dir: self.output.unwrap_or_default(),
            emit_modules: self.emit_modules,
            options: ConvertOptions { header_policy },
        }
    }
}

fn main() {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt().with_max_level(args.log_level()).with_writer(std::io::stderr).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error installing logger: {e}");
        process::exit(1);
    }

    tracing::info!("Running...");
    for input in &args.input {
        tracing::debug!("Input: {}", input.display());
    }

    let config = args.into_run_config();
    tracing::debug!("Output directory: {}", config.output_dir.display());

    if let Err(e) = glsl_json::run(&config) {
        tracing::error!("{e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_inputs_and_output() {
        let args = Args::try_parse_from(["glsl-json", "-i", "a.vs", "b.fs", "-o", "out/"]).unwrap();
        assert_eq!(args.input, vec![PathBuf::from("a.vs"), PathBuf::from("b.fs")]);
        assert_eq!(args.output.as_deref(), Some(Path::new("out/")));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        let config = args.into_run_config();
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.output_dir, PathBuf::from("out/"));
        assert!(!config.emit_modules);
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = Args::try_parse_from(["glsl-json"]).unwrap().into_run_config();
        assert!(config.inputs.is_empty());
        assert_eq!(config.output_dir, PathBuf::new());
        assert_eq!(config.options.header_policy, HeaderPolicy::AcceptVersion);
    }

    #[test]
    fn test_include_only_and_emit_modules() {
        let config = Args::try_parse_from(["glsl-json", "--include-only", "--emit-modules", "--input", "a.vs"])
            .unwrap()
            .into_run_config();
        assert_eq!(config.options.header_policy, HeaderPolicy::IncludeOnly);
        assert!(config.emit_modules);
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Args::try_parse_from(["glsl-json", "-v"]).unwrap().log_level(), tracing::Level::DEBUG);
        assert_eq!(Args::try_parse_from(["glsl-json", "--quiet"]).unwrap().log_level(), tracing::Level::WARN);

        let conflict = Args::try_parse_from(["glsl-json", "-v", "-q"]);
        assert_eq!(conflict.err().map(|e| e.kind()), Some(clap::error::ErrorKind::ArgumentConflict));
    }
}
