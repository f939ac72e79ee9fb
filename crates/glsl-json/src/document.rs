//! The aggregated output document and its JSON rendering
//!
//! The document is written as a tab-indented JSON object keyed by shader id:
//!
//! ```text
//! {
//! 	"basic.vs": {
//! 		"name": "basic",
//! 		"type": 35633,
//! 		...
//! 	}
//! }
//! ```
//!
//! All strings go through serde_json, so quotes and backslashes in names or
//! sources are escaped.

use std::io;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::shader::ShaderRecord;

/// File name of the aggregated document inside the output directory
pub const OUTPUT_FILE_NAME: &str = "shader-source.json";

/// Shader records keyed by id, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    records: Vec<ShaderRecord>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, keeping input order
    ///
    /// A record whose id is already present replaces the earlier one in place,
    /// so every key appears once in the rendered document.
    ///
    /// # Returns
    /// The replaced record, if any
    pub fn insert(&mut self, record: ShaderRecord) -> Option<ShaderRecord> {
        match self.records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => Some(std::mem::replace(existing, record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ShaderRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[ShaderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Renders the whole document
    ///
    /// An empty document renders as `{\n}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = String::from("{\n");
        for (index, record) in self.records.iter().enumerate() {
            if index > 0 {
                json.push_str(",\n");
            }
            json.push('\t');
            json.push_str(&serde_json::to_string(&record.id)?);
            json.push_str(": ");
            json.push_str(&to_tabbed_json(record)?.replace('\n', "\n\t"));
        }
        if !self.records.is_empty() {
            json.push('\n');
        }
        json.push('}');
        Ok(json)
    }
}

/// Contents of the per-shader ES module
#[derive(Serialize)]
struct ModuleRecord<'a> {
    attributes: &'a [String],
    uniforms: &'a [String],
    source: &'a str,
}

/// Renders a record as an ES module exporting its attributes, uniforms and source
pub fn to_module(record: &ShaderRecord) -> serde_json::Result<String> {
    let module = ModuleRecord {
        attributes: &record.attributes,
        uniforms: &record.uniforms,
        source: &record.source,
    };
    Ok(format!("export default {};\n", to_tabbed_json(&module)?))
}

/// File name of the ES module written for a record, `<id>.ts`
pub fn module_file_name(record: &ShaderRecord) -> String {
    format!("{}.ts", record.id)
}

/// Pretty-prints a value with tab indentation
fn to_tabbed_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
