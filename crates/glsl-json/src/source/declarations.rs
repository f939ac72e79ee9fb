//! Extraction of attribute and uniform names from normalized lines

use super::ShaderPatterns;

/// Storage qualifiers whose declarations are collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// Legacy vertex input (`attribute vec3 position;`)
    Attribute = 0,
    /// Modern stage input (`in vec3 position;`)
    In = 1,
    /// Uniform variable (`uniform mat4 mvp;`)
    Uniform = 2,
}

impl Qualifier {
    /// All qualifiers, in the order they are tried on each line
    pub const ALL: [Qualifier; 3] = [Qualifier::Attribute, Qualifier::In, Qualifier::Uniform];

    /// The GLSL keyword for this qualifier
    pub fn keyword(self) -> &'static str {
        match self {
            Qualifier::Attribute => "attribute",
            Qualifier::In => "in",
            Qualifier::Uniform => "uniform",
        }
    }
}

impl ShaderPatterns {
    /// Returns the variable name declared on `line` with the given qualifier
    ///
    /// The whole line has to look like `<anything><qualifier> <type> <name>;`.
    /// Array sizes, initializers and extra precision qualifiers between the type
    /// and the name are not recognised.
    pub fn extract_declaration<'l>(&self, line: &'l str, qualifier: Qualifier) -> Option<&'l str> {
        self.declaration(qualifier).captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }
}

/// Attribute and uniform names collected from a shader, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Names declared with `attribute` or `in`
    pub attributes: Vec<String>,
    /// Names declared with `uniform`
    pub uniforms: Vec<String>,
}

impl Declarations {
    /// Runs every qualifier over a normalized line and records the matches
    ///
    /// Names are not deduplicated; a variable declared twice is listed twice.
    pub fn collect(&mut self, patterns: &ShaderPatterns, line: &str) {
        for qualifier in Qualifier::ALL {
            if let Some(name) = patterns.extract_declaration(line, qualifier) {
                let target = match qualifier {
                    Qualifier::Attribute | Qualifier::In => &mut self.attributes,
                    Qualifier::Uniform => &mut self.uniforms,
                };
                target.push(name.to_string());
            }
        }
    }
}
