//! Compiled regular expressions used by the line filter

use regex::Regex;

use super::Qualifier;

/// Any single character except `\r` and `\n`
const ANY: &str = r"[^\r\n]";

/// ASCII whitespace only; no-break and other Unicode spaces are not trimmed
const SPACE: &str = r"[ \t\n\x0B\x0C\r]";

/// Identifier-like word, ASCII only
const WORD: &str = "[0-9A-Za-z_]";

/// The full set of patterns needed to filter and inspect shader sources
///
/// Built once and shared by reference between the normalizer, the declaration
/// extractor and the file-name classifier. Nothing in here is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct ShaderPatterns {
    /// `#include <glsl-DDD-es.h>` header, capturing the version and the optional `es`
    pub(crate) include_header: Regex,
    /// `#version DDD` or `#version DDD es` header
    pub(crate) version_header: Regex,
    /// Splits a body line into its code portion and a trailing `//` comment
    pub(crate) comment_split: Regex,
    /// Accepted shape of a trimmed body line
    pub(crate) line_shape: Regex,
    /// `<dir><sep><name>.(vs|fs)[.glsl]`, capturing the name and the stage suffix
    pub(crate) file_name: Regex,
    /// Declaration patterns, indexed in [`Qualifier::ALL`] order
    declarations: [Regex; 3],
}

impl ShaderPatterns {
    pub fn new() -> Self {
        Self {
            include_header: Regex::new(r"^#include <glsl-([0-9]{3})-?(es)?\.h>$").unwrap(),
            version_header: Regex::new(r"^#version ([0-9]{3})(?: es)?$").unwrap(),
            comment_split: Regex::new(&format!(r"^{SPACE}*(?:(?:({ANY}*?){SPACE}*/{{2,}}{ANY}*)|(?:({ANY}*?){SPACE}*))$")).unwrap(),
            line_shape: Regex::new(r"^(?:[a-z][a-zA-Z0-9 \t\n\x0B\x0C\r_+*\-/=><\&|\^?:{().,;\[\]]*[;{})]|[}])$").unwrap(),
            file_name: Regex::new(r"^.*[\\/](.*)\.(vs|fs)(?:\.glsl)?$").unwrap(),
            declarations: Qualifier::ALL.map(|qualifier| Self::declaration_pattern(qualifier.keyword())),
        }
    }

    /// Builds the whole-line declaration pattern for an arbitrary qualifier keyword
    ///
    /// The pattern accepts `<anything><keyword> <type> <name>;` and captures `<name>`.
    /// The `;` has to follow the identifier directly, so array declarations and
    /// initializers never match.
    pub fn declaration_pattern(keyword: &str) -> Regex {
        Regex::new(&format!(r"^{ANY}*{}{SPACE}+{WORD}+{SPACE}+({WORD}+);$", regex::escape(keyword))).unwrap()
    }

    pub(crate) fn declaration(&self, qualifier: Qualifier) -> &Regex {
        &self.declarations[qualifier as usize]
    }
}

impl Default for ShaderPatterns {
    fn default() -> Self {
        Self::new()
    }
}
