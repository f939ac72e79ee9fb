//! Per-line normalization of shader sources
//!
//! The first line of a shader must be a version header, either the `#include <glsl-DDD.h>`
//! form (rewritten to `#version DDD`) or, depending on the [`HeaderPolicy`], an already
//! valid `#version` line. Every other line has its trailing `//` comment and surrounding
//! whitespace removed and is then checked against a conservative shape whitelist.
//!
//! Rejected lines are dropped and reported; they never abort a conversion.

use thiserror::Error;

use super::ShaderPatterns;

/// Which first-line headers are accepted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// `#include <glsl-DDD[-es].h>` is rewritten, `#version DDD[ es]` passes through
    #[default]
    AcceptVersion,
    /// Only the `#include <glsl-DDD[-es].h>` form is accepted
    IncludeOnly,
}

impl HeaderPolicy {
    /// What the diagnostic calls the header it expected to see
    fn expected_header(self) -> &'static str {
        match self {
            HeaderPolicy::AcceptVersion => "version",
            HeaderPolicy::IncludeOnly => "header file",
        }
    }
}

/// A recoverable syntax problem found on a single line
///
/// Each variant carries a numeric tag (see [`SyntaxError::tag`]) so consumers of the
/// diagnostic stream can tell the categories apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Line 1 is neither an include header nor an accepted version header
    #[error("Syntax error(1): unrecognised glsl {expected}, {line}")]
    UnrecognisedHeader { line: String, expected: &'static str },

    /// A body line could not be split into code and comment
    #[error("Syntax error(2): {line_number}: {line}")]
    UnmatchedLine { line_number: usize, line: String },

    /// The code portion of a body line failed the shape whitelist
    #[error("Syntax error(3): {line_number}: {line}")]
    RejectedLine { line_number: usize, line: String },
}

impl SyntaxError {
    /// Numeric category of the error
    pub fn tag(&self) -> u8 {
        match self {
            SyntaxError::UnrecognisedHeader { .. } => 1,
            SyntaxError::UnmatchedLine { .. } => 2,
            SyntaxError::RejectedLine { .. } => 3,
        }
    }

    pub fn line_number(&self) -> usize {
        match self {
            SyntaxError::UnrecognisedHeader { .. } => 1,
            SyntaxError::UnmatchedLine { line_number, .. } | SyntaxError::RejectedLine { line_number, .. } => *line_number,
        }
    }
}

/// Result of classifying one raw line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The line survives normalization with this content
    Kept(String),
    /// Empty or comment-only line, dropped without a diagnostic
    Blank,
    /// The line was dropped because of a syntax error
    Rejected(SyntaxError),
}

/// Normalizes raw shader lines using a shared set of [`ShaderPatterns`]
#[derive(Debug, Clone, Copy)]
pub struct LineNormalizer<'a> {
    patterns: &'a ShaderPatterns,
    policy: HeaderPolicy,
}

impl<'a> LineNormalizer<'a> {
    pub fn new(patterns: &'a ShaderPatterns, policy: HeaderPolicy) -> Self {
        Self { patterns, policy }
    }

    /// Normalizes a line, logging any syntax error
    ///
    /// # Arguments
    /// * `raw_line` - The line as read from the file, without its terminator
    /// * `line_number` - 1-based position of the line in the file
    ///
    /// # Returns
    /// The normalized line, or `None` when there is nothing to emit for it
    pub fn normalize(&self, raw_line: &str, line_number: usize) -> Option<String> {
        match self.classify(raw_line, line_number) {
            LineOutcome::Kept(line) => Some(line),
            LineOutcome::Blank => None,
            LineOutcome::Rejected(error) => {
                tracing::warn!(tag = error.tag(), line_number = error.line_number(), "{error}");
                None
            }
        }
    }

    /// Classifies a line without emitting diagnostics
    pub fn classify(&self, raw_line: &str, line_number: usize) -> LineOutcome {
        if line_number == 1 {
            return self.classify_header(raw_line);
        }

        let Some(caps) = self.patterns.comment_split.captures(raw_line) else {
            return LineOutcome::Rejected(SyntaxError::UnmatchedLine {
                line_number,
                line: raw_line.to_string(),
            });
        };

        // Exactly one of the two alternatives participates in a match
        let code = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        if code.is_empty() {
            return LineOutcome::Blank;
        }

        if self.patterns.line_shape.is_match(code) {
            LineOutcome::Kept(code.to_string())
        } else {
            LineOutcome::Rejected(SyntaxError::RejectedLine {
                line_number,
                line: code.to_string(),
            })
        }
    }

    fn classify_header(&self, raw_line: &str) -> LineOutcome {
        if let Some(caps) = self.patterns.include_header.captures(raw_line) {
            let mut header = format!("#version {}", &caps[1]);
            if let Some(es) = caps.get(2) {
                header.push(' ');
                header.push_str(es.as_str());
            }
            return LineOutcome::Kept(header);
        }

        if self.policy == HeaderPolicy::AcceptVersion && self.patterns.version_header.is_match(raw_line) {
            return LineOutcome::Kept(raw_line.to_string());
        }

        LineOutcome::Rejected(SyntaxError::UnrecognisedHeader {
            line: raw_line.to_string(),
            expected: self.policy.expected_header(),
        })
    }
}
