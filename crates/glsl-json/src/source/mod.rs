//! Line-level GLSL filtering
//!
//! This module holds the lexical filter applied to every shader line: comment and
//! whitespace trimming, line-shape validation, header rewriting and declaration
//! extraction. All of it is driven by a set of regular expressions compiled once
//! into [`ShaderPatterns`].

mod declarations;
mod normalize;
mod patterns;

pub use declarations::*;
pub use normalize::*;
pub use patterns::ShaderPatterns;
