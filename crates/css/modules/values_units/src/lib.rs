//! CSS Values and Units Module Level 3: typed values used by style archetypes.
//! Spec: <https://www.w3.org/TR/css-values-3/>
//!
//! A declared value is a closed sum type ([`StyleValue`]) so every consumer
//! handles each unit explicitly. Declared sizes that may be `auto` use
//! [`Dimension`], which keeps an explicit zero distinct from `auto`.

#![forbid(unsafe_code)]

use core::error::Error;
use core::fmt;

pub mod chapter_6_dimensions;
pub mod chapter_9_colors;
pub mod style_value;

pub use chapter_6_dimensions::{Dimension, Length, LengthUnit, parse_length};
pub use chapter_9_colors::{Color, parse_color};
pub use style_value::{ResolveContext, StyleValue, parse_style_value, parse_style_value_list};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// A dimension used a unit this engine does not resolve.
    UnknownUnit,
    /// Extra tokens followed a complete value.
    TrailingInput,
    /// The input held no value at all.
    Empty,
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken => formatter.write_str("unexpected token"),
            Self::UnknownUnit => formatter.write_str("unknown unit"),
            Self::TrailingInput => formatter.write_str("trailing input after value"),
            Self::Empty => formatter.write_str("empty value"),
        }
    }
}

impl Error for ParseError {}
