//! Declared style values as a closed sum type.

use crate::chapter_6_dimensions::{Dimension, Length, LengthUnit, parse_length};
use crate::chapter_9_colors::{Color, parse_color};
use crate::ParseError;
use cssparser::{Parser, ParserInput, Token};
use std::sync::Arc;

/// A single declared value.
///
/// `Number` carries unitless values such as flex factors, keyword codes and
/// z-index. `Raw` carries text that a layout module parses itself, such as
/// grid track lists.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Px(f32),
    /// Literal percentage, `50%` is `50.0`.
    Percent(f32),
    Em(f32),
    Rem(f32),
    Auto,
    Number(f32),
    Color(Color),
    Raw(Arc<str>),
}

/// Inputs needed to turn relative units into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveContext {
    /// Computed font size of the element, for `em`.
    pub font_size: f32,
    /// Font size of the root element, for `rem`.
    pub root_font_size: f32,
    /// Basis for percentages, `None` when indefinite.
    pub percent_base: Option<f32>,
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            root_font_size: 16.0,
            percent_base: None,
        }
    }
}

impl StyleValue {
    /// The scalar copied by bulk archetype application.
    ///
    /// `Auto`, `Color` and `Raw` have no scalar and yield `0.0`.
    #[inline]
    pub fn numeric(&self) -> f32 {
        match self {
            Self::Px(value)
            | Self::Percent(value)
            | Self::Em(value)
            | Self::Rem(value)
            | Self::Number(value) => *value,
            Self::Auto | Self::Color(_) | Self::Raw(_) => 0.0,
        }
    }

    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve to pixels. `auto`, colors, raw text and indefinite
    /// percentages have no pixel value. A unitless zero is `0px`.
    pub fn resolve_px(&self, context: &ResolveContext) -> Option<f32> {
        match self {
            Self::Px(value) => Some(*value),
            Self::Em(value) => Some(value * context.font_size),
            Self::Rem(value) => Some(value * context.root_font_size),
            Self::Percent(value) => context.percent_base.map(|base| base * value / 100.0),
            Self::Number(value) if *value == 0.0 => Some(0.0),
            Self::Number(_) | Self::Auto | Self::Color(_) | Self::Raw(_) => None,
        }
    }

    /// Convert to an `auto`-able declared size.
    ///
    /// Font-relative units are resolved now; percentages are kept so they can
    /// resolve against the containing block later.
    pub fn to_dimension(&self, context: &ResolveContext) -> Dimension {
        match self {
            Self::Percent(value) => Dimension::Percent(*value),
            Self::Auto => Dimension::Auto,
            other => other
                .resolve_px(&ResolveContext {
                    percent_base: None,
                    ..*context
                })
                .map_or(Dimension::Auto, Dimension::Px),
        }
    }
}

impl From<Length> for StyleValue {
    fn from(length: Length) -> Self {
        match length.unit {
            LengthUnit::Pixels => Self::Px(length.value),
            LengthUnit::Ems => Self::Em(length.value),
            LengthUnit::RootEms => Self::Rem(length.value),
            LengthUnit::Percent => Self::Percent(length.value),
        }
    }
}

impl From<Color> for StyleValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// Parse one token worth of value: length, `auto`, number or color.
fn parse_single(input: &mut Parser) -> Result<StyleValue, ParseError> {
    if let Ok(length) = input.try_parse(parse_length) {
        return Ok(length.into());
    }
    if let Ok(color) = input.try_parse(parse_color) {
        return Ok(color.into());
    }
    let token = input.next().map_err(|_| ParseError::Empty)?.clone();
    match token {
        Token::Ident(name) if name.eq_ignore_ascii_case("auto") => Ok(StyleValue::Auto),
        Token::Number { value, .. } => Ok(StyleValue::Number(value)),
        Token::Dimension { .. } => Err(ParseError::UnknownUnit),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a complete single-component declaration value such as `12px`,
/// `50%`, `1.5em`, `auto`, `2` or `#fff`.
///
/// # Errors
/// Returns a `ParseError` when the text is empty, not a supported value, or
/// has tokens left over after the value.
pub fn parse_style_value(text: &str) -> Result<StyleValue, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    if parser.is_exhausted() {
        return Err(ParseError::Empty);
    }
    let value = parse_single(&mut parser)?;
    if parser.is_exhausted() {
        Ok(value)
    } else {
        Err(ParseError::TrailingInput)
    }
}

/// Parse a whitespace-separated list of single-component values, as used by
/// shorthands such as `margin: 1px 2px`.
///
/// # Errors
/// Returns the first component's `ParseError`, or `ParseError::Empty` for
/// blank input.
pub fn parse_style_value_list(text: &str) -> Result<Vec<StyleValue>, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut values = Vec::new();
    while !parser.is_exhausted() {
        values.push(parse_single(&mut parser)?);
    }
    if values.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(values)
}
