//! CSS Values & Units Level 3: §6 Dimensions (lengths and `auto`-able sizes)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::ParseError;
use cssparser::{Parser, Token};

/// Supported subset of CSS <length-percentage>.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
    /// Stored as the literal percentage, `50%` is `50.0`.
    Percent,
}

/// A CSS <length-percentage> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

/// Map a dimension unit name to a supported unit.
fn unit_from_name(unit: &str) -> Option<LengthUnit> {
    match unit.to_ascii_lowercase().as_str() {
        "px" => Some(LengthUnit::Pixels),
        "em" => Some(LengthUnit::Ems),
        "rem" => Some(LengthUnit::RootEms),
        _ => None,
    }
}

/// Parse a CSS <length-percentage> (§6.2). Unitless zero is accepted as `0px`.
///
/// # Errors
/// Returns `ParseError::UnknownUnit` for dimensions in unsupported units and
/// `ParseError::UnexpectedToken` for anything that is not a length.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let token = input
        .next()
        .map_err(|_| ParseError::UnexpectedToken)?
        .clone();
    match token {
        Token::Dimension { value, unit, .. } => unit_from_name(unit.as_ref())
            .map(|unit_kind| Length {
                value,
                unit: unit_kind,
            })
            .ok_or(ParseError::UnknownUnit),
        Token::Percentage { unit_value, .. } => Ok(Length {
            value: unit_value * 100.0,
            unit: LengthUnit::Percent,
        }),
        Token::Number { value, .. } if value == 0.0 => Ok(Length {
            value: 0.0,
            unit: LengthUnit::Pixels,
        }),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// A declared size that may be `auto`.
///
/// Auto-ness is a variant, so `Px(0.0)` is a real, explicit zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Px(f32),
    /// Literal percentage, `50%` is `50.0`.
    Percent(f32),
}

impl Dimension {
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve against a percentage basis.
    ///
    /// Returns `None` for `auto`, and for percentages when the basis is
    /// indefinite.
    #[inline]
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Px(pixels) => Some(pixels),
            Self::Percent(percent) => basis.map(|base| base * percent / 100.0),
        }
    }
}
