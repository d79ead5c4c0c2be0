//! Turning `name: value` declarations into typed properties.

use crate::keywords::keyword_code;
use crate::property::{PropertyId, StyleProperty};
use css_values_units::{ParseError, StyleValue, parse_style_value, parse_style_value_list};
use log::debug;
use core::error::Error;
use core::fmt;
use std::sync::Arc;

/// Why a declaration was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationError {
    /// The property name is not supported.
    UnknownProperty(String),
    /// The keyword is not valid for the property.
    UnknownKeyword {
        property: &'static str,
        keyword: String,
    },
    /// The value did not parse or has the wrong type for the property.
    InvalidValue {
        property: &'static str,
        reason: ParseError,
    },
}

impl fmt::Display for DeclarationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownProperty(name) => write!(formatter, "unknown property `{name}`"),
            Self::UnknownKeyword { property, keyword } => {
                write!(formatter, "`{keyword}` is not a valid `{property}` keyword")
            }
            Self::InvalidValue { property, reason } => {
                write!(formatter, "invalid `{property}` value: {reason}")
            }
        }
    }
}

impl Error for DeclarationError {}

const fn invalid(id: PropertyId, reason: ParseError) -> DeclarationError {
    DeclarationError::InvalidValue {
        property: id.name(),
        reason,
    }
}

const fn is_color_property(id: PropertyId) -> bool {
    matches!(id, PropertyId::BackgroundColor | PropertyId::BorderColor)
}

/// Line numbers and spans above this are clamped to it.
const MAX_GRID_LINE: i32 = 10_000;

/// Parse a grid line: `auto`, a line number, or `span N` (stored negative).
fn parse_grid_line(id: PropertyId, text: &str) -> Result<StyleValue, DeclarationError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("auto") {
        return Ok(StyleValue::Number(0.0));
    }
    let (span, number) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) if keyword.eq_ignore_ascii_case("span") => (true, rest.trim()),
        Some(_) => return Err(invalid(id, ParseError::TrailingInput)),
        None => (false, trimmed),
    };
    let line: i32 = number
        .parse()
        .map_err(|_| invalid(id, ParseError::UnexpectedToken))?;
    match (span, line) {
        // Negative lines would collide with the span encoding.
        (_, ..=0) => Err(invalid(id, ParseError::UnexpectedToken)),
        (true, count) => Ok(StyleValue::Number(-(count.min(MAX_GRID_LINE) as f32))),
        (false, line_number) => Ok(StyleValue::Number(line_number.min(MAX_GRID_LINE) as f32)),
    }
}

/// Parse a single longhand declaration.
///
/// # Errors
/// Returns a `DeclarationError` for unknown properties, unknown keywords, and
/// values of the wrong type.
pub fn parse_declaration(name: &str, value: &str) -> Result<StyleProperty, DeclarationError> {
    let id = PropertyId::from_name(name)
        .ok_or_else(|| DeclarationError::UnknownProperty(name.trim().to_owned()))?;
    let parsed = if id.is_keyword() {
        let code = keyword_code(id, value).ok_or_else(|| DeclarationError::UnknownKeyword {
            property: id.name(),
            keyword: value.trim().to_owned(),
        })?;
        StyleValue::Number(f32::from(code))
    } else if id.is_raw_text() {
        let text = value.trim();
        if text.is_empty() {
            return Err(invalid(id, ParseError::Empty));
        }
        StyleValue::Raw(Arc::from(text))
    } else if id.is_grid_line() {
        parse_grid_line(id, value)?
    } else {
        let parsed_value = parse_style_value(value).map_err(|reason| invalid(id, reason))?;
        let is_color = matches!(parsed_value, StyleValue::Color(_));
        if is_color != is_color_property(id) {
            return Err(invalid(id, ParseError::UnexpectedToken));
        }
        parsed_value
    };
    Ok(StyleProperty::new(id, parsed))
}

/// Expand a 1-4 value box shorthand into top/right/bottom/left.
fn box_sides(values: &[StyleValue]) -> Option<[StyleValue; 4]> {
    match values {
        [all] => Some([all.clone(), all.clone(), all.clone(), all.clone()]),
        [vertical, horizontal] => Some([
            vertical.clone(),
            horizontal.clone(),
            vertical.clone(),
            horizontal.clone(),
        ]),
        [top, horizontal, bottom] => Some([
            top.clone(),
            horizontal.clone(),
            bottom.clone(),
            horizontal.clone(),
        ]),
        [top, right, bottom, left] => {
            Some([top.clone(), right.clone(), bottom.clone(), left.clone()])
        }
        _ => None,
    }
}

fn expand_box(
    shorthand: PropertyId,
    longhands: [PropertyId; 4],
    value: &str,
) -> Result<Vec<StyleProperty>, DeclarationError> {
    let values = parse_style_value_list(value).map_err(|reason| invalid(shorthand, reason))?;
    if values
        .iter()
        .any(|component| matches!(component, StyleValue::Color(_)))
    {
        return Err(invalid(shorthand, ParseError::UnexpectedToken));
    }
    let sides = box_sides(&values).ok_or_else(|| invalid(shorthand, ParseError::TrailingInput))?;
    Ok(longhands
        .into_iter()
        .zip(sides)
        .map(|(id, side)| StyleProperty::new(id, side))
        .collect())
}

fn expand_flex(value: &str) -> Result<Vec<StyleProperty>, DeclarationError> {
    let trimmed = value.trim();
    let (grow, shrink, basis) = if trimmed.eq_ignore_ascii_case("none") {
        (0.0, 0.0, StyleValue::Auto)
    } else if trimmed.eq_ignore_ascii_case("auto") {
        (1.0, 1.0, StyleValue::Auto)
    } else {
        let values = parse_style_value_list(trimmed)
            .map_err(|reason| invalid(PropertyId::FlexGrow, reason))?;
        match values.as_slice() {
            [StyleValue::Number(grow)] => (*grow, 1.0, StyleValue::Px(0.0)),
            [StyleValue::Number(grow), StyleValue::Number(shrink)] => {
                (*grow, *shrink, StyleValue::Px(0.0))
            }
            [StyleValue::Number(grow), StyleValue::Number(shrink), basis] => {
                (*grow, *shrink, basis.clone())
            }
            [StyleValue::Number(grow), basis] => (*grow, 1.0, basis.clone()),
            [basis] => (1.0, 1.0, basis.clone()),
            _ => return Err(invalid(PropertyId::FlexGrow, ParseError::TrailingInput)),
        }
    };
    Ok(vec![
        StyleProperty::new(PropertyId::FlexGrow, StyleValue::Number(grow)),
        StyleProperty::new(PropertyId::FlexShrink, StyleValue::Number(shrink)),
        StyleProperty::new(PropertyId::FlexBasis, basis),
    ])
}

fn expand_gap(value: &str) -> Result<Vec<StyleProperty>, DeclarationError> {
    let values =
        parse_style_value_list(value).map_err(|reason| invalid(PropertyId::RowGap, reason))?;
    let (row, column) = match values.as_slice() {
        [both] => (both.clone(), both.clone()),
        [row, column] => (row.clone(), column.clone()),
        _ => return Err(invalid(PropertyId::RowGap, ParseError::TrailingInput)),
    };
    Ok(vec![
        StyleProperty::new(PropertyId::RowGap, row),
        StyleProperty::new(PropertyId::ColumnGap, column),
    ])
}

fn expand_grid_span(
    start: PropertyId,
    end: PropertyId,
    value: &str,
) -> Result<Vec<StyleProperty>, DeclarationError> {
    let (start_text, end_text) = value.split_once('/').unwrap_or((value, "auto"));
    Ok(vec![
        StyleProperty::new(start, parse_grid_line(start, start_text)?),
        StyleProperty::new(end, parse_grid_line(end, end_text)?),
    ])
}

/// Parse a declaration, expanding supported shorthands into longhands.
///
/// Shorthands: `margin`, `padding`, `border-width`, `inset`, `gap`, `flex`,
/// `grid-column`, `grid-row`.
///
/// # Errors
/// Returns the same errors as [`parse_declaration`].
pub fn parse_declarations(name: &str, value: &str) -> Result<Vec<StyleProperty>, DeclarationError> {
    let lower = name.trim().to_ascii_lowercase();
    match lower.as_str() {
        "margin" => expand_box(
            PropertyId::MarginTop,
            [
                PropertyId::MarginTop,
                PropertyId::MarginRight,
                PropertyId::MarginBottom,
                PropertyId::MarginLeft,
            ],
            value,
        ),
        "padding" => expand_box(
            PropertyId::PaddingTop,
            [
                PropertyId::PaddingTop,
                PropertyId::PaddingRight,
                PropertyId::PaddingBottom,
                PropertyId::PaddingLeft,
            ],
            value,
        ),
        "border-width" => expand_box(
            PropertyId::BorderTopWidth,
            [
                PropertyId::BorderTopWidth,
                PropertyId::BorderRightWidth,
                PropertyId::BorderBottomWidth,
                PropertyId::BorderLeftWidth,
            ],
            value,
        ),
        "inset" => expand_box(
            PropertyId::Top,
            [
                PropertyId::Top,
                PropertyId::Right,
                PropertyId::Bottom,
                PropertyId::Left,
            ],
            value,
        ),
        "gap" => expand_gap(value),
        "flex" => expand_flex(value),
        "grid-column" => {
            expand_grid_span(PropertyId::GridColumnStart, PropertyId::GridColumnEnd, value)
        }
        "grid-row" => expand_grid_span(PropertyId::GridRowStart, PropertyId::GridRowEnd, value),
        _ => parse_declaration(&lower, value).map(|property| vec![property]),
    }
}

/// Parse an inline style block such as `width: 10px; display: flex`.
///
/// Invalid declarations are skipped and logged; later declarations of the
/// same property win.
pub fn parse_style_block(text: &str) -> Vec<StyleProperty> {
    let mut properties: Vec<StyleProperty> = Vec::new();
    for declaration in text.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            if !declaration.trim().is_empty() {
                debug!(target: "css::archetypes", "skipping malformed declaration `{}`", declaration.trim());
            }
            continue;
        };
        match parse_declarations(name, value) {
            Ok(parsed) => {
                for property in parsed {
                    match properties.iter_mut().find(|existing| existing.id == property.id) {
                        Some(existing) => *existing = property,
                        None => properties.push(property),
                    }
                }
            }
            Err(error) => debug!(target: "css::archetypes", "skipping declaration: {error}"),
        }
    }
    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::{content, display};

    #[test]
    /// Keywords become numeric codes and lengths keep their unit.
    ///
    /// # Panics
    /// Panics if a longhand is mis-typed.
    fn longhands() {
        assert_eq!(
            parse_declaration("display", "flex"),
            Ok(StyleProperty::new(
                PropertyId::Display,
                StyleValue::Number(f32::from(display::FLEX))
            ))
        );
        assert_eq!(
            parse_declaration("margin-left", "2em").map(|prop| prop.value),
            Ok(StyleValue::Em(2.0))
        );
        assert_eq!(
            parse_declaration("grid-template-columns", " 1fr 2fr ").map(|prop| prop.value),
            Ok(StyleValue::Raw(Arc::from("1fr 2fr")))
        );
        assert_eq!(
            parse_declaration("justify-content", "space-between").map(|prop| prop.value),
            Ok(StyleValue::Number(f32::from(content::SPACE_BETWEEN)))
        );
    }

    #[test]
    /// Wrong types and unknown names are rejected.
    ///
    /// # Panics
    /// Panics if an invalid declaration is accepted.
    fn rejects_invalid() {
        assert!(matches!(
            parse_declaration("float", "left"),
            Err(DeclarationError::UnknownProperty(_))
        ));
        assert!(matches!(
            parse_declaration("width", "red"),
            Err(DeclarationError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_declaration("background-color", "10px"),
            Err(DeclarationError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_declaration("display", "table"),
            Err(DeclarationError::UnknownKeyword { .. })
        ));
    }

    #[test]
    /// Box shorthands follow the 1-4 value expansion.
    ///
    /// # Panics
    /// Panics if sides are expanded in the wrong order.
    fn box_shorthand_expansion() {
        let sides = parse_declarations("padding", "1px 2px 3px").unwrap_or_default();
        let values: Vec<StyleValue> = sides.into_iter().map(|prop| prop.value).collect();
        assert_eq!(
            values,
            vec![
                StyleValue::Px(1.0),
                StyleValue::Px(2.0),
                StyleValue::Px(3.0),
                StyleValue::Px(2.0)
            ]
        );
    }

    #[test]
    /// `flex` and grid placement shorthands expand to longhands.
    ///
    /// # Panics
    /// Panics if shorthand expansion is wrong.
    fn flex_and_grid_shorthands() {
        let flex = parse_declarations("flex", "2").unwrap_or_default();
        assert_eq!(flex.len(), 3);
        assert_eq!(flex.first().map(|prop| prop.value.clone()), Some(StyleValue::Number(2.0)));
        assert_eq!(flex.get(2).map(|prop| prop.value.clone()), Some(StyleValue::Px(0.0)));

        let column = parse_declarations("grid-column", "2 / span 3").unwrap_or_default();
        let values: Vec<StyleValue> = column.into_iter().map(|prop| prop.value).collect();
        assert_eq!(values, vec![StyleValue::Number(2.0), StyleValue::Number(-3.0)]);
    }

    #[test]
    /// Oversized grid lines and spans are clamped.
    ///
    /// # Panics
    /// Panics if a huge line number survives parsing.
    fn grid_lines_are_clamped() {
        assert_eq!(
            parse_declaration("grid-column-start", "2000000000").map(|prop| prop.value),
            Ok(StyleValue::Number(10_000.0))
        );
        assert_eq!(
            parse_declaration("grid-row-end", "span 50000").map(|prop| prop.value),
            Ok(StyleValue::Number(-10_000.0))
        );
    }

    #[test]
    /// Style blocks skip bad declarations and let later ones win.
    ///
    /// # Panics
    /// Panics if a block is not cascaded in order.
    fn style_block_cascade() {
        let _ = env_logger::builder().is_test(true).try_init();
        let block = parse_style_block("width: 10px; width: 20px; bogus: 1; ; height");
        assert_eq!(
            block,
            vec![StyleProperty::new(PropertyId::Width, StyleValue::Px(20.0))]
        );
    }
}
