//! CSS Values & Units Level 3: §9 Colors (subset used for paint handoff)
//! Spec: <https://www.w3.org/TR/css-color-3/>

use crate::ParseError;
use cssparser::{ParseError as CssParseError, Parser, Token};

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    #[inline]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Components as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Pack into `0xRRGGBBAA`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.to_array())
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (without the `#`).
fn parse_hex_color(text: &str) -> Option<Color> {
    let digits: Option<Vec<u8>> = text
        .bytes()
        .map(|byte| (byte as char).to_digit(16).and_then(|digit| u8::try_from(digit).ok()))
        .collect();
    let digits = digits?;
    let expand = |nibble: u8| nibble << 4 | nibble;
    let pair = |high: u8, low: u8| high << 4 | low;
    match digits.as_slice() {
        [red, green, blue] => Some(Color::rgb(expand(*red), expand(*green), expand(*blue))),
        [red, green, blue, alpha] => Some(Color::rgba(
            expand(*red),
            expand(*green),
            expand(*blue),
            expand(*alpha),
        )),
        [r_hi, r_lo, g_hi, g_lo, b_hi, b_lo] => Some(Color::rgb(
            pair(*r_hi, *r_lo),
            pair(*g_hi, *g_lo),
            pair(*b_hi, *b_lo),
        )),
        [r_hi, r_lo, g_hi, g_lo, b_hi, b_lo, a_hi, a_lo] => Some(Color::rgba(
            pair(*r_hi, *r_lo),
            pair(*g_hi, *g_lo),
            pair(*b_hi, *b_lo),
            pair(*a_hi, *a_lo),
        )),
        _ => None,
    }
}

/// Map a CSS named color (basic keyword set) to an RGBA value.
fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "silver" => Color::rgb(192, 192, 192),
        "maroon" => Color::rgb(128, 0, 0),
        "navy" => Color::rgb(0, 0, 128),
        "olive" => Color::rgb(128, 128, 0),
        "purple" => Color::rgb(128, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "orange" => Color::rgb(255, 165, 0),
        _ => return None,
    };
    Some(color)
}

/// Clamp a numeric channel into `0..=255`.
fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Parse the arguments of `rgb()`/`rgba()`.
///
/// Channels are numbers or percentages; alpha is a `0..=1` number or a
/// percentage. Commas are optional.
fn parse_rgb_arguments(input: &mut Parser) -> Option<Color> {
    let mut components: Vec<f32> = Vec::with_capacity(4);
    while let Ok(token) = input.next() {
        let index = components.len();
        match token.clone() {
            Token::Number { value, .. } if index < 3 => components.push(value),
            Token::Number { value, .. } if index == 3 => components.push(value * 255.0),
            Token::Percentage { unit_value, .. } if index < 4 => {
                components.push(unit_value * 255.0);
            }
            Token::Comma | Token::Delim('/') => {}
            _ => return None,
        }
    }
    match components.as_slice() {
        [red, green, blue] => Some(Color::rgb(channel(*red), channel(*green), channel(*blue))),
        [red, green, blue, alpha] => Some(Color::rgba(
            channel(*red),
            channel(*green),
            channel(*blue),
            channel(*alpha),
        )),
        _ => None,
    }
}

/// Parse a CSS <color> (subset): hex, named keywords, `rgb()` and `rgba()`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for unsupported or malformed input.
pub fn parse_color(input: &mut Parser) -> Result<Color, ParseError> {
    let token = input
        .next()
        .map_err(|_| ParseError::UnexpectedToken)?
        .clone();
    match token {
        Token::Hash(value) | Token::IDHash(value) => {
            parse_hex_color(value.as_ref()).ok_or(ParseError::UnexpectedToken)
        }
        Token::Ident(name) => named_color(name.as_ref()).ok_or(ParseError::UnexpectedToken),
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            let result: Result<Option<Color>, CssParseError<'_, ()>> =
                input.parse_nested_block(|nested| Ok(parse_rgb_arguments(nested)));
            match result {
                Ok(Some(color)) => Ok(color),
                _ => Err(ParseError::UnexpectedToken),
            }
        }
        _ => Err(ParseError::UnexpectedToken),
    }
}
