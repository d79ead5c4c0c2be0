//! Track list parsing for `grid-template-columns` / `grid-template-rows`.
//!
//! Spec: §7.2 Explicit Track Sizing
//! <https://www.w3.org/TR/css-grid-1/#track-sizing>
//!
//! Supported: `px`, `%`, `fr`, `auto`, `min-content`, `max-content`,
//! `minmax()`, and `repeat(<integer>, ...)`. Line names and the
//! `auto-fill`/`auto-fit` repetitions are rejected.

use core::error::Error;
use core::fmt;

use cssparser::{ParseError as CssParseError, ParseErrorKind, Parser, ParserInput, Token};
use log::debug;

use crate::types::{GridTrackSize, TrackBreadth};

/// Upper bound on `repeat()` counts.
const MAX_REPEAT: usize = 10_000;

/// Why a track list failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackListError {
    UnexpectedToken,
    UnknownUnit,
    NegativeSize,
    InvalidRepeat,
    Empty,
}

impl fmt::Display for TrackListError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedToken => "unexpected token in track list",
            Self::UnknownUnit => "unsupported unit in track list",
            Self::NegativeSize => "negative track size",
            Self::InvalidRepeat => "invalid repeat() count",
            Self::Empty => "empty track list",
        };
        formatter.write_str(text)
    }
}

impl Error for TrackListError {}

type TrackResult<'i, T> = Result<T, CssParseError<'i, TrackListError>>;

fn breadth_from_token(token: &Token<'_>) -> Result<TrackBreadth, TrackListError> {
    match *token {
        Token::Dimension { value, .. } if value < 0.0 => Err(TrackListError::NegativeSize),
        Token::Dimension {
            value, ref unit, ..
        } => {
            if unit.eq_ignore_ascii_case("px") {
                Ok(TrackBreadth::Length(value))
            } else if unit.eq_ignore_ascii_case("fr") {
                Ok(TrackBreadth::Flex(value))
            } else {
                Err(TrackListError::UnknownUnit)
            }
        }
        Token::Percentage { unit_value, .. } if unit_value < 0.0 => {
            Err(TrackListError::NegativeSize)
        }
        Token::Percentage { unit_value, .. } => Ok(TrackBreadth::Percentage(unit_value * 100.0)),
        Token::Number { value, .. } if value == 0.0 => Ok(TrackBreadth::Length(0.0)),
        Token::Ident(ref name) => match name.to_ascii_lowercase().as_str() {
            "auto" => Ok(TrackBreadth::Auto),
            "min-content" => Ok(TrackBreadth::MinContent),
            "max-content" => Ok(TrackBreadth::MaxContent),
            _ => Err(TrackListError::UnexpectedToken),
        },
        _ => Err(TrackListError::UnexpectedToken),
    }
}

fn parse_breadth<'i>(parser: &mut Parser<'i, '_>) -> TrackResult<'i, TrackBreadth> {
    let location = parser.current_source_location();
    let token = parser.next()?.clone();
    breadth_from_token(&token).map_err(|err| location.new_custom_error(err))
}

/// One `<track-size>`: a breadth or `minmax(min, max)`.
fn parse_track_size<'i>(parser: &mut Parser<'i, '_>) -> TrackResult<'i, GridTrackSize> {
    let location = parser.current_source_location();
    let token = parser.next()?.clone();
    match token {
        Token::Function(ref name) if name.eq_ignore_ascii_case("minmax") => {
            parser.parse_nested_block(|nested| {
                let min = parse_breadth(nested)?;
                nested.expect_comma()?;
                let max = parse_breadth(nested)?;
                Ok(GridTrackSize::MinMax(min, max))
            })
        }
        other => breadth_from_token(&other)
            .map(GridTrackSize::Breadth)
            .map_err(|err| location.new_custom_error(err)),
    }
}

/// `repeat(<integer>, <track-size>+)` expanded in place.
fn parse_repeat<'i>(parser: &mut Parser<'i, '_>) -> TrackResult<'i, Vec<GridTrackSize>> {
    parser.parse_nested_block(|nested| {
        let location = nested.current_source_location();
        let count = nested.expect_integer()?;
        let count = usize::try_from(count)
            .ok()
            .filter(|count| (1..=MAX_REPEAT).contains(count))
            .ok_or_else(|| location.new_custom_error(TrackListError::InvalidRepeat))?;
        nested.expect_comma()?;
        let mut pattern = Vec::new();
        while !nested.is_exhausted() {
            pattern.push(parse_track_size(nested)?);
        }
        if pattern.is_empty() {
            return Err(location.new_custom_error(TrackListError::InvalidRepeat));
        }
        let mut expanded = Vec::with_capacity(pattern.len() * count);
        for _ in 0..count {
            expanded.extend_from_slice(&pattern);
        }
        Ok(expanded)
    })
}

fn parse_entries<'i>(parser: &mut Parser<'i, '_>) -> TrackResult<'i, Vec<GridTrackSize>> {
    if parser.try_parse(|input| input.expect_ident_matching("none")).is_ok() {
        parser.expect_exhausted()?;
        return Ok(Vec::new());
    }
    let mut tracks = Vec::new();
    while !parser.is_exhausted() {
        if parser
            .try_parse(|input| input.expect_function_matching("repeat"))
            .is_ok()
        {
            tracks.extend(parse_repeat(parser)?);
        } else {
            tracks.push(parse_track_size(parser)?);
        }
    }
    Ok(tracks)
}

/// Parse a track list. `none` yields an empty list.
///
/// # Errors
/// Returns a [`TrackListError`] for empty input and for anything outside the
/// supported grammar.
pub fn parse_track_list(text: &str) -> Result<Vec<GridTrackSize>, TrackListError> {
    if text.trim().is_empty() {
        return Err(TrackListError::Empty);
    }
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_entries(&mut parser).map_err(|err| match err.kind {
        ParseErrorKind::Custom(inner) => inner,
        ParseErrorKind::Basic(_) => TrackListError::UnexpectedToken,
    })
}

/// Parse a track list, falling back to a single `auto` track when the text
/// is malformed. Layout always gets some tracks to work with.
pub fn track_list_or_auto(text: &str) -> Vec<GridTrackSize> {
    parse_track_list(text).unwrap_or_else(|err| {
        debug!(target: "css::grid", "track list {text:?} rejected: {err}; using auto");
        vec![GridTrackSize::AUTO]
    })
}
