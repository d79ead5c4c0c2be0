//! Base sizes and growth limits before space distribution.

use crate::types::{GridTrackSize, TrackBreadth};

use super::{GridAxis, TrackSizingParams};

/// Working state for one track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBase {
    pub base: f32,
    pub limit: f32,
    /// Weight of a flexible max breadth, `None` for non-flexible tracks.
    pub flex_weight: Option<f32>,
}

/// Largest content contribution of the items in each track.
///
/// Items spanning several tracks contribute an even share to each.
pub fn content_contributions<NodeId>(
    params: &TrackSizingParams<'_, NodeId>,
    track_count: usize,
) -> Vec<f32> {
    let mut contributions: Vec<f32> = vec![0.0; track_count];
    for (item, area) in params.items.iter().zip(params.placements) {
        let (start, end) = params.axis.lines(area);
        let first = start.saturating_sub(1);
        let span = end.saturating_sub(start).max(1);
        let outer = match params.axis {
            GridAxis::Row => item.outer_height(),
            GridAxis::Column => item.outer_width(),
        };
        let share = outer / span as f32;
        for slot in contributions.iter_mut().skip(first).take(span) {
            *slot = slot.max(share);
        }
    }
    contributions
}

/// Resolve each track's base size and growth limit.
///
/// Percentages of an indefinite size and flexible tracks in indefinite space
/// behave as `auto`.
pub fn initial_track_bases(
    tracks: &[GridTrackSize],
    contributions: &[f32],
    available: Option<f32>,
) -> Vec<TrackBase> {
    tracks
        .iter()
        .zip(contributions)
        .map(|(track, &content)| {
            let base = track
                .min_breadth()
                .resolve(available, content)
                .unwrap_or(content);
            match (track.flex_weight(), available) {
                (Some(weight), Some(_)) => TrackBase {
                    base,
                    limit: f32::INFINITY,
                    flex_weight: Some(weight),
                },
                (Some(_), None) => TrackBase {
                    base: base.max(content),
                    limit: base.max(content),
                    flex_weight: None,
                },
                (None, _) => {
                    let limit = match track.max_breadth() {
                        TrackBreadth::Auto | TrackBreadth::MinContent | TrackBreadth::MaxContent => {
                            content
                        }
                        breadth => breadth.resolve(available, content).unwrap_or(content),
                    };
                    TrackBase {
                        base,
                        limit: limit.max(base),
                        flex_weight: None,
                    }
                }
            }
        })
        .collect()
}
