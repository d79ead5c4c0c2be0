//! Space distribution for flexible and `minmax()` tracks.

use super::resolution::TrackBase;

/// Size flexible tracks from the space left after non-flexible tracks.
///
/// Spec: §11.7.1 Find the Size of an fr
///
/// One `fr` is the remaining space over the sum of unfrozen weights. A track
/// whose share falls below its base is frozen at the base and the `fr` is
/// recomputed without it.
pub fn distribute_flex_space(tracks: &mut [TrackBase], remaining_space: f32) {
    let mut frozen: Vec<bool> = tracks
        .iter()
        .map(|track| track.flex_weight.is_none())
        .collect();
    let mut space = remaining_space;
    for _ in 0..tracks.len() {
        let total_weight: f32 = tracks
            .iter()
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .filter_map(|(track, _)| track.flex_weight)
            .sum();
        if total_weight <= 0.0 || space <= 0.0 {
            break;
        }
        let fr_size = space / total_weight;
        let mut refrozen = false;
        for (track, is_frozen) in tracks.iter_mut().zip(frozen.iter_mut()) {
            let (false, Some(weight)) = (*is_frozen, track.flex_weight) else {
                continue;
            };
            if weight * fr_size < track.base {
                *is_frozen = true;
                space -= track.base;
                refrozen = true;
            }
        }
        tracing::debug!(
            "distribute_flex_space: space={}, total_weight={}, fr={}, refrozen={}",
            space,
            total_weight,
            fr_size,
            refrozen
        );
        if !refrozen {
            for (track, is_frozen) in tracks.iter_mut().zip(&frozen) {
                if let (false, Some(weight)) = (*is_frozen, track.flex_weight) {
                    track.base = weight * fr_size;
                }
            }
            return;
        }
    }
}

/// Grow tracks below their growth limit by equal shares of positive space.
///
/// Spec: §11.6 Maximize Tracks
pub fn maximize_tracks(tracks: &mut [TrackBase], remaining_space: f32) {
    let mut space = remaining_space;
    for _ in 0..=tracks.len() {
        if space <= f32::EPSILON {
            break;
        }
        let growable = tracks
            .iter()
            .filter(|track| track.limit > track.base)
            .count();
        if growable == 0 {
            break;
        }
        let share = space / growable as f32;
        for track in tracks.iter_mut().filter(|track| track.limit > track.base) {
            let grown = (track.base + share).min(track.limit);
            space -= grown - track.base;
            track.base = grown;
        }
    }
}
