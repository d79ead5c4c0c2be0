//! Flex grow and shrink distribution.
//!
//! Spec: §9.7 Resolving Flexible Lengths
//! <https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths>

use log::debug;

use super::super::FlexChild;

/// Clamp a value between min and max inclusive. A min above max wins.
#[inline]
pub fn clamp(value: f32, min_v: f32, max_v: f32) -> f32 {
    value.min(max_v).max(min_v)
}

/// Distribute positive free space by flex-grow weight.
///
/// Items that hit their max are frozen and the leftover is shared again among
/// the rest.
fn distribute_grow(free_space: f32, items: &[FlexChild], sizes: &mut [f32]) {
    let mut remaining = free_space;
    let mut frozen: Vec<bool> = items.iter().map(|child| child.flex_grow <= 0.0).collect();
    for _ in 0..items.len() {
        let sum_grow: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .map(|(child, _)| child.flex_grow)
            .sum();
        if sum_grow <= 0.0 || remaining <= 0.0 {
            break;
        }
        let unit = remaining / sum_grow;
        let mut any_frozen = false;
        let mut applied_total = 0.0;
        for ((size_ref, child), frozen_ref) in sizes.iter_mut().zip(items).zip(frozen.iter_mut()) {
            if *frozen_ref {
                continue;
            }
            let grown = *size_ref + child.flex_grow * unit;
            let clamped = clamp(grown, child.min_main, child.max_main);
            applied_total += clamped - *size_ref;
            *size_ref = clamped;
            if clamped < grown {
                *frozen_ref = true;
                any_frozen = true;
            }
        }
        remaining -= applied_total;
        if !any_frozen {
            break;
        }
    }
}

/// Distribute negative free space by `flex-shrink × base size` weight.
///
/// Items that hit their min are frozen and the overflow is shared again.
fn distribute_shrink(free_space: f32, items: &[FlexChild], sizes: &mut [f32]) {
    let mut remaining = -free_space;
    let bases: Vec<f32> = sizes.iter().map(|size| size.max(0.0)).collect();
    let mut frozen: Vec<bool> = items.iter().map(|child| child.flex_shrink <= 0.0).collect();
    for _ in 0..items.len() {
        let sum_weight: f32 = items
            .iter()
            .zip(&bases)
            .zip(&frozen)
            .filter(|(_, is_frozen)| !**is_frozen)
            .map(|((child, base), _)| child.flex_shrink * base)
            .sum();
        if sum_weight <= 0.0 || remaining <= 0.0 {
            break;
        }
        let mut any_frozen = false;
        let mut applied_total = 0.0;
        for (((size_ref, child), base), frozen_ref) in sizes
            .iter_mut()
            .zip(items)
            .zip(&bases)
            .zip(frozen.iter_mut())
        {
            if *frozen_ref {
                continue;
            }
            let weight = child.flex_shrink * base;
            let shrunk = *size_ref - remaining * (weight / sum_weight);
            let clamped = clamp(shrunk.max(0.0), child.min_main, child.max_main);
            applied_total += *size_ref - clamped;
            *size_ref = clamped;
            if clamped > shrunk {
                *frozen_ref = true;
                any_frozen = true;
            }
        }
        remaining -= applied_total;
        if !any_frozen {
            break;
        }
    }
}

/// Resolve the used main size of every item on one line.
///
/// Returns border-box main sizes in item order. With zero total grow (or
/// shrink) weight the items keep their hypothetical sizes.
pub fn resolve_flexible_lengths(available_main: f32, main_gap: f32, items: &[FlexChild]) -> Vec<f32> {
    let mut sizes: Vec<f32> = items.iter().map(FlexChild::hypothetical_main).collect();
    let margins: f32 = items.iter().map(FlexChild::main_margins).sum();
    let gaps_total = main_gap * items.len().saturating_sub(1) as f32;
    let sum: f32 = sizes.iter().sum();
    let free_space = available_main - sum - margins - gaps_total;
    debug!(
        target: "css::flexbox::flex_lengths",
        "items={} sum={sum:.3} margins={margins:.3} gaps={gaps_total:.3} available={available_main:.3} free={free_space:.3}",
        items.len()
    );
    if free_space > 0.0 {
        distribute_grow(free_space, items, &mut sizes);
    } else if free_space < 0.0 {
        distribute_shrink(free_space, items, &mut sizes);
    }
    sizes
}
