//! Tests for the flex layout algorithm.

use super::*;

mod justify_tests;

/// Tolerance for float comparisons.
pub const EPSILON: f32 = 0.01;

/// Helper to create a `FlexChild` with the given basis and no flexing.
#[inline]
pub fn item(handle: u64, basis: f32) -> FlexChild {
    FlexChild {
        flex_shrink: 0.0,
        ..FlexChild::new(ItemRef(handle), basis)
    }
}

/// Helper to create three items with basis 50.
#[inline]
pub fn three_items_50() -> Vec<FlexChild> {
    vec![item(1, 50.0), item(2, 50.0), item(3, 50.0)]
}

/// Row container with a definite main size.
#[inline]
pub fn row(main_size: f32) -> FlexContainerInputs {
    FlexContainerInputs {
        main_size: Some(main_size),
        ..FlexContainerInputs::default()
    }
}

pub fn main_offsets(layout: &FlexLayout) -> Vec<f32> {
    layout
        .placements
        .iter()
        .map(|placement| placement.main_offset)
        .collect()
}

pub fn main_sizes(layout: &FlexLayout) -> Vec<f32> {
    layout
        .placements
        .iter()
        .map(|placement| placement.main_size)
        .collect()
}

pub fn approx_eq(actual: &[f32], expected: &[f32]) -> bool {
    actual.len() == expected.len()
        && actual
            .iter()
            .zip(expected)
            .all(|(got, want)| (got - want).abs() < EPSILON)
}
