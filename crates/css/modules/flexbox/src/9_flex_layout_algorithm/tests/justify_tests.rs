//! Tests for `justify-content`, gaps and main-axis reversal.

use super::*;

fn justified(justify: JustifyContent, main_size: f32) -> Vec<f32> {
    let container = FlexContainerInputs {
        justify_content: justify,
        ..row(main_size)
    };
    main_offsets(&layout_flex_container(&container, &three_items_50()))
}

#[test]
/// `space-between` splits the free space into the inner gaps only.
///
/// # Panics
/// Panics if three 50px items in 250px are not at 0, 100, 200.
fn space_between() {
    assert!(approx_eq(
        &justified(JustifyContent::SpaceBetween, 250.0),
        &[0.0, 100.0, 200.0]
    ));
}

#[test]
/// Each remaining mode follows its formula.
///
/// # Panics
/// Panics if any mode misplaces the first item or the spacing.
fn remaining_modes() {
    // Free space is 150 in a 300px container.
    assert!(approx_eq(
        &justified(JustifyContent::Start, 300.0),
        &[0.0, 50.0, 100.0]
    ));
    assert!(approx_eq(
        &justified(JustifyContent::End, 300.0),
        &[150.0, 200.0, 250.0]
    ));
    assert!(approx_eq(
        &justified(JustifyContent::Center, 300.0),
        &[75.0, 125.0, 175.0]
    ));
    assert!(approx_eq(
        &justified(JustifyContent::SpaceAround, 300.0),
        &[25.0, 125.0, 225.0]
    ));
    assert!(approx_eq(
        &justified(JustifyContent::SpaceEvenly, 350.0),
        &[50.0, 150.0, 250.0]
    ));
}

#[test]
/// A single item under `space-between` behaves like `start`.
///
/// # Panics
/// Panics if the lone item is not at 0.
fn space_between_single_item() {
    let container = FlexContainerInputs {
        justify_content: JustifyContent::SpaceBetween,
        ..row(200.0)
    };
    let layout = layout_flex_container(&container, &[item(1, 50.0)]);
    assert!(approx_eq(&main_offsets(&layout), &[0.0]));
}

#[test]
/// Gaps sit between items and reduce free space.
///
/// # Panics
/// Panics if the gap is not applied once per adjacent pair.
fn main_gap_between_items() {
    let container = FlexContainerInputs {
        main_gap: 10.0,
        justify_content: JustifyContent::End,
        ..row(200.0)
    };
    let layout = layout_flex_container(&container, &three_items_50());
    assert!(approx_eq(&main_offsets(&layout), &[30.0, 90.0, 150.0]));
}

#[test]
/// Reversed directions mirror offsets across the container.
///
/// # Panics
/// Panics if `row-reverse` does not mirror the forward layout.
fn row_reverse_mirrors() {
    let container = FlexContainerInputs {
        direction: FlexDirection::RowReverse,
        ..row(300.0)
    };
    let layout = layout_flex_container(&container, &three_items_50());
    assert!(approx_eq(&main_offsets(&layout), &[250.0, 200.0, 150.0]));
}

#[test]
/// An indefinite main size shrink-wraps the items.
///
/// # Panics
/// Panics if the used main size is not the sum of the items.
fn indefinite_main_size_fits_content() {
    let container = FlexContainerInputs {
        main_gap: 5.0,
        ..FlexContainerInputs::default()
    };
    let layout = layout_flex_container(&container, &three_items_50());
    assert!((layout.main_size - 160.0).abs() < EPSILON);
    assert!(approx_eq(&main_offsets(&layout), &[0.0, 55.0, 110.0]));
}

#[test]
/// An empty container produces no placements and no lines.
///
/// # Panics
/// Panics if an empty container yields placements.
fn empty_container() {
    let layout = layout_flex_container(&row(100.0), &[]);
    assert!(layout.placements.is_empty());
    assert_eq!(layout.line_count, 0);
}
