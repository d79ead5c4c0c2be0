//! Flex Items: identification
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-items>

/// Opaque handle the caller uses to map results back to its own nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ItemRef(pub u64);

/// Style bits that decide whether a child participates in flex layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct ItemStyle {
    /// `display: none`.
    pub display_none: bool,
    /// `position: absolute` or `position: fixed`.
    pub out_of_flow: bool,
}

/// Returns true when the child is an in-flow flex item.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-items>
#[inline]
pub const fn is_flex_item(style: ItemStyle) -> bool {
    !style.display_none && !style.out_of_flow
}

/// Keep in-flow children in source order.
pub fn collect_flex_items<I>(children: I) -> Vec<ItemRef>
where
    I: IntoIterator<Item = (ItemRef, ItemStyle)>,
{
    children
        .into_iter()
        .filter(|(_, style)| is_flex_item(*style))
        .map(|(handle, _)| handle)
        .collect()
}
