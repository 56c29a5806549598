//! Anchor editor operations
//!
//! Stateless helpers for an editing surface. Each takes an item by
//! reference and returns a new item; none can leave an item with a dangling
//! or half-written anchor. Invalid input is a silent no-op: the caller gets
//! the item back unchanged and simply re-renders it.

use serde_json::Value;

use crate::anchor::{
    clamp, resolve_list_item_body_anchor_with, AnchorKey, AnchorOptions, Axis,
};
use crate::ListItem;

/// The one content-block kind whose list items carry body anchors
pub const ANCHOR_SECTION_KEY: &str = "essential-categories";

pub fn should_show_anchor_editor(section_key: &str) -> bool {
    section_key == ANCHOR_SECTION_KEY
}

/// Enable or disable the anchor on an item
///
/// Disabling removes both `bodyAnchorKey` and `bodyAnchor`. Enabling keeps
/// a valid existing key (else the default key) and a valid existing point,
/// clamped (else the chosen key's point).
pub fn toggle_anchor(item: &ListItem, enabled: bool) -> ListItem {
    toggle_anchor_with(item, enabled, &AnchorOptions::default())
}

pub fn toggle_anchor_with(item: &ListItem, enabled: bool, options: &AnchorOptions) -> ListItem {
    let mut next = item.clone();
    if !enabled {
        next.body_anchor_key = None;
        next.body_anchor = None;
        return next;
    }

    let key = item.anchor_key().unwrap_or(options.default_key);
    let point = item
        .anchor_point()
        .map(clamp)
        .unwrap_or_else(|| key.point());

    next.body_anchor_key = Some(Value::String(key.as_str().to_string()));
    next.body_anchor = Some(point.to_value());
    next
}

/// Replace the anchor key; unknown keys leave the item unchanged
///
/// An invalid `bodyAnchor` next to the new key is dropped.
pub fn update_anchor_key(item: &ListItem, key: &str) -> ListItem {
    let Some(key) = AnchorKey::from_code(key) else {
        return item.clone();
    };
    ListItem {
        body_anchor_key: Some(Value::String(key.as_str().to_string())),
        body_anchor: item.anchor_point().and(item.body_anchor.clone()),
        ..item.clone()
    }
}

/// Overwrite one axis of the item's point from user-entered text
///
/// The starting point is the item's resolved anchor, or the default key's
/// point. A valid key is left in place and keeps precedence when resolving;
/// an invalid one is dropped. Text that is not a finite number leaves the
/// item unchanged.
pub fn update_anchor_axis(item: &ListItem, axis: Axis, raw_text: &str) -> ListItem {
    update_anchor_axis_with(item, axis, raw_text, &AnchorOptions::default())
}

pub fn update_anchor_axis_with(
    item: &ListItem,
    axis: Axis,
    raw_text: &str,
    options: &AnchorOptions,
) -> ListItem {
    let Some(value) = parse_coordinate(raw_text) else {
        return item.clone();
    };

    let current = resolve_list_item_body_anchor_with(item, options)
        .unwrap_or_else(|| options.default_key.point());
    let point = clamp(current.with(axis, value));

    ListItem {
        body_anchor_key: item.anchor_key().and(item.body_anchor_key.clone()),
        body_anchor: Some(point.to_value()),
        ..item.clone()
    }
}

fn parse_coordinate(raw_text: &str) -> Option<f64> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
