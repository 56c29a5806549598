//! Body-anchor registry, coordinate utilities, and the anchor resolver
//!
//! Anchors place a content-list item on a body map drawn over a reference
//! image. Coordinates are percentages of the image's width and height, so
//! each axis lives in `[0, 100]`.
//!
//! Two schema generations coexist in stored content:
//!
//! - **named keys** (`bodyAnchorKey: "chest"`), resolved through the registry
//! - **raw points** (`bodyAnchor: {x, y}`), written before named keys existed
//!
//! The resolver prefers the named key. Raw points that sit on one of the
//! historical preset coordinates are upgraded to that preset's current
//! canonical point, so retuning the registry moves old content too.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ListItem;

/// Lower bound of each axis
pub const AXIS_MIN: f64 = 0.0;
/// Upper bound of each axis
pub const AXIS_MAX: f64 = 100.0;

/// Per-axis distance within which a raw point counts as a legacy preset
pub const LEGACY_ANCHOR_TOLERANCE: f64 = 0.5;

/// Key applied when an anchor is enabled on an item without a valid key
pub const DEFAULT_ANCHOR_KEY: AnchorKey = AnchorKey::Chest;

// ── Types ──────────────────────────────────────────────────

/// A percentage coordinate over the reference image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Read a structurally valid point from untrusted JSON.
    ///
    /// Requires an object with finite numeric `x` and `y`. Out-of-range
    /// values are accepted here; range is enforced by [`clamp`].
    pub fn from_value(value: &Value) -> Option<AnchorPoint> {
        let obj = value.as_object()?;
        let x = obj.get("x")?.as_f64()?;
        let y = obj.get("y")?.as_f64()?;
        if x.is_finite() && y.is_finite() {
            Some(AnchorPoint { x, y })
        } else {
            None
        }
    }

    pub fn to_value(self) -> Value {
        serde_json::json!({ "x": self.x, "y": self.y })
    }

    pub fn with(self, axis: Axis, value: f64) -> AnchorPoint {
        match axis {
            Axis::X => AnchorPoint { x: value, ..self },
            Axis::Y => AnchorPoint { y: value, ..self },
        }
    }

    fn within(self, other: AnchorPoint, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// One coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// A named body location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorKey {
    Head,
    Eyes,
    Ears,
    Mouth,
    Chest,
    LeftHand,
    Waist,
    Feet,
}

impl AnchorKey {
    /// All keys in registry order
    pub const ALL: [AnchorKey; 8] = [
        AnchorKey::Head,
        AnchorKey::Eyes,
        AnchorKey::Ears,
        AnchorKey::Mouth,
        AnchorKey::Chest,
        AnchorKey::LeftHand,
        AnchorKey::Waist,
        AnchorKey::Feet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnchorKey::Head => "head",
            AnchorKey::Eyes => "eyes",
            AnchorKey::Ears => "ears",
            AnchorKey::Mouth => "mouth",
            AnchorKey::Chest => "chest",
            AnchorKey::LeftHand => "left-hand",
            AnchorKey::Waist => "waist",
            AnchorKey::Feet => "feet",
        }
    }

    pub fn from_code(code: &str) -> Option<AnchorKey> {
        AnchorKey::ALL.into_iter().find(|k| k.as_str() == code)
    }

    /// Read a key from untrusted JSON
    pub fn from_value(value: &Value) -> Option<AnchorKey> {
        value.as_str().and_then(AnchorKey::from_code)
    }

    /// Canonical display point, clamped
    pub fn point(self) -> AnchorPoint {
        clamp(REGISTRY[self as usize])
    }
}

impl fmt::Display for AnchorKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for resolving and editing anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorOptions {
    pub legacy_tolerance: f64,
    pub default_key: AnchorKey,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            legacy_tolerance: LEGACY_ANCHOR_TOLERANCE,
            default_key: DEFAULT_ANCHOR_KEY,
        }
    }
}

// ── Tables ─────────────────────────────────────────────────

// Indexed by `AnchorKey as usize`.
const REGISTRY: [AnchorPoint; 8] = [
    AnchorPoint::new(50.0, 8.0),
    AnchorPoint::new(50.0, 13.0),
    AnchorPoint::new(41.0, 14.0),
    AnchorPoint::new(50.0, 19.0),
    AnchorPoint::new(50.0, 50.0),
    AnchorPoint::new(22.0, 55.0),
    AnchorPoint::new(50.0, 60.0),
    AnchorPoint::new(50.0, 94.0),
];

/// Raw coordinates that meant a named location before keys existed
pub const LEGACY_PRESET_POINTS: [(AnchorKey, AnchorPoint); 6] = [
    (AnchorKey::Head, AnchorPoint::new(50.0, 6.0)),
    (AnchorKey::Eyes, AnchorPoint::new(50.0, 12.0)),
    (AnchorKey::Ears, AnchorPoint::new(40.0, 12.0)),
    (AnchorKey::Chest, AnchorPoint::new(50.0, 35.0)),
    (AnchorKey::LeftHand, AnchorPoint::new(20.0, 52.0)),
    (AnchorKey::Feet, AnchorPoint::new(50.0, 95.0)),
];

// ── Coordinate utilities ───────────────────────────────────

/// Structural check: object with finite numeric `x` and `y`
pub fn is_valid_anchor_point(value: &Value) -> bool {
    AnchorPoint::from_value(value).is_some()
}

/// Clamp each axis independently into `[0, 100]`
pub fn clamp(point: AnchorPoint) -> AnchorPoint {
    AnchorPoint {
        x: clamp_axis(point.x),
        y: clamp_axis(point.y),
    }
}

fn clamp_axis(v: f64) -> f64 {
    // NaN never reaches here through `from_value`, but stay total.
    if v.is_nan() {
        AXIS_MIN
    } else {
        v.clamp(AXIS_MIN, AXIS_MAX)
    }
}

// ── Registry lookups ───────────────────────────────────────

/// True if `value` is a JSON string naming a registry key
pub fn is_valid_anchor_key(value: &Value) -> bool {
    AnchorKey::from_value(value).is_some()
}

/// Canonical point for a key code; `None` for codes outside the registry
pub fn anchor_point(key: &str) -> Option<AnchorPoint> {
    AnchorKey::from_code(key).map(AnchorKey::point)
}

/// Match a clamped raw point against the legacy preset table
pub fn legacy_anchor_key(point: AnchorPoint, tolerance: f64) -> Option<AnchorKey> {
    LEGACY_PRESET_POINTS
        .iter()
        .find(|(_, legacy)| point.within(*legacy, tolerance))
        .map(|(key, _)| *key)
}

// ── Resolver ───────────────────────────────────────────────

/// Resolve the single display coordinate for a list item.
///
/// Key first, then raw point (upgraded if it is a legacy preset), then
/// nothing. Uses the default legacy tolerance.
pub fn resolve_list_item_body_anchor(item: &ListItem) -> Option<AnchorPoint> {
    resolve_list_item_body_anchor_with(item, &AnchorOptions::default())
}

/// [`resolve_list_item_body_anchor`] with explicit options
pub fn resolve_list_item_body_anchor_with(
    item: &ListItem,
    options: &AnchorOptions,
) -> Option<AnchorPoint> {
    if let Some(key) = item.anchor_key() {
        return Some(key.point());
    }

    let raw = clamp(item.anchor_point()?);
    match legacy_anchor_key(raw, options.legacy_tolerance) {
        Some(key) => {
            tracing::trace!(x = raw.x, y = raw.y, key = %key, "upgraded legacy anchor point");
            Some(key.point())
        }
        None => Some(raw),
    }
}
