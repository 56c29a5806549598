//! Solnorm Core - solution-page content normalization engine
//!
//! Stored solution-page content has been authored by admins across several
//! schema revisions. This crate turns whatever the persistence layer hands
//! back into one complete, canonical shape that the editor and the page
//! renderer can use without checking for missing fields.
//!
//! # Architecture
//!
//! ```text
//! stored JSON ─┬─ {cards: [...]}  → normalizer ─┐
//!              └─ {groups: [...]} → migrator  ──┴→ TaskCardsDocument
//!
//! list item ───→ anchor resolver → AnchorPoint | none
//!           ───→ editor ops      → ListItem
//! ```
//!
//! # Guarantees
//!
//! - **Total**: no entry point panics or returns an error for any input
//! - **Complete**: one task card per usage scene, always in canonical order
//! - **Idempotent**: normalizing a normalized document changes nothing
//! - **Deterministic**: same input always produces identical output

pub mod anchor;
pub mod config;
pub mod editor;
pub mod error;
pub mod migrator;
pub mod normalizer;
pub mod taxonomy;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use anchor::{AnchorKey, AnchorOptions, AnchorPoint, Axis};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use taxonomy::{ScenePreset, UsageScene};

/// Canonical content unit for one usage scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCard {
    pub scene: UsageScene,
    pub checked: bool,
    pub title: String,
    pub description: String,
    pub items: Vec<String>,
}

impl TaskCard {
    /// The card a scene gets when the input says nothing about it
    pub fn default_for(scene: UsageScene, checked: bool) -> Self {
        Self {
            scene,
            checked,
            title: scene.preset().title.to_string(),
            description: String::new(),
            items: Vec::new(),
        }
    }
}

/// One card per usage scene, in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCardsDocument {
    pub cards: Vec<TaskCard>,
}

impl TaskCardsDocument {
    pub fn card(&self, scene: UsageScene) -> Option<&TaskCard> {
        self.cards.iter().find(|c| c.scene == scene)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Free-form content group from the pre-taxonomy schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyGroup {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

/// A content-list entry as stored
///
/// The anchor fields hold whatever JSON storage returned; they are only
/// interpreted through [`ListItem::anchor_key`] and
/// [`ListItem::anchor_point`]. Fields this crate does not know about are
/// kept in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        rename = "bodyAnchorKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub body_anchor_key: Option<Value>,
    #[serde(
        rename = "bodyAnchor",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub body_anchor: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListItem {
    /// Build an item from untrusted JSON without failing.
    ///
    /// Non-object input becomes an empty item. A non-string `title` or
    /// `text` is kept verbatim in `extra` rather than dropped.
    pub fn from_value(value: &Value) -> ListItem {
        let mut item = ListItem::default();
        let Some(obj) = value.as_object() else {
            return item;
        };
        for (k, v) in obj {
            match (k.as_str(), v) {
                ("title", Value::String(s)) => item.title = Some(s.clone()),
                ("text", Value::String(s)) => item.text = Some(s.clone()),
                ("bodyAnchorKey", Value::Null) | ("bodyAnchor", Value::Null) => {}
                ("bodyAnchorKey", v) => item.body_anchor_key = Some(v.clone()),
                ("bodyAnchor", v) => item.body_anchor = Some(v.clone()),
                _ => {
                    item.extra.insert(k.clone(), v.clone());
                }
            }
        }
        item
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// The stored key, if it names a registry entry
    pub fn anchor_key(&self) -> Option<AnchorKey> {
        self.body_anchor_key.as_ref().and_then(AnchorKey::from_value)
    }

    /// The stored raw point, if structurally valid (not clamped)
    pub fn anchor_point(&self) -> Option<AnchorPoint> {
        self.body_anchor.as_ref().and_then(AnchorPoint::from_value)
    }

    pub fn has_anchor_fields(&self) -> bool {
        self.body_anchor_key.is_some() || self.body_anchor.is_some()
    }
}
