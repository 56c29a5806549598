//! Task-card normalizer — converts stored content to the canonical document
//!
//! The normalizer accepts any JSON value. Only a `{cards: [...]}` shape is
//! inspected; anything else is treated as an empty card set.
//!
//! # Guarantees
//!
//! - **Total**: never panics, never fails
//! - **Complete**: output has exactly one card per [`UsageScene`], in
//!   canonical order, whatever the input held (none, some, duplicates,
//!   unknown scenes)
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)` for the same
//!   default-checked scenes. Defaults only apply to cards without an
//!   explicit boolean `checked`, and normalized cards always have one.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::taxonomy::{scene_from_value, UsageScene};
use crate::{TaskCard, TaskCardsDocument};

// ── Public API ─────────────────────────────────────────────

/// Normalize an arbitrary stored value into a canonical task-card document
///
/// Steps:
/// 1. Collect `default_checked` into a set
/// 2. Fold every `cards` entry with a known `scene` into a per-scene map;
///    a later entry for the same scene replaces an earlier one
/// 3. Emit one card per scene in taxonomy order, folded or default
pub fn normalize_task_cards(raw: &Value, default_checked: &[UsageScene]) -> TaskCardsDocument {
    let checked = checked_set(default_checked);

    let mut folded: BTreeMap<UsageScene, TaskCard> = BTreeMap::new();
    let mut skipped = 0usize;
    for entry in raw_cards(raw) {
        match normalize_card(entry, &checked) {
            Some(card) => {
                folded.insert(card.scene, card);
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "dropped cards without a known scene");
    }

    let cards = UsageScene::ALL
        .into_iter()
        .map(|scene| {
            folded
                .remove(&scene)
                .unwrap_or_else(|| TaskCard::default_for(scene, checked.contains(&scene)))
        })
        .collect();

    TaskCardsDocument { cards }
}

/// The canonical document for an empty input
pub fn default_task_cards(default_checked: &[UsageScene]) -> TaskCardsDocument {
    normalize_task_cards(&Value::Null, default_checked)
}

/// Normalize a stored document of unknown schema generation
///
/// A document with a `groups` array and no `cards` array is legacy content
/// and goes through the migrator; everything else through
/// [`normalize_task_cards`].
pub fn normalize_document(raw: &Value, default_checked: &[UsageScene]) -> TaskCardsDocument {
    if is_legacy_document(raw) {
        crate::migrator::normalize_task_cards_from_legacy_groups(raw, default_checked)
    } else {
        normalize_task_cards(raw, default_checked)
    }
}

/// True for the pre-taxonomy `{groups: [...]}` shape
pub fn is_legacy_document(raw: &Value) -> bool {
    let has = |field: &str| raw.get(field).is_some_and(Value::is_array);
    has("groups") && !has("cards")
}

/// True if `raw` is already its own normalization
pub fn is_canonical(raw: &Value) -> bool {
    *raw == normalize_task_cards(raw, &[]).to_value()
}

/// Lowercase hex SHA-256 of the document's compact JSON form
///
/// Field and card order are fixed, so equal documents hash equally.
pub fn content_hash(doc: &TaskCardsDocument) -> String {
    let canonical = serde_json::to_string(doc).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Filter untrusted scene codes down to taxonomy members
///
/// Unknown codes are dropped silently; order and duplicates are kept, the
/// normalizers only use the result as a set.
pub fn scenes_from_codes<S: AsRef<str>>(codes: &[S]) -> Vec<UsageScene> {
    codes
        .iter()
        .filter_map(|c| UsageScene::from_code(c.as_ref()))
        .collect()
}

/// Total list normalizer
///
/// Non-array → empty. Non-string elements are dropped, strings trimmed,
/// empty strings dropped.
pub fn normalize_string_list(raw: &Value) -> Vec<String> {
    let Some(arr) = raw.as_array() else {
        return Vec::new();
    };
    arr.iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Helpers ────────────────────────────────────────────────

pub(crate) fn checked_set(default_checked: &[UsageScene]) -> BTreeSet<UsageScene> {
    default_checked.iter().copied().collect()
}

fn raw_cards(raw: &Value) -> &[Value] {
    raw.get("cards")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn normalize_card(entry: &Value, checked: &BTreeSet<UsageScene>) -> Option<TaskCard> {
    let scene = scene_from_value(entry.get("scene")?)?;

    let checked = entry
        .get("checked")
        .and_then(Value::as_bool)
        .unwrap_or_else(|| checked.contains(&scene));

    let title = match entry.get("title").and_then(Value::as_str) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => scene.preset().title.to_string(),
    };

    let description = entry
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let items = entry
        .get("items")
        .map(normalize_string_list)
        .unwrap_or_default();

    Some(TaskCard {
        scene,
        checked,
        title,
        description,
        items,
    })
}
