//! Legacy group migrator — reclassifies pre-taxonomy content into task cards
//!
//! Older documents stored free-form `{groups: [{title, description, items}]}`
//! with no scene association. Migration infers a scene for each group from
//! its title using the keyword tables in [`crate::taxonomy`]:
//!
//! 1. Normalize the title (lowercase, keep letters/digits/spaces/hyphens,
//!    collapse whitespace, trim)
//! 2. The first scene in canonical order with a keyword contained in the
//!    normalized title is the group's match
//! 3. The first group to match a scene owns it; a later group whose match is
//!    already owned is dropped, not retried against other scenes
//!
//! Migration is lossy: unmatched groups disappear. The output always
//! satisfies the same invariants as [`crate::normalizer::normalize_task_cards`].

use std::collections::BTreeSet;

use serde_json::Value;

use crate::normalizer::{default_task_cards, normalize_string_list};
use crate::taxonomy::{scene_preset, UsageScene};
use crate::{LegacyGroup, TaskCardsDocument};

/// Migrate a legacy `{groups: [...]}` document to a canonical document
///
/// Any other shape yields [`default_task_cards`] for `default_checked`.
pub fn normalize_task_cards_from_legacy_groups(
    raw: &Value,
    default_checked: &[UsageScene],
) -> TaskCardsDocument {
    let mut doc = default_task_cards(default_checked);
    let mut used: BTreeSet<UsageScene> = BTreeSet::new();

    let groups = raw
        .get("groups")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    for (index, group) in groups.iter().enumerate() {
        let Some(group) = legacy_group_from_value(group) else {
            continue;
        };
        let normalized = normalize_title(&group.title);
        if normalized.is_empty() {
            continue;
        }

        let Some(scene) = match_scene(&normalized) else {
            tracing::debug!(index, title = %group.title, "legacy group matched no scene");
            continue;
        };
        if !used.insert(scene) {
            tracing::debug!(index, title = %group.title, scene = %scene, "legacy group scene already taken");
            continue;
        }

        let card = &mut doc.cards[scene.index()];
        card.checked = true;
        let title = group.title.trim();
        if !title.is_empty() {
            card.title = title.to_string();
        }
        if let Some(description) = group.description.filter(|d| !d.is_empty()) {
            card.description = description;
        }
        card.items = group.items.unwrap_or_default();
        tracing::debug!(index, scene = %scene, items = card.items.len(), "migrated legacy group");
    }

    doc
}

/// Lowercase, strip to `[a-z0-9 -]` (Unicode letters and digits included),
/// collapse whitespace, trim
pub fn normalize_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First scene in canonical order with a keyword inside `normalized_title`
pub fn match_scene(normalized_title: &str) -> Option<UsageScene> {
    UsageScene::ALL.into_iter().find(|scene| {
        scene_preset(*scene)
            .keywords
            .iter()
            .any(|kw| normalized_title.contains(kw))
    })
}

/// Read a legacy group from untrusted JSON
///
/// `None` for non-objects. Non-string titles and descriptions read as
/// absent; items go through the total list normalizer.
pub fn legacy_group_from_value(value: &Value) -> Option<LegacyGroup> {
    let obj = value.as_object()?;
    Some(LegacyGroup {
        title: obj
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: obj
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        items: Some(
            obj.get("items")
                .map(normalize_string_list)
                .unwrap_or_default(),
        ),
    })
}
