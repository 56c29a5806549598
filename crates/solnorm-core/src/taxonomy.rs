//! Usage-scene taxonomy — the fixed, ordered set of work situations
//!
//! Every canonical task-card document holds exactly one card per entry of
//! [`UsageScene::ALL`], in that order. Each scene carries a display title, a
//! static preset image reference, and the keyword table the legacy migrator
//! matches against.
//!
//! Keywords are stored already lowercased and in the same normalized form
//! the migrator produces for legacy titles (letters, digits, spaces, and
//! hyphens only), so matching is a plain substring test.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A usage scene code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageScene {
    HeightWork,
    ConfinedSpace,
    Construction,
    SteelWork,
    Welding,
    ElectricalWork,
    ChemicalHandling,
    DustyWork,
    WetGround,
    NoisyEnvironment,
    ColdEnvironment,
    Logistics,
}

/// Static presentation and matching data for one scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenePreset {
    pub title: &'static str,
    pub image: &'static str,
    pub keywords: &'static [&'static str],
}

impl UsageScene {
    /// All scenes in canonical order
    pub const ALL: [UsageScene; 12] = [
        UsageScene::HeightWork,
        UsageScene::ConfinedSpace,
        UsageScene::Construction,
        UsageScene::SteelWork,
        UsageScene::Welding,
        UsageScene::ElectricalWork,
        UsageScene::ChemicalHandling,
        UsageScene::DustyWork,
        UsageScene::WetGround,
        UsageScene::NoisyEnvironment,
        UsageScene::ColdEnvironment,
        UsageScene::Logistics,
    ];

    /// Wire code, e.g. `"height-work"`
    pub fn as_str(self) -> &'static str {
        match self {
            UsageScene::HeightWork => "height-work",
            UsageScene::ConfinedSpace => "confined-space",
            UsageScene::Construction => "construction",
            UsageScene::SteelWork => "steel-work",
            UsageScene::Welding => "welding",
            UsageScene::ElectricalWork => "electrical-work",
            UsageScene::ChemicalHandling => "chemical-handling",
            UsageScene::DustyWork => "dusty-work",
            UsageScene::WetGround => "wet-ground",
            UsageScene::NoisyEnvironment => "noisy-environment",
            UsageScene::ColdEnvironment => "cold-environment",
            UsageScene::Logistics => "logistics",
        }
    }

    /// Look up a scene by its wire code. Exact match only.
    pub fn from_code(code: &str) -> Option<UsageScene> {
        UsageScene::ALL.into_iter().find(|s| s.as_str() == code)
    }

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn preset(self) -> &'static ScenePreset {
        scene_preset(self)
    }
}

impl fmt::Display for UsageScene {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Preset table ───────────────────────────────────────────

// Indexed by `UsageScene as usize`; order must match `UsageScene::ALL`.
const PRESETS: [ScenePreset; 12] = [
    ScenePreset {
        title: "Working at Height",
        image: "/images/scenes/height-work.jpg",
        keywords: &[
            "height-work",
            "working at height",
            "height",
            "fall arrest",
            "scaffold",
            "ladder",
            "roofing",
            "roof work",
        ],
    },
    ScenePreset {
        title: "Confined Spaces",
        image: "/images/scenes/confined-space.jpg",
        keywords: &[
            "confined-space",
            "confined spaces",
            "confined",
            "manhole",
            "tank entry",
        ],
    },
    ScenePreset {
        title: "Construction Sites",
        image: "/images/scenes/construction.jpg",
        keywords: &[
            "construction",
            "construction sites",
            "building site",
            "site work",
        ],
    },
    ScenePreset {
        title: "Steel and Metal Work",
        image: "/images/scenes/steel-work.jpg",
        keywords: &[
            "steel-work",
            "steel and metal work",
            "steel",
            "metal",
            "fabrication",
        ],
    },
    ScenePreset {
        title: "Welding and Hot Work",
        image: "/images/scenes/welding.jpg",
        keywords: &["welding", "welding and hot work", "weld", "hot work"],
    },
    ScenePreset {
        title: "Electrical Work",
        image: "/images/scenes/electrical-work.jpg",
        keywords: &[
            "electrical-work",
            "electrical work",
            "electric",
            "live wire",
            "high voltage",
        ],
    },
    ScenePreset {
        title: "Chemical Handling",
        image: "/images/scenes/chemical-handling.jpg",
        keywords: &[
            "chemical-handling",
            "chemical handling",
            "chemical",
            "acid",
            "solvent",
            "hazmat",
        ],
    },
    ScenePreset {
        title: "Dusty Work",
        image: "/images/scenes/dusty-work.jpg",
        keywords: &[
            "dusty-work",
            "dusty work",
            "dusty",
            "dust mask",
            "demolition",
            "sanding",
            "particulate",
        ],
    },
    ScenePreset {
        title: "Wet and Slippery Ground",
        image: "/images/scenes/wet-ground.jpg",
        keywords: &[
            "wet-ground",
            "wet and slippery ground",
            "wet",
            "slippery",
            "waterlogged",
        ],
    },
    ScenePreset {
        title: "Noisy Environments",
        image: "/images/scenes/noisy-environment.jpg",
        keywords: &[
            "noisy-environment",
            "noisy environments",
            "noise",
            "noisy",
            "hearing protection",
        ],
    },
    ScenePreset {
        title: "Cold Environments",
        image: "/images/scenes/cold-environment.jpg",
        keywords: &[
            "cold-environment",
            "cold environments",
            "cold",
            "freezer",
            "winter",
        ],
    },
    ScenePreset {
        title: "Warehouse and Logistics",
        image: "/images/scenes/logistics.jpg",
        keywords: &[
            "logistics",
            "warehouse and logistics",
            "warehouse",
            "forklift",
            "loading dock",
        ],
    },
];

/// Preset data for a scene. Defined for every member of the taxonomy.
pub fn scene_preset(scene: UsageScene) -> &'static ScenePreset {
    &PRESETS[scene.index()]
}

/// True if `value` is a JSON string naming a taxonomy scene
pub fn is_valid_usage_scene(value: &serde_json::Value) -> bool {
    scene_from_value(value).is_some()
}

/// Read a scene from untrusted JSON
pub fn scene_from_value(value: &serde_json::Value) -> Option<UsageScene> {
    value.as_str().and_then(UsageScene::from_code)
}
