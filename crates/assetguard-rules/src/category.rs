//! Asset categories and per-condition applicability masks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of asset kinds that carry naming and location rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    Folder,
    Scene,
    Prefab,
    Script,
    Texture,
    Model,
    Sound,
    Material,
    Animation,
}

impl AssetCategory {
    /// Every category, in declaration order.
    pub const ALL: [AssetCategory; 9] = [
        AssetCategory::Folder,
        AssetCategory::Scene,
        AssetCategory::Prefab,
        AssetCategory::Script,
        AssetCategory::Texture,
        AssetCategory::Model,
        AssetCategory::Sound,
        AssetCategory::Material,
        AssetCategory::Animation,
    ];

    /// Display name, as used in reports and CSV export.
    pub fn name(self) -> &'static str {
        match self {
            AssetCategory::Folder => "Folder",
            AssetCategory::Scene => "Scene",
            AssetCategory::Prefab => "Prefab",
            AssetCategory::Script => "Script",
            AssetCategory::Texture => "Texture",
            AssetCategory::Model => "Model",
            AssetCategory::Sound => "Sound",
            AssetCategory::Material => "Material",
            AssetCategory::Animation => "Animation",
        }
    }

    /// The condition category for this asset category. Folders cannot be
    /// addressed by condition rules.
    pub fn as_condition(self) -> Option<ConditionCategory> {
        match self {
            AssetCategory::Folder => None,
            AssetCategory::Scene => Some(ConditionCategory::Scene),
            AssetCategory::Prefab => Some(ConditionCategory::Prefab),
            AssetCategory::Script => Some(ConditionCategory::Script),
            AssetCategory::Texture => Some(ConditionCategory::Texture),
            AssetCategory::Model => Some(ConditionCategory::Graphics3D),
            AssetCategory::Sound => Some(ConditionCategory::Sound),
            AssetCategory::Material => Some(ConditionCategory::Material),
            AssetCategory::Animation => Some(ConditionCategory::Animation),
        }
    }

    /// Suggested fix for a folder that is missing assets of this category.
    pub fn action_hint(self) -> &'static str {
        match self {
            AssetCategory::Folder => "Add/Create Folder(s)",
            AssetCategory::Scene => "Add/Create Scene",
            AssetCategory::Prefab => "Add/Create Prefab",
            AssetCategory::Script => "Add/Create Script",
            AssetCategory::Texture => "Add/Create Texture",
            AssetCategory::Model => "Add/Create 3D Model",
            AssetCategory::Sound => "Add/Create Sound",
            AssetCategory::Material => "Add/Create Material or Shader",
            AssetCategory::Animation => "Add/Create Animation or Animator Controller",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categories addressable by condition rules, in bit order.
///
/// The discriminant is the bit index inside a [`ConditionMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConditionCategory {
    Scene = 0,
    Prefab = 1,
    Script = 2,
    Texture = 3,
    Graphics3D = 4,
    Sound = 5,
    Material = 6,
    Animation = 7,
}

impl ConditionCategory {
    /// Every condition category, in bit order.
    pub const ALL: [ConditionCategory; 8] = [
        ConditionCategory::Scene,
        ConditionCategory::Prefab,
        ConditionCategory::Script,
        ConditionCategory::Texture,
        ConditionCategory::Graphics3D,
        ConditionCategory::Sound,
        ConditionCategory::Material,
        ConditionCategory::Animation,
    ];

    /// Bit index of this category inside a [`ConditionMask`].
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Looks a category up by its bit index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// The asset category validated under this condition category.
    pub fn asset_category(self) -> AssetCategory {
        match self {
            ConditionCategory::Scene => AssetCategory::Scene,
            ConditionCategory::Prefab => AssetCategory::Prefab,
            ConditionCategory::Script => AssetCategory::Script,
            ConditionCategory::Texture => AssetCategory::Texture,
            ConditionCategory::Graphics3D => AssetCategory::Model,
            ConditionCategory::Sound => AssetCategory::Sound,
            ConditionCategory::Material => AssetCategory::Material,
            ConditionCategory::Animation => AssetCategory::Animation,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConditionCategory::Scene => "Scene",
            ConditionCategory::Prefab => "Prefab",
            ConditionCategory::Script => "Script",
            ConditionCategory::Texture => "Texture",
            ConditionCategory::Graphics3D => "Graphics3D",
            ConditionCategory::Sound => "Sound",
            ConditionCategory::Material => "Material",
            ConditionCategory::Animation => "Animation",
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-width set of condition categories, one bit per [`ConditionCategory`].
///
/// Configuration files carry either the list of category names or the raw
/// selection integer; both decode to the same mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<ConditionCategory>", from = "MaskRepr")]
pub struct ConditionMask(u8);

impl ConditionMask {
    pub const EMPTY: ConditionMask = ConditionMask(0);
    pub const SCENE: ConditionMask = ConditionMask(1 << 0);
    pub const PREFAB: ConditionMask = ConditionMask(1 << 1);
    pub const SCRIPT: ConditionMask = ConditionMask(1 << 2);
    pub const TEXTURE: ConditionMask = ConditionMask(1 << 3);
    pub const GRAPHICS_3D: ConditionMask = ConditionMask(1 << 4);
    pub const SOUND: ConditionMask = ConditionMask(1 << 5);
    pub const MATERIAL: ConditionMask = ConditionMask(1 << 6);
    pub const ANIMATION: ConditionMask = ConditionMask(1 << 7);
    pub const ALL: ConditionMask = ConditionMask(u8::MAX);

    /// Decodes a raw selection integer. Bits above the eighth are ignored.
    pub fn from_bits(bits: u32) -> Self {
        ConditionMask((bits & 0xFF) as u8)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if bit `category.index()` is set.
    pub fn contains(self, category: ConditionCategory) -> bool {
        (self.0 >> category.index()) & 1 == 1
    }

    pub fn insert(&mut self, category: ConditionCategory) {
        self.0 |= 1 << category.index();
    }

    pub fn remove(&mut self, category: ConditionCategory) {
        self.0 &= !(1 << category.index());
    }

    /// Iterates the selected categories in bit order.
    pub fn iter(self) -> impl Iterator<Item = ConditionCategory> {
        ConditionCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }
}

impl std::ops::BitOr for ConditionMask {
    type Output = ConditionMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        ConditionMask(self.0 | rhs.0)
    }
}

impl From<ConditionCategory> for ConditionMask {
    fn from(category: ConditionCategory) -> Self {
        ConditionMask(1 << category.index())
    }
}

impl FromIterator<ConditionCategory> for ConditionMask {
    fn from_iter<I: IntoIterator<Item = ConditionCategory>>(iter: I) -> Self {
        let mut mask = ConditionMask::EMPTY;
        for category in iter {
            mask.insert(category);
        }
        mask
    }
}

impl From<ConditionMask> for Vec<ConditionCategory> {
    fn from(mask: ConditionMask) -> Self {
        mask.iter().collect()
    }
}

/// On-disk forms of a [`ConditionMask`].
#[derive(Deserialize)]
#[serde(untagged)]
enum MaskRepr {
    Bits(u32),
    Names(Vec<ConditionCategory>),
}

impl From<MaskRepr> for ConditionMask {
    fn from(repr: MaskRepr) -> Self {
        match repr {
            MaskRepr::Bits(bits) => ConditionMask::from_bits(bits),
            MaskRepr::Names(names) => names.into_iter().collect(),
        }
    }
}
