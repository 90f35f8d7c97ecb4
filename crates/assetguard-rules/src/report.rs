//! Violation records and the bounded sink that collects them during a scan.

use crate::category::{AssetCategory, ConditionCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Default maximum number of violations reported by one scan.
pub const DEFAULT_MAX_VIOLATIONS: usize = 999;

/// Kind of convention violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    FolderNameError,
    PrefabNameError,
    PrefabLocationError,
    SpecialFolderNotExists,
    ScriptNameError,
    ScriptLocationError,
    TextureNameError,
    TextureLocationError,
    SceneNameError,
    SceneLocationError,
    FolderNotContain,
    FolderNotValid,
    SoundNameError,
    SoundLocationError,
    ModelNameError,
    ModelLocationError,
    MaterialNameError,
    MaterialLocationError,
    AnimationNameError,
    AnimationLocationError,
}

/// Coarse grouping of violation kinds, used for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationGroup {
    WrongName,
    WrongLocation,
    NotExists,
    NotContain,
    NotValid,
}

impl ViolationGroup {
    pub fn label(self) -> &'static str {
        match self {
            ViolationGroup::WrongName => "WRONG NAME",
            ViolationGroup::WrongLocation => "WRONG LOCATION",
            ViolationGroup::NotExists => "NOT EXISTS",
            ViolationGroup::NotContain => "NOT CONTAIN",
            ViolationGroup::NotValid => "NOT VALID",
        }
    }
}

impl fmt::Display for ViolationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ViolationKind {
    /// Naming violation for `category`.
    pub fn naming(category: AssetCategory) -> Self {
        match category {
            AssetCategory::Folder => ViolationKind::FolderNameError,
            AssetCategory::Scene => ViolationKind::SceneNameError,
            AssetCategory::Prefab => ViolationKind::PrefabNameError,
            AssetCategory::Script => ViolationKind::ScriptNameError,
            AssetCategory::Texture => ViolationKind::TextureNameError,
            AssetCategory::Model => ViolationKind::ModelNameError,
            AssetCategory::Sound => ViolationKind::SoundNameError,
            AssetCategory::Material => ViolationKind::MaterialNameError,
            AssetCategory::Animation => ViolationKind::AnimationNameError,
        }
    }

    /// Location violation for `category`. Folders have no location rule.
    pub fn location(category: ConditionCategory) -> Self {
        match category {
            ConditionCategory::Scene => ViolationKind::SceneLocationError,
            ConditionCategory::Prefab => ViolationKind::PrefabLocationError,
            ConditionCategory::Script => ViolationKind::ScriptLocationError,
            ConditionCategory::Texture => ViolationKind::TextureLocationError,
            ConditionCategory::Graphics3D => ViolationKind::ModelLocationError,
            ConditionCategory::Sound => ViolationKind::SoundLocationError,
            ConditionCategory::Material => ViolationKind::MaterialLocationError,
            ConditionCategory::Animation => ViolationKind::AnimationLocationError,
        }
    }

    pub fn group(self) -> ViolationGroup {
        match self {
            ViolationKind::FolderNameError
            | ViolationKind::PrefabNameError
            | ViolationKind::ScriptNameError
            | ViolationKind::TextureNameError
            | ViolationKind::SceneNameError
            | ViolationKind::SoundNameError
            | ViolationKind::ModelNameError
            | ViolationKind::MaterialNameError
            | ViolationKind::AnimationNameError => ViolationGroup::WrongName,
            ViolationKind::PrefabLocationError
            | ViolationKind::ScriptLocationError
            | ViolationKind::TextureLocationError
            | ViolationKind::SceneLocationError
            | ViolationKind::SoundLocationError
            | ViolationKind::ModelLocationError
            | ViolationKind::MaterialLocationError
            | ViolationKind::AnimationLocationError => ViolationGroup::WrongLocation,
            ViolationKind::SpecialFolderNotExists => ViolationGroup::NotExists,
            ViolationKind::FolderNotContain => ViolationGroup::NotContain,
            ViolationKind::FolderNotValid => ViolationGroup::NotValid,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single convention violation found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,

    /// Category the violated rule belongs to.
    pub category: AssetCategory,

    /// Offending asset or folder name. For condition violations this is a
    /// descriptive placeholder such as `[Missing Prefab]`.
    pub asset_name: String,

    /// Containing folder, project-relative with `/` separators.
    pub folder_path: String,

    /// Expected form: a naming example, a location hint or a suggested action.
    /// Empty when there is nothing to suggest.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hint: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        category: AssetCategory,
        asset_name: impl Into<String>,
        folder_path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            category,
            asset_name: asset_name.into(),
            folder_path: folder_path.into(),
            hint: String::new(),
        }
    }

    /// Builder method to set the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn group(&self) -> ViolationGroup {
        self.kind.group()
    }

    /// Folder path joined with the asset name.
    pub fn full_path(&self) -> String {
        if self.folder_path.is_empty() {
            self.asset_name.clone()
        } else {
            format!("{}/{}", self.folder_path, self.asset_name)
        }
    }
}

/// Bounded, insertion-ordered violation collection.
///
/// Identical violations are recorded once. Once `count() == cap()` every
/// further [`ErrorSink::try_add`] is rejected without touching the state.
#[derive(Debug, Clone)]
pub struct ErrorSink {
    cap: usize,
    violations: Vec<Violation>,
    seen: HashSet<Violation>,
}

impl ErrorSink {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            violations: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Clears all recorded violations, keeping the cap.
    pub fn reset(&mut self) {
        self.violations.clear();
        self.seen.clear();
    }

    /// Records `violation` unless the sink is full or already holds it.
    pub fn try_add(&mut self, violation: Violation) -> bool {
        if !self.has_capacity() || self.seen.contains(&violation) {
            return false;
        }
        self.seen.insert(violation.clone());
        self.violations.push(violation);
        true
    }

    /// True while more violations can be recorded.
    pub fn has_capacity(&self) -> bool {
        self.violations.len() < self.cap
    }

    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in insertion order.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Changes the cap for the next scan. Already recorded violations are kept.
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
    }

    /// Number of recorded violations per group, in first-seen order.
    pub fn group_counts(&self) -> Vec<(ViolationGroup, usize)> {
        let mut counts: Vec<(ViolationGroup, usize)> = Vec::new();
        for violation in &self.violations {
            let group = violation.group();
            match counts.iter_mut().find(|(g, _)| *g == group) {
                Some((_, count)) => *count += 1,
                None => counts.push((group, 1)),
            }
        }
        counts
    }
}

impl Default for ErrorSink {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VIOLATIONS)
    }
}
