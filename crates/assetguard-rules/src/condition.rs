//! Condition rules: folder formulas that must hold assets of given categories.
//!
//! A formula is a path relative to the project root with at most one `*`
//! segment standing for "any immediate subfolder", e.g. `Units\*\Prefabs`.
//! Each resolved folder that holds at least one asset of the category becomes
//! an allowed location for that category.

use crate::category::{AssetCategory, ConditionCategory, ConditionMask};
use crate::inventory::{AssetInventory, DiscoveryFilter};
use crate::path::{normalize_separators, project_path};
use crate::report::{ErrorSink, Violation, ViolationKind};
use serde::{Deserialize, Serialize};

/// Wildcard character inside a formula.
pub const WILDCARD: char = '*';

/// A user-authored condition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub formula: String,
    /// Categories this rule applies to.
    pub applies_to: ConditionMask,
}

impl ConditionRule {
    pub fn new(formula: impl Into<String>, applies_to: ConditionMask) -> Self {
        Self {
            formula: formula.into(),
            applies_to,
        }
    }
}

/// A formula split around its wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFormula {
    /// Path group before the wildcard.
    pub base: String,
    /// Path group after the wildcard, appended to every expanded subfolder.
    pub suffix: Option<String>,
}

impl ParsedFormula {
    /// Splits `formula` on its `/*` wildcard marker.
    ///
    /// Returns `None` unless the split yields one or two groups and, with two
    /// groups, the formula holds a single `*`.
    pub fn parse(formula: &str) -> Option<Self> {
        let groups = split_on_wildcard(formula);
        match groups.as_slice() {
            [base] => Some(Self {
                base: normalize_separators(base),
                suffix: None,
            }),
            [base, suffix] if formula.matches(WILDCARD).count() <= 1 => Some(Self {
                base: normalize_separators(base),
                suffix: Some(normalize_separators(suffix)),
            }),
            _ => None,
        }
    }

    /// Folder checked for one expanded subfolder.
    pub fn effective_folder(&self, subfolder: &str) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}/{}", subfolder, suffix),
            None => subfolder.to_string(),
        }
    }
}

/// Splits on `/*/` and trailing `/*` (either separator style), dropping
/// empty groups.
fn split_on_wildcard(formula: &str) -> Vec<String> {
    let normalized = formula.replace('\\', "/");
    let mut groups = Vec::new();
    let mut rest = normalized.as_str();
    while let Some(at) = rest.find("/*") {
        groups.push(&rest[..at]);
        rest = &rest[at + 2..];
        if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        }
    }
    groups.push(rest);
    groups
        .into_iter()
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}

/// Folders in which assets of one category are correctly located because a
/// condition rule resolved to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    folders: Vec<String>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a folder, ignoring duplicates.
    pub fn insert(&mut self, folder: impl Into<String>) {
        let folder = folder.into();
        if !self.folders.contains(&folder) {
            self.folders.push(folder);
        }
    }

    /// True if `folder` exactly equals an allowed folder.
    pub fn contains(&self, folder: &str) -> bool {
        self.folders.iter().any(|f| f == folder)
    }

    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Resolves condition rules against an inventory.
pub struct ConditionResolver<'a> {
    inventory: &'a dyn AssetInventory,
}

impl<'a> ConditionResolver<'a> {
    pub fn new(inventory: &'a dyn AssetInventory) -> Self {
        Self { inventory }
    }

    /// Builds the allow-list of `category` from `rules`, reporting folders
    /// that do not exist or hold no asset of the category.
    ///
    /// Rules whose mask excludes `category` and malformed formulas are
    /// skipped without a violation.
    pub fn resolve(
        &self,
        category: ConditionCategory,
        rules: &[ConditionRule],
        sink: &mut ErrorSink,
    ) -> AllowList {
        let filter = DiscoveryFilter::for_category(category);
        let mut allowed = AllowList::new();

        for (index, rule) in rules.iter().enumerate() {
            if !sink.has_capacity() {
                break;
            }
            if !rule.applies_to.contains(category) {
                continue;
            }
            let Some(formula) = ParsedFormula::parse(&rule.formula) else {
                tracing::warn!(
                    "condition {} skipped: malformed formula {:?}",
                    index + 1,
                    rule.formula
                );
                continue;
            };

            let base = project_path(&formula.base);
            if !self.inventory.directory_exists(&base) {
                sink.try_add(not_valid(index, rule, &base));
                continue;
            }

            let subfolders = self.inventory.list_subfolders(&base);
            if subfolders.is_empty() {
                self.check_folder(&filter, &base, &mut allowed, sink);
                continue;
            }

            for subfolder in &subfolders {
                let folder = formula.effective_folder(subfolder);
                if self.inventory.directory_exists(&folder) {
                    self.check_folder(&filter, &folder, &mut allowed, sink);
                } else {
                    sink.try_add(not_valid(index, rule, &folder));
                }
            }
        }

        tracing::debug!(
            "{} condition folder(s) allowed for {}",
            allowed.len(),
            category
        );
        allowed
    }

    fn check_folder(
        &self,
        filter: &DiscoveryFilter,
        folder: &str,
        allowed: &mut AllowList,
        sink: &mut ErrorSink,
    ) {
        if self.inventory.find_assets(filter, Some(folder)).is_empty() {
            let category = filter.category().asset_category();
            sink.try_add(
                Violation::new(
                    ViolationKind::FolderNotContain,
                    category,
                    format!("[Missing {}]", category),
                    normalize_separators(folder),
                )
                .with_hint(category.action_hint()),
            );
        } else {
            allowed.insert(normalize_separators(folder));
        }
    }
}

fn not_valid(index: usize, rule: &ConditionRule, folder: &str) -> Violation {
    Violation::new(
        ViolationKind::FolderNotValid,
        AssetCategory::Folder,
        format!("[Condition {}: {}]", index + 1, rule.formula),
        normalize_separators(folder),
    )
}
