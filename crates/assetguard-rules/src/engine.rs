//! Rule engine: runs every enabled check over an inventory and collects
//! violations into a bounded [`ErrorSink`].

use crate::category::{AssetCategory, ConditionCategory};
use crate::condition::{AllowList, ConditionResolver, ConditionRule};
use crate::config::{RuleConfiguration, ScanSettings};
use crate::inventory::{AssetInventory, DiscoveryFilter};
use crate::path::{
    file_name, is_ignored, is_in_packages, join_project_relative, project_path, split_path,
    split_root_folders, PROJECT_ROOT,
};
use crate::pattern::NameMatcher;
use crate::report::{ErrorSink, Violation, ViolationKind};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Order in which typed categories are validated.
pub const CATEGORY_ORDER: [ConditionCategory; 8] = [
    ConditionCategory::Prefab,
    ConditionCategory::Script,
    ConditionCategory::Texture,
    ConditionCategory::Scene,
    ConditionCategory::Graphics3D,
    ConditionCategory::Sound,
    ConditionCategory::Material,
    ConditionCategory::Animation,
];

/// Everything the generic category check needs to know about one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub category: ConditionCategory,
    pub filter: DiscoveryFilter,
    pub location_error: ViolationKind,
    pub name_error: ViolationKind,
}

impl CategoryDescriptor {
    pub fn for_category(category: ConditionCategory) -> Self {
        Self {
            category,
            filter: DiscoveryFilter::for_category(category),
            location_error: ViolationKind::location(category),
            name_error: ViolationKind::naming(category.asset_category()),
        }
    }
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Number of violations recorded.
    pub violations: usize,
    /// Wall-clock duration of the scan in milliseconds.
    pub elapsed_ms: u64,
    /// True if the violation cap was reached.
    pub truncated: bool,
}

/// Validates a project against a rule configuration.
///
/// The engine owns its configuration, settings and violation sink. Scans are
/// synchronous and run one at a time; each scan clears the previous results.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleConfiguration,
    settings: ScanSettings,
    sink: ErrorSink,
    last_scan_ms: u64,
}

impl RuleEngine {
    pub fn new(rules: RuleConfiguration, settings: ScanSettings) -> Self {
        let sink = ErrorSink::new(settings.max_violations);
        Self {
            rules,
            settings,
            sink,
            last_scan_ms: 0,
        }
    }

    pub fn rules(&self) -> &RuleConfiguration {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleConfiguration {
        &mut self.rules
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Replaces the settings used by the next scan.
    pub fn set_settings(&mut self, settings: ScanSettings) {
        self.settings = settings;
        self.sink.set_cap(settings.max_violations);
    }

    /// Changes the violation cap used by the next scan.
    pub fn set_max_violations(&mut self, max_violations: usize) {
        self.settings.max_violations = max_violations;
        self.sink.set_cap(max_violations);
    }

    /// Violations of the last scan, in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        self.sink.all()
    }

    pub fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    /// Duration of the last scan in milliseconds.
    pub fn last_scan_ms(&self) -> u64 {
        self.last_scan_ms
    }

    /// Runs every enabled check against `inventory`.
    pub fn scan(&mut self, inventory: &dyn AssetInventory) -> ScanSummary {
        let started = Instant::now();
        self.sink.reset();

        let filter = self.settings.filter;
        let mut scan = Scan {
            rules: &self.rules,
            settings: &self.settings,
            inventory,
            sink: &mut self.sink,
            conditions: filter.conditions,
        };

        if filter.special_folders && scan.sink.has_capacity() {
            scan.special_folders();
        }
        if filter.folders && scan.sink.has_capacity() {
            scan.folders();
        }
        for category in CATEGORY_ORDER {
            if !filter.is_enabled(category) {
                continue;
            }
            if !scan.sink.has_capacity() {
                tracing::warn!(
                    "violation limit of {} reached, skipping remaining checks",
                    scan.sink.cap()
                );
                break;
            }
            scan.category(&CategoryDescriptor::for_category(category));
        }

        let truncated = !self.sink.has_capacity();
        self.last_scan_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            "scan finished: {} violation(s) in {} ms",
            self.sink.count(),
            self.last_scan_ms
        );

        ScanSummary {
            violations: self.sink.count(),
            elapsed_ms: self.last_scan_ms,
            truncated,
        }
    }
}

/// Borrowed state of one running scan.
///
/// The rule lists are read through the settings' row limits; the
/// configuration itself is never modified.
struct Scan<'a> {
    rules: &'a RuleConfiguration,
    settings: &'a ScanSettings,
    inventory: &'a dyn AssetInventory,
    sink: &'a mut ErrorSink,
    conditions: bool,
}

impl<'a> Scan<'a> {
    fn special_folder_rows(&self) -> &'a [String] {
        let rules: &'a RuleConfiguration = self.rules;
        limited(&rules.special_folders, self.settings.max_special_folders)
    }

    fn ignore_folder_rows(&self) -> &'a [String] {
        let rules: &'a RuleConfiguration = self.rules;
        limited(&rules.ignore_folders, self.settings.max_ignore_folders)
    }

    fn condition_rows(&self) -> &'a [ConditionRule] {
        let rules: &'a RuleConfiguration = self.rules;
        limited(&rules.conditions, self.settings.max_condition_rows)
    }

    /// True if the path is vendored or inside an ignored folder.
    fn is_excluded(&self, segments: &[&str]) -> bool {
        is_in_packages(segments) || is_ignored(segments, self.ignore_folder_rows())
    }

    fn special_folders(&mut self) {
        tracing::debug!("checking special folders");
        for folder in self.special_folder_rows() {
            if folder.is_empty() {
                continue;
            }
            let path = project_path(folder);
            if self.inventory.directory_exists(&path) {
                continue;
            }
            let segments = split_path(&path);
            self.sink.try_add(Violation::new(
                ViolationKind::SpecialFolderNotExists,
                AssetCategory::Folder,
                file_name(&segments),
                join_project_relative(&segments),
            ));
        }
    }

    fn folders(&mut self) {
        tracing::debug!("checking folder names");
        let matcher = NameMatcher::compile(
            self.rules.naming_style(AssetCategory::Folder),
            AssetCategory::Folder,
        );

        for folder in self.inventory.list_folders_recursive(PROJECT_ROOT) {
            if !self.sink.has_capacity() {
                break;
            }
            let segments = split_path(&folder);
            if self.is_excluded(&segments) {
                continue;
            }
            let name = file_name(&segments);
            if matcher.is_match(name) {
                continue;
            }
            self.sink.try_add(
                Violation::new(
                    ViolationKind::FolderNameError,
                    AssetCategory::Folder,
                    name,
                    join_project_relative(&segments),
                )
                .with_hint(matcher.example()),
            );
        }
    }

    fn allowed_folders(&mut self, category: ConditionCategory) -> AllowList {
        if !self.conditions {
            return AllowList::new();
        }
        ConditionResolver::new(self.inventory).resolve(category, self.condition_rows(), self.sink)
    }

    /// Location and naming checks for every asset of one category.
    fn category(&mut self, descriptor: &CategoryDescriptor) {
        let category = descriptor.category;
        let asset_category = category.asset_category();
        tracing::debug!("checking {} assets", asset_category);

        let allowed = self.allowed_folders(category);
        let roots_text = self.rules.root_folders(category);
        let roots = split_root_folders(roots_text);
        let matcher = NameMatcher::compile(self.rules.naming_style(asset_category), asset_category);
        let location_hint = format!("[Root folder(s): {}] or [Check Conditions]", roots_text);

        for asset in self.inventory.find_assets(&descriptor.filter, None) {
            if !self.sink.has_capacity() {
                break;
            }
            let segments = split_path(&asset);
            if segments.is_empty() || self.is_excluded(&segments) {
                continue;
            }
            let name = file_name(&segments);
            let folder = join_project_relative(&segments);

            let in_root = segments[..segments.len() - 1]
                .iter()
                .any(|segment| roots.contains(segment));
            if !in_root && !allowed.contains(&folder) {
                self.sink.try_add(
                    Violation::new(descriptor.location_error, asset_category, name, &folder)
                        .with_hint(&location_hint),
                );
            }

            if !matcher.is_match(name) {
                self.sink.try_add(
                    Violation::new(descriptor.name_error, asset_category, name, &folder)
                        .with_hint(matcher.example()),
                );
            }
        }
    }
}

/// The first `limit` entries of `rows`.
fn limited<T>(rows: &[T], limit: usize) -> &[T] {
    &rows[..rows.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::ConditionMask;
    use crate::inventory::MemoryInventory;
    use crate::pattern::NamingStyle;
    use crate::report::ViolationGroup;
    use pretty_assertions::assert_eq;

    fn prefab_only() -> ScanSettings {
        let mut settings = ScanSettings::default();
        settings.filter.special_folders = false;
        settings.filter.folders = false;
        settings.filter.categories = ConditionMask::PREFAB;
        settings
    }

    fn kinds(engine: &RuleEngine) -> Vec<(ViolationKind, String)> {
        engine
            .violations()
            .iter()
            .map(|v| (v.kind, v.asset_name.clone()))
            .collect()
    }

    #[test]
    fn test_prefab_naming_and_location() {
        let inventory = MemoryInventory::from_files([
            "Assets/Prefabs/Sword.prefab",
            "Assets/Prefabs/axe.prefab",
            "Assets/Weapons/Shield.prefab",
        ]);
        let mut engine = RuleEngine::new(RuleConfiguration::default(), prefab_only());
        let summary = engine.scan(&inventory);

        assert_eq!(summary.violations, 2);
        assert!(!summary.truncated);
        assert_eq!(
            kinds(&engine),
            vec![
                (ViolationKind::PrefabNameError, "axe.prefab".to_string()),
                (ViolationKind::PrefabLocationError, "Shield.prefab".to_string()),
            ]
        );
        let location = &engine.violations()[1];
        assert_eq!(location.folder_path, "Assets/Weapons");
        assert_eq!(location.hint, "[Root folder(s): Prefabs] or [Check Conditions]");
        assert_eq!(engine.violations()[0].hint, "ExampleOfNaming");
    }

    #[test]
    fn test_asset_can_be_mislocated_and_misnamed() {
        let inventory = MemoryInventory::from_files(["Assets/Weapons/shield.prefab"]);
        let mut engine = RuleEngine::new(RuleConfiguration::default(), prefab_only());
        engine.scan(&inventory);
        assert_eq!(
            kinds(&engine),
            vec![
                (ViolationKind::PrefabLocationError, "shield.prefab".to_string()),
                (ViolationKind::PrefabNameError, "shield.prefab".to_string()),
            ]
        );
    }

    #[test]
    fn test_nested_root_and_alternative_roots() {
        let inventory = MemoryInventory::from_files([
            "Assets/Game/Prefabs/Enemies/Bat.prefab",
            "Assets/Blueprints/Tower.prefab",
        ]);
        let mut rules = RuleConfiguration::default();
        rules.set_root_folders(ConditionCategory::Prefab, "Prefabs|Blueprints");
        let mut engine = RuleEngine::new(rules, prefab_only());
        engine.scan(&inventory);
        assert!(engine.violations().is_empty());
    }

    #[test]
    fn test_condition_folder_allows_location() {
        let inventory = MemoryInventory::from_files([
            "Assets/Units/Goblin/Prefabs/Goblin.prefab",
            "Assets/Units/Goblin/Misc/Loot.prefab",
        ])
        .with_folder("Assets/Units/Orc/Prefabs");
        let mut rules = RuleConfiguration::default();
        rules.add_condition("Units\\*\\Prefabs", ConditionMask::PREFAB);
        let mut engine = RuleEngine::new(rules, prefab_only());
        engine.scan(&inventory);

        assert_eq!(
            kinds(&engine),
            vec![
                (ViolationKind::FolderNotContain, "[Missing Prefab]".to_string()),
                (ViolationKind::PrefabLocationError, "Loot.prefab".to_string()),
            ]
        );
    }

    #[test]
    fn test_conditions_can_be_disabled() {
        let inventory = MemoryInventory::from_files(["Assets/Units/Goblin/Bundle/Goblin.prefab"])
            .with_folder("Assets/Units/Orc/Bundle");
        let mut rules = RuleConfiguration::default();
        rules.add_condition("Units\\*\\Bundle", ConditionMask::PREFAB);
        let mut settings = prefab_only();
        settings.filter.conditions = false;
        let mut engine = RuleEngine::new(rules, settings);
        engine.scan(&inventory);

        assert_eq!(
            kinds(&engine),
            vec![(ViolationKind::PrefabLocationError, "Goblin.prefab".to_string())]
        );
    }

    #[test]
    fn test_packages_and_ignored_folders_are_skipped() {
        let inventory = MemoryInventory::from_files([
            "Packages/com.vendor.tools/Runtime/bad_name.prefab",
            "Assets/ThirdParty/lib/bad_name.prefab",
            "Assets/ThirdPartyX/Good.prefab",
        ]);
        let mut rules = RuleConfiguration::default();
        rules.ignore_folders = vec!["ThirdParty".to_string()];
        let mut settings = ScanSettings::default();
        settings.filter.categories = ConditionMask::PREFAB;
        let mut engine = RuleEngine::new(rules, settings);
        engine.scan(&inventory);

        assert_eq!(
            kinds(&engine),
            vec![(ViolationKind::PrefabLocationError, "Good.prefab".to_string())]
        );
    }

    #[test]
    fn test_folder_names_use_folder_style() {
        let inventory = MemoryInventory::new()
            .with_folder("Assets/Art/raw_sources")
            .with_folder("Assets/Audio");
        let mut rules = RuleConfiguration::default();
        rules.set_naming_style(AssetCategory::Folder, NamingStyle::PascalCase);
        let mut settings = ScanSettings::default();
        settings.filter.categories = ConditionMask::EMPTY;
        let mut engine = RuleEngine::new(rules, settings);
        engine.scan(&inventory);

        assert_eq!(engine.violations().len(), 1);
        let violation = &engine.violations()[0];
        assert_eq!(violation.kind, ViolationKind::FolderNameError);
        assert_eq!(violation.asset_name, "raw_sources");
        assert_eq!(violation.folder_path, "Assets/Art");
        assert_eq!(violation.hint, "ExampleOfNaming");
    }

    #[test]
    fn test_special_folders_must_exist() {
        let inventory = MemoryInventory::new().with_folder("Assets/Documentation");
        let mut rules = RuleConfiguration::default();
        rules.special_folders = vec![
            "Documentation".to_string(),
            String::new(),
            "Design\\Controllers".to_string(),
        ];
        let mut settings = ScanSettings::default();
        settings.filter.folders = false;
        settings.filter.categories = ConditionMask::EMPTY;
        let mut engine = RuleEngine::new(rules, settings);
        engine.scan(&inventory);

        assert_eq!(
            engine.violations(),
            &[Violation::new(
                ViolationKind::SpecialFolderNotExists,
                AssetCategory::Folder,
                "Controllers",
                "Assets/Design",
            )]
        );
    }

    #[test]
    fn test_scan_reads_limited_rows_without_changing_rules() {
        let mut rules = RuleConfiguration::default();
        for i in 0..20 {
            rules.add_condition(format!("Missing{}", i), ConditionMask::PREFAB);
        }
        rules.special_folders = (0..20).map(|i| format!("Required{}", i)).collect();
        let before = rules.clone();

        let mut settings = ScanSettings::default();
        settings.filter.folders = false;
        settings.filter.categories = ConditionMask::PREFAB;
        let mut engine = RuleEngine::new(rules, settings);
        engine.scan(&MemoryInventory::new());

        let counts = engine.sink().group_counts();
        assert_eq!(
            counts,
            vec![(ViolationGroup::NotExists, 15), (ViolationGroup::NotValid, 15)]
        );
        assert_eq!(engine.rules(), &before);
        assert_eq!(engine.rules().conditions.len(), 20);

        engine.scan(&MemoryInventory::new());
        assert_eq!(engine.rules(), &before);
    }

    #[test]
    fn test_ignore_rows_beyond_limit_are_not_applied() {
        let inventory = MemoryInventory::from_files(["Assets/Vendor/bad.prefab"]);
        let mut rules = RuleConfiguration::default();
        rules.ignore_folders = (0..15).map(|i| format!("Skip{}", i)).collect();
        rules.ignore_folders.push("Vendor".to_string());
        let mut engine = RuleEngine::new(rules, prefab_only());
        engine.scan(&inventory);
        assert_eq!(engine.violations().len(), 2);

        let mut settings = prefab_only();
        settings.max_ignore_folders = 16;
        engine.set_settings(settings);
        engine.scan(&inventory);
        assert!(engine.violations().is_empty());
    }

    #[test]
    fn test_cap_stops_scan_early() {
        let files: Vec<String> = (0..50)
            .map(|i| format!("Assets/Misc/bad{}.prefab", i))
            .collect();
        let inventory = MemoryInventory::from_files(&files);
        let mut settings = ScanSettings::default();
        settings.max_violations = 7;
        let mut engine = RuleEngine::new(RuleConfiguration::default(), settings);
        let summary = engine.scan(&inventory);

        assert_eq!(summary.violations, 7);
        assert!(summary.truncated);
        assert_eq!(engine.sink().count(), 7);
    }

    #[test]
    fn test_rescan_resets_and_cap_is_adjustable() {
        let inventory = MemoryInventory::from_files(["Assets/Misc/a.prefab", "Assets/Misc/b.prefab"]);
        let mut engine = RuleEngine::new(RuleConfiguration::default(), prefab_only());
        assert_eq!(engine.scan(&inventory).violations, 4);
        assert_eq!(engine.scan(&inventory).violations, 4);

        engine.set_max_violations(1);
        let summary = engine.scan(&inventory);
        assert_eq!(summary.violations, 1);
        assert!(summary.truncated);
    }

    #[test]
    fn test_model_uses_graphics_root_and_generic_suffix() {
        let inventory = MemoryInventory::from_files([
            "Assets/Graphics 3D/Hero.fbx",
            "Assets/Models/Tree.obj",
        ]);
        let mut settings = ScanSettings::default();
        settings.filter.folders = false;
        settings.filter.categories = ConditionMask::GRAPHICS_3D;
        let mut engine = RuleEngine::new(RuleConfiguration::default(), settings);
        engine.scan(&inventory);
        assert_eq!(
            kinds(&engine),
            vec![(ViolationKind::ModelLocationError, "Tree.obj".to_string())]
        );
        assert_eq!(engine.violations()[0].category, AssetCategory::Model);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let inventory = MemoryInventory::from_files([
            "Assets/Units/Goblin/Prefabs/Goblin.prefab",
            "Assets/Textures/hero icon.png",
            "Assets/scripts/Player.cs",
        ])
        .with_folder("Assets/Units/Orc/Prefabs");
        let mut rules = RuleConfiguration::default();
        rules.add_condition("Units\\*\\Prefabs", ConditionMask::ALL);
        let mut engine = RuleEngine::new(rules, ScanSettings::default());

        engine.scan(&inventory);
        let first = engine.violations().to_vec();
        engine.scan(&inventory);
        assert_eq!(engine.violations(), first.as_slice());
    }
}
