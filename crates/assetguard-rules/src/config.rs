//! Rule configuration and scan settings.
//!
//! Both are plain serde structs persisted together as a JSON
//! [`ProjectConfig`]. Missing fields take their defaults.

use crate::category::{AssetCategory, ConditionCategory, ConditionMask};
use crate::condition::ConditionRule;
use crate::error::GuardError;
use crate::pattern::NamingStyle;
use crate::report::DEFAULT_MAX_VIOLATIONS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "assetguard.json";

/// Current configuration file version.
pub const CONFIG_VERSION: u32 = 1;

/// User-authored naming and location rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfiguration {
    /// Naming style selector (0-4) per category. Absent categories use 0.
    pub naming: BTreeMap<AssetCategory, u8>,

    /// Accepted root-folder names per typed category, `|`-separated.
    pub root_folders: BTreeMap<ConditionCategory, String>,

    /// Folders (relative to the project root) that must exist.
    pub special_folders: Vec<String>,

    /// Folder names excluding every path that contains them.
    pub ignore_folders: Vec<String>,

    /// Condition rules, evaluated in order.
    pub conditions: Vec<ConditionRule>,
}

impl Default for RuleConfiguration {
    fn default() -> Self {
        let root_folders = [
            (ConditionCategory::Prefab, "Prefabs"),
            (ConditionCategory::Script, "Scripts"),
            (ConditionCategory::Texture, "Textures"),
            (ConditionCategory::Scene, "Scenes"),
            (ConditionCategory::Graphics3D, "Graphics 3D"),
            (ConditionCategory::Sound, "Sounds"),
            (ConditionCategory::Material, "Materials"),
            (ConditionCategory::Animation, "Animations"),
        ]
        .into_iter()
        .map(|(category, root)| (category, root.to_string()))
        .collect();

        Self {
            naming: AssetCategory::ALL.iter().map(|c| (*c, 0)).collect(),
            root_folders,
            special_folders: Vec::new(),
            ignore_folders: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl RuleConfiguration {
    /// Raw style selector for `category`.
    pub fn style_selector(&self, category: AssetCategory) -> u8 {
        self.naming.get(&category).copied().unwrap_or(0)
    }

    pub fn naming_style(&self, category: AssetCategory) -> NamingStyle {
        NamingStyle::from_selector(self.style_selector(category))
    }

    pub fn set_naming_style(&mut self, category: AssetCategory, style: NamingStyle) {
        self.naming.insert(category, style.selector());
    }

    /// Accepted root folders of `category` as authored (`|`-separated).
    pub fn root_folders(&self, category: ConditionCategory) -> &str {
        self.root_folders
            .get(&category)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set_root_folders(&mut self, category: ConditionCategory, roots: impl Into<String>) {
        self.root_folders.insert(category, roots.into());
    }

    /// Appends a condition rule.
    pub fn add_condition(&mut self, formula: impl Into<String>, applies_to: ConditionMask) {
        self.conditions.push(ConditionRule::new(formula, applies_to));
    }

    /// Truncates the special-folder, ignore-folder and condition lists to the
    /// maxima in `settings`.
    ///
    /// Scans only read the first rows of each list and never call this; a
    /// driver may, e.g. before saving an edited configuration.
    pub fn enforce_limits(&mut self, settings: &ScanSettings) {
        self.special_folders.truncate(settings.max_special_folders);
        self.ignore_folders.truncate(settings.max_ignore_folders);
        self.conditions.truncate(settings.max_condition_rows);
    }
}

/// Which checks a scan runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    pub special_folders: bool,
    pub folders: bool,
    /// Typed categories whose location and naming checks run.
    pub categories: ConditionMask,
    /// Whether condition rules contribute allowed folders and violations.
    pub conditions: bool,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            special_folders: true,
            folders: true,
            categories: ConditionMask::ALL,
            conditions: true,
        }
    }
}

impl ScanFilter {
    pub fn is_enabled(&self, category: ConditionCategory) -> bool {
        self.categories.contains(category)
    }
}

/// User-adjustable scan limits, applied between scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Maximum number of violations one scan reports.
    pub max_violations: usize,
    pub max_special_folders: usize,
    pub max_ignore_folders: usize,
    pub max_condition_rows: usize,
    pub filter: ScanFilter,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_violations: DEFAULT_MAX_VIOLATIONS,
            max_special_folders: 15,
            max_ignore_folders: 15,
            max_condition_rows: 15,
            filter: ScanFilter::default(),
        }
    }
}

/// On-disk configuration: rules plus settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub rules: RuleConfiguration,
    #[serde(default)]
    pub settings: ScanSettings,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            rules: RuleConfiguration::default(),
            settings: ScanSettings::default(),
        }
    }
}

impl ProjectConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, GuardError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version != CONFIG_VERSION {
            return Err(GuardError::Config(format!(
                "unsupported version {}, expected {}",
                config.version, CONFIG_VERSION
            )));
        }
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, GuardError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, GuardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), GuardError> {
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json)?;
        Ok(())
    }
}
