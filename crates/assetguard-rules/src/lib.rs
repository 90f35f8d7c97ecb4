//! Asset convention rules for AssetGuard.
//!
//! Scans a game project's asset tree, checks every asset name against a
//! configurable naming style and every asset location against accepted root
//! folders and condition rules, and reports a bounded list of violations.
//!
//! # Example
//!
//! ```no_run
//! use assetguard_rules::{FsInventory, RuleConfiguration, RuleEngine, ScanSettings};
//!
//! let inventory = FsInventory::new("MyGame");
//! let mut engine = RuleEngine::new(RuleConfiguration::default(), ScanSettings::default());
//! let summary = engine.scan(&inventory);
//!
//! for violation in engine.violations() {
//!     eprintln!("{}: {} in {}", violation.kind, violation.asset_name, violation.folder_path);
//! }
//! println!("{} violation(s) in {} ms", summary.violations, summary.elapsed_ms);
//! ```

pub mod category;
pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod inventory;
pub mod path;
pub mod pattern;
pub mod report;

pub use category::{AssetCategory, ConditionCategory, ConditionMask};
pub use condition::{AllowList, ConditionResolver, ConditionRule, ParsedFormula};
pub use config::{ProjectConfig, RuleConfiguration, ScanFilter, ScanSettings, CONFIG_FILE_NAME};
pub use engine::{CategoryDescriptor, RuleEngine, ScanSummary};
pub use error::GuardError;
pub use export::{export_csv, write_csv};
pub use inventory::{AssetInventory, DiscoveryFilter, FsInventory, MemoryInventory};
pub use pattern::{compile_pattern, NameMatcher, NamingStyle};
pub use report::{ErrorSink, Violation, ViolationGroup, ViolationKind};
