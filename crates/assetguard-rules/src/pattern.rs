//! Naming-pattern grammars and compiled name matchers.
//!
//! A matcher is the anchored grammar of a [`NamingStyle`] followed by the
//! file suffix required for an [`AssetCategory`]. It is always tested against
//! the whole bare name (the segment after the last path separator).

use crate::category::AssetCategory;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five supported casing/separator conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingStyle {
    /// `ExampleOfNaming`
    PascalCase,
    /// `exampleOfNaming`
    CamelCase,
    /// `example_of_naming`
    SnakeCase,
    /// `example-of-naming`
    KebabCase,
    /// `Example_Of_Naming`
    PascalUnderscore,
}

impl NamingStyle {
    /// Every style, in selector order.
    pub const ALL: [NamingStyle; 5] = [
        NamingStyle::PascalCase,
        NamingStyle::CamelCase,
        NamingStyle::SnakeCase,
        NamingStyle::KebabCase,
        NamingStyle::PascalUnderscore,
    ];

    /// Maps a configured selector to a style. Unknown selectors fall back to
    /// [`NamingStyle::PascalCase`].
    pub fn from_selector(selector: u8) -> Self {
        Self::ALL
            .get(selector as usize)
            .copied()
            .unwrap_or(NamingStyle::PascalCase)
    }

    pub fn selector(self) -> u8 {
        self as u8
    }

    /// Anchored grammar for the bare name, without suffix or end anchor.
    pub fn grammar(self) -> &'static str {
        match self {
            NamingStyle::PascalCase => "^[A-Z][a-z0-9]*([A-Z][a-z0-9]*)*",
            NamingStyle::CamelCase => "^[a-z][a-z0-9]*([A-Z][a-z0-9]*)*",
            NamingStyle::SnakeCase => "^[a-z][a-z0-9]*([_]?[a-z0-9]+)*",
            NamingStyle::KebabCase => "^[a-z][a-z0-9]*([-]?[a-z0-9]+)*",
            NamingStyle::PascalUnderscore => "^[A-Z][a-z0-9]*([_]?[A-Z0-9][a-z0-9]+)*",
        }
    }

    /// Canonical example shown to users as the expected form.
    pub fn example(self) -> &'static str {
        match self {
            NamingStyle::PascalCase => "ExampleOfNaming",
            NamingStyle::CamelCase => "exampleOfNaming",
            NamingStyle::SnakeCase => "example_of_naming",
            NamingStyle::KebabCase => "example-of-naming",
            NamingStyle::PascalUnderscore => "Example_Of_Naming",
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.example())
    }
}

/// Suffix a name of `category` must end with, as a regex fragment.
pub fn category_suffix(category: AssetCategory) -> &'static str {
    match category {
        AssetCategory::Folder => "",
        AssetCategory::Prefab => r"\.prefab",
        AssetCategory::Script => r"\.(cs|dll)",
        AssetCategory::Scene => r"\.unity",
        AssetCategory::Texture
        | AssetCategory::Sound
        | AssetCategory::Model
        | AssetCategory::Material
        | AssetCategory::Animation => r"\.[a-z0-9]{2,6}",
    }
}

/// A compiled whole-name matcher for one style and category.
#[derive(Debug, Clone)]
pub struct NameMatcher {
    style: NamingStyle,
    category: AssetCategory,
    regex: Regex,
}

impl NameMatcher {
    /// Compiles the matcher for `style` names of `category`.
    pub fn compile(style: NamingStyle, category: AssetCategory) -> Self {
        let pattern = format!("{}{}$", style.grammar(), category_suffix(category));
        // Grammars and suffixes are fixed tables; a failure here is a bug in them.
        let regex = Regex::new(&pattern).expect("built-in naming pattern should compile");
        Self {
            style,
            category,
            regex,
        }
    }

    /// Tests the whole bare name.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn style(&self) -> NamingStyle {
        self.style
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    /// The full regular expression, anchors included.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Canonical example of the configured style.
    pub fn example(&self) -> &'static str {
        self.style.example()
    }
}

/// Compiles the matcher for a raw style selector and category.
pub fn compile_pattern(selector: u8, category: AssetCategory) -> NameMatcher {
    NameMatcher::compile(NamingStyle::from_selector(selector), category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_matcher(style: NamingStyle) -> NameMatcher {
        NameMatcher::compile(style, AssetCategory::Folder)
    }

    fn assert_accepts(style: NamingStyle, names: &[&str]) {
        let matcher = folder_matcher(style);
        for name in names {
            assert!(matcher.is_match(name), "{:?} should accept {:?}", style, name);
        }
    }

    fn assert_rejects(style: NamingStyle, names: &[&str]) {
        let matcher = folder_matcher(style);
        for name in names {
            assert!(!matcher.is_match(name), "{:?} should reject {:?}", style, name);
        }
    }

    #[test]
    fn test_pascal_case() {
        assert_accepts(
            NamingStyle::PascalCase,
            &["UnityProjectAssetName", "UnityP", "Unity", "Unity123"],
        );
        assert_rejects(
            NamingStyle::PascalCase,
            &[
                "UnityProjectAssetName_",
                "UnityProjectAsset-Name",
                "xnity",
                "9Unity",
                "unity123",
                "123456",
            ],
        );
    }

    #[test]
    fn test_camel_case() {
        assert_accepts(
            NamingStyle::CamelCase,
            &["unityProjectAssetName", "unityP", "unity", "unityPro123", "unity123"],
        );
        assert_rejects(
            NamingStyle::CamelCase,
            &["UnityProjectAssetName", "UnityP", "Unity", "5xnity", "9Unity", "123unityTralala"],
        );
    }

    #[test]
    fn test_snake_case() {
        assert_accepts(
            NamingStyle::SnakeCase,
            &["unity_project_asset_name", "unity_x456", "unity", "unity_4599"],
        );
        assert_rejects(
            NamingStyle::SnakeCase,
            &[
                "unity_Project_",
                "_unity",
                "123_unity",
                "unity_",
                "unity_aa_",
                "unity-a",
                "unity_Project_123",
            ],
        );
    }

    #[test]
    fn test_kebab_case() {
        assert_accepts(
            NamingStyle::KebabCase,
            &["unity-project-asset-name", "unity", "unity123", "unity-a", "unity-007"],
        );
        assert_rejects(
            NamingStyle::KebabCase,
            &["unity-Project-", "-unity", "unity-", "unity-A", "unity-A1234", "unity-Project"],
        );
    }

    #[test]
    fn test_pascal_underscore() {
        assert_accepts(
            NamingStyle::PascalUnderscore,
            &["Unity_Project_Asset_Name", "Unity", "Xx_Unity_01", "Xx_Unity0008"],
        );
        assert_rejects(
            NamingStyle::PascalUnderscore,
            &[
                "unity_Project_Asset_Name",
                "unity_Project_",
                "_unity",
                "123_unity",
                "unity_",
                "unity_aa_",
                "unity-a",
                "unity_Aaaa",
                "unity_project_asset_name",
                "unity",
                "XX_unity",
            ],
        );
    }

    #[test]
    fn test_texture_suffix_composes_with_style() {
        let matcher = compile_pattern(2, AssetCategory::Texture);
        for suffix in [".png", ".jpg", ".jpeg"] {
            let name = format!("my_project_prefab{}", suffix);
            assert!(matcher.is_match(&name), "{}", name);
        }
        assert!(!matcher.is_match("my_project_prefab"));
        assert!(!matcher.is_match("my_project_prefab.PNG"));
    }

    #[test]
    fn test_category_suffixes() {
        assert!(compile_pattern(0, AssetCategory::Prefab).is_match("Sword.prefab"));
        assert!(!compile_pattern(0, AssetCategory::Prefab).is_match("Sword"));
        assert!(!compile_pattern(0, AssetCategory::Prefab).is_match("Sword.prefab.bak"));
        assert!(compile_pattern(0, AssetCategory::Script).is_match("PlayerController.cs"));
        assert!(compile_pattern(0, AssetCategory::Script).is_match("Plugin.dll"));
        assert!(!compile_pattern(0, AssetCategory::Script).is_match("Plugin.js"));
        assert!(compile_pattern(1, AssetCategory::Scene).is_match("mainMenu.unity"));
        assert!(compile_pattern(3, AssetCategory::Sound).is_match("door-open.wav"));
        assert!(!compile_pattern(3, AssetCategory::Sound).is_match("door-open.w"));
    }

    #[test]
    fn test_folder_has_no_suffix() {
        let matcher = compile_pattern(0, AssetCategory::Folder);
        assert!(matcher.is_match("Prefabs"));
        assert!(!matcher.is_match("Prefabs.old"));
    }

    #[test]
    fn test_unknown_selector_falls_back_to_pascal_case() {
        assert_eq!(NamingStyle::from_selector(5), NamingStyle::PascalCase);
        assert_eq!(NamingStyle::from_selector(u8::MAX), NamingStyle::PascalCase);
        let matcher = compile_pattern(42, AssetCategory::Folder);
        assert_eq!(matcher.example(), "ExampleOfNaming");
        assert!(matcher.is_match("Textures"));
    }

    #[test]
    fn test_selector_round_trip() {
        for style in NamingStyle::ALL {
            assert_eq!(NamingStyle::from_selector(style.selector()), style);
        }
    }
}
