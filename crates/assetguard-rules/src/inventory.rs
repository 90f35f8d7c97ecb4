//! Asset inventory: the read-only query surface a scan runs against.
//!
//! All paths crossing this boundary are project-relative and use `/`
//! separators. Every query returns a complete, sorted result set.

use crate::category::ConditionCategory;
use crate::path::{normalize_separators, split_path, PACKAGES_ROOT, PROJECT_ROOT, SEPARATOR};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Identifies which files count as assets of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryFilter {
    category: ConditionCategory,
}

impl DiscoveryFilter {
    pub fn for_category(category: ConditionCategory) -> Self {
        Self { category }
    }

    pub fn category(&self) -> ConditionCategory {
        self.category
    }

    /// Lowercase file extensions recognized for the category.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self.category {
            ConditionCategory::Scene => &["unity"],
            ConditionCategory::Prefab => &["prefab"],
            ConditionCategory::Script => &["cs", "dll"],
            ConditionCategory::Texture => &[
                "png", "jpg", "jpeg", "tga", "bmp", "psd", "tif", "tiff", "gif", "exr", "hdr",
            ],
            ConditionCategory::Graphics3D => {
                &["fbx", "obj", "blend", "dae", "3ds", "max", "ma", "mb"]
            }
            ConditionCategory::Sound => &["wav", "mp3", "ogg", "aif", "aiff", "flac"],
            ConditionCategory::Material => &["mat", "shader"],
            ConditionCategory::Animation => &["anim", "controller"],
        }
    }

    /// True if the file at `path` is an asset of this category.
    pub fn matches(&self, path: &str) -> bool {
        let name = split_path(path).last().copied().unwrap_or("");
        let extension = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => ext.to_lowercase(),
            _ => return false,
        };
        self.extensions().contains(&extension.as_str())
    }
}

/// Read-only queries over a project's folders and assets.
pub trait AssetInventory {
    /// True if `path` is an existing folder.
    fn directory_exists(&self, path: &str) -> bool;

    /// Immediate child folders of `path`.
    fn list_subfolders(&self, path: &str) -> Vec<String>;

    /// All folders below `root`, excluding `root` itself.
    fn list_folders_recursive(&self, root: &str) -> Vec<String>;

    /// Assets matching `filter`, searched recursively below `within`, or
    /// below the project and packages roots when `within` is `None`.
    fn find_assets(&self, filter: &DiscoveryFilter, within: Option<&str>) -> Vec<String>;
}

// ============================================================================
// Filesystem inventory
// ============================================================================

/// Inventory backed by a project directory on disk.
///
/// Hidden entries (leading `.`) and entries ending in `~` are skipped, as are
/// `.meta` sidecar files. Unscoped asset searches only cover `Assets/` and
/// `Packages/`; editor caches such as `Library/` or `Temp/` are never walked.
#[derive(Debug, Clone)]
pub struct FsInventory {
    root: PathBuf,
}

impl FsInventory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, relative: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in split_path(relative) {
            path.push(segment);
        }
        path
    }

    fn relative(&self, absolute: &Path) -> Option<String> {
        let stripped = absolute.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = stripped
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join(&SEPARATOR.to_string()))
    }

    fn walk(&self, start: &Path) -> impl Iterator<Item = DirEntry> {
        WalkDir::new(start)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {}", err);
                    None
                }
            })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.ends_with('~')
}

impl AssetInventory for FsInventory {
    fn directory_exists(&self, path: &str) -> bool {
        self.absolute(path).is_dir()
    }

    fn list_subfolders(&self, path: &str) -> Vec<String> {
        let start = self.absolute(path);
        let mut folders: Vec<String> = WalkDir::new(&start)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| self.relative(entry.path()))
            .collect();
        folders.sort();
        folders
    }

    fn list_folders_recursive(&self, root: &str) -> Vec<String> {
        let start = self.absolute(root);
        let mut folders: Vec<String> = self
            .walk(&start)
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| self.relative(entry.path()))
            .collect();
        folders.sort();
        folders
    }

    fn find_assets(&self, filter: &DiscoveryFilter, within: Option<&str>) -> Vec<String> {
        let starts = match within {
            Some(folder) => vec![self.absolute(folder)],
            None => [PROJECT_ROOT, PACKAGES_ROOT]
                .iter()
                .map(|root| self.root.join(root))
                .filter(|path| path.is_dir())
                .collect(),
        };
        let mut assets: Vec<String> = starts
            .iter()
            .flat_map(|start| self.walk(start))
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| self.relative(entry.path()))
            .filter(|path| filter.matches(path))
            .collect();
        assets.sort();
        assets
    }
}

// ============================================================================
// In-memory inventory
// ============================================================================

/// Inventory over an explicit list of files and folders.
///
/// Adding a file or folder implicitly adds all of its ancestor folders.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    files: BTreeSet<String>,
    folders: BTreeSet<String>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from file paths.
    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inventory = Self::new();
        for file in files {
            inventory.add_file(file.as_ref());
        }
        inventory
    }

    /// Builder method to add a file.
    pub fn with_file(mut self, path: &str) -> Self {
        self.add_file(path);
        self
    }

    /// Builder method to add a (possibly empty) folder.
    pub fn with_folder(mut self, path: &str) -> Self {
        self.add_folder(path);
        self
    }

    pub fn add_file(&mut self, path: &str) {
        let segments = split_path(path);
        if let Some((_, parents)) = segments.split_last() {
            self.add_ancestors(parents);
            self.files.insert(normalize_separators(path));
        }
    }

    pub fn add_folder(&mut self, path: &str) {
        self.add_ancestors(&split_path(path));
    }

    fn add_ancestors(&mut self, segments: &[&str]) {
        for end in 1..=segments.len() {
            self.folders.insert(segments[..end].join(&SEPARATOR.to_string()));
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

fn is_below(path: &str, folder: &str) -> bool {
    folder.is_empty()
        || path
            .strip_prefix(folder)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

impl AssetInventory for MemoryInventory {
    fn directory_exists(&self, path: &str) -> bool {
        self.folders.contains(&normalize_separators(path))
    }

    fn list_subfolders(&self, path: &str) -> Vec<String> {
        let parent = normalize_separators(path);
        let depth = split_path(&parent).len() + 1;
        self.folders
            .iter()
            .filter(|folder| is_below(folder, &parent) && split_path(folder).len() == depth)
            .cloned()
            .collect()
    }

    fn list_folders_recursive(&self, root: &str) -> Vec<String> {
        let root = normalize_separators(root);
        self.folders
            .iter()
            .filter(|folder| is_below(folder, &root))
            .cloned()
            .collect()
    }

    fn find_assets(&self, filter: &DiscoveryFilter, within: Option<&str>) -> Vec<String> {
        let within = within.map(normalize_separators).unwrap_or_default();
        self.files
            .iter()
            .filter(|file| is_below(file, &within) && filter.matches(file))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn prefab_filter() -> DiscoveryFilter {
        DiscoveryFilter::for_category(ConditionCategory::Prefab)
    }

    #[test]
    fn test_filter_matches_extensions() {
        let textures = DiscoveryFilter::for_category(ConditionCategory::Texture);
        assert!(textures.matches("Assets/Art/Hero.PNG"));
        assert!(textures.matches("Assets\\Art\\hero.jpeg"));
        assert!(!textures.matches("Assets/Art/Hero.png.meta"));
        assert!(!textures.matches("Assets/Art/.png"));
        assert!(!textures.matches("Assets/Art/png"));

        let animations = DiscoveryFilter::for_category(ConditionCategory::Animation);
        assert!(animations.matches("Assets/Anim/Run.anim"));
        assert!(animations.matches("Assets/Anim/Hero.controller"));
    }

    #[test]
    fn test_memory_inventory_folders() {
        let inventory = MemoryInventory::from_files(["Assets/Units/Goblin/Prefabs/Goblin.prefab"])
            .with_folder("Assets/Units/Orc/Prefabs");

        assert!(inventory.directory_exists("Assets\\Units"));
        assert!(!inventory.directory_exists("Assets/Units/Troll"));
        assert_eq!(
            inventory.list_subfolders("Assets/Units"),
            vec!["Assets/Units/Goblin".to_string(), "Assets/Units/Orc".to_string()]
        );
        assert_eq!(inventory.list_folders_recursive("Assets/Units/Orc").len(), 1);
    }

    #[test]
    fn test_memory_inventory_find_assets_within() {
        let inventory = MemoryInventory::from_files([
            "Assets/Prefabs/Sword.prefab",
            "Assets/PrefabsOld/Axe.prefab",
            "Assets/Prefabs/Icon.png",
        ]);
        assert_eq!(
            inventory.find_assets(&prefab_filter(), Some("Assets/Prefabs")),
            vec!["Assets/Prefabs/Sword.prefab".to_string()]
        );
        assert_eq!(inventory.find_assets(&prefab_filter(), None).len(), 2);
    }

    #[test]
    fn test_fs_inventory_walks_project() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets/Prefabs/Weapons")).unwrap();
        fs::create_dir_all(root.join("Assets/.hidden")).unwrap();
        fs::create_dir_all(root.join("Assets/Backup~")).unwrap();
        fs::write(root.join("Assets/Prefabs/Weapons/Sword.prefab"), "").unwrap();
        fs::write(root.join("Assets/Prefabs/Weapons/Sword.prefab.meta"), "").unwrap();
        fs::write(root.join("Assets/.hidden/Ghost.prefab"), "").unwrap();
        fs::write(root.join("Assets/Backup~/Old.prefab"), "").unwrap();

        let inventory = FsInventory::new(root);
        assert!(inventory.directory_exists("Assets/Prefabs"));
        assert_eq!(
            inventory.list_subfolders("Assets"),
            vec!["Assets/Prefabs".to_string()]
        );
        assert_eq!(
            inventory.list_folders_recursive("Assets"),
            vec![
                "Assets/Prefabs".to_string(),
                "Assets/Prefabs/Weapons".to_string()
            ]
        );
        assert_eq!(
            inventory.find_assets(&prefab_filter(), None),
            vec!["Assets/Prefabs/Weapons/Sword.prefab".to_string()]
        );
        assert!(inventory
            .find_assets(&prefab_filter(), Some("Assets/Missing"))
            .is_empty());
    }

    #[test]
    fn test_fs_inventory_skips_editor_caches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for file in [
            "Assets/Prefabs/Sword.prefab",
            "Packages/com.vendor.kit/Runtime/Kit.prefab",
            "Library/PackageCache/com.unity.ui@1.0/Runtime/panel_settings.prefab",
            "Temp/Build/x.prefab",
            "Logs/crash.prefab",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let inventory = FsInventory::new(root);
        assert_eq!(
            inventory.find_assets(&prefab_filter(), None),
            vec![
                "Assets/Prefabs/Sword.prefab".to_string(),
                "Packages/com.vendor.kit/Runtime/Kit.prefab".to_string(),
            ]
        );
        assert_eq!(
            inventory.find_assets(&prefab_filter(), Some("Temp")),
            vec!["Temp/Build/x.prefab".to_string()]
        );
    }

    #[test]
    fn test_fs_inventory_without_asset_roots_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Library")).unwrap();
        fs::write(dir.path().join("Library/Cached.prefab"), "").unwrap();

        let inventory = FsInventory::new(dir.path());
        assert!(inventory.find_assets(&prefab_filter(), None).is_empty());
    }
}
