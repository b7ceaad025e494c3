//! Source file discovery
//!
//! Recursively collects files with a given extension. By default every directory
//! is walked (hidden ones and ignored ones included); with `respect_ignore` the
//! `ignore` crate applies .gitignore/.ignore rules and skips hidden entries.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::paths::has_extension;

/// Find all files under `root` with extension `ext`, sorted by path
pub fn discover(root: &Path, ext: &str, respect_ignore: bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if respect_ignore {
        WalkBuilder::new(root)
            .require_git(false)
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .filter(|path| has_extension(path, ext))
            .collect()
    } else {
        WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_extension(path, ext))
            .collect()
    };

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp = tempdir().unwrap();
        assert!(discover(temp.path(), "tsx", false).is_empty());
    }

    #[test]
    fn test_discover_recursive_and_filtered() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("App.tsx"));
        touch(&temp.path().join("App.tsx.bak"));
        touch(&temp.path().join("util.ts"));
        touch(&temp.path().join("pages/Home.tsx"));
        touch(&temp.path().join("components/ui/Button.tsx"));

        let files = discover(temp.path(), "tsx", false);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("App.tsx"),
                PathBuf::from("components/ui/Button.tsx"),
                PathBuf::from("pages/Home.tsx"),
            ]
        );
    }

    #[test]
    fn test_discover_other_extension() {
        let temp = tempdir().unwrap();
        touch(&temp.path().join("a.tsx"));
        touch(&temp.path().join("b.jsx"));
        assert_eq!(discover(temp.path(), "jsx", false).len(), 1);
    }

    #[test]
    fn test_discover_includes_ignored_by_default() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "build/\n").unwrap();
        touch(&temp.path().join("src/App.tsx"));
        touch(&temp.path().join("build/App.tsx"));

        assert_eq!(discover(temp.path(), "tsx", false).len(), 2);
    }

    #[test]
    fn test_discover_respects_gitignore() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(".gitignore"), "build/\n").unwrap();
        touch(&temp.path().join("src/App.tsx"));
        touch(&temp.path().join("build/App.tsx"));

        let files = discover(temp.path(), "tsx", true);
        assert_eq!(files, vec![temp.path().join("src/App.tsx")]);
    }
}
