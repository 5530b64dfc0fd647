//! Context types for rule execution.

use std::path::{Path, PathBuf};

/// Context provided to rules for the file being analyzed.
///
/// Rules use this to make context-aware decisions, e.g. relaxing checks
/// in test files where import cycles through fixtures are common.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Project root the analyzer was invoked on.
    pub root: &'a Path,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
    /// Whether this file is detected as a test file.
    pub is_test: bool,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &'a Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            root,
            relative_path,
            is_test: Self::detect_test_file(path),
        }
    }

    /// Detects if a file is a test file based on JS/TS conventions.
    fn detect_test_file(path: &Path) -> bool {
        for component in path.components() {
            if let std::path::Component::Normal(s) = component {
                let s = s.to_string_lossy();
                if s == "__tests__" || s == "__mocks__" {
                    return true;
                }
            }
        }

        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.contains(".test.") || file_name.contains(".spec.") {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_test_files() {
        assert!(FileContext::detect_test_file(Path::new("src/a.test.ts")));
        assert!(FileContext::detect_test_file(Path::new("src/a.spec.tsx")));
        assert!(FileContext::detect_test_file(Path::new(
            "src/__tests__/a.ts"
        )));
        assert!(FileContext::detect_test_file(Path::new(
            "src/__mocks__/api.ts"
        )));
        assert!(!FileContext::detect_test_file(Path::new("src/a.ts")));
        assert!(!FileContext::detect_test_file(Path::new("src/testing.ts")));
    }

    #[test]
    fn relative_path_strips_root() {
        let ctx = FileContext::new(Path::new("/proj/src/a.ts"), Path::new("/proj"));
        assert_eq!(ctx.relative_path, PathBuf::from("src/a.ts"));
    }

    #[test]
    fn relative_path_falls_back_to_full_path_outside_root() {
        let ctx = FileContext::new(Path::new("/elsewhere/a.ts"), Path::new("/proj"));
        assert_eq!(ctx.relative_path, PathBuf::from("/elsewhere/a.ts"));
    }
}
