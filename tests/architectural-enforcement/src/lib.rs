//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code outside frame pacing and the
//!   offline reply delay
//! - The chat core stays headless (no terminal crates)
//!
//! The helpers here walk the workspace sources so each test only states
//! its policy.

use std::fs;
use std::path::{Path, PathBuf};

/// A source line that broke a rule
#[derive(Debug, Clone)]
pub struct Violation {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub line_number: usize,
    /// Trimmed source text
    pub line: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line_number, self.line)
    }
}

/// Root of the cargo workspace
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// All `.rs` files below `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Read a file into lines, empty when unreadable
pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .map(|c| c.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Strip a trailing `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Whether `idx` sits at or after the file's `#[cfg(test)]` module
///
/// Test modules live at the bottom of each file, so everything after the
/// first `#[cfg(test)]` is test code.
pub fn is_in_test_module(lines: &[String], idx: usize) -> bool {
    lines[..=idx]
        .iter()
        .any(|l| l.trim_start().starts_with("#[cfg(test)]"))
}

/// Whether any line within `before` lines above or `after` lines below
/// `idx` contains one of `needles` (case-insensitive)
pub fn context_mentions(
    lines: &[String],
    idx: usize,
    before: usize,
    after: usize,
    needles: &[&str],
) -> bool {
    let range = idx.saturating_sub(before)..std::cmp::min(idx + after + 1, lines.len());
    lines[range].iter().any(|l| {
        let lower = l.to_lowercase();
        needles.iter().any(|n| lower.contains(n))
    })
}

/// Dependency names declared in a Cargo.toml `[dependencies]` table
///
/// An unreadable or unparseable manifest yields no names.
pub fn declared_dependencies(manifest: &Path) -> Vec<String> {
    fs::read_to_string(manifest)
        .map(|content| dependency_names(&content))
        .unwrap_or_default()
}

/// Keys of the `[dependencies]` table in manifest text
///
/// Covers inline entries, `[dependencies.name]` tables and
/// `name.workspace = true`; dev and build dependencies are not included.
pub fn dependency_names(manifest: &str) -> Vec<String> {
    let Ok(table) = toml::from_str::<toml::Table>(manifest) else {
        return Vec::new();
    };
    table
        .get("dependencies")
        .and_then(toml::Value::as_table)
        .map(|deps| deps.keys().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &str) -> Vec<String> {
        src.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_code_part_drops_comment() {
        assert_eq!(code_part("let x = 1; // sleep(1)"), "let x = 1; ");
    }

    #[test]
    fn test_test_module_detection() {
        let src = lines("fn a() {}\n#[cfg(test)]\nmod tests {\n    fn b() {}\n}");

        assert!(!is_in_test_module(&src, 0));
        assert!(is_in_test_module(&src, 3));
    }

    #[test]
    fn test_context_window() {
        let src = lines("// Frame pacing\nlet a = 1;\nlet b = 2;\nsleep();");

        assert!(context_mentions(&src, 3, 3, 0, &["frame"]));
        assert!(!context_mentions(&src, 3, 1, 0, &["frame"]));
    }

    #[test]
    fn test_dependency_names_cover_every_form() {
        let manifest = r#"
[package]
name = "demo"

[dependencies]
tokio = { version = "1", features = ["full"] }
serde = "1.0"
walkdir.workspace = true

[dependencies.ratatui]
version = "0.29"

[dev-dependencies]
tempfile = "3"
"#;

        let mut names = dependency_names(manifest);
        names.sort();

        assert_eq!(names, ["ratatui", "serde", "tokio", "walkdir"]);
    }

    #[test]
    fn test_unparseable_manifest_has_no_dependencies() {
        assert!(dependency_names("[dependencies\nserde =").is_empty());
    }

    #[test]
    fn test_core_manifest_is_found() {
        let deps = declared_dependencies(&workspace_root().join("core/Cargo.toml"));

        assert!(deps.iter().any(|d| d == "tokio"));
    }
}
