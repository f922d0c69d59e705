//! Integration Test: Headless Core
//!
//! **Policy**: `parley-core` knows nothing about terminals. Rendering and
//! key handling belong to the TUI crate, which talks to the core only
//! through `ShellEvent` and `ShellMessage`.

use architectural_enforcement::{
    code_part, declared_dependencies, read_lines, rust_files, workspace_root,
};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "textwrap"];

#[test]
fn test_core_has_no_ui_dependencies() {
    let deps = declared_dependencies(&workspace_root().join("core/Cargo.toml"));

    let offending: Vec<&String> = deps
        .iter()
        .filter(|d| UI_CRATES.contains(&d.as_str()))
        .collect();

    assert!(
        offending.is_empty(),
        "core/Cargo.toml depends on UI crates: {:?}",
        offending
    );
}

#[test]
fn test_core_sources_do_not_import_ui_crates() {
    let mut violations = Vec::new();

    for path in rust_files("core/src") {
        for (idx, line) in read_lines(&path).iter().enumerate() {
            let code = code_part(line);
            if UI_CRATES
                .iter()
                .any(|c| code.contains(&format!("{c}::")))
            {
                violations.push(format!("{}:{} - {}", path.display(), idx + 1, line.trim()));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI crate usage in core:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tui_depends_on_core() {
    let deps = declared_dependencies(&workspace_root().join("tui/Cargo.toml"));

    assert!(deps.iter().any(|d| d == "parley-core"));
}
