//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Waiting happens
//! on I/O, channels or timeouts.
//! **Exceptions**: Frame pacing (TUI app.rs only), the offline reply delay
//! (core client.rs only), test modules

use std::path::Path;

use architectural_enforcement::{
    code_part, context_mentions, is_in_test_module, read_lines, rust_files, Violation,
};

struct SleepPolicy {
    allow_frame_limiting: bool,
    allow_fallback_delay: bool,
}

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    check_directory(
        "tui/src",
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: true,
            allow_fallback_delay: false,
        },
    );
    check_directory(
        "core/src",
        &mut violations,
        &SleepPolicy {
            allow_frame_limiting: false,
            allow_fallback_delay: true,
        },
    );

    if !violations.is_empty() {
        eprintln!("\n❌ Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - Frame pacing in tui/src/app.rs");
        eprintln!("  - The offline reply delay in core/src/client.rs");
        eprintln!("  - Test modules");

        panic!("\nFound {} sleep violation(s).", violations.len());
    }
}

#[test]
fn test_scanner_sees_sources() {
    assert!(!rust_files("core/src").is_empty());
    assert!(!rust_files("tui/src").is_empty());
}

fn check_directory(dir: &str, violations: &mut Vec<Violation>, policy: &SleepPolicy) {
    for path in rust_files(dir) {
        check_file(&path, violations, policy);
    }
}

fn check_file(path: &Path, violations: &mut Vec<Violation>, policy: &SleepPolicy) {
    let lines = read_lines(path);

    for (idx, line) in lines.iter().enumerate() {
        let code = code_part(line);
        if !code.contains("::sleep(") && !code.contains(".sleep(") {
            continue;
        }

        if is_in_test_module(&lines, idx) {
            continue;
        }

        if policy.allow_frame_limiting
            && path.ends_with("tui/src/app.rs")
            && context_mentions(&lines, idx, 15, 2, &["frame", "tick"])
        {
            continue;
        }

        if policy.allow_fallback_delay
            && path.ends_with("core/src/client.rs")
            && context_mentions(&lines, idx, 3, 0, &["fallback_delay"])
        {
            continue;
        }

        violations.push(Violation {
            path: path.to_path_buf(),
            line_number: idx + 1,
            line: line.trim().to_string(),
        });
    }
}
