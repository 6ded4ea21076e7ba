use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use impress_cli::{Args, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo documents live at the workspace root
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output_dir: &Path) -> Args {
    Args {
        inputs: vec![input.to_string_lossy().to_string()],
        output_dir: output_dir.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        relocate_private: false,
        reset: false,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_json_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let args = args_for(demo_path, temp_dir.path());

        match run(&args) {
            Ok(()) => {
                let output = temp_dir.path().join(format!(
                    "{}.json",
                    demo_path.file_stem().unwrap().to_string_lossy()
                ));
                let written = fs::read_to_string(&output).expect("Output should be written");
                let value: serde_json::Value =
                    serde_json::from_str(&written).expect("Output should be JSON");
                assert!(
                    value["children"].as_array().is_some_and(|slides| !slides.is_empty()),
                    "{} produced no slides",
                    demo_path.display()
                );
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpected_successes = Vec::new();

    for demo_path in &error_demos {
        let args = args_for(demo_path, temp_dir.path());

        if run(&args).is_ok() {
            unexpected_successes.push(demo_path.clone());
        }
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpected_successes.len()
        );
    }

    println!("All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_relocates_private_folders() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::create_dir_all(temp_dir.path().join("_static")).unwrap();
    fs::write(temp_dir.path().join("_static/impress.css"), "body {}").unwrap();
    let mut args = args_for(&demos_path().join("nested.json"), temp_dir.path());
    args.relocate_private = true;

    run(&args).expect("Layout should succeed");

    assert!(temp_dir.path().join("static/impress.css").is_file());
    assert!(!temp_dir.path().join("_static").exists());
}
