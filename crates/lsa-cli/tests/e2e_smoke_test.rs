use std::{fs, path::PathBuf};

use tempfile::tempdir;

use lsa::LsaError;
use lsa_cli::{Args, Command, run};

/// Collects all .lsa files from a directory
fn collect_lsa_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("lsa")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        verbose: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let valid_demos = collect_lsa_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let input = demo_path.to_string_lossy().to_string();
        for command in [
            Command::Tokens {
                input: input.clone(),
            },
            Command::Results {
                input: input.clone(),
            },
            Command::Loops {
                input: input.clone(),
            },
        ] {
            if let Err(e) = run(&args(command)) {
                failed_demos.push((demo_path.clone(), e));
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let error_demos = collect_lsa_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let command = Command::Tokens {
            input: demo_path.to_string_lossy().to_string(),
        };
        match run(&args(command)) {
            Err(LsaError::Parse { .. }) => {}
            _ => unexpectedly_succeeded.push(demo_path.clone()),
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that did not fail to parse:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_run_with_conditions_and_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let scheme_path = temp_dir.path().join("scheme.lsa");
    fs::write(&scheme_path, "Yн X0 (↑1 | Y0 w↑2) ↓1 Y1 ↓2 Yк").unwrap();

    let input = scheme_path.to_string_lossy().to_string();
    let output = run(&args(Command::Run {
        input: input.clone(),
        conditions: "0".to_string(),
    }))
    .unwrap();
    assert_eq!(output, "Yн X0 Y0 w↑2 Yк\n");

    let err = run(&args(Command::Run {
        input: input.clone(),
        conditions: "01".to_string(),
    }))
    .unwrap_err();
    assert!(matches!(err, LsaError::Usage(_)));

    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[output]\nverbose = true\n").unwrap();
    let mut verbose_args = args(Command::Run {
        input,
        conditions: "1".to_string(),
    });
    verbose_args.config = Some(config_path.to_string_lossy().to_string());
    let output = run(&verbose_args).unwrap();
    assert_eq!(output.lines().count(), 6);
}

#[test]
fn e2e_missing_input_file() {
    let err = run(&args(Command::Tokens {
        input: "does/not/exist.lsa".to_string(),
    }))
    .unwrap_err();
    assert!(matches!(err, LsaError::Io(_)));
}
