use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "fibdozen-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_writes_json_report_for_seeded_run() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args(["--seeds", "42", "--max-spins", "5", "--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let run = &value["runs"][0];
    assert_eq!(run["seed"], 42);
    let spins = run["spins"].as_array().expect("spins");
    assert!(!spins.is_empty() && spins.len() <= 5);
    assert_eq!(spins[0]["spin"], 1);
    assert_eq!(spins[0]["progression_index"], 1);
}

#[test]
fn cli_runs_are_reproducible_for_the_same_seed() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let run = |label: &str| {
        let path = temp_path(label);
        let status = Command::new(exe)
            .args(["--seeds", "7", "--max-spins", "50", "--report", "csv", "--output"])
            .arg(&path)
            .status()
            .expect("run cli");
        assert!(status.success());
        std::fs::read_to_string(path).expect("read output")
    };
    assert_eq!(run("repro-a"), run("repro-b"));
}

#[test]
fn cli_console_report_includes_batch_summary() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let output = Command::new(exe)
        .args([
            "--seeds",
            "1,2",
            "--iterations",
            "2",
            "--balance",
            "100",
            "--unit-bet",
            "5",
            "--target-profit",
            "20",
            "--max-spins",
            "30",
        ])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fibonacci Dozens Simulator"));
    assert!(stdout.contains("Batch Summary"));
    assert!(stdout.contains("seed 2 #2"));
}

#[test]
fn cli_show_config_prints_effective_parameters() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let output = Command::new(exe)
        .args(["--show-config", "--max-bet", "50"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("config json");
    assert_eq!(value["start_balance"], "1500");
    assert_eq!(value["max_bet"], "50");
}

#[test]
fn cli_rejects_invalid_parameters() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let output = Command::new(exe)
        .args(["--balance", "0", "--seeds", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("starting balance must be positive"));
}

#[test]
fn cli_rejects_unknown_seed_tokens() {
    let exe = env!("CARGO_BIN_EXE_fibdozen-sim");
    let output = Command::new(exe)
        .args(["--seeds", "lucky", "--max-spins", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
