//! Integration tests for aleatorio-cli.
//!
//! Tests invoke the built binary against temporary directories: training
//! seed models, inspecting them, rendering demos and evolving a small song.

use std::path::Path;
use std::process::{Command, Output};

use aleatorio_core::Sine;
use aleatorio_markov::Models;
use tempfile::TempDir;

/// Helper to get the path to the `aleatorio` binary built by cargo.
fn aleatorio_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aleatorio"))
}

fn run(args: &[&str]) -> Output {
    aleatorio_bin()
        .args(args)
        .output()
        .expect("failed to run aleatorio")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path is UTF-8")
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn help_lists_commands() {
    let output = run(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["seed", "evolve", "demo", "inspect"] {
        assert!(stdout.contains(command), "help should list '{command}'");
    }
}

// ---------------------------------------------------------------------------
// seed / inspect
// ---------------------------------------------------------------------------

#[test]
fn seed_exports_models() {
    let tmp = TempDir::new().unwrap();
    let models = tmp.path().join("seed");

    let output = run(&["seed", "--models", path_arg(&models), "--poly-model"]);
    assert!(
        output.status.success(),
        "seed failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for file in ["freq.json", "amp.json", "dur.json", "poly.json"] {
        assert!(models.join(file).is_file(), "missing {file}");
    }
    assert!(
        !tmp.path().join("audio").exists(),
        "no audio without --audio"
    );
}

#[test]
fn inspect_reports_chain_shape() {
    let tmp = TempDir::new().unwrap();
    let models = tmp.path().join("seed");
    assert!(
        run(&["seed", "--models", path_arg(&models), "--poly-model"])
            .status
            .success()
    );

    let output = run(&["inspect", path_arg(&models.join("dur.json")), "--seeds"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Order:       1"));
    assert!(stdout.contains("Seeds:"));
    assert!(stdout.contains("Range:"));

    let output = run(&["inspect", path_arg(&models.join("poly.json"))]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Order:       2"));
    assert!(stdout.contains("non-numeric"));
}

#[test]
fn inspect_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["inspect", path_arg(&tmp.path().join("absent.json"))]);
    assert!(!output.status.success());
}

#[test]
fn inspect_rejects_malformed_model() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    std::fs::write(&path, "{\"int\": 1").unwrap();

    let output = run(&["inspect", path_arg(&path)]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse model"));
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

#[test]
fn demo_melody_writes_one_file_per_speaker() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["demo", path_arg(tmp.path()), "--speakers", "3"]);
    assert!(
        output.status.success(),
        "demo failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    for i in 0..3 {
        assert!(tmp.path().join(format!("melody-{i}.wav")).is_file());
    }
}

#[test]
fn demo_sweep_interleaved() {
    let tmp = TempDir::new().unwrap();
    let output = run(&[
        "demo",
        path_arg(tmp.path()),
        "--piece",
        "sweep",
        "--interleaved",
        "--bit-depth",
        "16",
    ]);
    assert!(output.status.success());

    let (channels, spec) = aleatorio_io::read_wav_channels(tmp.path().join("sweep.wav")).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 16);
    assert!(!channels[0].is_empty());
}

#[test]
fn demo_rejects_unknown_table() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["demo", path_arg(tmp.path()), "--harmonics", "cubes"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("weighted-primes"));
}

#[test]
fn demo_rejects_zero_speakers() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["demo", path_arg(tmp.path()), "--speakers", "0"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// evolve
// ---------------------------------------------------------------------------

#[test]
fn evolve_runs_a_song_file() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let mut seed = Models::new();
    seed.add(&[
        Sine::new(220.0, 0.5, 10),
        Sine::new(330.0, 0.25, 20),
        Sine::new(440.0, 0.125, 30),
    ]);
    seed.export(&root.join("seed")).unwrap();

    let song = root.join("song.toml");
    std::fs::write(
        &song,
        format!(
            "generations = 3\n\n[paths]\nseed = '{0}/seed'\nmodels = '{0}/models'\naudio = '{0}/audio'\n\n[harmonics]\ntable = \"none\"\n",
            root.display()
        ),
    )
    .unwrap();

    let output = run(&["evolve", "--config", path_arg(&song), "--generations", "2"]);
    assert!(
        output.status.success(),
        "evolve failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gen0"));
    assert!(stdout.contains("gen1"));
    assert!(!stdout.contains("gen2"));

    assert!(root.join("audio/gen0-0.wav").is_file());
    assert!(root.join("audio/gen0-1.wav").is_file());
    assert!(root.join("models/gen1/freq.json").is_file());
}

#[test]
fn evolve_missing_song_file_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(&[
        "evolve",
        "--config",
        path_arg(&tmp.path().join("nowhere.toml")),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
