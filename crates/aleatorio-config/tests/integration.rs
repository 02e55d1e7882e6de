//! Integration tests for aleatorio-config.
//!
//! These tests drive a song from a TOML file through to rendered WAV files.

use aleatorio_config::{ConfigError, SongConfig};
use aleatorio_core::Sine;
use aleatorio_io::read_wav_channels;
use aleatorio_markov::{Models, Song};
use tempfile::TempDir;

/// Write a config whose paths all live under `root`.
fn song_file(root: &std::path::Path, extra: &str) -> std::path::PathBuf {
    let text = format!(
        r#"
generations = 2
speakers = 2

[paths]
seed = '{root}/seed'
models = '{root}/models'
audio = '{root}/audio'

[harmonics]
table = "none"

{extra}
"#,
        root = root.display()
    );
    let path = root.join("song.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn song_file_drives_a_run() {
    let tmp = TempDir::new().unwrap();
    let path = song_file(tmp.path(), "[render]\nlayout = \"interleaved\"\nbits_per_sample = 16\n");

    let config = SongConfig::load(&path).unwrap();
    let options = config.to_song_options().unwrap();

    let mut seed = Models::new();
    seed.add(&[
        Sine::new(220.0, 0.5, 10),
        Sine::new(330.0, 0.25, 20),
        Sine::new(440.0, 0.125, 30),
    ]);
    seed.export(&options.seed_models).unwrap();

    let mut wav = config.wav_renderer().unwrap();
    let reports = Song::new(options).run(&mut wav).unwrap();
    assert_eq!(reports.len(), 2);

    let (channels, spec) = read_wav_channels(tmp.path().join("audio/gen0.wav")).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(channels[0].len(), reports[0].samples);
    assert!(tmp.path().join("audio/gen1.wav").exists());
    assert!(tmp.path().join("models/gen1/freq.json").exists());
}

#[test]
fn save_creates_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("songs").join("nested").join("drift.toml");

    let config = SongConfig {
        speakers: 8,
        ..SongConfig::default()
    };
    config.save(&path).unwrap();

    assert_eq!(SongConfig::load(&path).unwrap(), config);
}

#[test]
fn invalid_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    let path = song_file(tmp.path(), "[generator.cycle]\ndensity = 2.0\n");

    let config = SongConfig::load(&path).unwrap();
    assert!(matches!(config.to_song_options(), Err(ConfigError::Validation(_))));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.toml");
    std::fs::write(&path, "speakers = [").unwrap();
    assert!(matches!(SongConfig::load(&path), Err(ConfigError::TomlParse(_))));
}

#[test]
fn missing_file_is_a_read_error() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        SongConfig::load(tmp.path().join("absent.toml")),
        Err(ConfigError::ReadFile { .. })
    ));
}
