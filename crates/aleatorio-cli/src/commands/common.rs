//! Shared CLI helpers used across multiple commands.

use aleatorio_config::{SongConfig, default_song_path, find_song};
use aleatorio_core::Poly;
use aleatorio_synth::{PartialTable, PlacementPolicy, StockTable, place_poly};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Parse a stock partial table name for clap's `value_parser`.
pub fn parse_table(s: &str) -> Result<StockTable, String> {
    s.parse()
}

/// Load a song file by name or path.
///
/// Searches in this order:
/// 1. The given name or path
/// 2. The default song file in the user config directory
/// 3. Built-in defaults
pub fn load_song(name: Option<&str>) -> anyhow::Result<SongConfig> {
    if let Some(name) = name {
        let Some(path) = find_song(name) else {
            anyhow::bail!("Song file '{}' not found", name);
        };
        tracing::info!(file = %path.display(), "loading song");
        return Ok(SongConfig::load(&path)?);
    }

    let path = default_song_path();
    if path.is_file() {
        tracing::info!(file = %path.display(), "loading default song");
        return Ok(SongConfig::load(&path)?);
    }

    Ok(SongConfig::default())
}

/// Attach partials of `table` to a built-in score.
pub fn place(poly: &mut Poly, table: StockTable, seed: u64) -> usize {
    let table: PartialTable = table.table();
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    place_poly(poly, &table, &PlacementPolicy::Random, &mut rng)
}
