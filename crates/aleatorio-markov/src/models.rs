//! The per-generation model set and its on-disk layout.
//!
//! A generation directory holds one order-1 chain per [`Parameter`]
//! (`freq.json`, `amp.json`, `dur.json`) and, when enabled, an order-2
//! `poly.json` over combined fundamental tokens.

use std::fs;
use std::path::Path;

use aleatorio_core::{Poly, Sine};

use crate::chain::{Chain, duration_token, value_token};
use crate::error::{MarkovError, Result};
use crate::generator::Parameter;

/// File name of the combined poly chain.
pub const POLY_FILE: &str = "poly.json";

/// Order of the combined poly chain.
pub const POLY_ORDER: usize = 2;

/// Separator between the fields of a combined poly token.
pub const POLY_FIELD_SEPARATOR: char = '|';

/// The chains trained from, and driving, one generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Models {
    /// Frequency chain (order 1).
    pub frequency: Chain,
    /// Amplitude chain (order 1).
    pub amplitude: Chain,
    /// Duration chain (order 1).
    pub duration: Chain,
    /// Combined `freq|amp|dur|pan` chain (order 2), if trained.
    pub poly: Option<Chain>,
}

impl Models {
    /// Create an empty model set without a poly chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain of one parameter.
    pub fn chain(&self, parameter: Parameter) -> &Chain {
        match parameter {
            Parameter::Frequency => &self.frequency,
            Parameter::Amplitude => &self.amplitude,
            Parameter::Duration => &self.duration,
        }
    }

    /// Train the three parameter chains on one tone sequence.
    ///
    /// Every call is a separate sequence with its own start and end
    /// boundaries. An empty slice is ignored.
    pub fn add(&mut self, tones: &[Sine]) {
        if tones.is_empty() {
            return;
        }
        let frequencies: Vec<String> = tones.iter().map(|s| value_token(s.frequency)).collect();
        let amplitudes: Vec<String> = tones.iter().map(|s| value_token(s.amplitude)).collect();
        let durations: Vec<String> = tones.iter().map(|s| duration_token(s.duration_ms)).collect();

        self.frequency.add(&frequencies);
        self.amplitude.add(&amplitudes);
        self.duration.add(&durations);
    }

    /// Train the poly chain on the fundamentals of every voice.
    ///
    /// Each voice is one sequence of `freq|amp|dur|pan` tokens. The poly
    /// chain is created on first use.
    pub fn add_poly(&mut self, poly: &Poly) {
        let chain = self.poly.get_or_insert_with(|| Chain::new(POLY_ORDER));
        for voice in poly {
            let tokens: Vec<String> = voice
                .iter()
                .filter_map(|(_, train)| train.fundamental())
                .map(|wagon| {
                    let s = &wagon.sine;
                    format!(
                        "{f:.6}{sep}{a:.6}{sep}{d}{sep}{p:.6}",
                        f = s.frequency,
                        a = s.amplitude,
                        d = s.duration_ms,
                        p = wagon.panning,
                        sep = POLY_FIELD_SEPARATOR,
                    )
                })
                .collect();
            if !tokens.is_empty() {
                chain.add(&tokens);
            }
        }
    }

    /// Write every chain into `dir`, creating it if needed.
    pub fn export(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| MarkovError::create_dir(dir, e))?;

        for parameter in Parameter::ALL {
            write_chain(&dir.join(parameter.file_name()), self.chain(parameter))?;
        }
        if let Some(poly) = &self.poly {
            write_chain(&dir.join(POLY_FILE), poly)?;
        }

        tracing::debug!(dir = %dir.display(), poly = self.poly.is_some(), "models exported");
        Ok(())
    }

    /// Read a model set from `dir`.
    ///
    /// The three parameter files are required; `poly.json` is read when it
    /// exists.
    pub fn load(dir: &Path) -> Result<Self> {
        let frequency = read_chain(&dir.join(Parameter::Frequency.file_name()))?;
        let amplitude = read_chain(&dir.join(Parameter::Amplitude.file_name()))?;
        let duration = read_chain(&dir.join(Parameter::Duration.file_name()))?;

        let poly_path = dir.join(POLY_FILE);
        let poly = if poly_path.exists() {
            Some(read_chain(&poly_path)?)
        } else {
            None
        };

        Ok(Self {
            frequency,
            amplitude,
            duration,
            poly,
        })
    }
}

fn write_chain(path: &Path, chain: &Chain) -> Result<()> {
    let json = chain.to_json()?;
    fs::write(path, json).map_err(|e| MarkovError::write_file(path, e))
}

fn read_chain(path: &Path) -> Result<Chain> {
    let json = fs::read_to_string(path).map_err(|e| MarkovError::read_file(path, e))?;
    serde_json::from_str(&json).map_err(|source| MarkovError::ParseModel {
        path: path.to_path_buf(),
        source,
    })
}
