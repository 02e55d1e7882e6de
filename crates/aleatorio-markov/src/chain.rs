//! N-gram Markov chain over string tokens.
//!
//! The chain counts transitions from an n-gram of tokens (the *state*) to
//! the token that follows it. Every sequence added is padded with `order`
//! start tokens and `order` end tokens, so each sequence contributes a
//! transition out of the start state and one into the end token.
//!
//! # Persistence
//!
//! Chains serialize to the JSON layout used by existing model files:
//!
//! ```json
//! {
//!   "int": 1,
//!   "spool_map": { "^": 0, "440.000000": 1, "$": 2 },
//!   "freq_mat": { "0": { "1": 1 }, "1": { "2": 1 } }
//! }
//! ```
//!
//! `spool_map` assigns every state and token an index; `freq_mat` maps a
//! state index to the counts of the token indices that followed it. N-gram
//! states are stored as their tokens joined with `_`.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MarkovError, Result};

/// Token padding the start of every sequence.
pub const START_TOKEN: &str = "^";

/// Token padding the end of every sequence; reaching it ends a walk.
pub const END_TOKEN: &str = "$";

/// Separator between the tokens of an n-gram state.
pub const NGRAM_SEPARATOR: &str = "_";

/// A numeric state a walk can start from.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    /// Position in ascending numeric order.
    pub rank: usize,
    /// Parsed value of the state.
    pub value: f64,
    /// State token exactly as stored in the chain.
    pub state: String,
}

/// On-disk layout of a chain.
#[derive(Debug, Serialize, Deserialize)]
struct ChainFile {
    int: usize,
    spool_map: BTreeMap<String, usize>,
    freq_mat: BTreeMap<usize, BTreeMap<usize, u64>>,
}

/// A Markov chain of a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChainFile", into = "ChainFile")]
pub struct Chain {
    order: usize,
    spool: Vec<String>,
    index: HashMap<String, usize>,
    transitions: BTreeMap<usize, BTreeMap<usize, u64>>,
}

impl Chain {
    /// Create an empty chain. An order of 0 is treated as 1.
    pub fn new(order: usize) -> Self {
        Self {
            order: order.max(1),
            spool: Vec::new(),
            index: HashMap::new(),
            transitions: BTreeMap::new(),
        }
    }

    /// Number of tokens forming a state.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of distinct states and tokens in the spool.
    pub fn state_count(&self) -> usize {
        self.spool.len()
    }

    /// Total number of distinct transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    fn intern(&mut self, token: &str) -> usize {
        if let Some(&i) = self.index.get(token) {
            return i;
        }
        let i = self.spool.len();
        self.spool.push(token.to_string());
        self.index.insert(token.to_string(), i);
        i
    }

    fn key(&self, state: &[&str]) -> Result<String> {
        if state.len() != self.order {
            return Err(MarkovError::OrderMismatch {
                expected: self.order,
                found: state.len(),
            });
        }
        Ok(state.join(NGRAM_SEPARATOR))
    }

    /// Count the transitions of one token sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use aleatorio_markov::Chain;
    ///
    /// let mut chain = Chain::new(1);
    /// chain.add(&["a", "b", "a"]);
    /// assert_eq!(chain.transitions(&["a"]).unwrap(), vec![("b", 1), ("$", 1)]);
    /// ```
    pub fn add<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let mut padded: Vec<&str> = Vec::with_capacity(tokens.len() + 2 * self.order);
        padded.extend(std::iter::repeat_n(START_TOKEN, self.order));
        padded.extend(tokens.iter().map(AsRef::as_ref));
        padded.extend(std::iter::repeat_n(END_TOKEN, self.order));

        for window in padded.windows(self.order + 1) {
            let (state, next) = window.split_at(self.order);
            let from = self.intern(&state.join(NGRAM_SEPARATOR));
            let to = self.intern(next[0]);
            *self
                .transitions
                .entry(from)
                .or_default()
                .entry(to)
                .or_insert(0) += 1;
        }
    }

    /// Tokens that followed `state`, with their counts, in spool order.
    ///
    /// Returns `None` for a state the chain has never seen.
    pub fn transitions(&self, state: &[&str]) -> Option<Vec<(&str, u64)>> {
        let key = self.key(state).ok()?;
        let from = self.index.get(&key)?;
        Some(
            self.transitions
                .get(from)
                .into_iter()
                .flatten()
                .map(|(to, count)| (self.spool[*to].as_str(), *count))
                .collect(),
        )
    }

    /// Draw the token following `state`.
    ///
    /// A state ending in [`END_TOKEN`] yields [`END_TOKEN`] again. The draw
    /// is proportional to the transition counts.
    pub fn next<R: Rng>(&self, state: &[&str], rng: &mut R) -> Result<&str> {
        let key = self.key(state)?;
        if state.last() == Some(&END_TOKEN) {
            return Ok(END_TOKEN);
        }

        let from = self
            .index
            .get(&key)
            .ok_or_else(|| MarkovError::UnknownState(key.clone()))?;
        let row = self
            .transitions
            .get(from)
            .filter(|row| !row.is_empty())
            .ok_or_else(|| MarkovError::DeadEnd(key.clone()))?;

        let total: u64 = row.values().sum();
        let mut pick = rng.random_range(0..total);
        for (to, count) in row {
            if pick < *count {
                return Ok(&self.spool[*to]);
            }
            pick -= count;
        }

        Err(MarkovError::DeadEnd(key))
    }

    /// Distinct numeric states, ranked by ascending value.
    ///
    /// Start and end tokens and non-finite values are skipped. Any other
    /// state that does not parse as a number is an error.
    pub fn seeds(&self) -> Result<Vec<Seed>> {
        let mut seeds = Vec::new();
        for state in &self.spool {
            if state == START_TOKEN || state == END_TOKEN {
                continue;
            }
            let value: f64 = state
                .parse()
                .map_err(|_| MarkovError::UnparsableToken(state.clone()))?;
            if !value.is_finite() {
                continue;
            }
            seeds.push(Seed {
                rank: 0,
                value,
                state: state.clone(),
            });
        }

        seeds.sort_by(|a, b| a.value.total_cmp(&b.value));
        for (rank, seed) in seeds.iter_mut().enumerate() {
            seed.rank = rank;
        }
        Ok(seeds)
    }

    /// Serialize to model JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse model JSON, validating its indices.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(1)
    }
}

impl From<Chain> for ChainFile {
    fn from(chain: Chain) -> Self {
        ChainFile {
            int: chain.order,
            spool_map: chain.index.into_iter().collect(),
            freq_mat: chain.transitions,
        }
    }
}

impl TryFrom<ChainFile> for Chain {
    type Error = MarkovError;

    fn try_from(file: ChainFile) -> Result<Self> {
        let size = file.spool_map.len();
        let mut spool: Vec<Option<String>> = vec![None; size];
        for (token, &i) in &file.spool_map {
            let slot = spool.get_mut(i).ok_or_else(|| {
                MarkovError::InvalidModel(format!("index {i} of '{token}' is out of range"))
            })?;
            if slot.is_some() {
                return Err(MarkovError::InvalidModel(format!("index {i} is used twice")));
            }
            *slot = Some(token.clone());
        }
        let spool: Vec<String> = spool.into_iter().flatten().collect();

        for (from, row) in &file.freq_mat {
            if *from >= size || row.keys().any(|to| *to >= size) {
                return Err(MarkovError::InvalidModel(format!(
                    "transition row {from} refers to an unknown index"
                )));
            }
        }

        Ok(Chain {
            order: file.int.max(1),
            index: file.spool_map.into_iter().collect(),
            spool,
            transitions: file.freq_mat,
        })
    }
}

/// Format a frequency or amplitude as a chain token.
pub fn value_token(value: f64) -> String {
    format!("{value:.6}")
}

/// Format a duration in milliseconds as a chain token.
pub fn duration_token(duration_ms: i64) -> String {
    duration_ms.to_string()
}
