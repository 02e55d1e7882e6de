//! Partial sources.
//!
//! A [`Harmonics`] implementation supplies the overtone list placement
//! attaches to every fundamental. [`PartialTable`] is the stock
//! implementation; [`StockTable`] names the built-in tables.

use core::fmt;
use core::str::FromStr;

use aleatorio_core::{MAX_PARTIAL, Partial};

/// Anything that can supply a list of partials.
pub trait Harmonics {
    /// The partials to consider, in placement order.
    fn partials(&self) -> &[Partial];
}

impl Harmonics for [Partial] {
    fn partials(&self) -> &[Partial] {
        self
    }
}

impl Harmonics for Vec<Partial> {
    fn partials(&self) -> &[Partial] {
        self
    }
}

/// An ordered list of partials.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartialTable {
    partials: Vec<Partial>,
}

impl PartialTable {
    /// Build a table from explicit partials.
    pub fn new(partials: Vec<Partial>) -> Self {
        Self { partials }
    }

    /// No partials at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Harmonics 2..180 with factor `0.01 * n`, folded back below 1.
    pub fn naive() -> Self {
        (2..180)
            .map(|n| {
                let mut factor = f64::from(n) * 0.01;
                if factor > 1.0 {
                    factor -= 1.0;
                }
                Partial::new(n, factor, 0, 0)
            })
            .collect()
    }

    /// Prime harmonics at a fixed 0.05 factor, each starting `n` ms into the
    /// fundamental and lasting 200 ms.
    pub fn primes() -> Self {
        (2..MAX_PARTIAL)
            .filter(|&n| is_prime(n))
            .map(|n| Partial::new(n, 0.05, i64::from(n), 200))
            .collect()
    }

    /// Harmonics 2..1000, factor `0.0051 * n` on primes and 0 elsewhere.
    pub fn weighted_primes() -> Self {
        (2..MAX_PARTIAL)
            .map(|n| {
                let factor = if is_prime(n) { 0.0051 * f64::from(n) } else { 0.0 };
                Partial::new(n, factor, 0, 0)
            })
            .collect()
    }

    /// Harmonics 2..1000, factor `1 / n / 10` on even composites and 0
    /// elsewhere.
    pub fn even_composites() -> Self {
        (2..MAX_PARTIAL)
            .map(|n| {
                let factor = if n % 2 == 0 && !is_prime(n) {
                    1.0 / f64::from(n) / 10.0
                } else {
                    0.0
                };
                Partial::new(n, factor, 0, 0)
            })
            .collect()
    }

    /// Number of partials.
    pub fn len(&self) -> usize {
        self.partials.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }
}

impl Harmonics for PartialTable {
    fn partials(&self) -> &[Partial] {
        &self.partials
    }
}

impl FromIterator<Partial> for PartialTable {
    fn from_iter<I: IntoIterator<Item = Partial>>(iter: I) -> Self {
        Self {
            partials: iter.into_iter().collect(),
        }
    }
}

/// Names of the built-in partial tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockTable {
    /// No partials
    None,
    /// [`PartialTable::naive`]
    #[default]
    Naive,
    /// [`PartialTable::primes`]
    Primes,
    /// [`PartialTable::weighted_primes`]
    WeightedPrimes,
    /// [`PartialTable::even_composites`]
    EvenComposites,
}

impl StockTable {
    /// Every stock table.
    pub const ALL: [StockTable; 5] = [
        StockTable::None,
        StockTable::Naive,
        StockTable::Primes,
        StockTable::WeightedPrimes,
        StockTable::EvenComposites,
    ];

    /// Kebab-case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            StockTable::None => "none",
            StockTable::Naive => "naive",
            StockTable::Primes => "primes",
            StockTable::WeightedPrimes => "weighted-primes",
            StockTable::EvenComposites => "even-composites",
        }
    }

    /// Build the table.
    pub fn table(self) -> PartialTable {
        match self {
            StockTable::None => PartialTable::none(),
            StockTable::Naive => PartialTable::naive(),
            StockTable::Primes => PartialTable::primes(),
            StockTable::WeightedPrimes => PartialTable::weighted_primes(),
            StockTable::EvenComposites => PartialTable::even_composites(),
        }
    }
}

impl fmt::Display for StockTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StockTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StockTable::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown partial table '{s}' (expected one of: none, naive, primes, weighted-primes, even-composites)"
                )
            })
    }
}

/// Trial-division primality test.
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
