//! Watchlist filter

use crate::records::CanonicalTable;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Large-cap NSE trading symbols tracked by default
pub const DEFAULT_SYMBOLS: &[&str] = &[
    "RELIANCE", "HDFCBANK", "BHARTIARTL", "TCS", "ICICIBANK", "SBIN", "BAJFINANCE", "INFY",
    "HINDUNILVR", "LICI", "MARUTI", "LT", "ITC", "M&M", "KOTAKBANK", "SUNPHARMA", "HCLTECH",
    "AXISBANK", "ULTRACEMCO", "NTPC", "BAJAJFINSV", "HAL", "ADANIPORTS", "ONGC", "TITAN",
    "DMART", "ADANIENT", "BEL", "ADANIPOWER", "JSWSTEEL", "POWERGRID", "WIPRO", "BAJAJ-AUTO",
    "TATAMOTORS", "COALINDIA", "ASIANPAINT", "NESTLEIND", "TATASTEEL", "IOC", "HINDZINC",
    "EICHERMOT", "GRASIM", "SBILIFE", "VEDL", "DLF", "ADANIGREEN",
];

/// Fixed set of trading symbols, matched exactly and case-sensitively
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Watchlist {
    symbols: Vec<String>,
    members: HashSet<String>,
}

impl Watchlist {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut members = HashSet::new();
        let symbols = symbols
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| members.insert(s.clone()))
            .collect();
        Self { symbols, members }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.members.contains(symbol)
    }

    /// Symbols in the order they were listed
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Rows whose symbol is on the list, in their original order.
    /// Rows without a symbol never match.
    pub fn filter(&self, table: &CanonicalTable) -> CanonicalTable {
        let kept = table
            .records()
            .iter()
            .filter(|r| r.symbol.as_deref().is_some_and(|s| self.contains(s)))
            .cloned()
            .collect();
        table.with_records(kept)
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS.iter().copied())
    }
}

impl From<Vec<String>> for Watchlist {
    fn from(symbols: Vec<String>) -> Self {
        Self::new(symbols)
    }
}

impl From<Watchlist> for Vec<String> {
    fn from(watchlist: Watchlist) -> Self {
        watchlist.symbols
    }
}
