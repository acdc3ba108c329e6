//! Raw tables as handed over by the source adapters

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structural problems with a raw table.
///
/// These are contract violations by whoever built the table, never
/// data-quality problems inside a cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Row {row} has {actual} cells but the header has {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

pub type TableResult<T> = Result<T, TableError>;

/// A single untyped cell as the upstream source returned it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Null,
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Permissive numeric coercion.
    ///
    /// Anything that does not parse to a finite number is `None`; this
    /// never fails and never substitutes zero.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Null => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Trimmed text, `None` when blank
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Null => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
            Self::Null => Ok(()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One source's table for one trading day.
///
/// Every row has exactly one cell per header label; labels are kept
/// verbatim (casing, spacing and punctuation untouched).
#[derive(Clone, Debug, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawValue>>) -> TableResult<Self> {
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != headers.len())
        {
            return Err(TableError::RowWidth {
                row,
                expected: headers.len(),
                actual: cells.len(),
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<RawValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_ragged_rows() {
        let result = RawTable::new(
            vec!["SYMBOL".to_string(), "CLOSE".to_string()],
            vec![
                vec!["INFY".into(), "1500".into()],
                vec!["TCS".into()],
            ],
        );

        assert_eq!(
            result,
            Err(TableError::RowWidth { row: 1, expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_numeric_coercion_degrades_to_missing() {
        assert_eq!(RawValue::text(" 1520.5 ").as_number(), Some(1520.5));
        assert_eq!(RawValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(RawValue::text("-").as_number(), None);
        assert_eq!(RawValue::text("1,234").as_number(), None);
        assert_eq!(RawValue::text("inf").as_number(), None);
        assert_eq!(RawValue::Number(f64::NAN).as_number(), None);
        assert_eq!(RawValue::Null.as_number(), None);
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(RawValue::text("  EQ").as_text(), Some("EQ".to_string()));
        assert_eq!(RawValue::text("   ").as_text(), None);
        assert_eq!(RawValue::Null.as_text(), None);
    }
}
