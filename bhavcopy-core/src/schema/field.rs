//! Canonical bhavcopy fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a canonical field's values are typed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Text,
    Numeric,
}

/// Canonical field, declared in output column order.
///
/// The derived `Ord` follows declaration order, so sorting fields yields
/// the canonical column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalField {
    Date,
    Symbol,
    Series,
    PrevClose,
    Open,
    High,
    Low,
    Last,
    Close,
    Vwap,
    Volume,
    Turnover,
    Trades,
    DeliverableVolume,
    DeliverablePct,
    Isin,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 16] = [
        CanonicalField::Date,
        CanonicalField::Symbol,
        CanonicalField::Series,
        CanonicalField::PrevClose,
        CanonicalField::Open,
        CanonicalField::High,
        CanonicalField::Low,
        CanonicalField::Last,
        CanonicalField::Close,
        CanonicalField::Vwap,
        CanonicalField::Volume,
        CanonicalField::Turnover,
        CanonicalField::Trades,
        CanonicalField::DeliverableVolume,
        CanonicalField::DeliverablePct,
        CanonicalField::Isin,
    ];

    /// Output column name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Symbol => "Symbol",
            Self::Series => "Series",
            Self::PrevClose => "Prev Close",
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Last => "Last",
            Self::Close => "Close",
            Self::Vwap => "VWAP",
            Self::Volume => "Volume",
            Self::Turnover => "Turnover",
            Self::Trades => "Trades",
            Self::DeliverableVolume => "Deliverable Volume",
            Self::DeliverablePct => "Deliverable %",
            Self::Isin => "ISIN",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Date => FieldKind::Date,
            Self::Symbol | Self::Series | Self::Isin => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
