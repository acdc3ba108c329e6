//! Column synonym table
//!
//! Maps each canonical field to the normalized labels it has been published
//! under by the exchange's legacy archive and live bhavdata files. Both the
//! field sequence and each alias sequence are ordered: resolution walks them
//! front to back, so the earlier entry wins every tie.

use super::field::CanonicalField;

const ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Date,
        &["timestamp", "date", "date1", "tradingdate", "tradedate", "tradingday"],
    ),
    (CanonicalField::Symbol, &["symbol"]),
    (CanonicalField::Series, &["series"]),
    (
        CanonicalField::PrevClose,
        &[
            "prevclose",
            "previousclose",
            "prevclosingprice",
            "previousclosingprice",
        ],
    ),
    (CanonicalField::Open, &["open", "openprice"]),
    (CanonicalField::High, &["high", "highprice"]),
    (CanonicalField::Low, &["low", "lowprice"]),
    (CanonicalField::Last, &["last", "lastprice"]),
    (CanonicalField::Close, &["close", "closeprice"]),
    (
        CanonicalField::Vwap,
        &[
            "vwap",
            "avgprice",
            "averageprice",
            "averagepricevwap",
            "avgtradedprice",
        ],
    ),
    (
        CanonicalField::Volume,
        &[
            "volume",
            "tottrdqty",
            "totaltradedquantity",
            "ttltrdqnty",
            "tradedquantity",
            "totaltradedqty",
            "totaltrdqnty",
            "volumein000s",
        ],
    ),
    (
        CanonicalField::Turnover,
        &[
            "turnover",
            "tottrdval",
            "totaltradedvalue",
            "turnoverlacs",
            "turnoverinlakhs",
            "turnoverlac",
            "turnovercr",
            "turnoverincrores",
            "turnovercrores",
        ],
    ),
    (
        CanonicalField::Trades,
        &[
            "trades",
            "totaltrades",
            "nooftrades",
            "nooftrade",
            "nooftrds",
            "noofdealings",
        ],
    ),
    (
        CanonicalField::DeliverableVolume,
        &[
            "deliverablevolume",
            "delivqty",
            "deliverablevolumecontracts",
            "deliverablequantity",
            "deliveryqty",
            "deliveryquantity",
        ],
    ),
    (
        CanonicalField::DeliverablePct,
        &[
            "deliverable",
            "deliverableper",
            "deliverablepercentage",
            "deliverablepct",
            "deliverytotradedquantity",
            "delivper",
            "percentdeliverable",
            "deliverablepercent",
            "percentdeliv",
            "percdeliv",
        ],
    ),
    (CanonicalField::Isin, &["isin"]),
];

static STANDARD: ColumnSynonymTable = ColumnSynonymTable { entries: ALIASES };

/// Lower-case a label and drop everything that is not alphanumeric.
///
/// `"TOT_TRD_QTY"`, `"Tot Trd Qty"` and `" tottrdqty"` all become `"tottrdqty"`.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Read-only canonical field -> alias sequence mapping
#[derive(Debug)]
pub struct ColumnSynonymTable {
    entries: &'static [(CanonicalField, &'static [&'static str])],
}

impl ColumnSynonymTable {
    /// The process-wide table
    pub fn standard() -> &'static ColumnSynonymTable {
        &STANDARD
    }

    /// Fields in resolution order, each with its ordered aliases
    pub fn entries(&self) -> impl Iterator<Item = (CanonicalField, &'static [&'static str])> + '_ {
        self.entries.iter().copied()
    }

    pub fn aliases(&self, field: CanonicalField) -> &'static [&'static str] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }
}
