//! Date-based routing between the two upstream sources

use crate::client::build_client;
use crate::config::SourceConfig;
use crate::errors::SourceResult;
use crate::legacy::LegacyArchiveAdapter;
use crate::live::LiveBhavdataAdapter;
use crate::SourceAdapter;
use bhavcopy_core::RawTable;
use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{debug, warn};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One trading day's raw table from whichever source serves that date.
///
/// Retrieval failures never escape: they are logged and reported as
/// "no data" like a 404 or a weekend.
pub struct BhavcopySource {
    legacy: Box<dyn SourceAdapter>,
    live: Box<dyn SourceAdapter>,
    live_cutoff: NaiveDate,
}

impl BhavcopySource {
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        let client = build_client(config)?;
        Ok(Self::with_adapters(
            Box::new(LegacyArchiveAdapter::with_client(client.clone(), config)),
            Box::new(LiveBhavdataAdapter::with_client(client, config)),
            config.live_cutoff,
        ))
    }

    pub fn with_adapters(
        legacy: Box<dyn SourceAdapter>,
        live: Box<dyn SourceAdapter>,
        live_cutoff: NaiveDate,
    ) -> Self {
        Self {
            legacy,
            live,
            live_cutoff,
        }
    }

    pub fn live_cutoff(&self) -> NaiveDate {
        self.live_cutoff
    }

    pub fn adapter_for(&self, date: NaiveDate) -> &dyn SourceAdapter {
        if date < self.live_cutoff {
            self.legacy.as_ref()
        } else {
            self.live.as_ref()
        }
    }

    /// Label of the adapter serving `date`, for progress output
    pub fn method_label(&self, date: NaiveDate) -> &str {
        self.adapter_for(date).name()
    }

    pub async fn fetch(&self, date: NaiveDate) -> Option<RawTable> {
        if is_weekend(date) {
            debug!("{} is a weekend, not fetching", date);
            return None;
        }

        let adapter = self.adapter_for(date);
        match adapter.fetch(date).await {
            Ok(table) => table.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Error {} {}: {} ({:?})", adapter.name(), date, e, e.kind());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use async_trait::async_trait;
    use bhavcopy_core::RawValue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    enum Reply {
        Table,
        Nothing,
        Fail,
    }

    struct MockAdapter {
        name: &'static str,
        reply: Reply,
        calls: Arc<AtomicUsize>,
    }

    impl MockAdapter {
        fn boxed(name: &'static str, reply: Reply, calls: Arc<AtomicUsize>) -> Box<dyn SourceAdapter> {
            Box::new(Self { name, reply, calls })
        }
    }

    #[async_trait]
    impl SourceAdapter for MockAdapter {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch(&self, _date: NaiveDate) -> SourceResult<Option<RawTable>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Table => Ok(Some(RawTable::new(
                    vec!["SYMBOL".to_string()],
                    vec![vec![RawValue::text(self.name)]],
                )?)),
                Reply::Nothing => Ok(None),
                Reply::Fail => Err(SourceError::Status {
                    status: 503,
                    url: "https://example.invalid".to_string(),
                }),
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source(legacy: Reply, live: Reply) -> (BhavcopySource, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let legacy_calls = Arc::new(AtomicUsize::new(0));
        let live_calls = Arc::new(AtomicUsize::new(0));
        let source = BhavcopySource::with_adapters(
            MockAdapter::boxed("OLD(archive)", legacy, legacy_calls.clone()),
            MockAdapter::boxed("NEW(live)", live, live_calls.clone()),
            SourceConfig::default().live_cutoff,
        );
        (source, legacy_calls, live_calls)
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(date(2024, 7, 6)));
        assert!(is_weekend(date(2024, 7, 7)));
        assert!(!is_weekend(date(2024, 7, 8)));
    }

    #[test]
    fn test_cutoff_routing() {
        let (source, _, _) = source(Reply::Table, Reply::Table);
        assert_eq!(source.method_label(date(2024, 7, 5)), "OLD(archive)");
        assert_eq!(source.method_label(date(2024, 7, 8)), "NEW(live)");
    }

    #[tokio::test]
    async fn test_fetch_uses_adapter_for_date() {
        let (source, legacy_calls, live_calls) = source(Reply::Table, Reply::Table);

        let before = source.fetch(date(2024, 7, 5)).await.unwrap();
        let after = source.fetch(date(2024, 7, 8)).await.unwrap();

        assert_eq!(before.rows()[0][0], RawValue::text("OLD(archive)"));
        assert_eq!(after.rows()[0][0], RawValue::text("NEW(live)"));
        assert_eq!(legacy_calls.load(Ordering::SeqCst), 1);
        assert_eq!(live_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_weekend_makes_no_request() {
        let (source, legacy_calls, live_calls) = source(Reply::Table, Reply::Table);
        assert!(tokio_test::block_on(source.fetch(date(2024, 7, 6))).is_none());
        assert_eq!(legacy_calls.load(Ordering::SeqCst) + live_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failures_become_no_data() {
        let (source, _, _) = source(Reply::Fail, Reply::Nothing);
        assert!(source.fetch(date(2023, 3, 1)).await.is_none());
        assert!(source.fetch(date(2024, 8, 1)).await.is_none());
    }
}
