mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{Fixture, StaticHolidays, date, key};
use public_holidays::{HolidayProvider, ProviderError, PublicHoliday, providers::ApiSnafu};
use slp_generator::{
    CacheResolver, ErrorKind, PowerPoint, PowerSeries,
    reference::CsvReferenceTables,
    store::{MemorySeriesStore, SeriesStore},
};

struct Unreachable;

#[async_trait]
impl HolidayProvider for Unreachable {
    async fn fetch_holidays(
        &self,
        _country: &str,
        _year: i32,
    ) -> Result<Vec<PublicHoliday>, ProviderError> {
        ApiSnafu {
            status: 503u16,
            message: "service unavailable",
        }
        .fail()
    }
}

#[tokio::test]
async fn second_resolve_is_a_bit_identical_cache_hit() {
    let fx = Fixture::new();
    let resolver = fx.resolver();
    let k = key("all_states", "H0", 2020);

    let first = resolver.resolve(&k).await.unwrap();
    assert_eq!(fx.holidays.calls(), 1);
    assert!(
        fx.cache_root
            .join("DE/all_states/H0/H0-2020.csv")
            .is_file()
    );

    let second = resolver.resolve(&k).await.unwrap();
    assert_eq!(fx.holidays.calls(), 1, "hit must not classify again");
    assert_eq!(first.len(), second.len());
    assert!(
        first
            .iter()
            .zip(second.iter())
            .all(|(a, b)| a.time == b.time && a.power.to_bits() == b.power.to_bits())
    );

    // A fresh resolver over the same directory sees the same bits too.
    let third = fx.resolver().resolve(&k).await.unwrap();
    assert_eq!(third, first);
}

#[tokio::test]
async fn stored_entry_bypasses_generation() {
    let fx = Fixture::new();
    let k = key("DE-BY", "G1", 2021);
    let canned = PowerSeries::new(vec![PowerPoint {
        time: date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
        power: 7.5,
    }]);
    fx.store().put(&k, &canned).unwrap();

    let got = fx.resolver().resolve(&k).await.unwrap();
    assert_eq!(got, canned);
    assert_eq!(fx.holidays.calls(), 0);
}

#[tokio::test]
async fn regenerate_overwrites_the_store() {
    let fx = Fixture::new();
    let k = key("all_states", "G1", 2021);
    let canned = PowerSeries::new(vec![PowerPoint {
        time: date(2021, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
        power: 7.5,
    }]);
    fx.store().put(&k, &canned).unwrap();

    let fresh = fx.resolver().regenerate(&k).await.unwrap();
    assert_eq!(fresh.len(), 363 * 96 + 92 + 100);
    assert_eq!(fx.store().get(&k).unwrap(), Some(fresh));
}

#[tokio::test]
async fn write_back_can_be_disabled() {
    let fx = Fixture::new();
    let k = key("all_states", "G1", 2020);
    let resolver = fx.resolver().with_write_back(false);

    resolver.resolve(&k).await.unwrap();
    resolver.resolve(&k).await.unwrap();

    assert!(!fx.store().series_path(&k).exists());
    assert_eq!(fx.holidays.calls(), 2);
}

#[tokio::test]
async fn unknown_state_is_rejected_and_nothing_is_stored() {
    let fx = Fixture::new();
    let k = key("DE-XX", "G1", 2020);

    let err = fx.resolver().resolve(&k).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownJurisdiction);
    assert!(err.to_string().contains("DE-XX"), "{err}");
    assert!(!fx.cache_root.join("DE").exists());
}

#[tokio::test]
async fn missing_reference_table_fails_before_any_holiday_lookup() {
    let fx = Fixture::new();
    let err = fx
        .resolver()
        .resolve(&key("all_states", "L2", 2020))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert_eq!(fx.holidays.calls(), 0);
}

#[tokio::test]
async fn holiday_outage_is_source_unavailable() {
    let fx = Fixture::new();
    let resolver = CacheResolver::new(
        Box::new(fx.store()),
        Box::new(Unreachable),
        Box::new(CsvReferenceTables::new(&fx.tables_dir)),
    );

    let err = resolver
        .resolve(&key("all_states", "G1", 2020))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("public holidays"), "{err}");
}

#[tokio::test]
async fn empty_holiday_calendar_still_generates() {
    let fx = Fixture::new();
    let resolver = CacheResolver::new(
        Box::new(fx.store()),
        Box::new(StaticHolidays::new(Vec::new())),
        Box::new(CsvReferenceTables::new(&fx.tables_dir)),
    );

    let series = resolver
        .resolve(&key("all_states", "G1", 2020))
        .await
        .unwrap();
    assert_eq!(series.len(), 35136);
}

#[tokio::test]
async fn memory_store_as_backend() {
    let fx = Fixture::new();
    let memory = Arc::new(MemorySeriesStore::new());
    let resolver = CacheResolver::new(
        Box::new(Arc::clone(&memory)),
        Box::new(fx.holidays.clone()),
        Box::new(CsvReferenceTables::new(&fx.tables_dir)),
    );
    let k = key("all_states", "G0", 2020);

    let generated = resolver.resolve(&k).await.unwrap();
    assert!(memory.contains(&k));
    assert_eq!(resolver.resolve(&k).await.unwrap(), generated);
    assert_eq!(fx.holidays.calls(), 1);
    assert!(!fx.cache_root.exists());
}
