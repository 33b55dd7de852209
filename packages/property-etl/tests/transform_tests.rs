//! Behavioural tests for the cleaning engine.

use proptest::prelude::*;

use property_etl::transform::{clean_and_transform, dedupe_by_link, transform};
use property_etl::types::{CleanedRecord, RawRecord, Region};
use property_etl::EtlError;

const SOURCE: &str = "raw_data/to_process/raw_properties_2024_05_01_080000.csv";
const DUMP_DATE: &str = "2024_05_01_100000";

fn raw(purpose: &str, address: &str, size: Option<&str>, price: &str, link: &str) -> RawRecord {
    RawRecord {
        purpose: purpose.to_string(),
        address: address.to_string(),
        size_m2: size.map(str::to_string),
        design: Some("2+kk".to_string()),
        price_czk: price.to_string(),
        link: link.to_string(),
    }
}

fn clean(records: Vec<RawRecord>) -> Vec<CleanedRecord> {
    clean_and_transform(records, SOURCE, DUMP_DATE).unwrap()
}

#[test]
fn rent_office_at_or_below_floor_is_dropped() {
    let rows = clean(vec![
        raw("rent of office", "Korunni 45, Praha 2", Some("20 m2"), "900 Kc", "/a"),
        raw("rent of office", "Korunni 45, Praha 2", Some("20 m2"), "1000 Kc", "/b"),
        raw("rent of office", "Korunni 45, Praha 2", Some("20 m2"), "1001 Kc", "/c"),
    ]);
    let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(links, vec!["/c"]);
}

#[test]
fn sale_apartment_floor() {
    let rows = clean(vec![
        raw("sale of apartment", "Korunni 45, Praha 2", Some("50 m2"), "15000 Kc", "/cheap"),
        raw("sale of apartment", "Korunni 45, Praha 2", Some("50 m2"), "25000 Kc", "/ok"),
    ]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link, "/ok");
    assert_eq!(rows[0].price_czk, 25000);
}

#[test]
fn anything_under_minimum_price_is_dropped() {
    let rows = clean(vec![raw(
        "Pronajem bytu 1+kk",
        "Korunni 45, Praha 2",
        None,
        "499 Kc",
        "/a",
    )]);
    assert!(rows.is_empty());
}

#[test]
fn region_is_split_off_the_address() {
    let rows = clean(vec![raw(
        "Prodej domu",
        "Nejedleho 123, Stredocesky kraj",
        Some("120 m2"),
        "4 500 000 Kc",
        "/dum",
    )]);
    assert_eq!(rows[0].region, Region::Stredocesky);
    assert_eq!(rows[0].address, "Nejedleho 123");
}

#[test]
fn address_without_marker_defaults_to_capital() {
    let rows = clean(vec![raw(
        "Pronajem bytu 2+kk",
        "Korunni 45, Praha 2",
        Some("50 m2"),
        "25 000 Kc",
        "/byt",
    )]);
    assert_eq!(rows[0].region, Region::Praha);
    assert_eq!(rows[0].address, "Korunni 45, Praha 2");
}

#[test]
fn unknown_region_is_dropped() {
    let rows = clean(vec![raw(
        "Prodej domu",
        "Hlavni 1, okres Brno-venkov kraj",
        Some("120 m2"),
        "4 500 000 Kc",
        "/dum",
    )]);
    assert!(rows.is_empty());
}

#[test]
fn foreign_currency_rows_are_dropped() {
    let rows = clean(vec![
        raw("Prodej bytu 3+1", "Korunni 45, Praha 2", Some("75 m2"), "120 000 EUR", "/sk"),
        raw("Prodej bytu 3+1", "Korunni 45, Praha 2", Some("75 m2"), "3 500 000 Kc", "/cz"),
    ]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link, "/cz");
}

#[test]
fn unparseable_price_fails_the_run() {
    let result = clean_and_transform(
        vec![raw("Prodej bytu", "Korunni 45, Praha 2", None, "Cena na dotaz", "/x")],
        SOURCE,
        DUMP_DATE,
    );
    assert!(matches!(result, Err(EtlError::PriceParse { .. })));
}

#[test]
fn land_sale_price_per_m2_cap_is_inclusive() {
    let rows = clean(vec![
        raw("Prodej pozemku", "Pole, Jihocesky kraj", Some("1 m\u{b2}"), "80 000 Kc", "/at"),
        raw("Prodej pozemku", "Pole, Jihocesky kraj", Some("1 m\u{b2}"), "80 001 Kc", "/over"),
    ]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].link, "/at");
    assert_eq!(rows[0].price_per_m2, Some(80_000));
}

#[test]
fn missing_size_gives_no_price_per_m2() {
    let rows = clean(vec![raw(
        "Prodej domu",
        "Korunni 45, Praha 2",
        None,
        "4 500 000 Kc",
        "/dum",
    )]);
    assert_eq!(rows[0].size_m2, 0);
    assert_eq!(rows[0].price_per_m2, None);
}

#[test]
fn provenance_is_stamped() {
    let rows = clean(vec![raw(
        "Prodej domu",
        "Korunni 45, Praha 2",
        Some("100 m2"),
        "4 500 001 Kc",
        "/dum",
    )]);
    assert_eq!(rows[0].dump_date, DUMP_DATE);
    assert_eq!(rows[0].file_name, "raw_properties_2024_05_01_080000.csv");
    assert_eq!(rows[0].price_per_m2, Some(45_001));
}

#[test]
fn archived_copy_is_the_untouched_input() {
    let input = vec![
        raw("Prodej bytu", "Korunni 45, Praha 2", None, "120 000 EUR", "/a"),
        raw("Prodej bytu", "Korunni 45, Praha 2", None, "3 500 000 Kc", "/a"),
    ];
    let dataset = transform(input.clone(), SOURCE, DUMP_DATE).unwrap();
    assert_eq!(dataset.archived, input);
    assert!(dataset.cleaned.is_empty());
}

fn raw_record() -> impl Strategy<Value = RawRecord> {
    (
        prop::sample::select(vec![
            "Pronajem bytu 2+kk",
            "Prodej bytu 3+1",
            "rent of office",
            "sale of apartment",
            "Prodej pozemku",
            "Pronajem garaze",
        ]),
        prop::sample::select(vec![
            "Korunni 45, Praha 2",
            "Nejedleho 123, Stredocesky kraj",
            "Hlavni 1, Brno, Jihomoravsky kraj",
            "Nova 5, okres Brno-venkov kraj",
        ]),
        prop::option::of(0u32..400),
        0u64..6_000_000,
        prop::bool::weighted(0.1),
        0u8..24,
    )
        .prop_map(|(purpose, address, size, price, euro, link)| RawRecord {
            purpose: purpose.to_string(),
            address: address.to_string(),
            size_m2: size.map(|s| format!("{} m\u{b2}", s)),
            design: None,
            price_czk: format!("{} {}", price, if euro { "EUR" } else { "Kc" }),
            link: format!("/nemovitosti-byty-domy/{}", link),
        })
}

proptest! {
    #[test]
    fn dedupe_is_idempotent(records in prop::collection::vec(raw_record(), 0..40)) {
        let once = dedupe_by_link(records);
        let twice = dedupe_by_link(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn transforming_twice_is_stable(records in prop::collection::vec(raw_record(), 0..40)) {
        let first = clean(records.clone());
        let second = clean(records);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cleaned_rows_hold_invariants(records in prop::collection::vec(raw_record(), 0..40)) {
        let rows = clean(records);
        let mut links = std::collections::HashSet::new();

        for row in &rows {
            prop_assert!(Region::ALL.contains(&row.region));
            prop_assert!(links.insert(row.link.clone()));
            prop_assert!(row.price_czk >= 500);

            if row.size_m2 > 0 {
                let expected = (row.price_czk + row.size_m2 - 1) / row.size_m2;
                prop_assert_eq!(row.price_per_m2, Some(expected));
            } else {
                prop_assert_eq!(row.price_per_m2, None);
            }
        }
    }
}
