//! End-to-end search behavior over in-memory catalogs.

use xsearch_core::{
    Catalog, Criterion, FacetIndex, Record, SearchError, SearchQuery, SearchResult, find,
};

fn record(model: &str, member: &str, frequency: &str, version: &str, date: &str) -> Record {
    Record::new()
        .with("model", model)
        .with("member", member)
        .with("frequency", frequency)
        .with("version", version)
        .with("nc_creation_date", date)
        .with("retired", 0)
        .with("retracted", 0)
        .with("ignored", 0)
}

fn sample() -> Catalog {
    [
        ("/p/a/CESM2/r1i1p1f1/v1/", record("CESM2", "r1i1p1f1", "mon", "v1", "20200101")),
        ("/p/a/CESM2/r1i1p1f1/v2/", record("CESM2", "r1i1p1f1", "mon", "v2", "20190101")),
        ("/p/a/CESM2/r1i1p1f1/day/", record("CESM2", "r1i1p1f1", "day", "v2", "20190101")),
        ("/p/a/E3SM-1-0/r1i1p1f1/v1/", record("E3SM-1-0", "r1i1p1f1", "mon", "v1", "20190101")),
    ]
    .into_iter()
    .map(|(path, record)| (path.to_string(), record))
    .collect()
}

fn fixed(catalog: Catalog) -> impl Fn(&str, &str) -> Result<Catalog, SearchError> {
    move |_: &str, _: &str| Ok(catalog.clone())
}

fn criteria(names: &[&str]) -> Vec<Criterion> {
    names
        .iter()
        .map(|name| name.parse().expect("valid criterion"))
        .collect()
}

#[test]
fn path_listing_snapshot() {
    let source = fixed(sample());
    let outcome = find(&source, &SearchQuery::new("historical", "tas", "mon").verbose(false))
        .expect("search");

    insta::assert_json_snapshot!(outcome.result, @r###"
    [
      "/p/a/CESM2/r1i1p1f1/v2/",
      "/p/a/E3SM-1-0/r1i1p1f1/v1/"
    ]
    "###);
}

#[test]
fn swapping_criteria_order_swaps_the_survivor() {
    let source = fixed(sample());
    let base = SearchQuery::new("historical", "tas", "mon").verbose(false);

    let by_version = find(
        &source,
        &base.clone().with_criteria(criteria(&["version", "nc_creation_date"])),
    )
    .expect("search");
    assert!(by_version.result.paths().contains(&"/p/a/CESM2/r1i1p1f1/v2/".to_string()));

    let by_date = find(
        &source,
        &base.with_criteria(criteria(&["nc_creation_date", "version"])),
    )
    .expect("search");
    assert!(by_date.result.paths().contains(&"/p/a/CESM2/r1i1p1f1/v1/".to_string()));
}

#[test]
fn full_metadata_carries_alternates() {
    let source = fixed(sample());
    let query = SearchQuery::new("historical", "tas", "mon")
        .full_metadata(true)
        .with_filter("model", "CESM*")
        .verbose(false);
    let outcome = find(&source, &query).expect("search");

    let SearchResult::Metadata(entries) = outcome.result else {
        panic!("expected metadata result");
    };
    assert_eq!(entries.len(), 1);
    let entry = &entries["/p/a/CESM2/r1i1p1f1/v2/"];
    assert_eq!(entry.unique, Some(true));
    assert_eq!(
        entry.alternate_paths,
        Some(vec!["/p/a/CESM2/r1i1p1f1/v1/".to_string()])
    );
    assert_eq!(entry.record.version(), Some("v2"));
}

#[test]
fn retired_datasets_need_an_explicit_opt_in() {
    let mut catalog = sample();
    catalog.insert(
        "/p/a/CanESM5/r1i1p1f1/v1/",
        record("CanESM5", "r1i1p1f1", "mon", "v1", "20190101").with("retired", 1),
    );
    let source = fixed(catalog);
    let query = SearchQuery::new("historical", "tas", "mon").verbose(false);

    let default = find(&source, &query).expect("search");
    assert!(!default.result.paths().iter().any(|p| p.contains("CanESM5")));

    let opted_in = find(&source, &query.exclude_retired(false)).expect("search");
    assert!(opted_in.result.paths().iter().any(|p| p.contains("CanESM5")));
}

#[test]
fn missing_filtered_facet_aborts_the_query() {
    let source = fixed(sample());
    let query = SearchQuery::new("historical", "tas", "mon").with_filter("gridLabel", "gn");
    let err = find(&source, &query).expect_err("gridLabel missing everywhere");
    assert!(matches!(err, SearchError::MissingFacet { facet, .. } if facet == "gridLabel"));
}

#[test]
fn facet_index_matches_members_naturally() {
    let mut catalog = Catalog::new();
    for member in ["r10i1p1f1", "r2i1p1f1", "r1i1p1f1"] {
        catalog.insert(
            format!("/p/x/{member}/"),
            record("CESM2", member, "mon", "v1", "1"),
        );
    }
    let matched = FacetIndex::new(&catalog)
        .match_facet("member", "r*i1p1f1")
        .expect("member on every record");
    assert_eq!(
        matched,
        vec!["/p/x/r1i1p1f1/", "/p/x/r2i1p1f1/", "/p/x/r10i1p1f1/"]
    );
}

#[test]
fn without_deduplication_records_pass_through_unchanged() {
    let mut catalog = sample();
    let stored = record("CanESM5", "r1i1p1f1", "mon", "v1", "20190101")
        .with("unique", "yes")
        .with("alternate_paths", "/p/z");
    catalog.insert("/p/a/CanESM5/r1i1p1f1/v1/", stored.clone());
    let source = fixed(catalog);
    let query = SearchQuery::new("historical", "tas", "mon")
        .deduplicate(false)
        .full_metadata(true)
        .verbose(false);
    let outcome = find(&source, &query).expect("search");

    let SearchResult::Metadata(entries) = outcome.result else {
        panic!("expected metadata result");
    };
    let entry = &entries["/p/a/CanESM5/r1i1p1f1/v1/"];
    assert_eq!(entry.record, stored);
    assert_eq!(entry.unique, None);
    assert_eq!(entry.alternate_paths, None);
}

#[test]
fn plain_flag_criterion_selects_the_true_candidate() {
    let mut catalog = Catalog::new();
    catalog.insert(
        "/p/a/CESM2/r1i1p1f1/v1/",
        record("CESM2", "r1i1p1f1", "mon", "v1", "1").with("latest", false),
    );
    catalog.insert(
        "/p/b/CESM2/r1i1p1f1/v1/",
        record("CESM2", "r1i1p1f1", "mon", "v1", "1").with("latest", true),
    );
    let query = SearchQuery::new("historical", "tas", "mon")
        .with_criteria(criteria(&["latest"]))
        .verbose(false);
    let outcome = find(&fixed(catalog), &query).expect("search");
    assert_eq!(outcome.result.paths(), vec!["/p/b/CESM2/r1i1p1f1/v1/".to_string()]);
}
