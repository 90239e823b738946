//! List view tests: server-side filtering, re-query on filter change, and
//! sequence guarding of late responses.

mod helpers;

use std::sync::Arc;

use helpers::{professional, ScriptedApi};
use professional_desk::{ApiError, ApplyOutcome, ListView, Source, SourceFilter};

#[tokio::test]
async fn initial_refresh_queries_without_filter() {
    let api = Arc::new(ScriptedApi::new());
    api.push_list(Ok(vec![
        professional(1, "John Doe", Source::Direct),
        professional(2, "Jane Doe", Source::Partner),
    ]));
    let mut view = ListView::new(Arc::clone(&api));

    let outcome = view.refresh().await;

    assert_eq!(outcome, ApplyOutcome::Applied { rows: 2 });
    assert_eq!(api.list_queries(), vec![SourceFilter::All]);
    let names: Vec<&str> = view.rows().map(|row| row.full_name).collect();
    assert_eq!(names, vec!["John Doe", "Jane Doe"]);
}

#[tokio::test]
async fn changing_filter_requeries_and_replaces_rows() {
    let api = Arc::new(ScriptedApi::new());
    api.push_list(Ok(vec![
        professional(1, "John Doe", Source::Direct),
        professional(2, "Jane Doe", Source::Partner),
    ]));
    api.push_list(Ok(vec![professional(2, "Jane Doe", Source::Partner)]));
    let mut view = ListView::new(Arc::clone(&api));
    view.refresh().await;

    let filter: SourceFilter = "partner".parse().unwrap();
    let outcome = view.change_filter(filter).await;

    assert_eq!(outcome, ApplyOutcome::Applied { rows: 1 });
    assert_eq!(
        api.list_queries(),
        vec![SourceFilter::All, SourceFilter::Only(Source::Partner)]
    );
    assert_eq!(view.filter(), SourceFilter::Only(Source::Partner));
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].source, Source::Partner);
}

#[tokio::test]
async fn same_filter_issues_no_query() {
    let api = Arc::new(ScriptedApi::new());
    let mut view = ListView::new(Arc::clone(&api));

    let outcome = view.change_filter(SourceFilter::All).await;

    assert_eq!(outcome, ApplyOutcome::Unchanged);
    assert!(api.list_queries().is_empty());
}

#[tokio::test]
async fn load_queries_once_for_new_or_current_filter() {
    let api = Arc::new(ScriptedApi::new());
    api.push_list(Ok(vec![professional(2, "Jane Doe", Source::Partner)]));
    let mut view = ListView::new(Arc::clone(&api));

    let outcome = view.load(SourceFilter::Only(Source::Partner)).await;

    assert_eq!(outcome, ApplyOutcome::Applied { rows: 1 });
    assert_eq!(api.list_queries(), vec![SourceFilter::Only(Source::Partner)]);

    let again = view.load(SourceFilter::Only(Source::Partner)).await;

    assert_eq!(again, ApplyOutcome::Applied { rows: 0 });
    assert_eq!(
        api.list_queries(),
        vec![
            SourceFilter::Only(Source::Partner),
            SourceFilter::Only(Source::Partner)
        ]
    );
}

#[test]
fn stale_response_after_filter_change_is_dropped() {
    let api = Arc::new(ScriptedApi::new());
    let mut view = ListView::new(api);

    let all = view.begin_query();
    let partner = view
        .set_filter(SourceFilter::Only(Source::Partner))
        .expect("filter changed");
    assert!(partner.seq() > all.seq());

    let applied = view.apply(
        partner,
        Ok(vec![professional(2, "Jane Doe", Source::Partner)]),
    );
    assert_eq!(applied, ApplyOutcome::Applied { rows: 1 });

    // The unfiltered response arrives late
    let late = view.apply(
        all,
        Ok(vec![
            professional(1, "John Doe", Source::Direct),
            professional(2, "Jane Doe", Source::Partner),
        ]),
    );

    assert_eq!(late, ApplyOutcome::Stale);
    assert_eq!(view.records().len(), 1);
    assert_eq!(view.records()[0].full_name, "Jane Doe");
}

#[tokio::test]
async fn failed_query_keeps_previous_rows() {
    let api = Arc::new(ScriptedApi::new());
    api.push_list(Ok(vec![professional(1, "John Doe", Source::Direct)]));
    api.push_list(Err(ApiError::Http {
        status: 502,
        body: "Bad Gateway".into(),
    }));
    let mut view = ListView::new(Arc::clone(&api));
    view.refresh().await;

    let outcome = view.change_filter(SourceFilter::Only(Source::Internal)).await;

    assert_eq!(outcome, ApplyOutcome::Failed);
    assert_eq!(view.records().len(), 1);
    assert_eq!(
        view.last_error(),
        Some("Server responded with status 502: Bad Gateway")
    );
}

#[tokio::test]
async fn rows_can_be_iterated_again() {
    let api = Arc::new(ScriptedApi::new());
    api.push_list(Ok(vec![
        professional(1, "John Doe", Source::Direct),
        professional(3, "Ann Lee", Source::Internal),
    ]));
    let mut view = ListView::new(Arc::clone(&api));
    view.refresh().await;

    let first: Vec<i64> = view.rows().map(|row| row.id).collect();
    let second: Vec<i64> = view.rows().map(|row| row.id).collect();

    assert_eq!(first, vec![1, 3]);
    assert_eq!(first, second);
    assert_eq!(
        view.rows().last().map(|row| row.cells()),
        Some([
            "Ann Lee",
            "ann.lee@example.com",
            "5550000003",
            "Example Corp",
            "",
            "internal"
        ])
    );
}
