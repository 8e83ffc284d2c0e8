// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Invariants of the list pipeline over generated collections.

use fiscaliza_app::filter::{Record, Selection, SortOrder, ViewQuery, apply, sorted, stats_of};
use fiscaliza_app::{
    Alert, AlertField, AlertSort, AlertStatus, AlertType, AlertsView, CaseField, CasesView,
    ContributorField, ContributorsView, demo,
};
use fiscaliza_testkit::RecordFaker;
use proptest::prelude::*;

fn alerts_strategy() -> impl Strategy<Value = Vec<Alert>> {
    (any::<u64>(), 0_usize..40).prop_map(|(seed, count)| RecordFaker::new(seed).alerts(count))
}

fn selection_strategy(values: &'static [&'static str]) -> impl Strategy<Value = String> {
    let mut options: Vec<String> = values.iter().map(|value| (*value).to_owned()).collect();
    options.push("all".to_owned());
    prop::sample::select(options)
}

fn search_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("fraude".to_owned()),
        Just("20".to_owned()),
        "[a-zA-Zñá ]{0,6}",
    ]
}

proptest! {
    #[test]
    fn filtering_never_grows_the_collection(
        alerts in alerts_strategy(),
        status in selection_strategy(AlertStatus::values()),
        alert_type in selection_strategy(AlertType::values()),
        search in search_strategy(),
    ) {
        let query = ViewQuery::new(SortOrder::desc(AlertSort::Priority))
            .filter(AlertField::Status, Selection::parse(&status))
            .filter(AlertField::Type, Selection::parse(&alert_type))
            .search(&search);
        let result = apply(&alerts, &query);

        prop_assert!(result.len() <= alerts.len());
        for alert in &result.rows {
            prop_assert!(query.matches(*alert));
        }

        let narrower = query.clone().filter(AlertField::Category, Selection::equals("fraude"));
        let narrowed = apply(&alerts, &narrower);
        prop_assert!(narrowed.len() <= result.len());
        for alert in &narrowed.rows {
            prop_assert!(result.rows.iter().any(|row| row.id == alert.id));
        }
    }
}

proptest! {
    #[test]
    fn stats_do_not_depend_on_the_query(
        alerts in alerts_strategy(),
        status in selection_strategy(AlertStatus::values()),
        search in search_strategy(),
    ) {
        let mut view = AlertsView::default();
        view.list.select(AlertField::Status, &status);
        view.list.set_search(&search);

        let result = view.apply(&alerts);
        prop_assert_eq!(&result.stats, &stats_of(&alerts));
        prop_assert_eq!(result.total(), alerts.len());

        let status_total: usize = result
            .stats
            .field(AlertField::Status)
            .map(|counts| counts.counts.iter().map(|(_, count)| *count).sum())
            .unwrap_or_default();
        prop_assert_eq!(status_total, alerts.len());
    }
}

proptest! {
    #[test]
    fn sorting_is_idempotent_and_stable(alerts in alerts_strategy()) {
        let order = SortOrder::desc(AlertSort::Priority);
        let once: Vec<Alert> = sorted(&alerts, order).into_iter().cloned().collect();
        let twice: Vec<Alert> = sorted(&once, order).into_iter().cloned().collect();
        prop_assert_eq!(&once, &twice);

        for pair in once.windows(2) {
            prop_assert!(pair[0].priority >= pair[1].priority);
            if pair[0].priority == pair[1].priority {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}

proptest! {
    #[test]
    fn all_selections_keep_every_case(seed in any::<u64>(), count in 0_usize..30) {
        let cases = RecordFaker::new(seed).cases(count);
        let mut view = CasesView::default();
        view.select(CaseField::Status, "all");
        view.select(CaseField::Priority, "all");

        let result = view.apply(&cases);
        let ids: Vec<_> = result.rows.iter().map(|case| case.id).collect();
        let expected: Vec<_> = cases.iter().map(|case| case.id).collect();
        prop_assert_eq!(ids, expected);
    }
}

proptest! {
    #[test]
    fn contributor_stats_list_every_risk_level(seed in any::<u64>(), count in 0_usize..30) {
        let contributors = RecordFaker::new(seed).contributors(count);
        let result = ContributorsView::default().apply(&contributors);
        let risk = result.stats.field(ContributorField::Risk);
        prop_assert!(risk.is_some());
        if let Some(risk) = risk {
            let listed: Vec<&str> = risk.counts.iter().map(|(value, _)| value.as_str()).collect();
            prop_assert_eq!(listed, vec!["bajo", "medio", "alto", "crítico"]);
        }
    }
}

fn sample_alert(id: i64, status: AlertStatus, priority: u8) -> Alert {
    let mut alert = demo::alerts()[0].clone();
    alert.id = id.into();
    alert.status = status;
    alert.priority = priority;
    alert
}

#[test]
fn new_status_filter_keeps_priority_order() {
    let alerts = vec![
        sample_alert(1, AlertStatus::Nueva, 95),
        sample_alert(2, AlertStatus::EnProceso, 85),
        sample_alert(3, AlertStatus::Nueva, 60),
    ];
    let mut view = AlertsView::default();
    view.list.select(AlertField::Status, "nueva");

    let result = view.apply(&alerts);
    let priorities: Vec<u8> = result.rows.iter().map(|alert| alert.priority).collect();
    assert_eq!(priorities, vec![95, 60]);
    assert_eq!(result.stats.count(AlertField::Status, "nueva"), 2);
    assert_eq!(result.stats.count(AlertField::Status, "en-proceso"), 1);
}

#[test]
fn search_matches_identifier_fields() {
    let alerts = demo::alerts();
    let mut view = AlertsView::default();
    view.list.set_search("2014");

    let result = view.apply(&alerts);
    assert!(!result.is_empty());
    for alert in &result.rows {
        let in_ruc = alert.ruc.as_deref().is_some_and(|ruc| ruc.contains("2014"));
        assert!(in_ruc || alert.title.contains("2014"));
    }
    let expected = alerts
        .iter()
        .filter(|alert| alert.search_fields().any(|field| field.contains("2014")))
        .count();
    assert_eq!(result.len(), expected);
}

#[test]
fn empty_collection_yields_zeroed_stats() {
    let alerts: Vec<Alert> = Vec::new();
    let result = AlertsView::default().apply(&alerts);
    assert!(result.is_empty());
    assert_eq!(result.total(), 0);
    assert_eq!(result.stats.count(AlertField::Type, "crítica"), 0);
    let listed = result
        .stats
        .field(AlertField::Type)
        .map_or(0, |counts| counts.counts.len());
    assert_eq!(listed, AlertType::ALL.len());
}
