// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Filtering, searching and ordering over in-memory record collections.
//!
//! Every list view runs the same pipeline: equality predicates, a
//! case-insensitive substring search, optional tab predicates, then a
//! stable sort. Stats are always counted over the full collection so a
//! view can render "X of Y" next to the rows it shows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;
use time::{Date, PrimitiveDateTime};

/// Selection value meaning "no constraint".
pub const ALL: &str = "all";

/// Named field selector for a record type.
pub trait FieldKey: Copy + Eq + Debug + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
    fn parse(name: &str) -> Option<Self>;
}

pub trait Record {
    type Field: FieldKey;
    type SortField: FieldKey;

    /// Categorical fields reported in [`Stats`], in display order.
    const STAT_FIELDS: &'static [Self::Field];

    const DEFAULT_SORT: SortOrder<Self::SortField> = SortOrder::Insertion;

    /// Current value of a categorical field, `None` when the record lacks it.
    fn field_value(&self, field: Self::Field) -> Option<&str>;

    /// Every value a closed field can take. Empty for open sets such as
    /// free-form sectors, whose values are collected from the data instead.
    fn field_domain(field: Self::Field) -> &'static [&'static str];

    fn search_fields(&self) -> impl Iterator<Item = &str>;

    fn sort_value(&self, field: Self::SortField) -> Option<SortValue<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Equals(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        if raw == ALL {
            Self::All
        } else {
            Self::Equals(raw.to_owned())
        }
    }

    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Equals(expected) => value == Some(expected.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Equals(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches<'a>(&self, mut fields: impl Iterator<Item = &'a str>) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        fields.any(|field| field.to_lowercase().contains(&self.needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder<S> {
    Insertion,
    By { field: S, direction: SortDirection },
}

impl<S> SortOrder<S> {
    pub const fn desc(field: S) -> Self {
        Self::By {
            field,
            direction: SortDirection::Desc,
        }
    }

    pub const fn asc(field: S) -> Self {
        Self::By {
            field,
            direction: SortDirection::Asc,
        }
    }
}

/// Comparable projection of a record field. Values of different variants
/// order by variant, so a mixed column still sorts deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Number(i64),
    Date(Date),
    DateTime(PrimitiveDateTime),
    Text(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery<F, S> {
    pub filters: Vec<(F, Selection)>,
    pub search: SearchQuery,
    pub segment: Vec<(F, &'static str)>,
    pub sort: SortOrder<S>,
}

impl<F: FieldKey, S: FieldKey> ViewQuery<F, S> {
    pub fn new(sort: SortOrder<S>) -> Self {
        Self {
            filters: Vec::new(),
            search: SearchQuery::default(),
            segment: Vec::new(),
            sort,
        }
    }

    pub fn filter(mut self, field: F, selection: Selection) -> Self {
        self.filters.push((field, selection));
        self
    }

    pub fn search(mut self, raw: &str) -> Self {
        self.search = SearchQuery::new(raw);
        self
    }

    pub fn segment(mut self, field: F, value: &'static str) -> Self {
        self.segment.push((field, value));
        self
    }

    pub fn sort(mut self, sort: SortOrder<S>) -> Self {
        self.sort = sort;
        self
    }

    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: Record<Field = F, SortField = S>,
    {
        self.filters
            .iter()
            .all(|(field, selection)| selection.matches(record.field_value(*field)))
            && self
                .segment
                .iter()
                .all(|(field, value)| record.field_value(*field) == Some(*value))
            && self.search.matches(record.search_fields())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCounts<F> {
    pub field: F,
    pub counts: Vec<(String, usize)>,
}

impl<F> FieldCounts<F> {
    pub fn count(&self, value: &str) -> usize {
        self.counts
            .iter()
            .find(|(candidate, _)| candidate == value)
            .map_or(0, |(_, count)| *count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats<F> {
    pub total: usize,
    pub fields: Vec<FieldCounts<F>>,
}

impl<F: FieldKey> Stats<F> {
    pub fn field(&self, field: F) -> Option<&FieldCounts<F>> {
        self.fields.iter().find(|counts| counts.field == field)
    }

    pub fn count(&self, field: F, value: &str) -> usize {
        self.field(field).map_or(0, |counts| counts.count(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<'a, R: Record> {
    pub rows: Vec<&'a R>,
    pub stats: Stats<R::Field>,
}

impl<R: Record> ViewResult<'_, R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> usize {
        self.stats.total
    }
}

pub fn apply<'a, R: Record>(
    records: &'a [R],
    query: &ViewQuery<R::Field, R::SortField>,
) -> ViewResult<'a, R> {
    let mut rows: Vec<&R> = records
        .iter()
        .filter(|record| query.matches(*record))
        .collect();
    sort_rows(&mut rows, query.sort);
    ViewResult {
        rows,
        stats: stats_of(records),
    }
}

pub fn sorted<R: Record>(records: &[R], order: SortOrder<R::SortField>) -> Vec<&R> {
    let mut rows: Vec<&R> = records.iter().collect();
    sort_rows(&mut rows, order);
    rows
}

/// Stable sort; ties keep their incoming order. Missing values rank lowest.
pub fn sort_rows<R: Record>(rows: &mut [&R], order: SortOrder<R::SortField>) {
    let SortOrder::By { field, direction } = order else {
        return;
    };
    rows.sort_by(|left, right| {
        let ordering = compare_values(left.sort_value(field), right.sort_value(field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_values(left: Option<SortValue<'_>>, right: Option<SortValue<'_>>) -> Ordering {
    left.cmp(&right)
}

pub fn stats_of<R: Record>(records: &[R]) -> Stats<R::Field> {
    let mut fields: Vec<FieldCounts<R::Field>> = R::STAT_FIELDS
        .iter()
        .map(|field| FieldCounts {
            field: *field,
            counts: R::field_domain(*field)
                .iter()
                .map(|value| ((*value).to_owned(), 0))
                .collect(),
        })
        .collect();

    for record in records {
        for counts in &mut fields {
            let Some(value) = record.field_value(counts.field) else {
                continue;
            };
            match counts
                .counts
                .iter_mut()
                .find(|(candidate, _)| candidate == value)
            {
                Some((_, count)) => *count += 1,
                None => counts.counts.push((value.to_owned(), 1)),
            }
        }
    }

    Stats {
        total: records.len(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FieldKey, Record, Selection, SortOrder, SortValue, ViewQuery, apply, sorted, stats_of,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TicketField {
        Status,
        Team,
    }

    impl FieldKey for TicketField {
        const ALL: &'static [Self] = &[Self::Status, Self::Team];

        fn name(self) -> &'static str {
            match self {
                Self::Status => "status",
                Self::Team => "team",
            }
        }

        fn parse(name: &str) -> Option<Self> {
            match name {
                "status" => Some(Self::Status),
                "team" => Some(Self::Team),
                _ => None,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TicketSort {
        Score,
    }

    impl FieldKey for TicketSort {
        const ALL: &'static [Self] = &[Self::Score];

        fn name(self) -> &'static str {
            "score"
        }

        fn parse(name: &str) -> Option<Self> {
            (name == "score").then_some(Self::Score)
        }
    }

    #[derive(Debug)]
    struct Ticket {
        id: u32,
        status: &'static str,
        team: Option<&'static str>,
        title: &'static str,
        score: Option<i64>,
    }

    impl Record for Ticket {
        type Field = TicketField;
        type SortField = TicketSort;

        const STAT_FIELDS: &'static [TicketField] = &[TicketField::Status, TicketField::Team];

        fn field_value(&self, field: TicketField) -> Option<&str> {
            match field {
                TicketField::Status => Some(self.status),
                TicketField::Team => self.team,
            }
        }

        fn field_domain(field: TicketField) -> &'static [&'static str] {
            match field {
                TicketField::Status => &["open", "closed"],
                TicketField::Team => &[],
            }
        }

        fn search_fields(&self) -> impl Iterator<Item = &str> {
            [self.title].into_iter()
        }

        fn sort_value(&self, _field: TicketSort) -> Option<SortValue<'_>> {
            self.score.map(SortValue::Number)
        }
    }

    type TicketQuery = ViewQuery<TicketField, TicketSort>;

    fn tickets() -> Vec<Ticket> {
        vec![
            Ticket {
                id: 1,
                status: "open",
                team: Some("ops"),
                title: "Disk Full",
                score: Some(10),
            },
            Ticket {
                id: 2,
                status: "closed",
                team: None,
                title: "Login loop",
                score: None,
            },
            Ticket {
                id: 3,
                status: "open",
                team: Some("web"),
                title: "Slow DISK",
                score: Some(10),
            },
            Ticket {
                id: 4,
                status: "open",
                team: Some("ops"),
                title: "Cert expiry",
                score: Some(40),
            },
        ]
    }

    fn ids(rows: &[&Ticket]) -> Vec<u32> {
        rows.iter().map(|ticket| ticket.id).collect()
    }

    #[test]
    fn all_selection_passes_everything_in_insertion_order() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion)
            .filter(TicketField::Status, Selection::parse("all"));
        let result = apply(&records, &query);
        assert_eq!(ids(&result.rows), vec![1, 2, 3, 4]);
    }

    #[test]
    fn equality_filters_combine_with_and() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion)
            .filter(TicketField::Status, Selection::equals("open"))
            .filter(TicketField::Team, Selection::equals("ops"));
        assert_eq!(ids(&apply(&records, &query).rows), vec![1, 4]);
    }

    #[test]
    fn absent_field_never_equals_a_selection() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion)
            .filter(TicketField::Team, Selection::equals(""));
        assert!(apply(&records, &query).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion).search("disk");
        assert_eq!(ids(&apply(&records, &query).rows), vec![1, 3]);
    }

    #[test]
    fn descending_sort_is_stable_and_missing_values_go_last() {
        let records = tickets();
        let rows = sorted(&records, SortOrder::desc(TicketSort::Score));
        assert_eq!(ids(&rows), vec![4, 1, 3, 2]);

        let rows = sorted(&records, SortOrder::asc(TicketSort::Score));
        assert_eq!(ids(&rows), vec![2, 1, 3, 4]);
    }

    #[test]
    fn segment_predicates_apply_on_top_of_filters() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion).segment(TicketField::Status, "closed");
        assert_eq!(ids(&apply(&records, &query).rows), vec![2]);
    }

    #[test]
    fn stats_ignore_active_filters() {
        let records = tickets();
        let query = TicketQuery::new(SortOrder::Insertion).search("no such ticket");
        let result = apply(&records, &query);
        assert!(result.is_empty());
        assert_eq!(result.stats, stats_of(&records));
        assert_eq!(result.total(), 4);
        assert_eq!(result.stats.count(TicketField::Status, "open"), 3);
        assert_eq!(result.stats.count(TicketField::Team, "ops"), 2);
    }

    #[test]
    fn empty_collection_reports_zero_for_every_domain_value() {
        let records: Vec<Ticket> = Vec::new();
        let stats = stats_of(&records);
        assert_eq!(stats.total, 0);
        let status = stats
            .field(TicketField::Status)
            .expect("status counts present");
        assert_eq!(
            status.counts,
            vec![("open".to_owned(), 0), ("closed".to_owned(), 0)]
        );
        assert!(
            stats
                .field(TicketField::Team)
                .expect("team counts present")
                .counts
                .is_empty()
        );
    }

    #[test]
    fn field_keys_parse_by_name() {
        assert_eq!(TicketField::parse("team"), Some(TicketField::Team));
        assert_eq!(TicketField::Status.name(), "status");
        assert_eq!(TicketSort::parse("priority"), None);
    }
}
