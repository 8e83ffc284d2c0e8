// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::filter::{
    ALL, FieldKey, Record, Selection, SortOrder, SortValue, ViewQuery, ViewResult, apply,
};
use crate::forms::CaseEditInput;
use crate::{
    Alert, AlertCategory, AlertStatus, AlertType, Case, CaseId, CasePriority, CaseStatus,
    CompanySize, Contributor, ContributorStatus, Report, ReportStatus, ReportType, RiskLevel,
};

field_key! {
    CaseField {
        Status => "status",
        Priority => "priority",
        Type => "type",
        Auditor => "auditor",
    }
}

field_key! {
    CaseSort {
        OpenDate => "open_date",
        Amount => "amount",
        Findings => "findings",
    }
}

field_key! {
    ContributorField {
        Risk => "risk",
        Sector => "sector",
        Status => "status",
        Size => "size",
    }
}

field_key! {
    ContributorSort {
        RiskScore => "risk_score",
        ComplianceRate => "compliance_rate",
        TotalTaxes => "total_taxes",
        RegistrationDate => "registration_date",
    }
}

field_key! {
    AlertField {
        Type => "type",
        Status => "status",
        Category => "category",
    }
}

field_key! {
    AlertSort {
        Priority => "priority",
        Date => "date",
        Amount => "amount",
    }
}

field_key! {
    ReportField {
        Type => "type",
        Status => "status",
    }
}

field_key! {
    ReportSort {
        GeneratedDate => "generated_date",
        Name => "name",
    }
}

impl Record for Case {
    type Field = CaseField;
    type SortField = CaseSort;

    const STAT_FIELDS: &'static [CaseField] = &[CaseField::Status, CaseField::Priority];

    fn field_value(&self, field: CaseField) -> Option<&str> {
        Some(match field {
            CaseField::Status => self.status.as_str(),
            CaseField::Priority => self.priority.as_str(),
            CaseField::Type => &self.case_type,
            CaseField::Auditor => &self.auditor,
        })
    }

    fn field_domain(field: CaseField) -> &'static [&'static str] {
        match field {
            CaseField::Status => CaseStatus::values(),
            CaseField::Priority => CasePriority::values(),
            CaseField::Type | CaseField::Auditor => &[],
        }
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.company.as_str(),
            self.number.as_str(),
            self.ruc.as_str(),
        ]
        .into_iter()
    }

    fn sort_value(&self, field: CaseSort) -> Option<SortValue<'_>> {
        Some(match field {
            CaseSort::OpenDate => SortValue::Date(self.open_date),
            CaseSort::Amount => SortValue::Number(self.amount),
            CaseSort::Findings => SortValue::Number(i64::from(self.findings)),
        })
    }
}

impl Record for Contributor {
    type Field = ContributorField;
    type SortField = ContributorSort;

    const STAT_FIELDS: &'static [ContributorField] = &[
        ContributorField::Status,
        ContributorField::Risk,
        ContributorField::Size,
        ContributorField::Sector,
    ];

    fn field_value(&self, field: ContributorField) -> Option<&str> {
        Some(match field {
            ContributorField::Risk => self.risk_level.as_str(),
            ContributorField::Sector => &self.sector,
            ContributorField::Status => self.status.as_str(),
            ContributorField::Size => self.size.as_str(),
        })
    }

    fn field_domain(field: ContributorField) -> &'static [&'static str] {
        match field {
            ContributorField::Risk => RiskLevel::values(),
            ContributorField::Sector => &[],
            ContributorField::Status => ContributorStatus::values(),
            ContributorField::Size => CompanySize::values(),
        }
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.company_name.as_str(),
            self.ruc.as_str(),
            self.trade_name.as_str(),
        ]
        .into_iter()
    }

    fn sort_value(&self, field: ContributorSort) -> Option<SortValue<'_>> {
        Some(match field {
            ContributorSort::RiskScore => SortValue::Number(i64::from(self.risk_score)),
            ContributorSort::ComplianceRate => SortValue::Number(i64::from(self.compliance_rate)),
            ContributorSort::TotalTaxes => SortValue::Number(self.total_taxes),
            ContributorSort::RegistrationDate => SortValue::Date(self.registration_date),
        })
    }
}

impl Record for Alert {
    type Field = AlertField;
    type SortField = AlertSort;

    const STAT_FIELDS: &'static [AlertField] =
        &[AlertField::Status, AlertField::Type, AlertField::Category];

    const DEFAULT_SORT: SortOrder<AlertSort> = SortOrder::desc(AlertSort::Priority);

    fn field_value(&self, field: AlertField) -> Option<&str> {
        Some(match field {
            AlertField::Type => self.alert_type.as_str(),
            AlertField::Status => self.status.as_str(),
            AlertField::Category => self.category.as_str(),
        })
    }

    fn field_domain(field: AlertField) -> &'static [&'static str] {
        match field {
            AlertField::Type => AlertType::values(),
            AlertField::Status => AlertStatus::values(),
            AlertField::Category => AlertCategory::values(),
        }
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.title.as_str()),
            self.contributor.as_deref(),
            self.ruc.as_deref(),
        ]
        .into_iter()
        .flatten()
    }

    fn sort_value(&self, field: AlertSort) -> Option<SortValue<'_>> {
        match field {
            AlertSort::Priority => Some(SortValue::Number(i64::from(self.priority))),
            AlertSort::Date => Some(SortValue::DateTime(self.date)),
            AlertSort::Amount => self.amount.map(SortValue::Number),
        }
    }
}

impl Record for Report {
    type Field = ReportField;
    type SortField = ReportSort;

    const STAT_FIELDS: &'static [ReportField] = &[ReportField::Type, ReportField::Status];

    fn field_value(&self, field: ReportField) -> Option<&str> {
        Some(match field {
            ReportField::Type => self.report_type.as_str(),
            ReportField::Status => self.status.as_str(),
        })
    }

    fn field_domain(field: ReportField) -> &'static [&'static str] {
        match field {
            ReportField::Type => ReportType::values(),
            ReportField::Status => ReportStatus::values(),
        }
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        [
            self.name.as_str(),
            self.period.as_str(),
            self.generated_by.as_str(),
        ]
        .into_iter()
    }

    fn sort_value(&self, field: ReportSort) -> Option<SortValue<'_>> {
        Some(match field {
            ReportSort::GeneratedDate => SortValue::Date(self.generated_date),
            ReportSort::Name => SortValue::Text(&self.name),
        })
    }
}

/// Search box, dropdown selections and sort of one list screen.
#[derive(Debug, Clone)]
pub struct ListView<R: Record> {
    pub search: String,
    filters: Vec<(R::Field, Selection)>,
    pub sort: SortOrder<R::SortField>,
    record: PhantomData<fn() -> R>,
}

pub type CasesView = ListView<Case>;
pub type ContributorsView = ListView<Contributor>;
pub type ReportsView = ListView<Report>;

impl<R: Record> Default for ListView<R> {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            sort: R::DEFAULT_SORT,
            record: PhantomData,
        }
    }
}

impl<R: Record> ListView<R> {
    pub fn set_search(&mut self, raw: &str) {
        raw.clone_into(&mut self.search);
    }

    /// Sets a dropdown. Closed fields match their options case-insensitively,
    /// so `mensual` selects `Mensual` reports.
    pub fn select(&mut self, field: R::Field, raw: &str) {
        let selection = canonical_selection::<R>(field, raw);
        self.filters.retain(|(existing, _)| *existing != field);
        if !selection.is_all() {
            self.filters.push((field, selection));
        }
    }

    pub fn selection(&self, field: R::Field) -> Selection {
        self.filters
            .iter()
            .find(|(existing, _)| *existing == field)
            .map_or(Selection::All, |(_, selection)| selection.clone())
    }

    /// Applies a `field=value` pair as typed on the command line.
    pub fn set_filter(&mut self, raw: &str) -> Result<()> {
        let (field, value) = parse_filter::<R>(raw)?;
        self.select(field, &value);
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.filters.clear();
    }

    pub fn query(&self) -> ViewQuery<R::Field, R::SortField> {
        self.filters.iter().fold(
            ViewQuery::new(self.sort).search(&self.search),
            |query, (field, selection)| query.filter(*field, selection.clone()),
        )
    }

    pub fn apply<'a>(&self, records: &'a [R]) -> ViewResult<'a, R> {
        apply(records, &self.query())
    }
}

impl ListView<Case> {
    /// Merges an edit into the case with `id`. The only list mutation the
    /// dashboard performs; every other row action is a notice.
    pub fn apply_edit<'a>(
        cases: &'a mut [Case],
        id: CaseId,
        edit: &CaseEditInput,
    ) -> Result<&'a Case> {
        let case = cases
            .iter_mut()
            .find(|case| case.id == id)
            .with_context(|| format!("case {id} not found"))?;
        *case = edit.apply(case)?;
        Ok(case)
    }
}

fn canonical_selection<R: Record>(field: R::Field, raw: &str) -> Selection {
    if raw == ALL {
        return Selection::All;
    }
    let lowered = raw.to_lowercase();
    R::field_domain(field)
        .iter()
        .find(|value| value.to_lowercase() == lowered)
        .map_or_else(|| Selection::equals(raw), |value| Selection::equals(*value))
}

/// Parses `field=value`, rejecting unknown fields and values outside a
/// closed field's options.
pub fn parse_filter<R: Record>(raw: &str) -> Result<(R::Field, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("filter {raw:?} must look like field=value"))?;
    let name = name.trim();
    let value = value.trim();
    let field = R::Field::parse(name).ok_or_else(|| {
        let names: Vec<_> = R::Field::ALL.iter().map(|field| field.name()).collect();
        anyhow!(
            "unknown filter field {name:?}; expected one of {}",
            names.join(", ")
        )
    })?;

    let domain = R::field_domain(field);
    let lowered = value.to_lowercase();
    if value != ALL
        && !domain.is_empty()
        && !domain.iter().any(|option| option.to_lowercase() == lowered)
    {
        bail!(
            "filter field {name:?} has no option {value:?}; expected {ALL} or one of {}",
            domain.join(", ")
        );
    }
    Ok((field, value.to_owned()))
}

category! {
    /// Status tabs on the alerts screen.
    AlertTab {
        All => "all", "Todas";
        New => "nuevas", "Nuevas";
        InProgress => "proceso", "En Proceso";
        Resolved => "resueltas", "Resueltas";
    }
}

impl AlertTab {
    pub const fn status(self) -> Option<AlertStatus> {
        match self {
            Self::All => None,
            Self::New => Some(AlertStatus::Nueva),
            Self::InProgress => Some(AlertStatus::EnProceso),
            Self::Resolved => Some(AlertStatus::Resuelta),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlertsView {
    pub list: ListView<Alert>,
    pub tab: AlertTab,
}

impl Default for AlertsView {
    fn default() -> Self {
        Self {
            list: ListView::default(),
            tab: AlertTab::All,
        }
    }
}

impl AlertsView {
    pub fn set_tab(&mut self, raw: &str) -> Result<()> {
        self.tab = AlertTab::parse(raw).ok_or_else(|| {
            anyhow!(
                "unknown alerts tab {raw:?}; expected one of {}",
                AlertTab::values().join(", ")
            )
        })?;
        Ok(())
    }

    pub fn query(&self) -> ViewQuery<AlertField, AlertSort> {
        let query = self.list.query();
        match self.tab.status() {
            Some(status) => query.segment(AlertField::Status, status.as_str()),
            None => query,
        }
    }

    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> ViewResult<'a, Alert> {
        apply(alerts, &self.query())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContributorSummary {
    pub total: usize,
    pub active: usize,
    pub high_risk: usize,
    pub with_open_cases: usize,
}

impl ContributorSummary {
    pub fn of(contributors: &[Contributor]) -> Self {
        Self {
            total: contributors.len(),
            active: contributors
                .iter()
                .filter(|c| c.status == ContributorStatus::Activo)
                .count(),
            high_risk: contributors
                .iter()
                .filter(|c| c.risk_level.is_high())
                .count(),
            with_open_cases: contributors.iter().filter(|c| c.open_cases > 0).count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AlertSummary {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub critical: usize,
}

impl AlertSummary {
    pub fn of(alerts: &[Alert]) -> Self {
        let with_status = |status: AlertStatus| alerts.iter().filter(|a| a.status == status).count();
        Self {
            total: alerts.len(),
            new: with_status(AlertStatus::Nueva),
            in_progress: with_status(AlertStatus::EnProceso),
            critical: alerts
                .iter()
                .filter(|a| a.alert_type == AlertType::Critica)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    pub open_cases: usize,
    pub high_risk_contributors: usize,
    pub new_alerts: usize,
    pub critical_alerts: usize,
    /// Sum of `amount` over cases that are not closed.
    pub amount_under_review: i64,
}

impl DashboardSummary {
    pub fn of(cases: &[Case], contributors: &[Contributor], alerts: &[Alert]) -> Self {
        let alert_summary = AlertSummary::of(alerts);
        Self {
            open_cases: cases
                .iter()
                .filter(|case| matches!(case.status, CaseStatus::Abierto | CaseStatus::EnProceso))
                .count(),
            high_risk_contributors: ContributorSummary::of(contributors).high_risk,
            new_alerts: alert_summary.new,
            critical_alerts: alert_summary.critical,
            amount_under_review: cases
                .iter()
                .filter(|case| case.status != CaseStatus::Cerrado)
                .map(|case| case.amount)
                .sum(),
        }
    }
}
