// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use fiscaliza_app::filter::{FieldKey, Stats, stats_of};
use fiscaliza_app::{
    Alert, AlertAction, AlertId, AlertSummary, AlertsView, AppCommand, AppState, Case, CasesView,
    Contributor, ContributorField, ContributorSummary, ContributorsView, DashboardSummary, Notice,
    ProfileDefaults, Report, ReportsView, Rgb, SettingKey, ViewKind, demo,
};
use fiscaliza_store::{KeyValueStorage, SettingsStore, StorageWarning};
use std::fmt::Write as _;
use tracing::debug;

/// The collections the dashboard screens list.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub cases: Vec<Case>,
    pub contributors: Vec<Contributor>,
    pub alerts: Vec<Alert>,
    pub reports: Vec<Report>,
}

impl Records {
    pub fn demo() -> Self {
        Self {
            cases: demo::cases(),
            contributors: demo::contributors(),
            alerts: demo::alerts(),
            reports: demo::reports(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    pub view: Option<ViewKind>,
    pub search: Option<String>,
    pub filters: Vec<String>,
    pub tab: Option<String>,
}

impl ViewRequest {
    pub fn narrows(&self) -> bool {
        self.search.is_some() || !self.filters.is_empty() || self.tab.is_some()
    }
}

pub struct Session<S: KeyValueStorage> {
    settings: SettingsStore<S>,
    state: AppState,
    records: Records,
}

impl<S: KeyValueStorage> Session<S> {
    /// Opens the signed-in user's settings. `fallback_view` is used only
    /// when no landing page was ever saved.
    pub fn open(storage: S, records: Records, fallback_view: Option<ViewKind>) -> Self {
        let profile = ProfileDefaults::for_user(&demo::current_user());
        let mut settings = SettingsStore::open(storage, profile);
        settings.subscribe(|palette| {
            debug!(
                accent = %palette.base,
                dark = %palette.dark,
                light = %palette.light,
                "accent palette changed"
            );
        });

        let mut state = AppState::from_settings(settings.settings());
        if settings.stored_landing_page().is_none()
            && let Some(view) = fallback_view
        {
            state.dispatch(AppCommand::ShowView(view));
        }

        Self {
            settings,
            state,
            records,
        }
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.state.notices.iter()
    }

    pub fn reset_settings(&mut self) {
        let outcome = self.settings.reset();
        self.report(outcome, "Configuración restablecida");
    }

    pub fn set_accent(&mut self, raw: &str) -> Result<()> {
        let color = Rgb::parse_hex(raw)?;
        let outcome = self.settings.set_accent_color(color);
        self.report(outcome, "Color de acento actualizado");
        Ok(())
    }

    /// Applies `key=value` to one setting and saves the result.
    pub fn set_setting(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("--set expects <key>=<value>, got {raw:?}"))?;
        let key = SettingKey::parse(key.trim()).ok_or_else(|| {
            anyhow!(
                "unknown setting {:?}; expected one of {}",
                key.trim(),
                SettingKey::values().join(", ")
            )
        })?;
        let warning = self
            .settings
            .update(key, value)
            .with_context(|| format!("update setting `{}`", key.as_str()))?;
        let outcome = match warning {
            Some(warning) => Err(warning),
            None => Ok(()),
        };
        self.report(outcome, "Configuración guardada");
        Ok(())
    }

    /// Runs `<alert id>:<action>` against a listed alert.
    pub fn alert_action(&mut self, raw: &str) -> Result<()> {
        let (id, action) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("--alert-action expects <id>:<action>, got {raw:?}"))?;
        let id: i64 = id
            .trim()
            .parse()
            .with_context(|| format!("alert id {:?} is not a number", id.trim()))?;
        let action = AlertAction::parse(action.trim()).ok_or_else(|| {
            anyhow!(
                "unknown alert action {:?}; expected one of {}",
                action.trim(),
                AlertAction::values().join(", ")
            )
        })?;
        let alert = AlertId::new(id);
        if !self.records.alerts.iter().any(|row| row.id == alert) {
            bail!("no alert with id {id}; run with --view alertas to list them");
        }
        self.state.dispatch(AppCommand::AlertAction { alert, action });
        Ok(())
    }

    pub fn render_view(&mut self, request: &ViewRequest) -> Result<String> {
        let view = request.view.unwrap_or(self.state.current_view);
        self.state.dispatch(AppCommand::ShowView(view));

        if request.tab.is_some() && view != ViewKind::Alerts {
            bail!("--tab only applies to --view alertas");
        }
        let lists_rows = matches!(
            view,
            ViewKind::Cases | ViewKind::Contributors | ViewKind::Alerts | ViewKind::Reports
        );
        if !lists_rows && (request.search.is_some() || !request.filters.is_empty()) {
            bail!(
                "view `{}` has no list to search or filter; pick casos, contribuyentes, alertas, or reportes",
                view.as_str()
            );
        }

        let mut out = String::new();
        match view {
            ViewKind::Dashboard => self.render_dashboard(&mut out),
            ViewKind::Cases => self.render_cases(request, &mut out)?,
            ViewKind::Contributors => self.render_contributors(request, &mut out)?,
            ViewKind::Alerts => self.render_alerts(request, &mut out)?,
            ViewKind::Reports => self.render_reports(request, &mut out)?,
            ViewKind::AiAnalytics => self.render_analytics(&mut out),
            ViewKind::Settings => out.push_str(&self.render_settings()),
        }
        Ok(out)
    }

    pub fn render_settings(&self) -> String {
        let settings = self.settings.settings();
        let mut out = String::new();
        for key in SettingKey::ALL {
            let _ = writeln!(
                out,
                "{:<20} {}",
                key.as_str(),
                settings.get(*key).display()
            );
        }
        for (name, value) in self.settings.palette().css_variables() {
            let _ = writeln!(out, "{name:<20} {value}");
        }
        out
    }

    fn render_dashboard(&self, out: &mut String) {
        let records = &self.records;
        let summary =
            DashboardSummary::of(&records.cases, &records.contributors, &records.alerts);
        let _ = writeln!(out, "{}", ViewKind::Dashboard.label());
        let _ = writeln!(out, "  casos abiertos        {}", summary.open_cases);
        let _ = writeln!(
            out,
            "  contribuyentes riesgo {}",
            summary.high_risk_contributors
        );
        let _ = writeln!(out, "  alertas nuevas        {}", summary.new_alerts);
        let _ = writeln!(out, "  alertas críticas      {}", summary.critical_alerts);
        let _ = writeln!(
            out,
            "  monto en revisión     {}",
            format_soles(summary.amount_under_review)
        );
    }

    fn render_cases(&self, request: &ViewRequest, out: &mut String) -> Result<()> {
        let mut view = CasesView::default();
        narrow(&mut view.search, request);
        for filter in &request.filters {
            view.set_filter(filter)?;
        }
        let result = view.apply(&self.records.cases);
        let _ = writeln!(out, "Casos: {} de {}", result.len(), result.total());
        for case in &result.rows {
            let _ = writeln!(
                out,
                "  {:<16} {:<36} {:<11} {:<6} {:>16}",
                case.number,
                case.company,
                case.status.as_str(),
                case.priority.as_str(),
                format_soles(case.amount)
            );
        }
        write_stats(out, &result.stats);
        Ok(())
    }

    fn render_contributors(&self, request: &ViewRequest, out: &mut String) -> Result<()> {
        let mut view = ContributorsView::default();
        narrow(&mut view.search, request);
        for filter in &request.filters {
            view.set_filter(filter)?;
        }
        let result = view.apply(&self.records.contributors);
        let _ = writeln!(out, "Contribuyentes: {} de {}", result.len(), result.total());
        for contributor in &result.rows {
            let _ = writeln!(
                out,
                "  {:<12} {:<36} {:<8} {:>3} {:<10} {}",
                contributor.ruc,
                contributor.company_name,
                contributor.risk_level.as_str(),
                contributor.risk_score,
                contributor.status.as_str(),
                contributor.sector
            );
        }
        let summary = ContributorSummary::of(&self.records.contributors);
        let _ = writeln!(
            out,
            "  activos {} · riesgo alto {} · con casos abiertos {}",
            summary.active, summary.high_risk, summary.with_open_cases
        );
        write_stats(out, &result.stats);
        Ok(())
    }

    fn render_alerts(&self, request: &ViewRequest, out: &mut String) -> Result<()> {
        let mut view = AlertsView::default();
        narrow(&mut view.list.search, request);
        for filter in &request.filters {
            view.list.set_filter(filter)?;
        }
        if let Some(tab) = &request.tab {
            view.set_tab(tab)?;
        }
        let result = view.apply(&self.records.alerts);
        let _ = writeln!(
            out,
            "Alertas ({}): {} de {}",
            view.tab.label(),
            result.len(),
            result.total()
        );
        for alert in &result.rows {
            let _ = writeln!(
                out,
                "  #{:<3} {:>3} {:<10} {:<10} {} {}",
                alert.id.get(),
                alert.priority,
                alert.alert_type.as_str(),
                alert.status.as_str(),
                alert.date.date(),
                alert.title
            );
        }
        let summary = AlertSummary::of(&self.records.alerts);
        let _ = writeln!(
            out,
            "  nuevas {} · en proceso {} · críticas {}",
            summary.new, summary.in_progress, summary.critical
        );
        write_stats(out, &result.stats);
        Ok(())
    }

    fn render_reports(&self, request: &ViewRequest, out: &mut String) -> Result<()> {
        let mut view = ReportsView::default();
        narrow(&mut view.search, request);
        for filter in &request.filters {
            view.set_filter(filter)?;
        }
        let result = view.apply(&self.records.reports);
        let _ = writeln!(out, "Reportes: {} de {}", result.len(), result.total());
        for report in &result.rows {
            let _ = writeln!(
                out,
                "  {} {:<44} {:<12} {:<10} {}",
                report.generated_date,
                report.name,
                report.report_type.as_str(),
                report.status.as_str(),
                report.size_label
            );
        }
        write_stats(out, &result.stats);
        Ok(())
    }

    fn render_analytics(&self, out: &mut String) {
        let stats = stats_of(&self.records.contributors);
        let _ = writeln!(out, "{}", ViewKind::AiAnalytics.label());
        if let Some(risk) = stats.field(ContributorField::Risk) {
            for (level, count) in &risk.counts {
                let share = percent(*count, stats.total);
                let _ = writeln!(out, "  riesgo {level:<8} {count:>3} ({share}%)");
            }
        }
        let threshold = self.settings.settings().risk_threshold.get();
        let flagged = self
            .records
            .contributors
            .iter()
            .filter(|contributor| u16::from(contributor.risk_score) >= threshold)
            .count();
        let _ = writeln!(out, "  sobre umbral {threshold:>3}  {flagged:>3}");
    }

    fn report(&mut self, outcome: Result<(), StorageWarning>, title: &str) {
        let notice = match outcome {
            Ok(()) => Notice::success(title),
            Err(warning) => Notice::warning(title).with_description(warning.to_string()),
        };
        self.state.dispatch(AppCommand::Notify(notice));
    }
}

fn narrow(search: &mut String, request: &ViewRequest) {
    if let Some(raw) = &request.search {
        search.clone_from(raw);
    }
}

fn write_stats<F: FieldKey>(out: &mut String, stats: &Stats<F>) {
    for field in &stats.fields {
        let counts: Vec<String> = field
            .counts
            .iter()
            .map(|(value, count)| format!("{value}={count}"))
            .collect();
        let _ = writeln!(out, "  {}: {}", field.field.name(), counts.join(" "));
    }
}

fn percent(count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (count * 100 + total / 2) / total
}

/// Whole soles with thousands separators, e.g. `S/ 2,450,000`.
pub fn format_soles(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}S/ {out}")
}
