// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use fiscaliza_app::{
    Alert, AlertCategory, AlertId, AlertStatus, AlertType, Case, CaseId, CasePriority,
    CaseStatus, CompanySize, Contributor, ContributorId, ContributorStatus, Report, ReportId,
    ReportStatus, ReportType, RiskLevel,
};
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration, PrimitiveDateTime, Time};

const REFERENCE_DATE: Date = date!(2024 - 01 - 01);

const CASE_TYPES: [&str; 6] = ["Renta", "IGV", "Drawback", "ISC", "Aduanas", "Retenciones"];

const SECTORS: [&str; 10] = [
    "Manufactura",
    "Comercio",
    "Tecnología",
    "Agricultura",
    "Construcción",
    "Minería",
    "Pesca",
    "Transporte",
    "Turismo",
    "Servicios",
];

const COMPANY_PREFIXES: [&str; 10] = [
    "Corporación",
    "Distribuidora",
    "Inversiones",
    "Exportadora",
    "Constructora",
    "Importaciones",
    "Servicios",
    "Comercializadora",
    "Minera",
    "Textil",
];

const COMPANY_NAMES: [&str; 12] = [
    "Andina",
    "del Norte",
    "del Sur",
    "del Centro",
    "Lima",
    "Pacífico",
    "Amazónica",
    "Global",
    "Megaproyectos",
    "Express",
    "Digital",
    "Internacional",
];

const LEGAL_FORMS: [&str; 5] = ["SAC", "SA", "SAA", "EIRL", "SRL"];

const FIRST_NAMES: [&str; 12] = [
    "María", "Carlos", "Ana", "Roberto", "Pedro", "Lucía", "Jorge", "Carmen", "Luis", "Rosa",
    "Miguel", "Elena",
];

const LAST_NAMES: [&str; 12] = [
    "González", "Méndez", "Torres", "Silva", "Ramírez", "Huamán", "Flores", "Quispe", "Rojas",
    "Vargas", "Castillo", "Paredes",
];

const DISTRICTS: [&str; 10] = [
    "Los Olivos",
    "La Victoria",
    "Surco",
    "Lurín",
    "San Isidro",
    "Miraflores",
    "Ate",
    "Callao",
    "San Borja",
    "Chorrillos",
];

const ALERT_SOURCES: [&str; 6] = [
    "IA Analítica",
    "Sistema Automático",
    "Motor de Reglas",
    "Sistema de Registro",
    "Validador de Comprobantes",
    "Sistema de Cobranzas",
];

const ALERT_SUBJECTS: [&str; 10] = [
    "drawback",
    "crédito fiscal",
    "gastos deducibles",
    "libros electrónicos",
    "facturas electrónicas",
    "fraccionamiento",
    "declaración anual",
    "proveedores de alto riesgo",
    "domicilio fiscal",
    "retenciones",
];

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of realistic fiscalization records.
#[derive(Debug, Clone)]
pub struct RecordFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl RecordFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn ruc(&mut self) -> String {
        let prefix = if self.rng.bool() { "20" } else { "10" };
        format!("{prefix}{:09}", self.int_range_i64(0, 999_999_999))
    }

    pub fn company(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(&COMPANY_PREFIXES),
            self.pick(&COMPANY_NAMES),
            self.pick(&LEGAL_FORMS)
        )
    }

    pub fn person(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    pub fn case(&mut self, id: i64) -> Case {
        let status = self.pick_copy(CaseStatus::ALL);
        let open_date = self.date_within(365);
        let close_date = (status == CaseStatus::Cerrado)
            .then(|| open_date + Duration::days(self.int_range_i64(1, 180)));

        Case {
            id: CaseId::new(id),
            number: format!("FIS-2024-{:06}", self.int_range_i64(1, 999_999)),
            company: self.company(),
            ruc: self.ruc(),
            case_type: self.pick(&CASE_TYPES).to_owned(),
            status,
            priority: self.pick_copy(CasePriority::ALL),
            auditor: self.person(),
            open_date,
            close_date,
            amount: self.int_range_i64(10_000, 6_000_000),
            description: format!("Revisión de {}", self.pick(&ALERT_SUBJECTS)),
            findings: self.int_range_i64(0, 15) as u32,
            activities: Vec::new(),
        }
    }

    pub fn contributor(&mut self, id: i64) -> Contributor {
        let risk_score = self.int_range_i64(0, 100) as u8;
        let risk_level = match risk_score {
            0..=39 => RiskLevel::Bajo,
            40..=69 => RiskLevel::Medio,
            70..=89 => RiskLevel::Alto,
            _ => RiskLevel::Critico,
        };
        let company_name = self.company();
        let trade_name = company_name
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(" ");
        let registration_date = self.date_within(365) - Duration::days(365 * 10);
        let monthly_avg_revenue = self.int_range_i64(50_000, 5_000_000);

        Contributor {
            id: ContributorId::new(id),
            ruc: self.ruc(),
            company_name,
            trade_name,
            legal_rep: self.person(),
            sector: self.pick(&SECTORS).to_owned(),
            size: self.pick_copy(CompanySize::ALL),
            risk_level,
            risk_score,
            status: self.pick_copy(ContributorStatus::ALL),
            address: format!("Av. {} {}", self.pick(&LAST_NAMES), self.int_range_i64(100, 9999)),
            district: self.pick(&DISTRICTS).to_owned(),
            phone: format!(
                "(01) {:03}-{:04}",
                self.int_range_i64(200, 799),
                self.int_range_i64(0, 9999)
            ),
            email: format!("contacto{id}@empresa.pe"),
            registration_date,
            last_declaration: self.date_within(60),
            monthly_avg_revenue,
            total_taxes: monthly_avg_revenue * self.int_range_i64(1, 8),
            open_cases: self.int_range_i64(0, 3) as u32,
            historical_cases: self.int_range_i64(0, 10) as u32,
            compliance_rate: self.int_range_i64(30, 100) as u8,
            flags: Vec::new(),
        }
    }

    pub fn alert(&mut self, id: i64) -> Alert {
        let category = self.pick_copy(AlertCategory::ALL);
        let with_contributor = category != AlertCategory::Sistema || self.rng.bool();
        let contributor = with_contributor.then(|| self.company());
        let ruc = with_contributor.then(|| self.ruc());
        let amount = self.rng.bool().then(|| self.int_range_i64(10_000, 6_000_000));
        let status = self.pick_copy(AlertStatus::ALL);
        let assigned_to = (status != AlertStatus::Nueva).then(|| self.person());

        Alert {
            id: AlertId::new(id),
            alert_type: self.pick_copy(AlertType::ALL),
            category,
            title: format!(
                "Alerta de {} en {}",
                category.label().to_lowercase(),
                self.pick(&ALERT_SUBJECTS)
            ),
            description: format!("Detectado por {}", self.pick(&ALERT_SOURCES)),
            contributor,
            ruc,
            amount,
            date: self.datetime_within(60),
            status,
            priority: self.int_range_i64(0, 100) as u8,
            assigned_to,
            source: self.pick(&ALERT_SOURCES).to_owned(),
        }
    }

    pub fn report(&mut self, id: i64) -> Report {
        let report_type = self.pick_copy(ReportType::ALL);
        let period = format!("{} 2024", self.pick(&MONTHS));
        Report {
            id: ReportId::new(id),
            name: format!("Informe {} de Fiscalización - {period}", report_type.label()),
            report_type,
            period,
            generated_date: self.date_within(365),
            generated_by: self.person(),
            size_label: format!("{}.{} MB", self.int_range_i64(1, 9), self.int_n(10)),
            status: self.pick_copy(ReportStatus::ALL),
        }
    }

    pub fn cases(&mut self, count: usize) -> Vec<Case> {
        (1..=count as i64).map(|id| self.case(id)).collect()
    }

    pub fn contributors(&mut self, count: usize) -> Vec<Contributor> {
        (1..=count as i64).map(|id| self.contributor(id)).collect()
    }

    pub fn alerts(&mut self, count: usize) -> Vec<Alert> {
        (1..=count as i64).map(|id| self.alert(id)).collect()
    }

    pub fn reports(&mut self, count: usize) -> Vec<Report> {
        (1..=count as i64).map(|id| self.report(id)).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn pick_copy<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i64(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn date_within(&mut self, days: i64) -> Date {
        REFERENCE_DATE + Duration::days(self.int_range_i64(0, days))
    }

    fn datetime_within(&mut self, days: i64) -> PrimitiveDateTime {
        let date = self.date_within(days);
        let time = Time::MIDNIGHT + Duration::minutes(self.int_range_i64(0, 24 * 60 - 1));
        PrimitiveDateTime::new(date, time)
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("fiscaliza.db");
    Ok((dir, db_path))
}

pub fn sectors() -> &'static [&'static str] {
    &SECTORS
}

pub fn case_types() -> &'static [&'static str] {
    &CASE_TYPES
}

#[cfg(test)]
mod tests {
    use super::{RecordFaker, case_types, sectors};
    use fiscaliza_app::{AlertCategory, CaseStatus, RiskLevel};
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = RecordFaker::new(42);
        let mut right = RecordFaker::new(42);
        assert_eq!(left.contributors(5), right.contributors(5));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(RecordFaker::new(0).seed(), 1);
    }

    #[test]
    fn ruc_is_eleven_digits() {
        let mut faker = RecordFaker::new(7);
        for _ in 0..50 {
            let ruc = faker.ruc();
            assert_eq!(ruc.len(), 11, "{ruc}");
            assert!(ruc.chars().all(|c| c.is_ascii_digit()), "{ruc}");
        }
    }

    #[test]
    fn closed_cases_have_a_later_close_date() {
        let mut found_closed = false;
        for seed in 0_u64..50_u64 {
            let mut faker = RecordFaker::new(seed);
            for case in faker.cases(4) {
                assert!(case_types().contains(&case.case_type.as_str()));
                match case.close_date {
                    Some(close_date) => {
                        found_closed = true;
                        assert_eq!(case.status, CaseStatus::Cerrado);
                        assert!(close_date > case.open_date);
                    }
                    None => assert_ne!(case.status, CaseStatus::Cerrado),
                }
            }
        }
        assert!(found_closed);
    }

    #[test]
    fn contributor_risk_level_tracks_score() {
        let mut faker = RecordFaker::new(11);
        for contributor in faker.contributors(40) {
            assert!(contributor.risk_score <= 100);
            assert!(sectors().contains(&contributor.sector.as_str()));
            if contributor.risk_score >= 90 {
                assert_eq!(contributor.risk_level, RiskLevel::Critico);
            }
        }
    }

    #[test]
    fn alerts_outside_system_category_name_a_contributor() {
        let mut faker = RecordFaker::new(5);
        for alert in faker.alerts(60) {
            assert!(alert.priority <= 100);
            assert_eq!(alert.contributor.is_some(), alert.ruc.is_some());
            if alert.category != AlertCategory::Sistema {
                assert!(alert.contributor.is_some());
            }
        }
    }

    #[test]
    fn variety_across_seeds() {
        let companies: BTreeSet<String> = (0_u64..20_u64)
            .map(|seed| RecordFaker::new(seed).company())
            .collect();
        assert!(companies.len() > 5);
    }

    #[test]
    fn ids_are_sequential() {
        let mut faker = RecordFaker::new(3);
        let ids: Vec<i64> = faker.reports(4).iter().map(|report| report.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
