// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::ids::*;

category! {
    CaseStatus {
        Abierto => "abierto", "Abierto";
        EnProceso => "en-proceso", "En Proceso";
        Cerrado => "cerrado", "Cerrado";
        Suspendido => "suspendido", "Suspendido";
    }
}

category! {
    CasePriority {
        Alta => "alta", "Alta";
        Media => "media", "Media";
        Baja => "baja", "Baja";
    }
}

category! {
    CompanySize {
        Micro => "micro", "Micro";
        Pequena => "pequeña", "Pequeña";
        Mediana => "mediana", "Mediana";
        Grande => "grande", "Grande";
    }
}

category! {
    RiskLevel {
        Bajo => "bajo", "Bajo";
        Medio => "medio", "Medio";
        Alto => "alto", "Alto";
        Critico => "crítico", "Crítico";
    }
}

impl RiskLevel {
    pub const fn is_high(self) -> bool {
        matches!(self, Self::Alto | Self::Critico)
    }
}

category! {
    ContributorStatus {
        Activo => "activo", "Activo";
        Suspendido => "suspendido", "Suspendido";
        Baja => "baja", "Baja";
    }
}

category! {
    AlertType {
        Critica => "crítica", "Crítica";
        Alta => "alta", "Alta";
        Media => "media", "Media";
        Baja => "baja", "Baja";
        Informativa => "informativa", "Informativa";
    }
}

category! {
    AlertCategory {
        Fraude => "fraude", "Fraude";
        Incumplimiento => "incumplimiento", "Incumplimiento";
        Anomalia => "anomalía", "Anomalía";
        Vencimiento => "vencimiento", "Vencimiento";
        Sistema => "sistema", "Sistema";
    }
}

category! {
    AlertStatus {
        Nueva => "nueva", "Nueva";
        Revisada => "revisada", "Revisada";
        EnProceso => "en-proceso", "En Proceso";
        Resuelta => "resuelta", "Resuelta";
        Descartada => "descartada", "Descartada";
    }
}

category! {
    ReportType {
        Mensual => "Mensual", "Mensual";
        Trimestral => "Trimestral", "Trimestral";
        Especial => "Especial", "Especial";
        Anual => "Anual", "Anual";
    }
}

category! {
    ReportStatus {
        Completed => "completed", "Completado";
        Pending => "pending", "Pendiente";
        Failed => "failed", "Fallido";
    }
}

category! {
    /// Top-level screens. The wire value doubles as the `defaultPage` setting.
    ViewKind {
        Dashboard => "dashboard", "Dashboard Principal";
        Cases => "casos", "Casos";
        Contributors => "contribuyentes", "Contribuyentes";
        Alerts => "alertas", "Alertas";
        Reports => "reportes", "Reportes";
        AiAnalytics => "ia-analytics", "IA Analítica";
        Settings => "settings", "Configuración";
    }
}

impl ViewKind {
    /// Views a user may pick as their landing page.
    pub const fn is_landing(self) -> bool {
        !matches!(self, Self::Settings)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub date: Date,
    pub user: String,
    pub action: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub number: String,
    pub company: String,
    pub ruc: String,
    pub case_type: String,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub auditor: String,
    pub open_date: Date,
    pub close_date: Option<Date>,
    pub amount: i64,
    pub description: String,
    pub findings: u32,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
    pub ruc: String,
    pub company_name: String,
    pub trade_name: String,
    pub legal_rep: String,
    pub sector: String,
    pub size: CompanySize,
    pub risk_level: RiskLevel,
    pub risk_score: u8,
    pub status: ContributorStatus,
    pub address: String,
    pub district: String,
    pub phone: String,
    pub email: String,
    pub registration_date: Date,
    pub last_declaration: Date,
    pub monthly_avg_revenue: i64,
    pub total_taxes: i64,
    pub open_cases: u32,
    pub historical_cases: u32,
    pub compliance_rate: u8,
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub alert_type: AlertType,
    pub category: AlertCategory,
    pub title: String,
    pub description: String,
    pub contributor: Option<String>,
    pub ruc: Option<String>,
    pub amount: Option<i64>,
    pub date: PrimitiveDateTime,
    pub status: AlertStatus,
    pub priority: u8,
    pub assigned_to: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub name: String,
    pub report_type: ReportType,
    pub period: String,
    pub generated_date: Date,
    pub generated_by: String,
    pub size_label: String,
    pub status: ReportStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub code: String,
    pub name: String,
    pub role: String,
}
