// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Built-in sample collections shown when no real data source is wired up.

use time::Date;
use time::PrimitiveDateTime;
use time::macros::{date, datetime};

use crate::{
    Activity, ActivityId, Alert, AlertCategory, AlertId, AlertStatus, AlertType, Case, CaseId,
    CasePriority, CaseStatus, CompanySize, Contributor, ContributorId, ContributorStatus,
    CurrentUser, Report, ReportId, ReportStatus, ReportType, RiskLevel,
};

pub fn current_user() -> CurrentUser {
    CurrentUser {
        code: "FIS001".to_owned(),
        name: "María González".to_owned(),
        role: "Auditora Senior".to_owned(),
    }
}

fn activity(id: i64, date: Date, user: &str, action: &str, description: &str) -> Activity {
    Activity {
        id: ActivityId::new(id),
        date,
        user: user.to_owned(),
        action: action.to_owned(),
        description: description.to_owned(),
    }
}

#[allow(clippy::too_many_arguments)]
fn case(
    id: i64,
    number: &str,
    company: &str,
    ruc: &str,
    case_type: &str,
    status: CaseStatus,
    priority: CasePriority,
    auditor: &str,
    open_date: Date,
    close_date: Option<Date>,
    amount: i64,
    description: &str,
    findings: u32,
    activities: Vec<Activity>,
) -> Case {
    Case {
        id: CaseId::new(id),
        number: number.to_owned(),
        company: company.to_owned(),
        ruc: ruc.to_owned(),
        case_type: case_type.to_owned(),
        status,
        priority,
        auditor: auditor.to_owned(),
        open_date,
        close_date,
        amount,
        description: description.to_owned(),
        findings,
        activities,
    }
}

pub fn cases() -> Vec<Case> {
    vec![
        case(
            1,
            "FIS-2024-001234",
            "Corporación Industrial del Norte SAC",
            "20458796321",
            "Renta",
            CaseStatus::EnProceso,
            CasePriority::Alta,
            "María González",
            date!(2024 - 01 - 15),
            None,
            2_500_000,
            "Inconsistencias en declaración de gastos deducibles y posible evasión tributaria",
            8,
            vec![
                activity(
                    1,
                    date!(2024 - 01 - 15),
                    "María González",
                    "Apertura de caso",
                    "Caso abierto por detección de anomalías en declaración mensual",
                ),
                activity(
                    2,
                    date!(2024 - 01 - 20),
                    "María González",
                    "Requerimiento emitido",
                    "Solicitada documentación contable de los últimos 12 meses",
                ),
                activity(
                    3,
                    date!(2024 - 02 - 05),
                    "Pedro Ramírez",
                    "Documentación recibida",
                    "Contribuyente entregó 80% de documentación solicitada",
                ),
                activity(
                    4,
                    date!(2024 - 02 - 10),
                    "María González",
                    "Hallazgo registrado",
                    "Detectadas facturas por S/. 500,000 sin respaldo",
                ),
            ],
        ),
        case(
            2,
            "FIS-2024-001198",
            "Distribuidora Comercial Lima EIRL",
            "20123456789",
            "IGV",
            CaseStatus::Abierto,
            CasePriority::Media,
            "Carlos Méndez",
            date!(2024 - 02 - 01),
            None,
            850_000,
            "Posible uso indebido de crédito fiscal",
            3,
            vec![
                activity(
                    1,
                    date!(2024 - 02 - 01),
                    "Carlos Méndez",
                    "Apertura de caso",
                    "Alerta automática por patrones irregulares en crédito fiscal",
                ),
                activity(
                    2,
                    date!(2024 - 02 - 08),
                    "Carlos Méndez",
                    "Requerimiento emitido",
                    "Solicitud de comprobantes de pago y registro de compras",
                ),
            ],
        ),
        case(
            3,
            "FIS-2024-000987",
            "Inversiones Tecnológicas SAA",
            "20987654321",
            "Renta",
            CaseStatus::Cerrado,
            CasePriority::Baja,
            "Ana Torres",
            date!(2023 - 10 - 05),
            Some(date!(2024 - 01 - 20)),
            450_000,
            "Verificación de deducciones por depreciación",
            1,
            vec![
                activity(
                    1,
                    date!(2023 - 10 - 05),
                    "Ana Torres",
                    "Apertura de caso",
                    "Fiscalización de rutina",
                ),
                activity(
                    2,
                    date!(2023 - 11 - 15),
                    "Ana Torres",
                    "Documentación recibida",
                    "Contribuyente entregó toda la documentación",
                ),
                activity(
                    3,
                    date!(2024 - 01 - 10),
                    "Ana Torres",
                    "Hallazgo resuelto",
                    "Contribuyente regularizó observación",
                ),
                activity(
                    4,
                    date!(2024 - 01 - 20),
                    "Ana Torres",
                    "Caso cerrado",
                    "Cierre sin multas ni reparos",
                ),
            ],
        ),
        case(
            4,
            "FIS-2024-001456",
            "Exportadora Agrícola del Sur SA",
            "20741852963",
            "Drawback",
            CaseStatus::Suspendido,
            CasePriority::Alta,
            "Roberto Silva",
            date!(2024 - 01 - 25),
            None,
            3_200_000,
            "Investigación de posible fraude en solicitudes de devolución",
            12,
            vec![
                activity(
                    1,
                    date!(2024 - 01 - 25),
                    "Roberto Silva",
                    "Apertura de caso",
                    "Caso abierto por alerta de inteligencia tributaria",
                ),
                activity(
                    2,
                    date!(2024 - 02 - 01),
                    "Roberto Silva",
                    "Medida cautelar",
                    "Suspensión temporal de devoluciones",
                ),
                activity(
                    3,
                    date!(2024 - 02 - 15),
                    "Legal SUNAT",
                    "Caso suspendido",
                    "En espera de resolución judicial",
                ),
            ],
        ),
        case(
            5,
            "FIS-2024-001589",
            "Constructora Megaproyectos SAC",
            "20369258147",
            "Renta",
            CaseStatus::EnProceso,
            CasePriority::Media,
            "María González",
            date!(2024 - 02 - 10),
            None,
            1_800_000,
            "Revisión de contratos de construcción y centro de costos",
            5,
            vec![
                activity(
                    1,
                    date!(2024 - 02 - 10),
                    "María González",
                    "Apertura de caso",
                    "Fiscalización programada anual",
                ),
                activity(
                    2,
                    date!(2024 - 02 - 18),
                    "María González",
                    "Inspección realizada",
                    "Visita a obra en San Isidro",
                ),
            ],
        ),
    ]
}

struct ContributorSeed {
    id: i64,
    ruc: &'static str,
    company_name: &'static str,
    trade_name: &'static str,
    legal_rep: &'static str,
    sector: &'static str,
    size: CompanySize,
    risk_level: RiskLevel,
    risk_score: u8,
    status: ContributorStatus,
    address: &'static str,
    district: &'static str,
    phone: &'static str,
    email: &'static str,
    registration_date: Date,
    last_declaration: Date,
    monthly_avg_revenue: i64,
    total_taxes: i64,
    open_cases: u32,
    historical_cases: u32,
    compliance_rate: u8,
    flags: &'static [&'static str],
}

impl ContributorSeed {
    fn build(self) -> Contributor {
        Contributor {
            id: ContributorId::new(self.id),
            ruc: self.ruc.to_owned(),
            company_name: self.company_name.to_owned(),
            trade_name: self.trade_name.to_owned(),
            legal_rep: self.legal_rep.to_owned(),
            sector: self.sector.to_owned(),
            size: self.size,
            risk_level: self.risk_level,
            risk_score: self.risk_score,
            status: self.status,
            address: self.address.to_owned(),
            district: self.district.to_owned(),
            phone: self.phone.to_owned(),
            email: self.email.to_owned(),
            registration_date: self.registration_date,
            last_declaration: self.last_declaration,
            monthly_avg_revenue: self.monthly_avg_revenue,
            total_taxes: self.total_taxes,
            open_cases: self.open_cases,
            historical_cases: self.historical_cases,
            compliance_rate: self.compliance_rate,
            flags: self.flags.iter().map(|flag| (*flag).to_owned()).collect(),
        }
    }
}

pub fn contributors() -> Vec<Contributor> {
    [
        ContributorSeed {
            id: 1,
            ruc: "20458796321",
            company_name: "Corporación Industrial del Norte SAC",
            trade_name: "CINOR SAC",
            legal_rep: "Juan Carlos Mendoza Vera",
            sector: "Manufactura",
            size: CompanySize::Grande,
            risk_level: RiskLevel::Alto,
            risk_score: 78,
            status: ContributorStatus::Activo,
            address: "Av. Industrial 4567",
            district: "Los Olivos",
            phone: "(01) 485-7963",
            email: "contacto@cinor.pe",
            registration_date: date!(2015 - 03 - 15),
            last_declaration: date!(2024 - 02 - 10),
            monthly_avg_revenue: 2_500_000,
            total_taxes: 15_800_000,
            open_cases: 2,
            historical_cases: 5,
            compliance_rate: 65,
            flags: &[
                "Inconsistencias en gastos",
                "Retraso en pagos",
                "Crédito fiscal irregular",
            ],
        },
        ContributorSeed {
            id: 2,
            ruc: "20123456789",
            company_name: "Distribuidora Comercial Lima EIRL",
            trade_name: "Distrimax",
            legal_rep: "María Elena Sánchez Torres",
            sector: "Comercio",
            size: CompanySize::Mediana,
            risk_level: RiskLevel::Medio,
            risk_score: 52,
            status: ContributorStatus::Activo,
            address: "Jr. Comercio 234",
            district: "La Victoria",
            phone: "(01) 321-4567",
            email: "info@distrimax.pe",
            registration_date: date!(2018 - 07 - 22),
            last_declaration: date!(2024 - 02 - 15),
            monthly_avg_revenue: 850_000,
            total_taxes: 4_200_000,
            open_cases: 1,
            historical_cases: 2,
            compliance_rate: 85,
            flags: &["Uso de crédito fiscal a revisar"],
        },
        ContributorSeed {
            id: 3,
            ruc: "20987654321",
            company_name: "Inversiones Tecnológicas SAA",
            trade_name: "InverTech",
            legal_rep: "Roberto Silva Paredes",
            sector: "Tecnología",
            size: CompanySize::Mediana,
            risk_level: RiskLevel::Bajo,
            risk_score: 25,
            status: ContributorStatus::Activo,
            address: "Av. República de Panamá 5234",
            district: "Surco",
            phone: "(01) 612-8945",
            email: "contacto@invertech.pe",
            registration_date: date!(2019 - 11 - 08),
            last_declaration: date!(2024 - 02 - 12),
            monthly_avg_revenue: 1_200_000,
            total_taxes: 5_600_000,
            open_cases: 0,
            historical_cases: 1,
            compliance_rate: 98,
            flags: &[],
        },
        ContributorSeed {
            id: 4,
            ruc: "20741852963",
            company_name: "Exportadora Agrícola del Sur SA",
            trade_name: "Agrosur",
            legal_rep: "Carmen Rosa Huamán Díaz",
            sector: "Agricultura",
            size: CompanySize::Grande,
            risk_level: RiskLevel::Critico,
            risk_score: 92,
            status: ContributorStatus::Suspendido,
            address: "Carretera Panamericana Sur Km 45",
            district: "Lurín",
            phone: "(01) 574-8521",
            email: "exportaciones@agrosur.pe",
            registration_date: date!(2012 - 05 - 20),
            last_declaration: date!(2024 - 01 - 28),
            monthly_avg_revenue: 3_800_000,
            total_taxes: 22_400_000,
            open_cases: 3,
            historical_cases: 8,
            compliance_rate: 45,
            flags: &[
                "Fraude potencial en drawback",
                "Múltiples impagos",
                "Operaciones sospechosas",
                "Medida cautelar activa",
            ],
        },
        ContributorSeed {
            id: 5,
            ruc: "20369258147",
            company_name: "Constructora Megaproyectos SAC",
            trade_name: "Megaproyectos",
            legal_rep: "Luis Alberto Ramírez Flores",
            sector: "Construcción",
            size: CompanySize::Grande,
            risk_level: RiskLevel::Medio,
            risk_score: 58,
            status: ContributorStatus::Activo,
            address: "Av. Javier Prado Este 2356",
            district: "San Isidro",
            phone: "(01) 442-1578",
            email: "admin@megaproyectos.pe",
            registration_date: date!(2016 - 09 - 12),
            last_declaration: date!(2024 - 02 - 14),
            monthly_avg_revenue: 4_200_000,
            total_taxes: 18_900_000,
            open_cases: 1,
            historical_cases: 4,
            compliance_rate: 82,
            flags: &["Revisión de centros de costos", "Facturación irregular"],
        },
    ]
    .into_iter()
    .map(ContributorSeed::build)
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn alert(
    id: i64,
    alert_type: AlertType,
    category: AlertCategory,
    title: &str,
    description: &str,
    contributor: &str,
    ruc: &str,
    amount: Option<i64>,
    date: PrimitiveDateTime,
    status: AlertStatus,
    priority: u8,
    assigned_to: Option<&str>,
    source: &str,
) -> Alert {
    Alert {
        id: AlertId::new(id),
        alert_type,
        category,
        title: title.to_owned(),
        description: description.to_owned(),
        contributor: Some(contributor.to_owned()),
        ruc: Some(ruc.to_owned()),
        amount,
        date,
        status,
        priority,
        assigned_to: assigned_to.map(str::to_owned),
        source: source.to_owned(),
    }
}

pub fn alerts() -> Vec<Alert> {
    vec![
        alert(
            1,
            AlertType::Critica,
            AlertCategory::Fraude,
            "Posible fraude en drawback detectado",
            "Sistema de IA detectó patrones irregulares en solicitudes de devolución de drawback. Múltiples documentos con inconsistencias graves.",
            "Exportadora Agrícola del Sur SA",
            "20741852963",
            Some(3_200_000),
            datetime!(2024-02-15 10:30:00),
            AlertStatus::Nueva,
            95,
            None,
            "IA Analítica",
        ),
        alert(
            2,
            AlertType::Alta,
            AlertCategory::Incumplimiento,
            "Declaraciones mensuales vencidas",
            "Contribuyente no ha presentado declaraciones de IGV de los últimos 3 meses. Riesgo de multas y sanciones.",
            "Corporación Industrial del Norte SAC",
            "20458796321",
            Some(575_000),
            datetime!(2024-02-14 15:45:00),
            AlertStatus::EnProceso,
            85,
            Some("María González"),
            "Sistema Automático",
        ),
        alert(
            3,
            AlertType::Alta,
            AlertCategory::Anomalia,
            "Incremento repentino en crédito fiscal",
            "Se detectó un aumento del 250% en el uso de crédito fiscal respecto al promedio histórico del contribuyente.",
            "Distribuidora Comercial Lima EIRL",
            "20123456789",
            Some(285_000),
            datetime!(2024-02-14 09:20:00),
            AlertStatus::Revisada,
            82,
            Some("Carlos Méndez"),
            "Motor de Reglas",
        ),
        alert(
            4,
            AlertType::Media,
            AlertCategory::Vencimiento,
            "Próximo vencimiento de declaración anual",
            "Recordatorio: Declaración anual de renta vence en 15 días. Contribuyente históricamente presenta fuera de plazo.",
            "Inversiones Tecnológicas SAA",
            "20987654321",
            None,
            datetime!(2024-02-13 08:00:00),
            AlertStatus::Nueva,
            60,
            None,
            "Sistema Automático",
        ),
        alert(
            5,
            AlertType::Critica,
            AlertCategory::Anomalia,
            "Transacciones con proveedores de alto riesgo",
            "Detectadas múltiples operaciones comerciales con empresas identificadas como fachada. Total de operaciones sospechosas: S/. 1.2M",
            "Constructora Megaproyectos SAC",
            "20369258147",
            Some(1_200_000),
            datetime!(2024-02-12 16:30:00),
            AlertStatus::EnProceso,
            92,
            Some("Roberto Silva"),
            "IA Analítica",
        ),
        alert(
            6,
            AlertType::Alta,
            AlertCategory::Incumplimiento,
            "Libros electrónicos no enviados",
            "No se han recibido los libros contables electrónicos del periodo enero 2024. Incumplimiento de obligación formal.",
            "Comercializadora del Centro SA",
            "20159753486",
            None,
            datetime!(2024-02-12 11:15:00),
            AlertStatus::Nueva,
            78,
            None,
            "Sistema Automático",
        ),
        alert(
            7,
            AlertType::Media,
            AlertCategory::Anomalia,
            "Variación atípica en gastos deducibles",
            "Los gastos deducibles declarados superan en 180% el promedio del sector para empresas de tamaño similar.",
            "Servicios Logísticos Express EIRL",
            "20258963147",
            Some(450_000),
            datetime!(2024-02-11 14:20:00),
            AlertStatus::Revisada,
            65,
            Some("Ana Torres"),
            "Motor de Reglas",
        ),
        alert(
            8,
            AlertType::Baja,
            AlertCategory::Sistema,
            "Actualización de información tributaria",
            "Contribuyente actualizó su domicilio fiscal y representante legal. Verificar consistencia de datos.",
            "Tecnología Digital Peru SAC",
            "20357951258",
            None,
            datetime!(2024-02-11 10:00:00),
            AlertStatus::Resuelta,
            30,
            Some("Pedro Ramírez"),
            "Sistema de Registro",
        ),
        alert(
            9,
            AlertType::Alta,
            AlertCategory::Fraude,
            "Facturas electrónicas con datos inconsistentes",
            "Detectadas 47 facturas con números de serie duplicados y fechas de emisión irregulares en el último mes.",
            "Importaciones Globales SAC",
            "20456789123",
            Some(820_000),
            datetime!(2024-02-10 16:45:00),
            AlertStatus::EnProceso,
            88,
            Some("María González"),
            "Validador de Comprobantes",
        ),
        alert(
            10,
            AlertType::Informativa,
            AlertCategory::Sistema,
            "Nuevo contribuyente de alto volumen registrado",
            "Se registró nuevo contribuyente con ingresos proyectados superiores a S/. 10M anuales. Requiere clasificación de riesgo.",
            "Minera Andina Internacional SA",
            "20789456123",
            None,
            datetime!(2024-02-10 09:30:00),
            AlertStatus::Nueva,
            50,
            None,
            "Sistema de Registro",
        ),
        alert(
            11,
            AlertType::Media,
            AlertCategory::Vencimiento,
            "Próximo vencimiento de fraccionamiento",
            "Cuota de fraccionamiento tributario vence en 5 días. Historial de pagos indica riesgo de incumplimiento.",
            "Textil Fashion Group EIRL",
            "20147258369",
            Some(125_000),
            datetime!(2024-02-09 08:15:00),
            AlertStatus::Revisada,
            68,
            Some("Carlos Méndez"),
            "Sistema de Cobranzas",
        ),
        alert(
            12,
            AlertType::Critica,
            AlertCategory::Fraude,
            "Empresa fachada detectada en red de facturación",
            "IA identificó empresa como parte de red de facturación falsa. Emitió facturas por S/. 5.8M sin respaldo real de operaciones.",
            "Servicios Múltiples del Norte EIRL",
            "20963852741",
            Some(5_800_000),
            datetime!(2024-02-08 13:20:00),
            AlertStatus::Nueva,
            98,
            None,
            "IA Analítica - Red de Grafos",
        ),
    ]
}

fn report(
    id: i64,
    name: &str,
    report_type: ReportType,
    period: &str,
    generated_date: Date,
    generated_by: &str,
    size_label: &str,
) -> Report {
    Report {
        id: ReportId::new(id),
        name: name.to_owned(),
        report_type,
        period: period.to_owned(),
        generated_date,
        generated_by: generated_by.to_owned(),
        size_label: size_label.to_owned(),
        status: ReportStatus::Completed,
    }
}

pub fn reports() -> Vec<Report> {
    vec![
        report(
            1,
            "Informe Mensual de Fiscalización - Enero 2024",
            ReportType::Mensual,
            "Enero 2024",
            date!(2024 - 02 - 01),
            "Sistema Automático",
            "2.4 MB",
        ),
        report(
            2,
            "Análisis de Riesgo Tributario - Q1 2024",
            ReportType::Trimestral,
            "Q1 2024",
            date!(2024 - 02 - 05),
            "María González",
            "5.1 MB",
        ),
        report(
            3,
            "Reporte de Casos de Alto Impacto",
            ReportType::Especial,
            "Febrero 2024",
            date!(2024 - 02 - 10),
            "Carlos Méndez",
            "1.8 MB",
        ),
        report(
            4,
            "Estadísticas de Recuperación Tributaria",
            ReportType::Mensual,
            "Febrero 2024",
            date!(2024 - 02 - 15),
            "Ana Torres",
            "3.2 MB",
        ),
    ]
}
