// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow, bail};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::ops::RangeInclusive;

use crate::model::{CurrentUser, ViewKind};
use crate::theme::{DEFAULT_ACCENT, Rgb};

pub const SESSION_TIMEOUT_MINUTES: RangeInclusive<u16> = 5..=120;
pub const RISK_THRESHOLD: RangeInclusive<u16> = 0..=100;

const DEFAULT_FIRST_NAME: &str = "Usuario";
const DEFAULT_PHONE: &str = "+51 987 654 321";
const DEFAULT_OFFICE: &str = "lima";
const DEFAULT_LANGUAGE: &str = "es-pe";
const DEFAULT_TIMEZONE: &str = "america-lima";
const DEFAULT_CURRENCY: &str = "pen";
const EMAIL_DOMAIN: &str = "sunat.gob.pe";

category! {
    DateFormat {
        DayMonthYear => "dd-mm-yyyy", "DD/MM/YYYY";
        MonthDayYear => "mm-dd-yyyy", "MM/DD/YYYY";
        YearMonthDay => "yyyy-mm-dd", "YYYY-MM-DD";
    }
}

category! {
    InterfaceDensity {
        Compact => "compact", "Compacto";
        Normal => "normal", "Normal";
        Comfortable => "comfortable", "Cómodo";
    }
}

category! {
    FontSize {
        Small => "small", "Pequeña";
        Medium => "medium", "Mediana";
        Large => "large", "Grande";
    }
}

category! {
    /// Keys of the persisted settings blob.
    SettingKey {
        ProfilePhoto => "profilePhoto", "foto de perfil";
        FirstName => "firstName", "nombres";
        LastName => "lastName", "apellidos";
        Email => "email", "correo";
        Phone => "phone", "teléfono";
        Office => "office", "oficina";
        EmailNotifications => "emailNotifications", "notificaciones por correo";
        PushNotifications => "pushNotifications", "notificaciones push";
        CriticalAlerts => "criticalAlerts", "alertas críticas";
        WeeklyReports => "weeklyReports", "reportes semanales";
        MonthlyReports => "monthlyReports", "reportes mensuales";
        TwoFactorAuth => "twoFactorAuth", "autenticación de dos factores";
        SessionTimeout => "sessionTimeout", "tiempo de sesión";
        AutoAssignCases => "autoAssignCases", "asignación automática";
        AiAnalytics => "aiAnalytics", "analítica IA";
        RiskThreshold => "riskThreshold", "umbral de riesgo";
        Language => "language", "idioma";
        Timezone => "timezone", "zona horaria";
        DateFormat => "dateFormat", "formato de fecha";
        Currency => "currency", "moneda";
        DarkMode => "darkMode", "modo oscuro";
        InterfaceDensity => "interfaceDensity", "densidad";
        FontSize => "fontSize", "tamaño de fuente";
        AccentColor => "accentColor", "color de acento";
        DefaultPage => "defaultPage", "página de inicio";
    }
}

/// Single-value slider position, persisted as a one-element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slider(pub u16);

impl Slider {
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl Serialize for Slider {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&self.0)?;
        seq.end()
    }
}

/// Profile values that depend on who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ProfileDefaults {
    pub fn for_user(user: &CurrentUser) -> Self {
        let mut words = user.name.split_whitespace();
        let first_name = words.next().unwrap_or(DEFAULT_FIRST_NAME).to_owned();
        let last_name = words.collect::<Vec<_>>().join(" ");
        Self {
            first_name,
            last_name,
            email: format!("{}@{EMAIL_DOMAIN}", user.code.to_lowercase()),
        }
    }
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            first_name: DEFAULT_FIRST_NAME.to_owned(),
            last_name: String::new(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub profile_photo: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub office: String,

    pub email_notifications: bool,
    pub push_notifications: bool,
    pub critical_alerts: bool,
    pub weekly_reports: bool,
    pub monthly_reports: bool,

    pub two_factor_auth: bool,
    pub session_timeout: Slider,

    pub auto_assign_cases: bool,
    pub ai_analytics: bool,
    pub risk_threshold: Slider,
    pub language: String,
    pub timezone: String,
    pub date_format: DateFormat,
    pub currency: String,

    pub dark_mode: bool,
    pub interface_density: InterfaceDensity,
    pub font_size: FontSize,
    pub accent_color: Rgb,
    pub default_page: ViewKind,
}

impl Settings {
    pub fn defaults(profile: &ProfileDefaults) -> Self {
        Self {
            profile_photo: None,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: DEFAULT_PHONE.to_owned(),
            office: DEFAULT_OFFICE.to_owned(),
            email_notifications: true,
            push_notifications: true,
            critical_alerts: true,
            weekly_reports: true,
            monthly_reports: true,
            two_factor_auth: false,
            session_timeout: Slider(30),
            auto_assign_cases: false,
            ai_analytics: true,
            risk_threshold: Slider(70),
            language: DEFAULT_LANGUAGE.to_owned(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
            date_format: DateFormat::DayMonthYear,
            currency: DEFAULT_CURRENCY.to_owned(),
            dark_mode: false,
            interface_density: InterfaceDensity::Normal,
            font_size: FontSize::Medium,
            accent_color: DEFAULT_ACCENT,
            default_page: ViewKind::Dashboard,
        }
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::ProfilePhoto => SettingValue::OptionalText(self.profile_photo.clone()),
            SettingKey::FirstName => SettingValue::Text(self.first_name.clone()),
            SettingKey::LastName => SettingValue::Text(self.last_name.clone()),
            SettingKey::Email => SettingValue::Text(self.email.clone()),
            SettingKey::Phone => SettingValue::Text(self.phone.clone()),
            SettingKey::Office => SettingValue::Text(self.office.clone()),
            SettingKey::EmailNotifications => SettingValue::Bool(self.email_notifications),
            SettingKey::PushNotifications => SettingValue::Bool(self.push_notifications),
            SettingKey::CriticalAlerts => SettingValue::Bool(self.critical_alerts),
            SettingKey::WeeklyReports => SettingValue::Bool(self.weekly_reports),
            SettingKey::MonthlyReports => SettingValue::Bool(self.monthly_reports),
            SettingKey::TwoFactorAuth => SettingValue::Bool(self.two_factor_auth),
            SettingKey::SessionTimeout => SettingValue::Slider(self.session_timeout),
            SettingKey::AutoAssignCases => SettingValue::Bool(self.auto_assign_cases),
            SettingKey::AiAnalytics => SettingValue::Bool(self.ai_analytics),
            SettingKey::RiskThreshold => SettingValue::Slider(self.risk_threshold),
            SettingKey::Language => SettingValue::Text(self.language.clone()),
            SettingKey::Timezone => SettingValue::Text(self.timezone.clone()),
            SettingKey::DateFormat => SettingValue::Text(self.date_format.as_str().to_owned()),
            SettingKey::Currency => SettingValue::Text(self.currency.clone()),
            SettingKey::DarkMode => SettingValue::Bool(self.dark_mode),
            SettingKey::InterfaceDensity => {
                SettingValue::Text(self.interface_density.as_str().to_owned())
            }
            SettingKey::FontSize => SettingValue::Text(self.font_size.as_str().to_owned()),
            SettingKey::AccentColor => SettingValue::Text(self.accent_color.to_hex()),
            SettingKey::DefaultPage => SettingValue::Text(self.default_page.as_str().to_owned()),
        }
    }

    /// Applies a user-entered value, rejecting anything the loader would not
    /// accept from the persisted blob.
    pub fn set(&mut self, key: SettingKey, raw: &str) -> Result<()> {
        match key {
            SettingKey::ProfilePhoto => {
                let trimmed = raw.trim();
                self.profile_photo = (!trimmed.is_empty()).then(|| trimmed.to_owned());
            }
            SettingKey::FirstName => self.first_name = required_text(key, raw)?,
            SettingKey::LastName => self.last_name = raw.trim().to_owned(),
            SettingKey::Email => self.email = raw.trim().to_owned(),
            SettingKey::Phone => self.phone = required_text(key, raw)?,
            SettingKey::Office => self.office = required_text(key, raw)?,
            SettingKey::EmailNotifications => self.email_notifications = parse_bool(key, raw)?,
            SettingKey::PushNotifications => self.push_notifications = parse_bool(key, raw)?,
            SettingKey::CriticalAlerts => self.critical_alerts = parse_bool(key, raw)?,
            SettingKey::WeeklyReports => self.weekly_reports = parse_bool(key, raw)?,
            SettingKey::MonthlyReports => self.monthly_reports = parse_bool(key, raw)?,
            SettingKey::TwoFactorAuth => self.two_factor_auth = parse_bool(key, raw)?,
            SettingKey::SessionTimeout => {
                self.session_timeout = parse_slider(key, raw, SESSION_TIMEOUT_MINUTES)?;
            }
            SettingKey::AutoAssignCases => self.auto_assign_cases = parse_bool(key, raw)?,
            SettingKey::AiAnalytics => self.ai_analytics = parse_bool(key, raw)?,
            SettingKey::RiskThreshold => {
                self.risk_threshold = parse_slider(key, raw, RISK_THRESHOLD)?;
            }
            SettingKey::Language => self.language = required_text(key, raw)?,
            SettingKey::Timezone => self.timezone = required_text(key, raw)?,
            SettingKey::DateFormat => self.date_format = parse_choice(key, raw, DateFormat::parse)?,
            SettingKey::Currency => self.currency = required_text(key, raw)?,
            SettingKey::DarkMode => self.dark_mode = parse_bool(key, raw)?,
            SettingKey::InterfaceDensity => {
                self.interface_density = parse_choice(key, raw, InterfaceDensity::parse)?;
            }
            SettingKey::FontSize => self.font_size = parse_choice(key, raw, FontSize::parse)?,
            SettingKey::AccentColor => self.accent_color = Rgb::parse_hex(raw)?,
            SettingKey::DefaultPage => {
                self.default_page = parse_choice(key, raw, landing_page)?;
            }
        }
        Ok(())
    }

    /// Checks every constraint the loader enforces on a stored blob, so a
    /// value that passes here reads back unchanged.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            (SettingKey::FirstName, &self.first_name),
            (SettingKey::Phone, &self.phone),
            (SettingKey::Office, &self.office),
            (SettingKey::Language, &self.language),
            (SettingKey::Timezone, &self.timezone),
            (SettingKey::Currency, &self.currency),
        ] {
            required_text(key, value)?;
        }
        check_slider(
            SettingKey::SessionTimeout,
            self.session_timeout.get(),
            SESSION_TIMEOUT_MINUTES,
        )?;
        check_slider(
            SettingKey::RiskThreshold,
            self.risk_threshold.get(),
            RISK_THRESHOLD,
        )?;
        if !self.default_page.is_landing() {
            bail!(
                "setting `{}` cannot be {:?}",
                SettingKey::DefaultPage.as_str(),
                self.default_page.as_str()
            );
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults(&ProfileDefaults::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
    OptionalText(Option<String>),
    Slider(Slider),
}

impl SettingValue {
    pub fn display(&self) -> String {
        match self {
            Self::Bool(true) => "on".to_owned(),
            Self::Bool(false) => "off".to_owned(),
            Self::Text(value) => value.clone(),
            Self::OptionalText(Some(value)) => value.clone(),
            Self::OptionalText(None) => "-".to_owned(),
            Self::Slider(slider) => slider.get().to_string(),
        }
    }
}

pub fn landing_page(raw: &str) -> Option<ViewKind> {
    ViewKind::parse(raw).filter(|view| view.is_landing())
}

fn required_text(key: SettingKey, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("setting `{}` cannot be empty", key.as_str());
    }
    Ok(trimmed.to_owned())
}

fn parse_bool(key: SettingKey, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "si" | "sí" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("setting `{}` must be on/off, got {other:?}", key.as_str()),
    }
}

fn parse_slider(key: SettingKey, raw: &str, range: RangeInclusive<u16>) -> Result<Slider> {
    let value: u16 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow!("setting `{}` must be a whole number, got {raw:?}", key.as_str()))?;
    check_slider(key, value, range)?;
    Ok(Slider(value))
}

fn check_slider(key: SettingKey, value: u16, range: RangeInclusive<u16>) -> Result<()> {
    if !range.contains(&value) {
        bail!(
            "setting `{}` must be between {} and {}, got {value}",
            key.as_str(),
            range.start(),
            range.end()
        );
    }
    Ok(())
}

fn parse_choice<T>(key: SettingKey, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
    parse(raw.trim())
        .ok_or_else(|| anyhow!("setting `{}` has no option {raw:?}", key.as_str()))
}
