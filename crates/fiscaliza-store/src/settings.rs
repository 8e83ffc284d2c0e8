// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use fiscaliza_app::{
    AccentPalette, DateFormat, FontSize, InterfaceDensity, PasswordChangeForm, ProfileDefaults,
    RISK_THRESHOLD, Rgb, SESSION_TIMEOUT_MINUTES, SettingKey, Settings, Slider, ViewKind,
    landing_page,
};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

use crate::KeyValueStorage;

/// Storage key of the preferences blob.
pub const SETTINGS_KEY: &str = "sunat_settings";

/// A write that did not reach storage. The in-memory value it carried is
/// still applied; callers surface this as a warning, not a failure.
#[derive(Debug)]
pub struct StorageWarning(anyhow::Error);

impl StorageWarning {
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

impl fmt::Display for StorageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "settings were applied but not saved: {:#}", self.0)
    }
}

impl std::error::Error for StorageWarning {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type AccentListener = Box<dyn FnMut(&AccentPalette)>;

/// Sole owner of the user's preferences and the shared accent color.
pub struct SettingsStore<S: KeyValueStorage> {
    storage: S,
    profile: ProfileDefaults,
    settings: Settings,
    palette: AccentPalette,
    listeners: Vec<(SubscriptionId, AccentListener)>,
    next_subscription: u64,
    password: PasswordChangeForm,
    saved_landing: Option<ViewKind>,
}

impl<S: KeyValueStorage> SettingsStore<S> {
    pub fn open(storage: S, profile: ProfileDefaults) -> Self {
        let mut store = Self {
            storage,
            settings: Settings::defaults(&profile),
            profile,
            palette: AccentPalette::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            password: PasswordChangeForm::default(),
            saved_landing: None,
        };
        let (settings, saved_landing) = store.read_stored();
        store.settings = settings;
        store.saved_landing = saved_landing;
        store.palette = AccentPalette::from_accent(store.settings.accent_color);
        store
    }

    pub fn defaults(&self) -> Settings {
        Settings::defaults(&self.profile)
    }

    /// Reads the persisted blob, filling anything missing or invalid from the
    /// defaults. Never fails; unreadable storage yields the defaults.
    pub fn load(&self) -> Settings {
        self.read_stored().0
    }

    /// The landing page the user actually saved, if the stored one is usable.
    /// Tracks the last blob read or written by this store.
    pub fn stored_landing_page(&self) -> Option<ViewKind> {
        self.saved_landing
    }

    /// Re-reads storage into the live state.
    pub fn reload(&mut self) -> &Settings {
        let (loaded, saved_landing) = self.read_stored();
        self.saved_landing = saved_landing;
        self.apply(loaded);
        &self.settings
    }

    fn read_stored(&self) -> (Settings, Option<ViewKind>) {
        let defaults = self.defaults();
        match self.storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => decode_blob(&raw, &defaults),
            Ok(None) => {
                debug!(key = SETTINGS_KEY, "no stored settings, using defaults");
                (defaults, None)
            }
            Err(error) => {
                warn!(
                    key = SETTINGS_KEY,
                    error = %format!("{error:#}"),
                    "cannot read settings, using defaults"
                );
                (defaults, None)
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn palette(&self) -> AccentPalette {
        self.palette
    }

    pub fn accent_color(&self) -> Rgb {
        self.palette.base
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn password_form(&self) -> &PasswordChangeForm {
        &self.password
    }

    pub fn password_form_mut(&mut self) -> &mut PasswordChangeForm {
        &mut self.password
    }

    /// Replaces every setting and overwrites the stored blob in one write.
    /// Values the loader would not read back are rejected before anything
    /// changes; a failed write comes back as a warning.
    pub fn save(&mut self, settings: Settings) -> Result<Option<StorageWarning>> {
        settings.validate()?;
        Ok(self.persist(settings).err())
    }

    /// Validates and applies one user-entered value, then saves.
    pub fn update(&mut self, key: SettingKey, raw: &str) -> Result<Option<StorageWarning>> {
        let mut next = self.settings.clone();
        next.set(key, raw)?;
        self.save(next)
    }

    /// Restores every default, persists them, and clears runtime-only state.
    pub fn reset(&mut self) -> Result<(), StorageWarning> {
        self.password.clear();
        self.persist(self.defaults())
    }

    /// Changes the shared accent. Listeners see the new palette before this
    /// returns; only `accentColor` is rewritten in storage.
    pub fn set_accent_color(&mut self, color: Rgb) -> Result<(), StorageWarning> {
        self.settings.accent_color = color;
        self.set_palette(color);

        // Without the current blob the merge would drop every other key.
        let existing = self
            .storage
            .get_item(SETTINGS_KEY)
            .with_context(|| format!("read {SETTINGS_KEY} before accent update"))
            .map_err(|error| {
                warn!(error = %format!("{error:#}"), "accent kept in memory only");
                StorageWarning(error)
            })?;
        let merged = merge_accent(existing.as_deref(), color).map_err(StorageWarning)?;
        self.write_blob(&merged)?;
        debug!(accent = %color, "accent color saved");
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AccentPalette) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn persist(&mut self, settings: Settings) -> Result<(), StorageWarning> {
        self.apply(settings);
        let encoded = encode_settings(&self.settings).map_err(StorageWarning)?;
        self.write_blob(&encoded)?;
        self.saved_landing = Some(self.settings.default_page);
        debug!(key = SETTINGS_KEY, "settings saved");
        Ok(())
    }

    fn apply(&mut self, settings: Settings) {
        let accent = settings.accent_color;
        self.settings = settings;
        if accent != self.palette.base {
            self.set_palette(accent);
        }
    }

    fn set_palette(&mut self, accent: Rgb) {
        self.palette = AccentPalette::from_accent(accent);
        let palette = self.palette;
        for (_, listener) in &mut self.listeners {
            listener(&palette);
        }
    }

    fn write_blob(&mut self, raw: &str) -> Result<(), StorageWarning> {
        self.storage
            .set_item(SETTINGS_KEY, raw)
            .with_context(|| format!("write {SETTINGS_KEY}"))
            .map_err(|error| {
                warn!(error = %format!("{error:#}"), "settings kept in memory only");
                StorageWarning(error)
            })
    }
}

pub fn encode_settings(settings: &Settings) -> Result<String> {
    serde_json::to_string(settings).context("encode settings")
}

/// Decodes a stored blob key by key. Keys that are missing, mistyped or out
/// of range take their default; unknown keys are ignored.
pub fn decode_settings(raw: &str, defaults: &Settings) -> Settings {
    decode_blob(raw, defaults).0
}

/// Decodes a stored blob and reports the landing page it actually held.
fn decode_blob(raw: &str, defaults: &Settings) -> (Settings, Option<ViewKind>) {
    let map = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(kind = json_kind(&other), "stored settings are not an object, using defaults");
            return (defaults.clone(), None);
        }
        Err(error) => {
            warn!(%error, "stored settings are not valid JSON, using defaults");
            return (defaults.clone(), None);
        }
    };

    let blob = Blob { map: &map };
    let saved_landing = blob.choice(SettingKey::DefaultPage, landing_page);
    let settings = Settings {
        profile_photo: blob.photo().unwrap_or_else(|| defaults.profile_photo.clone()),
        first_name: blob
            .required_text(SettingKey::FirstName)
            .unwrap_or_else(|| defaults.first_name.clone()),
        last_name: blob
            .text(SettingKey::LastName)
            .unwrap_or_else(|| defaults.last_name.clone()),
        email: blob
            .text(SettingKey::Email)
            .unwrap_or_else(|| defaults.email.clone()),
        phone: blob
            .required_text(SettingKey::Phone)
            .unwrap_or_else(|| defaults.phone.clone()),
        office: blob
            .required_text(SettingKey::Office)
            .unwrap_or_else(|| defaults.office.clone()),
        email_notifications: blob
            .flag(SettingKey::EmailNotifications)
            .unwrap_or(defaults.email_notifications),
        push_notifications: blob
            .flag(SettingKey::PushNotifications)
            .unwrap_or(defaults.push_notifications),
        critical_alerts: blob
            .flag(SettingKey::CriticalAlerts)
            .unwrap_or(defaults.critical_alerts),
        weekly_reports: blob
            .flag(SettingKey::WeeklyReports)
            .unwrap_or(defaults.weekly_reports),
        monthly_reports: blob
            .flag(SettingKey::MonthlyReports)
            .unwrap_or(defaults.monthly_reports),
        two_factor_auth: blob
            .flag(SettingKey::TwoFactorAuth)
            .unwrap_or(defaults.two_factor_auth),
        session_timeout: blob
            .slider(SettingKey::SessionTimeout, SESSION_TIMEOUT_MINUTES)
            .unwrap_or(defaults.session_timeout),
        auto_assign_cases: blob
            .flag(SettingKey::AutoAssignCases)
            .unwrap_or(defaults.auto_assign_cases),
        ai_analytics: blob
            .flag(SettingKey::AiAnalytics)
            .unwrap_or(defaults.ai_analytics),
        risk_threshold: blob
            .slider(SettingKey::RiskThreshold, RISK_THRESHOLD)
            .unwrap_or(defaults.risk_threshold),
        language: blob
            .required_text(SettingKey::Language)
            .unwrap_or_else(|| defaults.language.clone()),
        timezone: blob
            .required_text(SettingKey::Timezone)
            .unwrap_or_else(|| defaults.timezone.clone()),
        date_format: blob
            .choice(SettingKey::DateFormat, DateFormat::parse)
            .unwrap_or(defaults.date_format),
        currency: blob
            .required_text(SettingKey::Currency)
            .unwrap_or_else(|| defaults.currency.clone()),
        dark_mode: blob
            .flag(SettingKey::DarkMode)
            .unwrap_or(defaults.dark_mode),
        interface_density: blob
            .choice(SettingKey::InterfaceDensity, InterfaceDensity::parse)
            .unwrap_or(defaults.interface_density),
        font_size: blob
            .choice(SettingKey::FontSize, FontSize::parse)
            .unwrap_or(defaults.font_size),
        accent_color: blob
            .choice(SettingKey::AccentColor, |raw| Rgb::parse_hex(raw).ok())
            .unwrap_or(defaults.accent_color),
        default_page: saved_landing.unwrap_or(defaults.default_page),
    };

    let unknown = map
        .keys()
        .filter(|key| SettingKey::parse(key).is_none())
        .count();
    debug!(keys = map.len(), unknown, "decoded stored settings");
    (settings, saved_landing)
}

/// Rewrites `accentColor` inside an existing blob, keeping every other key.
fn merge_accent(existing: Option<&str>, color: Rgb) -> Result<String> {
    let mut map = match existing.map(serde_json::from_str::<Value>) {
        Some(Ok(Value::Object(map))) => map,
        Some(_) => {
            warn!("stored settings are unreadable, replacing them with the accent color");
            Map::new()
        }
        None => Map::new(),
    };
    map.insert(
        SettingKey::AccentColor.as_str().to_owned(),
        Value::String(color.to_hex()),
    );
    serde_json::to_string(&Value::Object(map)).context("encode settings")
}

struct Blob<'a> {
    map: &'a Map<String, Value>,
}

impl Blob<'_> {
    fn value(&self, key: SettingKey) -> Option<&Value> {
        self.map.get(key.as_str())
    }

    fn rejected(&self, key: SettingKey) {
        if let Some(value) = self.value(key) {
            debug!(key = key.as_str(), kind = json_kind(value), "ignoring invalid stored setting");
        }
    }

    fn text(&self, key: SettingKey) -> Option<String> {
        let found = self.value(key).and_then(Value::as_str).map(str::to_owned);
        if found.is_none() {
            self.rejected(key);
        }
        found
    }

    fn required_text(&self, key: SettingKey) -> Option<String> {
        let found = self
            .value(key)
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty())
            .map(str::to_owned);
        if found.is_none() {
            self.rejected(key);
        }
        found
    }

    fn flag(&self, key: SettingKey) -> Option<bool> {
        let found = self.value(key).and_then(Value::as_bool);
        if found.is_none() {
            self.rejected(key);
        }
        found
    }

    fn slider(&self, key: SettingKey, range: RangeInclusive<u16>) -> Option<Slider> {
        let found = self
            .value(key)
            .and_then(Value::as_array)
            .and_then(|values| values.first())
            .and_then(Value::as_u64)
            .and_then(|value| u16::try_from(value).ok())
            .filter(|value| range.contains(value))
            .map(Slider);
        if found.is_none() {
            self.rejected(key);
        }
        found
    }

    fn choice<T>(&self, key: SettingKey, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let found = self.value(key).and_then(Value::as_str).and_then(parse);
        if found.is_none() {
            self.rejected(key);
        }
        found
    }

    /// `Some(None)` for an explicit null, `None` when the key is unusable.
    fn photo(&self) -> Option<Option<String>> {
        match self.value(SettingKey::ProfilePhoto) {
            Some(Value::Null) => Some(None),
            Some(Value::String(value)) => Some(Some(value.clone())),
            _ => {
                self.rejected(SettingKey::ProfilePhoto);
                None
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
