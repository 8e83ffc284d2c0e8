// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AlertId, Settings, ViewKind};

category! {
    NoticeLevel {
        Success => "success", "Éxito";
        Error => "error", "Error";
        Info => "info", "Información";
        Warning => "warning", "Advertencia";
        Loading => "loading", "Cargando";
    }
}

/// A toast. Notices sharing an `id` describe one operation; the newest
/// replaces the older one where it stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Option<String>,
    pub level: NoticeLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>) -> Self {
        Self {
            id: None,
            level,
            title: title.into(),
            description: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title)
    }

    pub fn loading(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Loading, title).with_id(id)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, notice: Notice) {
        let slot = notice.id.as_deref().and_then(|id| {
            self.notices
                .iter()
                .position(|existing| existing.id.as_deref() == Some(id))
        });
        match slot {
            Some(index) => self.notices[index] = notice,
            None => self.notices.push(notice),
        }
    }

    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.notices.len();
        self.notices
            .retain(|notice| notice.id.as_deref() != Some(id));
        self.notices.len() != before
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

category! {
    /// Row actions on the alerts screen. They acknowledge the click and
    /// leave the alert untouched.
    AlertAction {
        MarkReviewed => "mark-reviewed", "Marcar como revisada";
        Assign => "assign", "Asignar";
        Archive => "archive", "Archivar";
    }
}

impl AlertAction {
    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::MarkReviewed => "Alerta marcada como revisada",
            Self::Assign => "Alerta asignada exitosamente",
            Self::Archive => "Alerta archivada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub current_view: ViewKind,
    pub notices: NoticeBoard,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_view: ViewKind::Dashboard,
            notices: NoticeBoard::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    ShowView(ViewKind),
    AlertAction { alert: AlertId, action: AlertAction },
    Notify(Notice),
    DismissNotice(String),
    ClearNotices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ViewChanged(ViewKind),
    NoticePosted(Notice),
    NoticeDismissed(String),
    NoticesCleared,
}

impl AppState {
    /// Starts on the user's landing page.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            current_view: settings.default_page,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::ShowView(view) => {
                if view == self.current_view {
                    return Vec::new();
                }
                self.current_view = view;
                vec![AppEvent::ViewChanged(view)]
            }
            AppCommand::AlertAction { alert, action } => {
                let notice = Notice::success(action.confirmation())
                    .with_id(format!("alert-{alert}-{}", action.as_str()));
                vec![self.post(notice)]
            }
            AppCommand::Notify(notice) => vec![self.post(notice)],
            AppCommand::DismissNotice(id) => {
                if self.notices.dismiss(&id) {
                    vec![AppEvent::NoticeDismissed(id)]
                } else {
                    Vec::new()
                }
            }
            AppCommand::ClearNotices => {
                self.notices.clear();
                vec![AppEvent::NoticesCleared]
            }
        }
    }

    fn post(&mut self, notice: Notice) -> AppEvent {
        self.notices.push(notice.clone());
        AppEvent::NoticePosted(notice)
    }
}

#[cfg(test)]
mod tests {
    use super::{AlertAction, AppCommand, AppEvent, AppState, Notice, NoticeBoard, NoticeLevel};
    use crate::{AlertId, Settings, ViewKind};

    #[test]
    fn starts_on_the_configured_landing_page() {
        let settings = Settings {
            default_page: ViewKind::Alerts,
            ..Settings::default()
        };
        assert_eq!(
            AppState::from_settings(&settings).current_view,
            ViewKind::Alerts
        );
    }

    #[test]
    fn show_view_only_reports_real_changes() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::ShowView(ViewKind::Dashboard)).is_empty());

        let events = state.dispatch(AppCommand::ShowView(ViewKind::Cases));
        assert_eq!(events, vec![AppEvent::ViewChanged(ViewKind::Cases)]);
        assert_eq!(state.current_view, ViewKind::Cases);
    }

    #[test]
    fn notice_with_same_id_replaces_in_place() {
        let mut board = NoticeBoard::default();
        board.push(Notice::loading("sync", "Sincronizando datos..."));
        board.push(Notice::info("Configuración restablecida"));
        board.push(Notice::success("Sincronización completada").with_id("sync"));

        let notices: Vec<_> = board.iter().collect();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].title, "Sincronización completada");
        assert_eq!(notices[1].title, "Configuración restablecida");
    }

    #[test]
    fn notices_without_id_accumulate() {
        let mut board = NoticeBoard::default();
        board.push(Notice::error("Las contraseñas no coinciden"));
        board.push(Notice::error("Las contraseñas no coinciden"));
        assert_eq!(board.len(), 2);
        assert!(!board.dismiss("sync"));
    }

    #[test]
    fn alert_actions_only_post_a_notice() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::AlertAction {
            alert: AlertId::new(4),
            action: AlertAction::Archive,
        });

        assert_eq!(events.len(), 1);
        let Some(notice) = state.notices.latest() else {
            panic!("expected a notice");
        };
        assert_eq!(notice.title, "Alerta archivada");
        assert_eq!(notice.id.as_deref(), Some("alert-4-archive"));
        assert_eq!(state.current_view, ViewKind::Dashboard);
    }

    #[test]
    fn dismiss_and_clear_report_events() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::Notify(Notice::loading("backup", "Creando respaldo...")));

        let dismissed = state.dispatch(AppCommand::DismissNotice("backup".to_owned()));
        assert_eq!(dismissed, vec![AppEvent::NoticeDismissed("backup".to_owned())]);
        assert!(state.notices.is_empty());

        assert_eq!(
            state.dispatch(AppCommand::ClearNotices),
            vec![AppEvent::NoticesCleared]
        );
    }
}
