//! View state owned by the UI thread.

use std::fmt;

use shared::domain::{ConnectionSetting, ConnectionSummary};

pub const NEW_CONNECTION_TITLE: &str = "New Connection";
pub const EDIT_CONNECTION_TITLE: &str = "Edit Connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Create,
    Edit,
}

impl EditMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Create => NEW_CONNECTION_TITLE,
            Self::Edit => EDIT_CONNECTION_TITLE,
        }
    }
}

/// The connection modal: closed, or open in create/edit mode over a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditConnectionState {
    pub title: String,
    pub mode: EditMode,
    pub visible: bool,
    pub setting: ConnectionSetting,
}

impl Default for EditConnectionState {
    fn default() -> Self {
        Self {
            title: EditMode::Create.title().to_string(),
            mode: EditMode::Create,
            visible: false,
            setting: ConnectionSetting::default(),
        }
    }
}

impl EditConnectionState {
    pub fn open_create(&mut self) {
        self.open(EditMode::Create, ConnectionSetting::for_new_connection());
    }

    pub fn open_edit(&mut self, setting: ConnectionSetting) {
        self.open(EditMode::Edit, setting);
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    fn open(&mut self, mode: EditMode, setting: ConnectionSetting) {
        self.mode = mode;
        self.title = mode.title().to_string();
        self.setting = setting;
        self.visible = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: String,
    pub label: String,
    /// Markup embedding the admin view for this connection.
    pub content: String,
}

impl Tab {
    pub fn embedding(id: impl Into<String>, label: impl Into<String>, url: &str) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: format!("<iframe src='{url}'>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub conns: Vec<ConnectionSummary>,
    pub selected_conn: Option<String>,
    pub edit_connection: EditConnectionState,
    pub tabs: Vec<Tab>,
    pub active_tab: Option<String>,
    notifications: Vec<Notification>,
}

impl ViewState {
    pub fn new_connection(&mut self) {
        self.edit_connection.open_create();
    }

    pub fn select_conn(&mut self, id: impl Into<String>) {
        self.selected_conn = Some(id.into());
    }

    /// Activates the tab for `id`, creating it on first open.
    pub fn open_tab(&mut self, id: &str, name: &str, url: &str) {
        if self.active_tab.as_deref() == Some(id) {
            return;
        }
        if !self.tabs.iter().any(|tab| tab.id == id) {
            self.tabs.push(Tab::embedding(id, name, url));
        }
        self.active_tab = Some(id.to_string());
    }

    /// Removes the tab for `id`. Closing the active tab hands focus to the
    /// next tab, then the previous one, then to nothing.
    pub fn remove_tab(&mut self, id: &str) {
        let Some(index) = self.tabs.iter().position(|tab| tab.id == id) else {
            return;
        };
        self.tabs.remove(index);

        if self.active_tab.as_deref() != Some(id) {
            return;
        }
        // After removal the old "next" tab sits at `index`.
        let neighbor = self
            .tabs
            .get(index)
            .or_else(|| index.checked_sub(1).and_then(|prev| self.tabs.get(prev)));
        self.active_tab = neighbor.map(|tab| tab.id.clone());
    }

    pub fn active(&self) -> Option<&Tab> {
        let active = self.active_tab.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == active)
    }

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
        });
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(state: &ViewState) -> Vec<&str> {
        state.tabs.iter().map(|tab| tab.id.as_str()).collect()
    }

    fn with_tabs(ids: &[&str]) -> ViewState {
        let mut state = ViewState::default();
        for id in ids {
            state.open_tab(id, id, &format!("/cache.html?id={id}"));
        }
        state
    }

    #[test]
    fn open_tab_never_duplicates_an_id() {
        let mut state = ViewState::default();
        state.open_tab("1", "local", "/a");
        state.open_tab("2", "staging", "/b");
        state.open_tab("1", "local", "/a");
        state.open_tab("1", "renamed", "/c");

        assert_eq!(ids(&state), ["1", "2"]);
        assert_eq!(state.active_tab.as_deref(), Some("1"));
        assert_eq!(state.tabs[0].label, "local");
        assert_eq!(state.tabs[0].content, "<iframe src='/a'>");
    }

    #[test]
    fn reopening_inactive_tab_only_activates_it() {
        let mut state = with_tabs(&["1", "2"]);
        assert_eq!(state.active_tab.as_deref(), Some("2"));

        state.open_tab("1", "ignored", "/ignored");
        assert_eq!(state.active_tab.as_deref(), Some("1"));
        assert_eq!(state.tabs.len(), 2);
    }

    #[test]
    fn removing_last_tab_clears_active() {
        let mut state = with_tabs(&["A"]);
        state.remove_tab("A");
        assert!(state.tabs.is_empty());
        assert_eq!(state.active_tab, None);
        assert!(state.active().is_none());
    }

    #[test]
    fn removing_active_middle_tab_activates_next() {
        let mut state = with_tabs(&["A", "B", "C"]);
        state.open_tab("B", "B", "/b");
        state.remove_tab("B");
        assert_eq!(ids(&state), ["A", "C"]);
        assert_eq!(state.active_tab.as_deref(), Some("C"));
    }

    #[test]
    fn removing_active_trailing_tab_falls_back_to_previous() {
        let mut state = with_tabs(&["A", "B"]);
        state.remove_tab("B");
        assert_eq!(ids(&state), ["A"]);
        assert_eq!(state.active_tab.as_deref(), Some("A"));
    }

    #[test]
    fn removing_inactive_tab_keeps_focus() {
        let mut state = with_tabs(&["A", "B", "C"]);
        state.remove_tab("A");
        assert_eq!(ids(&state), ["B", "C"]);
        assert_eq!(state.active_tab.as_deref(), Some("C"));
    }

    #[test]
    fn removing_unknown_tab_is_a_no_op() {
        let mut state = with_tabs(&["A"]);
        state.remove_tab("Z");
        assert_eq!(ids(&state), ["A"]);
        assert_eq!(state.active_tab.as_deref(), Some("A"));
    }

    #[test]
    fn new_connection_resets_form_regardless_of_prior_state() {
        let mut state = ViewState::default();
        state.edit_connection.open_edit(ConnectionSetting {
            id: "9".into(),
            name: "prod".into(),
            host: "10.0.0.9".into(),
            port: "7000".into(),
            pwd: "hunter2".into(),
        });

        state.new_connection();

        let edit = &state.edit_connection;
        assert!(edit.visible);
        assert_eq!(edit.mode, EditMode::Create);
        assert_eq!(edit.title, NEW_CONNECTION_TITLE);
        assert_eq!(
            edit.setting,
            ConnectionSetting {
                id: String::new(),
                name: String::new(),
                host: "localhost".into(),
                port: "6379".into(),
                pwd: String::new(),
            }
        );
    }

    #[test]
    fn only_warnings_and_errors_count_as_failures() {
        let kinds = [
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
        ];
        let rendered: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["success", "warning", "error"]);
        assert_eq!(kinds.map(NotificationKind::is_failure), [false, true, true]);
    }

    #[test]
    fn notifications_drain_in_order() {
        let mut state = ViewState::default();
        state.notify(NotificationKind::Success, "first");
        state.notify(NotificationKind::Error, "second");

        let drained = state.take_notifications();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert!(drained[1].kind.is_failure());
        assert!(state.notifications().is_empty());
    }
}
