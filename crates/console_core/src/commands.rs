//! Backend commands queued from the UI thread to the backend worker.

use shared::domain::ConnectionSetting;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    RefreshConnList,
    LoadConnection { id: String },
    TestConnection { setting: ConnectionSetting },
    SaveConnection { setting: ConnectionSetting },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RefreshConnList => "refresh_conn_list",
            Self::LoadConnection { .. } => "load_connection",
            Self::TestConnection { .. } => "test_connection",
            Self::SaveConnection { .. } => "save_connection",
        }
    }
}
