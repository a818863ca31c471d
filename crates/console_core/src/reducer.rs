//! Applies completed backend requests to the view state.
//!
//! Every response path ends here: state mutations, user-facing
//! notifications, and any follow-up command the UI thread must queue.

use shared::error::ResponseCode;
use tracing::{info, warn};

use crate::{
    commands::BackendCommand,
    events::BackendEvent,
    state::{NotificationKind, ViewState},
};

pub const CONNECTION_OK_MESSAGE: &str = "Connection succeeded";
pub const CONNECTION_SAVED_MESSAGE: &str = "Connection saved";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
pub const DUPLICATE_NAME_MESSAGE: &str = "\"name\" already exists";

/// Applies `event` and returns the commands it triggers.
pub fn apply(state: &mut ViewState, event: BackendEvent) -> Vec<BackendCommand> {
    match event {
        BackendEvent::ConnListLoaded(result) => {
            match result {
                Ok(response) if response.is_success() => {
                    state.conns = response.content.unwrap_or_default();
                    info!(count = state.conns.len(), "connection list refreshed");
                }
                Ok(response) => {
                    warn!(code = %response.code, "connection list refresh rejected");
                }
                Err(error) => {
                    warn!(%error, "connection list refresh failed");
                }
            }
            Vec::new()
        }
        BackendEvent::ConnectionLoaded { id, result } => {
            match result {
                Ok(response) if response.is_success() => match response.content {
                    Some(setting) => state.edit_connection.open_edit(setting),
                    None => {
                        warn!(%id, "connection load returned no content");
                        state.notify(NotificationKind::Warning, UNKNOWN_ERROR_MESSAGE);
                    }
                },
                Ok(response) => {
                    warn!(%id, code = %response.code, "connection load rejected");
                    state.notify(NotificationKind::Warning, UNKNOWN_ERROR_MESSAGE);
                }
                Err(error) => {
                    warn!(%id, %error, "connection load failed");
                    state.notify(NotificationKind::Warning, error.to_string());
                }
            }
            Vec::new()
        }
        BackendEvent::ConnectionTested(result) => {
            match result {
                Ok(response) if response.is_success() => {
                    state.notify(NotificationKind::Success, CONNECTION_OK_MESSAGE);
                }
                Ok(response) => {
                    state.notify(
                        NotificationKind::Error,
                        response.failure_detail().to_string(),
                    );
                }
                Err(error) => {
                    warn!(%error, "connection test failed");
                    state.notify(NotificationKind::Warning, error.to_string());
                }
            }
            Vec::new()
        }
        BackendEvent::ConnectionSaved(result) => match result {
            Ok(response) if response.is_success() => {
                state.edit_connection.close();
                state.notify(NotificationKind::Success, CONNECTION_SAVED_MESSAGE);
                vec![BackendCommand::RefreshConnList]
            }
            Ok(response) if response.code == ResponseCode::DuplicateKey => {
                state.notify(
                    NotificationKind::Error,
                    format!("({}) {DUPLICATE_NAME_MESSAGE}", response.code),
                );
                Vec::new()
            }
            Ok(response) => {
                warn!(code = %response.code, "connection save rejected");
                state.notify(
                    NotificationKind::Error,
                    response.failure_detail().to_string(),
                );
                Vec::new()
            }
            Err(error) => {
                warn!(%error, "connection save failed");
                state.notify(NotificationKind::Warning, error.to_string());
                Vec::new()
            }
        },
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
