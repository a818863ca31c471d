//! Connection workspace controller for the Redis admin console.
//!
//! UI actions go through [`ConsoleController`], which queues
//! [`BackendCommand`]s to a worker running a [`ConnectionService`]. Results
//! come back as [`BackendEvent`]s and are folded into the [`ViewState`] by
//! the [`reducer`].

pub mod commands;
pub mod controller;
pub mod error;
pub mod events;
pub mod reducer;
pub mod runtime;
pub mod service;
pub mod state;

pub use commands::BackendCommand;
pub use controller::ConsoleController;
pub use error::{BridgeError, ServiceError};
pub use events::BackendEvent;
pub use service::{ConnectionService, HttpConnectionService};
pub use state::{EditConnectionState, EditMode, Notification, NotificationKind, Tab, ViewState};
