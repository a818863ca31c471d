//! The console's view controller: UI actions in, view state out.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossbeam_channel::{
    bounded, unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError,
};
use shared::domain::ConnectionSetting;
use tracing::{debug, warn};

use crate::{
    commands::BackendCommand,
    error::BridgeError,
    events::BackendEvent,
    reducer, runtime,
    service::ConnectionService,
    state::{Notification, NotificationKind, ViewState},
};

const COMMAND_QUEUE_CAPACITY: usize = 64;

pub const NO_SELECTION_MESSAGE: &str = "Select a connection first";

pub struct ConsoleController {
    state: ViewState,
    cmd_tx: Sender<BackendCommand>,
    event_rx: Receiver<BackendEvent>,
    in_flight: usize,
}

impl ConsoleController {
    /// Starts a backend worker over `service` and wires a controller to it.
    pub fn spawn(service: Arc<dyn ConnectionService>) -> Result<Self, BridgeError> {
        let (cmd_tx, cmd_rx) = bounded(COMMAND_QUEUE_CAPACITY);
        let (event_tx, event_rx) = unbounded();
        runtime::launch(service, cmd_rx, event_tx)?;
        Ok(Self::from_channels(cmd_tx, event_rx))
    }

    /// Wires a controller to an externally driven worker.
    pub fn from_channels(cmd_tx: Sender<BackendCommand>, event_rx: Receiver<BackendEvent>) -> Self {
        Self {
            state: ViewState::default(),
            cmd_tx,
            event_rx,
            in_flight: 0,
        }
    }

    /// Initial page load: fetch the connection list once.
    pub fn start(&mut self) {
        self.refresh_conn_list();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The form as bound to the modal's inputs.
    pub fn setting_mut(&mut self) -> &mut ConnectionSetting {
        &mut self.state.edit_connection.setting
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn refresh_conn_list(&mut self) {
        self.dispatch(BackendCommand::RefreshConnList);
    }

    pub fn new_connection(&mut self) {
        self.state.new_connection();
    }

    pub fn select_conn(&mut self, id: impl Into<String>) {
        self.state.select_conn(id);
    }

    pub fn edit_conn(&mut self) {
        let Some(id) = self.state.selected_conn.clone() else {
            self.state.notify(NotificationKind::Warning, NO_SELECTION_MESSAGE);
            return;
        };
        self.dispatch(BackendCommand::LoadConnection { id });
    }

    pub fn conn_test(&mut self) {
        let setting = self.state.edit_connection.setting.clone();
        self.dispatch(BackendCommand::TestConnection { setting });
    }

    pub fn save_conn_setting(&mut self) {
        let setting = self.state.edit_connection.setting.clone();
        self.dispatch(BackendCommand::SaveConnection { setting });
    }

    pub fn close_edit(&mut self) {
        self.state.edit_connection.close();
    }

    pub fn open_tab(&mut self, id: &str, name: &str, url: &str) {
        self.state.open_tab(id, name, url);
    }

    pub fn remove_tab(&mut self, id: &str) {
        self.state.remove_tab(id);
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.take_notifications()
    }

    /// Applies every backend result that has already arrived.
    pub fn process_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    self.apply_event(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.in_flight > 0 {
                        self.worker_lost();
                    }
                    break;
                }
            }
        }
        applied
    }

    /// Blocks until no request is outstanding, including follow-ups queued
    /// by earlier results. Returns `false` on timeout or a dead worker.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => self.apply_event(event),
                Err(RecvTimeoutError::Timeout) => {
                    warn!(in_flight = self.in_flight, "timed out waiting for backend");
                    return false;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    self.worker_lost();
                    return false;
                }
            }
        }
        true
    }

    /// Outstanding requests can no longer complete.
    fn worker_lost(&mut self) {
        self.fail_dispatch(BridgeError::Disconnected);
        self.in_flight = 0;
    }

    fn apply_event(&mut self, event: BackendEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        for cmd in reducer::apply(&mut self.state, event) {
            self.dispatch(cmd);
        }
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        let cmd_name = cmd.name();
        match self.cmd_tx.try_send(cmd) {
            Ok(()) => {
                self.in_flight += 1;
                debug!(command = cmd_name, "queued console->backend command");
            }
            Err(TrySendError::Full(_)) => self.fail_dispatch(BridgeError::QueueFull),
            Err(TrySendError::Disconnected(_)) => self.fail_dispatch(BridgeError::Disconnected),
        }
    }

    fn fail_dispatch(&mut self, err: BridgeError) {
        warn!(%err, "backend command not delivered");
        self.state.notify(NotificationKind::Warning, err.to_string());
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
