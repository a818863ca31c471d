//! Backend worker: runs queued commands on a tokio runtime and reports
//! each completion back to the UI thread.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error};

use crate::{
    commands::BackendCommand, error::BridgeError, events::BackendEvent,
    service::ConnectionService,
};

/// Starts the worker thread. It exits once every command sender is dropped;
/// requests still in flight at that point are abandoned.
pub fn launch(
    service: Arc<dyn ConnectionService>,
    cmd_rx: Receiver<BackendCommand>,
    event_tx: Sender<BackendEvent>,
) -> Result<JoinHandle<()>, BridgeError> {
    let handle = thread::Builder::new()
        .name("console-backend".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build backend runtime: {err}");
                    return;
                }
            };

            // Each command runs as its own task; completions race and are
            // delivered in arrival order.
            while let Ok(cmd) = cmd_rx.recv() {
                let service = Arc::clone(&service);
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = execute(service.as_ref(), cmd).await;
                    if event_tx.send(event).is_err() {
                        debug!("ui event receiver dropped; discarding backend result");
                    }
                });
            }
            debug!("command queue closed; backend worker stopping");
        })?;
    Ok(handle)
}

pub async fn execute(service: &dyn ConnectionService, cmd: BackendCommand) -> BackendEvent {
    match cmd {
        BackendCommand::RefreshConnList => BackendEvent::ConnListLoaded(service.list().await),
        BackendCommand::LoadConnection { id } => {
            let result = service.load(&id).await;
            BackendEvent::ConnectionLoaded { id, result }
        }
        BackendCommand::TestConnection { setting } => {
            BackendEvent::ConnectionTested(service.test(&setting).await)
        }
        BackendCommand::SaveConnection { setting } => {
            BackendEvent::ConnectionSaved(service.save(&setting).await)
        }
    }
}
