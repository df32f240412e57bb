use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::{
    query::{ListParams, TelemetryList},
    record::TelemetryRecord,
    service::{ServiceError, TelemetryService},
    types::TelemetryId,
};

#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("telemetry runtime is not running")]
    ChannelClosed,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Commands that may wait for the worker before senders block.
    pub queue_bound: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { queue_bound: 256 }
    }
}

#[allow(missing_docs)]
#[derive(Clone)]
pub struct TelemetryHandle {
    cmd_tx: mpsc::Sender<Command>,
}

enum Command {
    List {
        params: ListParams,
        resp: oneshot::Sender<Result<TelemetryList, ServiceError>>,
    },
    Get {
        id: TelemetryId,
        resp: oneshot::Sender<Result<TelemetryRecord, ServiceError>>,
    },
    Create {
        body: Value,
        resp: oneshot::Sender<Result<TelemetryId, ServiceError>>,
    },
    Delete {
        id: TelemetryId,
        resp: oneshot::Sender<Result<(), ServiceError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `service` onto a dedicated blocking worker and returns its handle.
///
/// The worker executes one command at a time, so a reader never observes a
/// half-applied insert or delete. It stops on [`TelemetryHandle::shutdown`]
/// or once every handle is dropped.
pub fn spawn_telemetry(service: TelemetryService, config: RuntimeConfig) -> TelemetryHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.queue_bound.max(1));

    tokio::task::spawn_blocking(move || {
        let mut service = service;
        while let Some(cmd) = cmd_rx.blocking_recv() {
            if handle_command(cmd, &mut service) {
                break;
            }
        }
        info!("telemetry runtime stopped");
    });

    TelemetryHandle { cmd_tx }
}

#[allow(missing_docs)]
impl TelemetryHandle {
    pub async fn list(&self, params: ListParams) -> Result<TelemetryList, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::List { params, resp: tx }).await?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    pub async fn get(&self, id: TelemetryId) -> Result<TelemetryRecord, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Get { id, resp: tx }).await?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    pub async fn create(&self, body: Value) -> Result<TelemetryId, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Create { body, resp: tx }).await?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    pub async fn delete(&self, id: TelemetryId) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Delete { id, resp: tx }).await?;
        Ok(rx.await.map_err(|_| RuntimeError::ChannelClosed)??)
    }

    /// Stops the worker after commands already queued ahead of this one.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Shutdown { resp: tx }).await?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    async fn send(&self, cmd: Command) -> Result<(), RuntimeError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command(cmd: Command, service: &mut TelemetryService) -> bool {
    match cmd {
        Command::List { params, resp } => {
            let _ = resp.send(service.list(&params));
        }
        Command::Get { id, resp } => {
            let _ = resp.send(service.get(id));
        }
        Command::Create { body, resp } => {
            let _ = resp.send(service.create(&body));
        }
        Command::Delete { id, resp } => {
            let _ = resp.send(service.delete(id));
        }
        Command::Shutdown { resp } => {
            debug!("telemetry runtime shutdown requested");
            let _ = resp.send(());
            return true;
        }
    }

    false
}
