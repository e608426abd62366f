// Background runtime for store actions
// Store calls run on a tokio runtime; results come back over a channel and are
// drained once per frame

use crate::state::chat::{MIN_REPLY_DELAY, REPLY_JITTER_MS};
use crate::state::TaskOutcome;
use eframe::egui;
use rand::Rng;
use std::future::Future;
use std::sync::mpsc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use warehouse_studio_backend::config::Config;
use warehouse_studio_backend::dispatcher::MockDispatcher;
use warehouse_studio_backend::error::AppError;
use warehouse_studio_backend::state::{AgentPatch, AgentStore, StoreState};

/// Turn a store result into something the UI shows
/// Cancelled calls produce nothing
fn outcome<T>(
    action: &str,
    result: Result<T, AppError>,
    on_ok: impl FnOnce(T) -> TaskOutcome,
) -> Option<TaskOutcome> {
    match result {
        Ok(value) => Some(on_ok(value)),
        Err(e) if e.is_cancelled() => {
            debug!(action, "dropped cancelled result");
            None
        }
        Err(e) => Some(TaskOutcome::Failed {
            action: action.to_string(),
            error: e.to_string(),
        }),
    }
}

/// Owns the runtime and the store the UI talks to
pub struct Backend {
    runtime: tokio::runtime::Runtime,
    store: AgentStore,
    snapshots: watch::Receiver<StoreState>,
    tx: mpsc::Sender<TaskOutcome>,
    rx: mpsc::Receiver<TaskOutcome>,
    ctx: Option<egui::Context>,
}

impl Backend {
    /// Start the runtime and a seeded store
    pub fn new(config: &Config) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("studio-worker")
            .enable_all()
            .build()?;
        let store = AgentStore::new(MockDispatcher::new(config.latency_profile()));
        let snapshots = store.subscribe();
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            store,
            snapshots,
            tx,
            rx,
            ctx: None,
        })
    }

    /// Repaint this context whenever a task finishes
    pub fn attach(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    /// Results that arrived since the last frame
    pub fn drain(&self) -> Vec<TaskOutcome> {
        self.rx.try_iter().collect()
    }

    /// The store state, if it changed since the last call
    pub fn changed_snapshot(&mut self) -> Option<StoreState> {
        match self.snapshots.has_changed() {
            Ok(true) => Some(self.snapshots.borrow_and_update().clone()),
            _ => None,
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Option<TaskOutcome>> + Send + 'static,
    {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        self.runtime.spawn(async move {
            if let Some(result) = task.await {
                // The receiver only goes away when the app is closing
                let _ = tx.send(result);
            }
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// Refresh agents and connectors
    pub fn load_all(&self, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = match store.load_agents_with(&token).await {
                Ok(()) => store.load_connectors_with(&token).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => None,
                Err(e) => outcome("Refresh", Err::<(), _>(e), |()| TaskOutcome::Done {
                    message: "Refreshed".to_string(),
                }),
            }
        });
    }

    /// Pause a running agent or resume a stopped one
    pub fn toggle_agent(&self, id: String, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = store.toggle_agent_status_with(&id, &token).await;
            outcome("Toggle agent", result, |agent| TaskOutcome::Done {
                message: format!("{} is now {}", agent.name, agent.status.as_str()),
            })
        });
    }

    /// Apply a partial update to an agent
    pub fn update_agent(&self, id: String, patch: AgentPatch, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            match store.update_agent_with(&id, patch, &token).await {
                Ok(agent) => Some(TaskOutcome::AgentSaved { agent }),
                Err(e) if e.is_cancelled() => {
                    debug!(agent_id = %id, "dropped cancelled update");
                    None
                }
                Err(e) => Some(TaskOutcome::SaveFailed { error: e.to_string() }),
            }
        });
    }

    /// Mark a connector healthy
    pub fn fix_connector(&self, id: String, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = store.fix_connector_with(&id, &token).await;
            outcome("Fix connector", result, |connector| TaskOutcome::Done {
                message: format!("{} reconnected", connector.name),
            })
        });
    }

    /// Fetch the activity log of an agent
    pub fn fetch_logs(&self, id: String, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = store.fetch_agent_logs_with(&id, &token).await;
            outcome("Load logs", result, |logs| TaskOutcome::Logs { agent_id: id, logs })
        });
    }

    /// Fetch the flow graph of an agent
    pub fn fetch_flow(&self, id: String, token: CancellationToken) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = store.fetch_flow_with(&id, &token).await;
            outcome("Load flow", result, |flow| TaskOutcome::Flow { agent_id: id, flow })
        });
    }

    /// Send a chat message; the reply is held back to a minimum delay
    pub fn send_chat(&self, message: String, token: CancellationToken) {
        let store = self.store.clone();
        let hold = MIN_REPLY_DELAY
            + Duration::from_millis(rand::thread_rng().gen_range(0..=REPLY_JITTER_MS));
        self.spawn(async move {
            let deadline = tokio::time::Instant::now() + hold;
            let result = store.send_chat_message_with(&message, &token).await;
            if matches!(&result, Err(e) if e.is_cancelled()) {
                return None;
            }
            tokio::select! {
                _ = token.cancelled() => return None,
                _ = tokio::time::sleep_until(deadline) => {}
            }
            Some(TaskOutcome::Chat(result.map_err(|e| e.to_string())))
        });
    }
}
