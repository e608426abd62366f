// Application state management
// Current view, store snapshot, toasts, and the per-view cancellation token

use super::chat::ChatTranscript;
use super::forms::{AmrForm, ConfigForm, GateForm, WmsForm};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use warehouse_studio_backend::chat::ChatReply;
use warehouse_studio_backend::dispatcher::{AgentLog, FlowDocument};
use warehouse_studio_backend::gate_log::GateLog;
use warehouse_studio_backend::state::{Agent, AgentId, AgentPatch, StoreState};

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Top-level screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Agent cards, details, logs and flow
    AgentStudio,
    /// Integration catalogue
    Connectors,
    /// Keyword-routed chat
    MasterChat,
    /// Network overview of every yard
    YardAlert,
    /// Yard gate log
    GateLog,
    /// AMR and WMS calculators
    RoiCalculators,
}

impl View {
    /// Sidebar order
    pub const ALL: [View; 6] = [
        View::AgentStudio,
        View::Connectors,
        View::MasterChat,
        View::YardAlert,
        View::GateLog,
        View::RoiCalculators,
    ];

    /// Sidebar label
    pub fn title(&self) -> &'static str {
        match self {
            View::AgentStudio => "Agent Studio",
            View::Connectors => "Connectors",
            View::MasterChat => "Master Chat",
            View::YardAlert => "Yard Alert",
            View::GateLog => "Gate Log",
            View::RoiCalculators => "ROI Calculators",
        }
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation
    Info,
    /// Failed action
    Error,
    /// Red-flagged gate entry or panic broadcast
    Alert,
}

/// Transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    /// Headline
    pub title: String,
    /// Body text
    pub message: String,
    /// Severity
    pub kind: ToastKind,
    /// When it was raised
    pub raised: Instant,
}

/// Result of a background store call, delivered back to the UI thread
#[derive(Debug)]
pub enum TaskOutcome {
    /// A mutation finished; show its confirmation
    Done {
        /// Toast text
        message: String,
    },
    /// A store call failed
    Failed {
        /// What the user was trying to do
        action: String,
        /// Error text
        error: String,
    },
    /// Chat reply, or the error it failed with
    Chat(Result<ChatReply, String>),
    /// Activity log for an agent
    Logs {
        /// Agent the rows belong to
        agent_id: AgentId,
        /// Rows, newest first
        logs: Vec<AgentLog>,
    },
    /// Flow graph for an agent
    Flow {
        /// Agent the flow belongs to
        agent_id: AgentId,
        /// The document
        flow: FlowDocument,
    },
    /// Agent configuration was saved
    AgentSaved {
        /// The agent as stored
        agent: Agent,
    },
    /// Agent configuration could not be saved
    SaveFailed {
        /// Error text
        error: String,
    },
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Visible screen
    pub view: View,
    /// Cancelled whenever the user leaves `view`
    view_token: CancellationToken,
    /// Latest store snapshot
    pub store: StoreState,
    /// Agent opened in the details panel
    pub selected_agent_id: Option<AgentId>,
    /// Logs of the selected agent, once fetched
    pub agent_logs: Option<(AgentId, Vec<AgentLog>)>,
    /// Flow of the selected agent, once fetched
    pub agent_flow: Option<(AgentId, FlowDocument)>,
    /// Configuration editor for the selected agent
    pub config_form: ConfigForm,
    /// Master chat transcript
    pub chat: ChatTranscript,
    /// Gate log of the open yard
    pub gate_log: GateLog,
    /// Logs of yards opened earlier in the session
    parked_logs: Vec<GateLog>,
    /// Gate entry form
    pub gate_form: GateForm,
    /// AMR calculator form
    pub amr_form: AmrForm,
    /// WMS calculator form
    pub wms_form: WmsForm,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
}

impl AppState {
    /// Fresh state on the Agent Studio view
    pub fn new(store: StoreState, gate_log: GateLog) -> Self {
        Self {
            view: View::AgentStudio,
            view_token: CancellationToken::new(),
            store,
            selected_agent_id: None,
            agent_logs: None,
            agent_flow: None,
            config_form: ConfigForm::default(),
            chat: ChatTranscript::default(),
            gate_log,
            parked_logs: Vec::new(),
            gate_form: GateForm::default(),
            amr_form: AmrForm::default(),
            wms_form: WmsForm::default(),
            toasts: Vec::new(),
        }
    }

    /// Token for work started from the current view
    pub fn view_token(&self) -> CancellationToken {
        self.view_token.clone()
    }

    /// Switch views; in-flight work for the old view is cancelled
    /// Returns true if the view changed
    pub fn navigate(&mut self, view: View) -> bool {
        if self.view == view {
            return false;
        }
        self.view_token.cancel();
        self.view_token = CancellationToken::new();
        self.view = view;
        self.config_form.saving = false;
        if self.chat.is_pending() {
            self.chat.abandon();
        }
        true
    }

    /// Open an agent in the details panel; a second click closes it
    pub fn toggle_selection(&mut self, id: &str) {
        if self.selected_agent_id.as_deref() == Some(id) {
            self.selected_agent_id = None;
            self.config_form = ConfigForm::default();
        } else if let Some(agent) = self.store.agent(id) {
            self.config_form = ConfigForm::load(agent);
            self.selected_agent_id = Some(id.to_string());
        }
        self.agent_logs = None;
        self.agent_flow = None;
    }

    /// Build the patch for the edited configuration
    /// Invalid fields raise a toast and nothing is sent
    pub fn save_config(&mut self) -> Option<(AgentId, AgentPatch)> {
        let id = self.config_form.agent_id.clone()?;
        match self.config_form.to_config() {
            Ok(config) => {
                self.config_form.saving = true;
                Some((id, AgentPatch::config(config)))
            }
            Err(error) => {
                self.push_toast(ToastKind::Error, "Save Failed", error);
                None
            }
        }
    }

    /// Switch the gate log to `yard_id` and show it
    /// Entries recorded for a yard survive switching away and back
    pub fn open_yard(&mut self, yard_id: &str) {
        if self.gate_log.yard_id() != yard_id {
            let next = match self.parked_logs.iter().position(|log| log.yard_id() == yard_id) {
                Some(index) => self.parked_logs.swap_remove(index),
                None => GateLog::with_sample_entries(yard_id),
            };
            let previous = std::mem::replace(&mut self.gate_log, next);
            self.parked_logs.push(previous);
            self.gate_form = GateForm::default();
        }
        self.navigate(View::GateLog);
    }

    /// Raise a toast
    pub fn push_toast(&mut self, kind: ToastKind, title: impl Into<String>, message: impl Into<String>) {
        self.toasts.push(Toast {
            title: title.into(),
            message: message.into(),
            kind,
            raised: Instant::now(),
        });
    }

    /// Drop toasts older than `TOAST_TTL`
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts
            .retain(|t| now.saturating_duration_since(t.raised) < TOAST_TTL);
    }

    /// Fold a background result into the state
    pub fn apply(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Done { message } => self.push_toast(ToastKind::Info, "Done", message),
            TaskOutcome::Failed { action, error } => {
                self.push_toast(ToastKind::Error, format!("{action} failed"), error)
            }
            TaskOutcome::Chat(reply) => self.chat.finish(reply),
            TaskOutcome::Logs { agent_id, logs } => {
                if self.selected_agent_id.as_ref() == Some(&agent_id) {
                    self.agent_logs = Some((agent_id, logs));
                }
            }
            TaskOutcome::Flow { agent_id, flow } => {
                if self.selected_agent_id.as_ref() == Some(&agent_id) {
                    self.agent_flow = Some((agent_id, flow));
                }
            }
            TaskOutcome::AgentSaved { agent } => {
                self.config_form.saving = false;
                if self.config_form.is_for(&agent.id) {
                    self.config_form = ConfigForm::load(&agent);
                }
                self.push_toast(
                    ToastKind::Info,
                    "Configuration Saved",
                    "Agent configuration has been updated successfully.",
                );
            }
            TaskOutcome::SaveFailed { error } => {
                self.config_form.saving = false;
                tracing::warn!(%error, "configuration save failed");
                self.push_toast(
                    ToastKind::Error,
                    "Save Failed",
                    "Could not save configuration. Please try again.",
                );
            }
        }
    }

    /// Record the gate form as a new entry and reset the form
    pub fn submit_gate_entry(&mut self) {
        let form = std::mem::take(&mut self.gate_form.entry);
        self.gate_form.adding = false;
        let entry = self.gate_log.add_entry(form);
        if entry.is_red_flagged {
            let flags = entry.red_flag_types.join(", ");
            self.push_toast(ToastKind::Alert, "Red Flag Alert!", format!("Entry flagged: {flags}"));
        }
    }

    /// Broadcast the panic message typed into the gate form
    pub fn send_panic_alert(&mut self) {
        let message = std::mem::take(&mut self.gate_form.panic_message);
        if let Some(alert) = self.gate_log.broadcast_panic(&message) {
            let text = format!("Alert sent to all yards within 50 miles: \"{}\"", alert.details);
            self.gate_form.panic_open = false;
            self.push_toast(ToastKind::Alert, "PANIC ALERT BROADCAST", text);
        } else {
            self.gate_form.panic_message = message;
        }
    }
}
