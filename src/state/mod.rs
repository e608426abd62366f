// State management module
// View state, chat transcript, and form state for the dashboard

pub mod app_state;
pub mod chat;
pub mod forms;

pub use app_state::{AppState, TaskOutcome, Toast, ToastKind, View};
pub use chat::ChatTranscript;
pub use forms::{sanitize, AmrForm, ConfigForm, ConfigInput, GateForm, WmsForm};
