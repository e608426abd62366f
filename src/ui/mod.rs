// UI module
// Layout, shared components, and one module per view

pub mod agents;
pub mod chat;
pub mod components;
pub mod connectors;
pub mod gate_log;
pub mod layout;
pub mod roi;
pub mod yards;

pub use layout::render_app_layout;
