//! Warehouse Studio Backend Library
//!
//! Mock API, client store, chat router and gate log behind the Warehouse
//! Studio dashboard. The HTTP server binary is in `src/main.rs`.

pub mod api;
pub mod chat;
pub mod config;
/// Mock request dispatcher
///
/// Path-addressed reads and writes over in-memory tables with simulated
/// latency.
pub mod dispatcher;
pub mod error;
pub mod gate_log;
pub mod roi;
/// Domain records and the client-side store
pub mod state;
