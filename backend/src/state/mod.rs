// State management module
// Domain records, seed tables, and the client-side store

pub mod agent;
pub mod connector;
pub mod seed;
pub mod store;

pub use agent::{Agent, AgentId, AgentPatch, AgentStatus};
pub use connector::{Connector, ConnectorId, ConnectorPatch, ConnectorStatus};
pub use store::{AgentStore, StoreState};
