//! Gate log records

use serde::{Deserialize, Serialize};

/// Guard's decision at the gate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    /// Vehicle admitted
    #[default]
    Cleared,
    /// Vehicle turned away
    Denied,
    /// Supervisor involved
    Escalated,
}

impl GateDecision {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            GateDecision::Cleared => "Cleared",
            GateDecision::Denied => "Denied",
            GateDecision::Escalated => "Escalated",
        }
    }
}

/// What the guard types into the entry form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewGateEntry {
    /// Driver name as shown on the licence
    pub driver_name: String,
    /// Driver licence number
    #[serde(rename = "driverDL")]
    pub driver_dl: String,
    /// Issuing state of the licence
    pub dl_state: String,
    /// Licence expiry date
    pub dl_expiry: String,
    /// Tractor plate
    pub tractor_plate: String,
    /// Tractor plate state
    pub tractor_plate_state: String,
    /// Tractor VIN
    #[serde(rename = "tractorVIN")]
    pub tractor_vin: String,
    /// Trailer plate
    pub trailer_plate: String,
    /// Trailer VIN
    #[serde(rename = "trailerVIN")]
    pub trailer_vin: String,
    /// Carrier the driver claims
    pub carrier_reported: String,
    /// Carrier on the appointment
    pub carrier_on_file: String,
    /// MC/DOT number
    pub mc_dot_number: String,
    /// Carrier insurance expiry
    pub insurance_expiry: String,
    /// Bill of lading number
    pub bol_number: String,
    /// Pickup number
    pub pickup_number: String,
    /// Destination the driver states
    pub destination_stated: String,
    /// Destination on the paperwork
    pub destination_doc: String,
    /// Freight description
    pub freight_type: String,
    /// Seal number
    pub seal_number: String,
    /// Guard decision
    pub decision: GateDecision,
    /// Guard hit the panic flag
    pub panic_alert: bool,
    /// Free-text notes
    pub comments: String,
}

/// A recorded gate event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateLogEntry {
    /// Row id
    pub id: String,
    /// `evt_` followed by a uuid
    pub event_id: String,
    /// Local date of entry
    pub date: String,
    /// Local time of entry
    pub time_in: String,
    /// Empty while the vehicle is on site
    pub time_out: String,
    /// Form contents, with the decision after escalation
    #[serde(flatten)]
    pub form: NewGateEntry,
    /// Watchlist hits and guard-recorded flags
    pub red_flag_types: Vec<String>,
    /// Any flag present
    pub is_red_flagged: bool,
    /// Minutes on site once checked out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dwell_minutes: Option<u32>,
    /// Guard who logged the entry
    pub guard_id: String,
    /// Supervisor assigned to the escalation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<String>,
    /// How the escalation went out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_channel: Option<String>,
    /// Prior incidents for this driver
    pub repeat_offender_count: u32,
}

/// Broadcast shown in the yard alert feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YardAlert {
    /// Row id
    pub id: String,
    /// When it was raised
    pub timestamp: String,
    /// Originating yard
    pub yard: String,
    /// Field that triggered it
    pub matched_field: String,
    /// Alert category
    pub red_flag_type: String,
    /// Alert text
    pub details: String,
}

impl YardAlert {
    /// True for alerts raised with the panic button
    pub fn is_emergency(&self) -> bool {
        self.red_flag_type.contains("EMERGENCY")
    }
}
