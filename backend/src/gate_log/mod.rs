//! Gate log
//!
//! Session log of vehicles entering one yard. New entries are checked against
//! a static watchlist; flagged ones are escalated.

pub mod entry;
pub mod red_flags;
pub mod yards;

pub use entry::{GateDecision, GateLogEntry, NewGateEntry, YardAlert};
pub use red_flags::{RedFlagAssessment, RedFlagDatabase, RedFlagType};
pub use yards::{find_yard, NetworkTotals, YardStatus, YardSummary, KNOWN_YARDS};

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

/// Guard id stamped on entries made at this terminal
pub const CURRENT_GUARD_ID: &str = "G-Current-001";
/// Supervisor assigned to flagged entries
pub const ESCALATION_SUPERVISOR_ID: &str = "S-Manager-001";
/// Channel used when the panic flag is set on an entry
pub const PANIC_ESCALATION_CHANNEL: &str = "SMS + Teams + Email";

/// Display name of a yard id
pub fn yard_name(yard_id: &str) -> &'static str {
    find_yard(yard_id).map_or("Unknown Yard", |yard| yard.name)
}

/// Entries and alerts for one yard
#[derive(Debug, Clone)]
pub struct GateLog {
    yard_id: String,
    database: RedFlagDatabase,
    entries: Vec<GateLogEntry>,
    alerts: Vec<YardAlert>,
}

impl GateLog {
    /// Empty log using the default watchlist
    pub fn new(yard_id: impl Into<String>) -> Self {
        Self::with_database(yard_id, RedFlagDatabase::default())
    }

    /// Empty log using a custom watchlist
    pub fn with_database(yard_id: impl Into<String>, database: RedFlagDatabase) -> Self {
        Self {
            yard_id: yard_id.into(),
            database,
            entries: Vec::new(),
            alerts: Vec::new(),
        }
    }

    /// Log pre-filled with demo traffic and regional alerts
    pub fn with_sample_entries(yard_id: impl Into<String>) -> Self {
        let mut log = Self::new(yard_id);
        log.entries = sample_entries();
        log.alerts = sample_alerts();
        log
    }

    /// Yard this log belongs to
    pub fn yard_id(&self) -> &str {
        &self.yard_id
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[GateLogEntry] {
        &self.entries
    }

    /// Alerts, newest first
    pub fn alerts(&self) -> &[YardAlert] {
        &self.alerts
    }

    /// Watchlist in use
    pub fn database(&self) -> &RedFlagDatabase {
        &self.database
    }

    /// Number of flagged entries
    pub fn flagged_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_red_flagged).count()
    }

    /// Record a new entry and return it
    pub fn add_entry(&mut self, form: NewGateEntry) -> &GateLogEntry {
        let assessment = self.database.check(&form);
        let now = Local::now();

        let mut form = form;
        if assessment.is_red_flagged && form.decision == GateDecision::Cleared {
            form.decision = GateDecision::Escalated;
        }

        let entry = GateLogEntry {
            id: now.timestamp_millis().to_string(),
            event_id: format!("evt_{}", Uuid::new_v4().simple()),
            date: now.format("%m/%d/%Y").to_string(),
            time_in: now.format("%H:%M").to_string(),
            time_out: String::new(),
            red_flag_types: assessment
                .red_flag_types
                .iter()
                .map(|t| t.to_string())
                .collect(),
            is_red_flagged: assessment.is_red_flagged,
            dwell_minutes: None,
            guard_id: CURRENT_GUARD_ID.to_string(),
            supervisor_id: assessment
                .is_red_flagged
                .then(|| ESCALATION_SUPERVISOR_ID.to_string()),
            escalation_channel: form
                .panic_alert
                .then(|| PANIC_ESCALATION_CHANNEL.to_string()),
            repeat_offender_count: 0,
            form,
        };

        if entry.is_red_flagged {
            warn!(
                yard = %self.yard_id,
                event_id = %entry.event_id,
                flags = ?entry.red_flag_types,
                "red-flagged gate entry"
            );
        } else {
            info!(yard = %self.yard_id, event_id = %entry.event_id, "gate entry recorded");
        }

        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Broadcast a panic alert; blank messages are ignored
    pub fn broadcast_panic(&mut self, message: &str) -> Option<&YardAlert> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let now = Local::now();
        let alert = YardAlert {
            id: format!("local-panic-{}", now.timestamp_millis()),
            timestamp: now.format("%m/%d/%Y, %H:%M:%S").to_string(),
            yard: format!("Current Yard - {}", yard_name(&self.yard_id)),
            matched_field: "PANIC BUTTON".to_string(),
            red_flag_type: "EMERGENCY BROADCAST".to_string(),
            details: message.to_string(),
        };
        warn!(yard = %self.yard_id, details = message, "panic alert broadcast");

        self.alerts.insert(0, alert);
        self.alerts.first()
    }
}

fn sample_entries() -> Vec<GateLogEntry> {
    let date = Local::now().format("%m/%d/%Y").to_string();
    let event = |n: u32| format!("evt_sample_{n}");

    vec![
        GateLogEntry {
            id: "1".into(),
            event_id: event(1),
            date: date.clone(),
            time_in: "08:15".into(),
            time_out: "08:45".into(),
            form: NewGateEntry {
                driver_name: "Robert Johnson".into(),
                driver_dl: "CA12345678".into(),
                dl_state: "CA".into(),
                dl_expiry: "2025-06-15".into(),
                tractor_plate: "CA4567".into(),
                tractor_plate_state: "CA".into(),
                tractor_vin: "1HGBH41JXMN109186".into(),
                trailer_plate: "TR5678".into(),
                trailer_vin: "1HTMKADN43H561298".into(),
                carrier_reported: "Swift Transportation".into(),
                carrier_on_file: "Swift Transportation".into(),
                mc_dot_number: "MC-123456".into(),
                insurance_expiry: "2024-12-31".into(),
                bol_number: "BOL-2024-0789".into(),
                pickup_number: "PU-456789".into(),
                destination_stated: "Los Angeles, CA".into(),
                destination_doc: "Los Angeles, CA".into(),
                freight_type: "Electronics".into(),
                seal_number: "SEAL-987654".into(),
                decision: GateDecision::Cleared,
                panic_alert: false,
                comments: "Regular driver, no issues".into(),
            },
            red_flag_types: Vec::new(),
            is_red_flagged: false,
            dwell_minutes: Some(30),
            guard_id: "G-Smith-042".into(),
            supervisor_id: None,
            escalation_channel: None,
            repeat_offender_count: 0,
        },
        GateLogEntry {
            id: "2".into(),
            event_id: event(2),
            date: date.clone(),
            time_in: "09:30".into(),
            time_out: String::new(),
            form: NewGateEntry {
                driver_name: "John Doe".into(),
                driver_dl: "TX98765432".into(),
                dl_state: "TX".into(),
                dl_expiry: "2023-03-15".into(),
                tractor_plate: "ABC123".into(),
                tractor_plate_state: "NV".into(),
                tractor_vin: "2HGFG12688H573945".into(),
                trailer_plate: "TR12345".into(),
                trailer_vin: "3HTMKADN43H561777".into(),
                carrier_reported: "Blacklisted Carrier Inc".into(),
                carrier_on_file: "Unknown".into(),
                mc_dot_number: "MC-INVALID".into(),
                insurance_expiry: "2023-01-01".into(),
                bol_number: "FAKE-BOL-123".into(),
                pickup_number: "NO-PICKUP".into(),
                destination_stated: "Phoenix, AZ".into(),
                destination_doc: "Las Vegas, NV".into(),
                freight_type: "High Value Electronics".into(),
                seal_number: "TAMPERED".into(),
                decision: GateDecision::Escalated,
                panic_alert: true,
                comments: "Multiple red flags! Driver previously denied at Long Beach facility. Law enforcement notified.".into(),
            },
            red_flag_types: [
                "Expired DL",
                "Flagged Plate",
                "Blacklisted Carrier",
                "Insurance Expired",
                "Destination Mismatch",
                "No Valid Pickup",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            is_red_flagged: true,
            dwell_minutes: None,
            guard_id: "G-Jones-023".into(),
            supervisor_id: Some("S-Wilson-001".into()),
            escalation_channel: Some(PANIC_ESCALATION_CHANNEL.into()),
            repeat_offender_count: 3,
        },
        GateLogEntry {
            id: "3".into(),
            event_id: event(3),
            date,
            time_in: "10:15".into(),
            time_out: "10:35".into(),
            form: NewGateEntry {
                driver_name: "Maria Rodriguez".into(),
                driver_dl: "CA87654321".into(),
                dl_state: "CA".into(),
                dl_expiry: "2026-09-20".into(),
                tractor_plate: "CA8899".into(),
                tractor_plate_state: "CA".into(),
                tractor_vin: "3HGBH41JXMN109222".into(),
                trailer_plate: "TR9988".into(),
                trailer_vin: "4HTMKADN43H561333".into(),
                carrier_reported: "FedEx".into(),
                carrier_on_file: "FedEx".into(),
                mc_dot_number: "MC-789012".into(),
                insurance_expiry: "2025-03-15".into(),
                bol_number: "BOL-2024-1122".into(),
                pickup_number: "PU-778899".into(),
                destination_stated: "San Diego, CA".into(),
                destination_doc: "San Diego, CA".into(),
                freight_type: "Medical Supplies".into(),
                seal_number: "SEAL-445566".into(),
                decision: GateDecision::Cleared,
                panic_alert: false,
                comments: "Scheduled delivery, all documents verified".into(),
            },
            red_flag_types: Vec::new(),
            is_red_flagged: false,
            dwell_minutes: Some(20),
            guard_id: "G-Thompson-015".into(),
            supervisor_id: None,
            escalation_channel: None,
            repeat_offender_count: 0,
        },
    ]
}

fn sample_alerts() -> Vec<YardAlert> {
    let alert = |id: &str, timestamp: &str, yard: &str, field: &str, kind: &str, details: &str| YardAlert {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        yard: yard.to_string(),
        matched_field: field.to_string(),
        red_flag_type: kind.to_string(),
        details: details.to_string(),
    };

    vec![
        alert(
            "1",
            "2024-01-20 15:05",
            "Current Yard",
            "Multiple Fields",
            "High Risk Entry",
            "Driver John Doe with plate ABC123 and Blacklisted Carrier Inc - ENTRY ESCALATED",
        ),
        alert(
            "2",
            "2024-01-20 14:32",
            "Amazon - ONT2 Facility",
            "Insurance",
            "Expired Coverage",
            "Carrier insurance expired 30 days ago - Entry denied, carrier notified",
        ),
        alert(
            "3",
            "2024-01-20 13:45",
            "XPO - Vernon DC",
            "Driver CDL",
            "License Mismatch",
            "Driver using CDL reported stolen in Arizona - LAPD contacted",
        ),
        alert(
            "4",
            "2024-01-20 12:15",
            "Walmart DC - Torrance",
            "Destination",
            "Route Deviation",
            "BOL shows Phoenix destination but driver claims Los Angeles - Load inspection required",
        ),
        alert(
            "5",
            "2024-01-20 11:00",
            "Target RDC - Carson",
            "Seal",
            "Tampered Seal",
            "Seal number doesn't match manifest, evidence of tampering - Full inspection initiated",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yard_names() {
        assert_eq!(yard_name("nfi-long-beach-01"), "NFI - Long Beach 01");
        assert_eq!(yard_name("nfi-camden-17"), "NFI - Camden 17");
        assert_eq!(yard_name("elsewhere"), "Unknown Yard");
    }

    #[test]
    fn test_flagged_cleared_entry_is_escalated() {
        let mut log = GateLog::new("nfi-camden-17");
        let entry = log.add_entry(NewGateEntry {
            driver_name: "Mike Smith".into(),
            ..Default::default()
        });
        assert!(entry.is_red_flagged);
        assert_eq!(entry.form.decision, GateDecision::Escalated);
        assert_eq!(entry.supervisor_id.as_deref(), Some(ESCALATION_SUPERVISOR_ID));
        assert_eq!(entry.red_flag_types, vec!["Flagged Driver".to_string()]);
        assert!(entry.event_id.starts_with("evt_"));
    }

    #[test]
    fn test_denied_stays_denied() {
        let mut log = GateLog::new("nfi-camden-17");
        let entry = log.add_entry(NewGateEntry {
            tractor_plate: "stolen1".into(),
            decision: GateDecision::Denied,
            ..Default::default()
        });
        assert_eq!(entry.form.decision, GateDecision::Denied);
    }

    #[test]
    fn test_clean_entry_untouched() {
        let mut log = GateLog::new("nfi-camden-17");
        let entry = log.add_entry(NewGateEntry {
            driver_name: "Robert Johnson".into(),
            panic_alert: true,
            ..Default::default()
        });
        assert!(!entry.is_red_flagged);
        assert_eq!(entry.form.decision, GateDecision::Cleared);
        assert_eq!(entry.supervisor_id, None);
        assert_eq!(entry.guard_id, CURRENT_GUARD_ID);
        assert_eq!(entry.escalation_channel.as_deref(), Some(PANIC_ESCALATION_CHANNEL));
    }

    #[test]
    fn test_entries_are_prepended() {
        let mut log = GateLog::with_sample_entries("nfi-long-beach-01");
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.flagged_count(), 1);

        log.add_entry(NewGateEntry {
            driver_name: "Newest".into(),
            ..Default::default()
        });
        assert_eq!(log.entries().len(), 4);
        assert_eq!(log.entries()[0].form.driver_name, "Newest");
    }

    #[test]
    fn test_panic_broadcast() {
        let mut log = GateLog::new("nfi-long-beach-01");
        assert!(log.broadcast_panic("   ").is_none());
        assert!(log.alerts().is_empty());

        let alert = log.broadcast_panic("Gate rammed").unwrap();
        assert_eq!(alert.yard, "Current Yard - NFI - Long Beach 01");
        assert_eq!(alert.matched_field, "PANIC BUTTON");
        assert!(alert.is_emergency());
        assert_eq!(alert.details, "Gate rammed");
    }

    #[test]
    fn test_entry_wire_format() {
        let log = GateLog::with_sample_entries("nfi-long-beach-01");
        let json = serde_json::to_value(&log.entries()[1]).unwrap();
        assert_eq!(json["driverName"], "John Doe");
        assert_eq!(json["decision"], "Escalated");
        assert_eq!(json["isRedFlagged"], true);
        assert_eq!(json["driverDL"], "TX98765432");
    }
}
