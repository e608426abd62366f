//! Yard network overview
//!
//! Static catalogue of the yards a guard terminal can open, plus the
//! network-wide totals shown above the yard list.

use serde::Serialize;

/// Average minutes a truck spends on site, network-wide
pub const AVG_DWELL_MINUTES: u32 = 24;

/// Whether a yard is currently monitored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YardStatus {
    /// Gate log in use
    Active,
    /// Not monitored
    Inactive,
}

/// One yard in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YardSummary {
    /// Yard id, as used by `GateLog`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// City and state
    pub location: &'static str,
    /// Entries ever recorded
    pub total_entries: u32,
    /// Entries recorded today
    pub today_entries: u32,
    /// Red-flag events on record
    pub red_flag_events: u32,
    /// Monitoring state
    pub status: YardStatus,
}

/// Every yard the terminal knows about
pub static KNOWN_YARDS: [YardSummary; 2] = [
    YardSummary {
        id: "nfi-long-beach-01",
        name: "NFI - Long Beach 01",
        location: "Long Beach, CA",
        total_entries: 12_479,
        today_entries: 127,
        red_flag_events: 14,
        status: YardStatus::Active,
    },
    YardSummary {
        id: "nfi-camden-17",
        name: "NFI - Camden 17",
        location: "Camden, NJ",
        total_entries: 8_924,
        today_entries: 89,
        red_flag_events: 7,
        status: YardStatus::Active,
    },
];

/// Look up a known yard
pub fn find_yard(yard_id: &str) -> Option<&'static YardSummary> {
    KNOWN_YARDS.iter().find(|y| y.id == yard_id)
}

/// Totals across a set of yards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTotals {
    /// Number of yards
    pub total_yards: usize,
    /// Entries that raised no red flag
    pub good_actors: u32,
    /// Red-flag events
    pub red_flags: u32,
    /// Minutes per truck
    pub avg_dwell_minutes: u32,
}

impl NetworkTotals {
    /// Sum over `yards`
    pub fn from_yards(yards: &[YardSummary]) -> Self {
        Self {
            total_yards: yards.len(),
            good_actors: yards
                .iter()
                .map(|y| y.total_entries.saturating_sub(y.red_flag_events))
                .sum(),
            red_flags: yards.iter().map(|y| y.red_flag_events).sum(),
            avg_dwell_minutes: AVG_DWELL_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_totals() {
        let totals = NetworkTotals::from_yards(&KNOWN_YARDS);
        assert_eq!(totals.total_yards, 2);
        assert_eq!(totals.good_actors, 12_479 - 14 + 8_924 - 7);
        assert_eq!(totals.red_flags, 21);
        assert_eq!(totals.avg_dwell_minutes, 24);
    }

    #[test]
    fn test_find_yard() {
        assert_eq!(find_yard("nfi-camden-17").map(|y| y.location), Some("Camden, NJ"));
        assert!(find_yard("nfi-nowhere").is_none());
    }

    #[test]
    fn test_empty_network() {
        let totals = NetworkTotals::from_yards(&[]);
        assert_eq!(totals.total_yards, 0);
        assert_eq!(totals.red_flags, 0);
    }
}
