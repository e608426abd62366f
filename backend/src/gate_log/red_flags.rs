//! Red-flag watchlist matching

use super::entry::NewGateEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a watchlist hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedFlagType {
    /// Driver name is on the watchlist
    #[serde(rename = "Flagged Driver")]
    FlaggedDriver,
    /// Tractor plate is on the watchlist
    #[serde(rename = "Flagged Plate")]
    FlaggedPlate,
    /// Trailer plate is on the watchlist
    #[serde(rename = "Flagged Trailer")]
    FlaggedTrailer,
    /// Reported carrier is blacklisted
    #[serde(rename = "Blacklisted Carrier")]
    BlacklistedCarrier,
}

impl RedFlagType {
    /// Display label, identical to the wire form
    pub fn label(&self) -> &'static str {
        match self {
            RedFlagType::FlaggedDriver => "Flagged Driver",
            RedFlagType::FlaggedPlate => "Flagged Plate",
            RedFlagType::FlaggedTrailer => "Flagged Trailer",
            RedFlagType::BlacklistedCarrier => "Blacklisted Carrier",
        }
    }
}

impl fmt::Display for RedFlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of checking one entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagAssessment {
    /// At least one field matched
    pub is_red_flagged: bool,
    /// Matched categories in check order
    pub red_flag_types: Vec<RedFlagType>,
}

/// Static watchlist of drivers, plates and carriers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedFlagDatabase {
    /// Driver names
    pub drivers: Vec<String>,
    /// Tractor plates
    pub tractor_plates: Vec<String>,
    /// Trailer plates
    pub trailer_plates: Vec<String>,
    /// Carrier names
    pub carriers: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RedFlagDatabase {
    fn default() -> Self {
        Self {
            drivers: owned(&["john doe", "mike smith", "suspicious driver"]),
            tractor_plates: owned(&["ABC123", "XYZ789", "STOLEN1"]),
            trailer_plates: owned(&["TR12345", "TR99999"]),
            carriers: owned(&["Blacklisted Carrier Inc", "Fraud Transport LLC"]),
        }
    }
}

fn listed(list: &[String], value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && list.iter().any(|item| item.eq_ignore_ascii_case(value))
}

impl RedFlagDatabase {
    /// Compare the entry's driver, plates and carrier against the watchlist
    pub fn check(&self, entry: &NewGateEntry) -> RedFlagAssessment {
        let red_flag_types: Vec<RedFlagType> = [
            (listed(&self.drivers, &entry.driver_name), RedFlagType::FlaggedDriver),
            (listed(&self.tractor_plates, &entry.tractor_plate), RedFlagType::FlaggedPlate),
            (listed(&self.trailer_plates, &entry.trailer_plate), RedFlagType::FlaggedTrailer),
            (listed(&self.carriers, &entry.carrier_reported), RedFlagType::BlacklistedCarrier),
        ]
        .into_iter()
        .filter_map(|(hit, kind)| hit.then_some(kind))
        .collect();

        RedFlagAssessment {
            is_red_flagged: !red_flag_types.is_empty(),
            red_flag_types,
        }
    }
}
