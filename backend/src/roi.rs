//! ROI calculators for the marketplace products
//!
//! Both calculators are closed-form estimates over four form fields.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Cost assumed per AMR unit
pub const ROBOT_UNIT_COST: u64 = 125_000;
/// Yearly WMS licence per user
pub const WMS_LICENSE_PER_USER: f64 = 1_800.0;
/// Cost assumed per avoided picking error
pub const COST_PER_ERROR: f64 = 25.0;
/// Largest value any calculator field accepts
pub const MAX_FIELD_VALUE: f64 = 1_000_000_000_000.0;

/// How a form field is allowed to be typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Digits only
    Integer,
    /// Digits with at most one decimal point
    Decimal,
}

/// Parse one calculator form field
pub fn parse_field(name: &str, text: &str, kind: FieldKind) -> Result<f64, AppError> {
    let text = text.trim();
    let invalid = || AppError::InvalidInput(format!("{name}: {text:?}"));

    let well_formed = match kind {
        FieldKind::Integer => !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()),
        FieldKind::Decimal => {
            text.bytes().any(|b| b.is_ascii_digit())
                && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
                && text.bytes().filter(|b| *b == b'.').count() <= 1
        }
    };
    if !well_formed {
        return Err(invalid());
    }
    let value = text.parse::<f64>().map_err(|_| invalid())?;
    if value > MAX_FIELD_VALUE {
        return Err(AppError::InvalidInput(format!(
            "{name} must not exceed {MAX_FIELD_VALUE}"
        )));
    }
    Ok(value)
}

/// Locus AMR sizing input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmrRoiInput {
    /// Orders picked per day
    pub daily_order_volume: u64,
    /// Picks per hour per worker today
    pub current_pick_rate: u64,
    /// Square feet; collected but not used by the estimate
    pub warehouse_size: u64,
    /// Pickers on staff
    pub current_headcount: u64,
}

/// Locus AMR estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmrRoiEstimate {
    /// Robots to cover volume with headroom
    pub robots_needed: u64,
    /// Percent
    pub pick_rate_increase: u64,
    /// Picks per hour with robots
    pub new_pick_rate: u64,
    /// Yearly labour savings
    pub labor_savings: u64,
    /// Months to payback
    pub payback_months: u64,
    /// Percent
    pub productivity_gain: u64,
    /// Fewer pickers needed
    pub reduced_labor_needs: u64,
    /// Yearly savings
    pub annual_savings: u64,
    /// Robot purchase cost
    pub total_investment: u64,
}

impl AmrRoiInput {
    /// Parse the four form fields
    pub fn from_form(volume: &str, pick_rate: &str, size: &str, headcount: &str) -> Result<Self, AppError> {
        Ok(Self {
            daily_order_volume: parse_field("dailyOrderVolume", volume, FieldKind::Integer)? as u64,
            current_pick_rate: parse_field("currentPickRate", pick_rate, FieldKind::Integer)? as u64,
            warehouse_size: parse_field("warehouseSize", size, FieldKind::Integer)? as u64,
            current_headcount: parse_field("currentHeadcount", headcount, FieldKind::Integer)? as u64,
        })
    }

    /// Run the estimate
    pub fn estimate(&self) -> Result<AmrRoiEstimate, AppError> {
        if self.current_pick_rate == 0 {
            return Err(AppError::InvalidInput(
                "currentPickRate must be greater than zero".to_string(),
            ));
        }

        let volume = self.daily_order_volume as f64;
        let pick_rate = self.current_pick_rate as f64;
        let headcount = self.current_headcount as f64;

        let robots_needed = (volume * 1.3 / 1200.0).ceil() as u64;
        let new_pick_rate = (pick_rate * 1.4).round() as u64;
        let labor_savings = (headcount * 45_000.0 * 0.3).round() as u64;
        let productivity_gain =
            ((new_pick_rate as f64 - pick_rate) / pick_rate * 100.0).round() as u64;
        let total_investment = robots_needed.checked_mul(ROBOT_UNIT_COST).ok_or_else(|| {
            AppError::InvalidInput("dailyOrderVolume is too large to estimate".to_string())
        })?;

        Ok(AmrRoiEstimate {
            robots_needed,
            pick_rate_increase: 40,
            new_pick_rate,
            labor_savings,
            payback_months: 18,
            productivity_gain,
            reduced_labor_needs: (headcount * 0.3).round() as u64,
            annual_savings: labor_savings,
            total_investment,
        })
    }
}

/// Logiwa WMS input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmsRoiInput {
    /// Orders shipped per day
    pub daily_order_volume: u64,
    /// Percent of orders with an error today
    pub current_error_rate: f64,
    /// WMS seats
    pub number_of_users: u64,
    /// Yearly cost per user
    pub avg_labor_cost: f64,
}

/// Logiwa WMS estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmsRoiEstimate {
    /// Percent
    pub productivity_increase: u64,
    /// Percentage points removed from the error rate
    pub error_reduction: f64,
    /// Error rate after rollout
    pub new_error_rate: f64,
    /// Yearly labour savings
    pub labor_savings: u64,
    /// Percent
    pub roi: i64,
    /// Months to payback
    pub payback_months: u64,
    /// Yearly licence cost
    pub total_license_cost: f64,
    /// Errors avoided per year
    pub error_reduction_count: u64,
    /// Weekly hours saved
    pub time_savings_hours: u64,
    /// Labour savings plus avoided error cost
    pub total_annual_savings: f64,
}

impl WmsRoiInput {
    /// Parse the four form fields
    pub fn from_form(volume: &str, error_rate: &str, users: &str, labor_cost: &str) -> Result<Self, AppError> {
        Ok(Self {
            daily_order_volume: parse_field("dailyOrderVolume", volume, FieldKind::Integer)? as u64,
            current_error_rate: parse_field("currentErrorRate", error_rate, FieldKind::Decimal)?,
            number_of_users: parse_field("numberOfUsers", users, FieldKind::Integer)? as u64,
            avg_labor_cost: parse_field("avgLaborCost", labor_cost, FieldKind::Decimal)?,
        })
    }

    /// Run the estimate
    pub fn estimate(&self) -> Result<WmsRoiEstimate, AppError> {
        if self.number_of_users == 0 {
            return Err(AppError::InvalidInput(
                "numberOfUsers must be greater than zero".to_string(),
            ));
        }

        let users = self.number_of_users as f64;
        let error_reduction = self.current_error_rate * 0.6;
        let labor_savings = (users * self.avg_labor_cost * 0.15).round();
        let total_license_cost = users * WMS_LICENSE_PER_USER;
        let annual_orders = self.daily_order_volume as f64 * 365.0;
        let error_reduction_count = (annual_orders * error_reduction / 100.0).round();

        Ok(WmsRoiEstimate {
            productivity_increase: 15,
            error_reduction,
            new_error_rate: self.current_error_rate - error_reduction,
            labor_savings: labor_savings as u64,
            roi: (labor_savings / total_license_cost * 100.0).round() as i64,
            payback_months: 12,
            total_license_cost,
            error_reduction_count: error_reduction_count as u64,
            time_savings_hours: (users * 40.0 * 0.15).round() as u64,
            total_annual_savings: labor_savings + error_reduction_count * COST_PER_ERROR,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amr_estimate() {
        let estimate = AmrRoiInput::from_form("5000", "100", "250000", "40")
            .unwrap()
            .estimate()
            .unwrap();
        assert_eq!(estimate.robots_needed, 6);
        assert_eq!(estimate.new_pick_rate, 140);
        assert_eq!(estimate.labor_savings, 540_000);
        assert_eq!(estimate.productivity_gain, 40);
        assert_eq!(estimate.reduced_labor_needs, 12);
        assert_eq!(estimate.total_investment, 750_000);
        assert_eq!(estimate.payback_months, 18);
    }

    #[test]
    fn test_amr_zero_pick_rate() {
        let input = AmrRoiInput::from_form("5000", "0", "1", "4").unwrap();
        assert!(matches!(input.estimate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_wms_estimate() {
        let estimate = WmsRoiInput::from_form("1000", "2.5", "10", "50000")
            .unwrap()
            .estimate()
            .unwrap();
        assert_eq!(estimate.labor_savings, 75_000);
        assert_eq!(estimate.total_license_cost, 18_000.0);
        assert_eq!(estimate.roi, 417);
        assert!((estimate.error_reduction - 1.5).abs() < 1e-9);
        assert_eq!(estimate.error_reduction_count, 5475);
        assert_eq!(estimate.time_savings_hours, 60);
        assert_eq!(estimate.total_annual_savings, 75_000.0 + 5475.0 * 25.0);
    }

    #[test]
    fn test_wms_zero_users() {
        let input = WmsRoiInput::from_form("1000", "2", "0", "50000").unwrap();
        assert!(input.estimate().is_err());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("n", "42", FieldKind::Integer).unwrap(), 42.0);
        assert_eq!(parse_field("r", "2.5", FieldKind::Decimal).unwrap(), 2.5);
        assert_eq!(parse_field("r", ".5", FieldKind::Decimal).unwrap(), 0.5);
        assert!(parse_field("n", "4.2", FieldKind::Integer).is_err());
        assert!(parse_field("n", "", FieldKind::Integer).is_err());
        assert!(parse_field("r", ".", FieldKind::Decimal).is_err());
        assert!(parse_field("r", "1.2.3", FieldKind::Decimal).is_err());
        assert!(parse_field("r", "-1", FieldKind::Decimal).is_err());
        assert!(parse_field("n", "1000000000000", FieldKind::Integer).is_ok());
        assert!(parse_field("n", "1000000000001", FieldKind::Integer).is_err());
    }

    #[test]
    fn test_oversized_volume_rejected() {
        let amr = AmrRoiInput::from_form("99999999999999999999999", "100", "1", "4");
        assert!(matches!(amr, Err(AppError::InvalidInput(_))));

        let wms = WmsRoiInput::from_form("99999999999999999999999", "2", "10", "50000");
        assert!(matches!(wms, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_investment_overflow_is_invalid_input() {
        let input = AmrRoiInput {
            daily_order_volume: u64::MAX,
            current_pick_rate: 100,
            warehouse_size: 1,
            current_headcount: 4,
        };
        assert!(matches!(input.estimate(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_largest_accepted_volume_estimates() {
        let estimate = AmrRoiInput::from_form("1000000000000", "100", "1", "4")
            .unwrap()
            .estimate()
            .unwrap();
        assert_eq!(estimate.robots_needed, 1_083_333_334);
    }
}
