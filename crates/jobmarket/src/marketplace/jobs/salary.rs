//! Central-tendency statistics over a page of normalized pay values.

use serde::Serialize;

use super::compensation::{
    MONTHS_PER_YEAR, WEEKS_PER_YEAR, WORKING_DAYS_PER_YEAR, WORKING_HOURS_PER_YEAR,
};

/// A representative salary projected into every quoting period, rounded to
/// two decimal places for responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalaryBreakdown {
    pub yearly: f64,
    pub monthly: f64,
    pub weekly: f64,
    pub daily: f64,
    pub hourly: f64,
}

impl SalaryBreakdown {
    pub const ZERO: Self = Self {
        yearly: 0.0,
        monthly: 0.0,
        weekly: 0.0,
        daily: 0.0,
        hourly: 0.0,
    };

    /// Build the breakdown from the monthly equivalents of a result page.
    ///
    /// The page median is used rather than the mean so a single outlier
    /// posting cannot dominate the page-local statistic. An empty page
    /// yields all zeros, never NaN.
    pub fn from_monthly_values(mut values: Vec<f64>) -> Self {
        if values.is_empty() {
            return Self::ZERO;
        }

        values.sort_by(f64::total_cmp);
        let monthly = median_of_sorted(&values);
        let yearly = monthly * MONTHS_PER_YEAR;

        Self {
            yearly: round2(yearly),
            monthly: round2(monthly),
            weekly: round2(yearly / WEEKS_PER_YEAR),
            daily: round2(yearly / WORKING_DAYS_PER_YEAR),
            hourly: round2(yearly / WORKING_HOURS_PER_YEAR),
        }
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
