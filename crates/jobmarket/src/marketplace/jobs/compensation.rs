//! Pay normalization across heterogeneous compensation descriptors.
//!
//! Postings quote pay as an exact amount or a range, in one of four rate
//! units. Comparisons and aggregation all run over a single monthly
//! equivalent. Two conventions for the unit constants exist in the wild;
//! this module uses the 40-hour convention throughout: 1 year = 12 months =
//! 52 weeks = 260 working days = 2080 working hours. The same constants feed
//! the salary breakdown so a statistic never mixes conventions.

use super::domain::{Compensation, PayRate};

pub(crate) const MONTHS_PER_YEAR: f64 = 12.0;
pub(crate) const WEEKS_PER_YEAR: f64 = 52.0;
pub(crate) const WORKING_DAYS_PER_YEAR: f64 = 260.0;
pub(crate) const WORKING_HOURS_PER_YEAR: f64 = 2080.0;

/// Convert a pay descriptor into one comparable monthly figure.
///
/// A range is represented by its midpoint. Returns `None` when the
/// descriptor carries no usable amount (zero pay), so such postings are
/// excluded from aggregation instead of dragging it to zero.
pub fn monthly_equivalent(compensation: &Compensation) -> Option<f64> {
    let (representative, rate) = match compensation {
        Compensation::Exact { amount, rate } => (f64::from(*amount), *rate),
        Compensation::Range {
            minimum,
            maximum,
            rate,
        } => ((f64::from(*minimum) + f64::from(*maximum)) / 2.0, *rate),
    };

    if representative <= 0.0 {
        return None;
    }

    let monthly = match rate {
        PayRate::PerHour => representative * WORKING_HOURS_PER_YEAR / MONTHS_PER_YEAR,
        PayRate::PerDay => representative * WORKING_DAYS_PER_YEAR / MONTHS_PER_YEAR,
        PayRate::PerMonth => representative,
        PayRate::PerYear => representative / MONTHS_PER_YEAR,
    };

    Some(monthly)
}
