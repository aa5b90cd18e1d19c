//! Conjunctive composition of the optional search criteria, plus pagination.
//!
//! Every supplied criterion must hold for a job to match. Malformed values
//! inside a well-typed request degrade permissively per criterion: an
//! unrecognized `date_posted` or `job_type` disables that criterion, blank
//! text criteria and zero pay bounds are ignored.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::domain::{Job, JobStatus, JobType};

/// Relative posted-within window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePostedWindow {
    Last14Hours,
    Last3Days,
    Last7Days,
    Last14Days,
}

impl DatePostedWindow {
    /// Lenient wire-value lookup; anything unrecognized applies no filter.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "last 14 hours" => Some(Self::Last14Hours),
            "last 3 days" => Some(Self::Last3Days),
            "last 7 days" => Some(Self::Last7Days),
            "last 14 days" => Some(Self::Last14Days),
            _ => None,
        }
    }

    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Last14Hours => now - Duration::hours(14),
            Self::Last3Days => now - Duration::days(3),
            Self::Last7Days => now - Duration::days(7),
            Self::Last14Days => now - Duration::days(14),
        }
    }
}

/// The open, all-optional criteria bag for employee-facing search.
///
/// `city` and `location` are aliases for the same address field; both may be
/// supplied and each must then match. `unexpired_only` additionally hides
/// postings whose deadline has already passed but which the sweep has not
/// closed yet; by default visibility follows `status` alone, so such
/// postings stay visible until the next sweep tick.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchFilter {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_location: Option<String>,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub min_pay: Option<f64>,
    #[serde(default)]
    pub max_pay: Option<f64>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub unexpired_only: bool,
}

impl JobSearchFilter {
    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        if job.status != JobStatus::Open {
            return false;
        }

        if self.unexpired_only && job.deadline_elapsed(now) {
            return false;
        }

        if !substring_matches(&self.job_title, &job.title) {
            return false;
        }
        if !substring_matches(&self.city, &job.address.city) {
            return false;
        }
        if !substring_matches(&self.location, &job.address.city) {
            return false;
        }
        if !substring_matches(&self.job_location, job.location_mode.label()) {
            return false;
        }

        if let Some(window) = self.date_posted.as_deref().and_then(DatePostedWindow::parse) {
            if job.posted_at < window.cutoff(now) {
                return false;
            }
        }

        let min = self.min_pay.filter(|bound| *bound > 0.0);
        let max = self.max_pay.filter(|bound| *bound > 0.0);
        if min.is_some() || max.is_some() {
            let Some(pay) = job.monthly_pay() else {
                // An unvalued posting cannot satisfy a pay-bounded search.
                return false;
            };
            if min.is_some_and(|bound| pay < bound) {
                return false;
            }
            if max.is_some_and(|bound| pay > bound) {
                return false;
            }
        }

        if let Some(wanted) = self.job_type.as_deref().and_then(JobType::parse) {
            if !job.job_types.contains(&wanted) {
                return false;
            }
        }

        if !set_contains(&self.skills, &job.skills) {
            return false;
        }
        if !set_contains(&self.education, &job.education) {
            return false;
        }
        if !set_contains(&self.language, &job.languages) {
            return false;
        }

        true
    }
}

fn substring_matches(criterion: &Option<String>, value: &str) -> bool {
    match criterion.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn set_contains(criterion: &Option<String>, tags: &[String]) -> bool {
    match criterion.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(wanted) => tags.iter().any(|tag| tag.trim().eq_ignore_ascii_case(wanted)),
        None => true,
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// One-indexed page selector with the original defaults.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Clamp zero page/limit values up to one so the offset math stays sane.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }

    pub fn total_pages(self, total: usize) -> u32 {
        let limit = self.limit.max(1) as usize;
        total.div_ceil(limit) as u32
    }

    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let limit = self.limit.max(1) as usize;
        let offset = (self.page.max(1) as usize - 1).saturating_mul(limit);
        if offset >= items.len() {
            return &[];
        }
        let end = (offset + limit).min(items.len());
        &items[offset..end]
    }
}
