use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::parties::EmployerId;

use super::compensation;

/// Identifier wrapper for posted jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Lifecycle status of a posting. `Open` is the only state visible to
/// employee-facing search; the deadline sweep moves Open postings to Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Paused,
    Closed,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Paused => "Paused",
            Self::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationMode {
    #[serde(rename = "On-site")]
    OnSite,
    Remote,
}

impl LocationMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::OnSite => "On-site",
            Self::Remote => "Remote",
        }
    }
}

/// Employment-arrangement tags a posting can carry; a job may advertise
/// several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    Permanent,
    Fresher,
    #[serde(rename = "Part-time")]
    PartTime,
    Internship,
    Temporary,
    Freelance,
    Volunteer,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::Permanent => "Permanent",
            Self::Fresher => "Fresher",
            Self::PartTime => "Part-time",
            Self::Internship => "Internship",
            Self::Temporary => "Temporary",
            Self::Freelance => "Freelance",
            Self::Volunteer => "Volunteer",
        }
    }

    pub const fn all() -> [Self; 8] {
        [
            Self::FullTime,
            Self::Permanent,
            Self::Fresher,
            Self::PartTime,
            Self::Internship,
            Self::Temporary,
            Self::Freelance,
            Self::Volunteer,
        ]
    }

    /// Lenient wire-value lookup used by the search filter.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::all()
            .into_iter()
            .find(|tag| tag.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Unit a pay amount is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayRate {
    #[serde(rename = "per hour")]
    PerHour,
    #[serde(rename = "per day")]
    PerDay,
    #[serde(rename = "per month")]
    PerMonth,
    #[serde(rename = "per year")]
    PerYear,
}

/// Validated pay descriptor: exactly one of the two shapes applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compensation {
    Exact {
        amount: u32,
        rate: PayRate,
    },
    Range {
        minimum: u32,
        maximum: u32,
        rate: PayRate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAddress {
    pub city: String,
    pub area: String,
    pub pincode: String,
    pub street_address: String,
}

/// A posted position. `deadline` collapses the original Yes/No flag plus
/// nullable date into one field, so "no deadline but a date present" is
/// unrepresentable here; the draft layer still validates the loose pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub location_mode: LocationMode,
    pub employer_id: EmployerId,
    pub address: JobAddress,
    pub job_types: Vec<JobType>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub education: Vec<String>,
    pub compensation: Option<Compensation>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: JobStatus,
    pub posted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// The single comparable monthly figure for this posting, if it has one.
    pub fn monthly_pay(&self) -> Option<f64> {
        self.compensation
            .as_ref()
            .and_then(compensation::monthly_equivalent)
    }

    pub fn deadline_elapsed(&self, now: DateTime<Utc>) -> bool {
        matches!(self.deadline, Some(deadline) if deadline <= now)
    }
}

/// Yes/No wire flag guarding the deadline date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineFlag {
    Yes,
    #[default]
    No,
}

/// Pay shape selector as submitted over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayKind {
    #[serde(rename = "Exact amount")]
    ExactAmount,
    Range,
}

/// Loose wire shape of a posting as submitted by an employer. `into_job`
/// checks the cross-field rules the flat shape cannot express.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub location_mode: LocationMode,
    pub employer_id: EmployerId,
    pub address: JobAddress,
    #[serde(default)]
    pub job_types: Vec<JobType>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub pay_type: Option<PayKind>,
    #[serde(default)]
    pub exact_pay: Option<u32>,
    #[serde(default)]
    pub minimum_pay: Option<u32>,
    #[serde(default)]
    pub maximum_pay: Option<u32>,
    #[serde(default)]
    pub pay_rate: Option<PayRate>,
    #[serde(default)]
    pub deadline: DeadlineFlag,
    #[serde(default)]
    pub deadline_date: Option<DateTime<Utc>>,
}

impl JobDraft {
    pub fn into_job(self, id: JobId, now: DateTime<Utc>) -> Result<Job, JobValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(JobValidationError::EmptyTitle);
        }

        let compensation = match self.pay_type {
            None => None,
            Some(PayKind::ExactAmount) => {
                let amount = self.exact_pay.ok_or(JobValidationError::MissingExactPay)?;
                let rate = self.pay_rate.ok_or(JobValidationError::MissingPayRate)?;
                Some(Compensation::Exact { amount, rate })
            }
            Some(PayKind::Range) => {
                let (minimum, maximum) = match (self.minimum_pay, self.maximum_pay) {
                    (Some(minimum), Some(maximum)) => (minimum, maximum),
                    _ => return Err(JobValidationError::MissingRangeBounds),
                };
                if minimum > maximum {
                    return Err(JobValidationError::InvertedRange { minimum, maximum });
                }
                let rate = self.pay_rate.ok_or(JobValidationError::MissingPayRate)?;
                Some(Compensation::Range {
                    minimum,
                    maximum,
                    rate,
                })
            }
        };

        let deadline = match (self.deadline, self.deadline_date) {
            (DeadlineFlag::Yes, Some(date)) => Some(date),
            (DeadlineFlag::Yes, None) => return Err(JobValidationError::MissingDeadlineDate),
            (DeadlineFlag::No, Some(_)) => return Err(JobValidationError::UnexpectedDeadlineDate),
            (DeadlineFlag::No, None) => None,
        };

        Ok(Job {
            id,
            title,
            location_mode: self.location_mode,
            employer_id: self.employer_id,
            address: self.address,
            job_types: self.job_types,
            skills: self.skills,
            languages: self.languages,
            education: self.education,
            compensation,
            deadline,
            status: JobStatus::Open,
            posted_at: now,
            updated_at: now,
        })
    }
}

/// Cross-field rules the flat wire shape cannot express.
#[derive(Debug, thiserror::Error)]
pub enum JobValidationError {
    #[error("job title must not be empty")]
    EmptyTitle,
    #[error("exact pay amount is required when pay type is 'Exact amount'")]
    MissingExactPay,
    #[error("both minimum and maximum pay are required when pay type is 'Range'")]
    MissingRangeBounds,
    #[error("minimum pay {minimum} exceeds maximum pay {maximum}")]
    InvertedRange { minimum: u32, maximum: u32 },
    #[error("a pay rate is required when pay is specified")]
    MissingPayRate,
    #[error("a deadline date is required when deadline is 'Yes'")]
    MissingDeadlineDate,
    #[error("a deadline date must not be supplied when deadline is 'No'")]
    UnexpectedDeadlineDate,
}
