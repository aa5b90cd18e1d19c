use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::parties::EmployeeId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Progress of an application, tracked separately by each side. The wire
/// labels match what both parties see in their dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    #[serde(rename = "Offer received")]
    OfferReceived,
    Hired,
    #[serde(rename = "Not selected by employer")]
    NotSelectedByEmployer,
    #[serde(rename = "No longer interested")]
    NoLongerInterested,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::OfferReceived => "Offer received",
            Self::Hired => "Hired",
            Self::NotSelectedByEmployer => "Not selected by employer",
            Self::NoLongerInterested => "No longer interested",
        }
    }

    pub const fn all() -> [Self; 6] {
        [
            Self::Applied,
            Self::Interviewing,
            Self::OfferReceived,
            Self::Hired,
            Self::NotSelectedByEmployer,
            Self::NoLongerInterested,
        ]
    }
}

/// An employee's application to a job.
///
/// The two status fields are deliberately independent: the employer's track
/// starts at `Applied` while the employee's starts unset, and neither update
/// path cross-validates against the other. The job title and company name
/// are snapshotted at apply time so the record stays meaningful if the
/// posting is later edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedJob {
    pub id: ApplicationId,
    pub employee_id: EmployeeId,
    pub job_id: JobId,
    pub employee_status: Option<ApplicationStatus>,
    pub employer_status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub job_title: String,
    pub company_name: String,
}

impl AppliedJob {
    /// Reconcile the two tracks for display without constraining either: an
    /// employee withdrawal-in-place wins, otherwise the employer's track is
    /// authoritative and an unset employee track falls back to it.
    pub fn effective_status(&self) -> ApplicationStatus {
        match self.employee_status {
            Some(ApplicationStatus::NoLongerInterested) => ApplicationStatus::NoLongerInterested,
            _ => self.employer_status,
        }
    }
}

/// A bookmark relation between an employee and a job; no status of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedJob {
    pub employee_id: EmployeeId,
    pub job_id: JobId,
    pub saved_at: DateTime<Utc>,
}

/// Per-status application counts across an employer's postings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApplicationStatusCounts {
    pub applied: usize,
    pub interviewing: usize,
    pub offer_received: usize,
    pub hired: usize,
    pub not_selected_by_employer: usize,
    pub no_longer_interested: usize,
}

impl ApplicationStatusCounts {
    pub fn record(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Interviewing => self.interviewing += 1,
            ApplicationStatus::OfferReceived => self.offer_received += 1,
            ApplicationStatus::Hired => self.hired += 1,
            ApplicationStatus::NotSelectedByEmployer => self.not_selected_by_employer += 1,
            ApplicationStatus::NoLongerInterested => self.no_longer_interested += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.applied
            + self.interviewing
            + self.offer_received
            + self.hired
            + self.not_selected_by_employer
            + self.no_longer_interested
    }
}
