//! Posting, multi-criteria search, compensation statistics, and the
//! deadline-driven lifecycle of jobs.

pub mod compensation;
pub mod domain;
pub mod filter;
pub mod repository;
pub mod router;
pub mod salary;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Compensation, DeadlineFlag, Job, JobAddress, JobDraft, JobId, JobStatus, JobType,
    JobValidationError, LocationMode, PayKind, PayRate,
};
pub use filter::{DatePostedWindow, JobSearchFilter, Pagination};
pub use repository::JobRepository;
pub use router::job_router;
pub use salary::SalaryBreakdown;
pub use scheduler::{close_expired, DeadlineSweeper, SweepSummary};
pub use service::{
    JobBoardService, JobSearchPage, JobSearchResult, JobServiceError, SalaryStatisticsPage,
};
