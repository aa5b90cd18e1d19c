use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::marketplace::parties::{EmployerDirectory, EmployerId};
use crate::marketplace::reviews::domain::RatingSummary;
use crate::marketplace::reviews::repository::ReviewRepository;
use crate::marketplace::storage::StorageError;

use super::domain::{Job, JobDraft, JobId, JobStatus, JobValidationError};
use super::filter::{JobSearchFilter, Pagination};
use super::repository::JobRepository;
use super::salary::SalaryBreakdown;

/// Service composing the job table, the employer directory, and review
/// storage into the posting and search operations.
pub struct JobBoardService<J, E, V> {
    jobs: Arc<J>,
    employers: Arc<E>,
    reviews: Arc<V>,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

/// One search result row: the posting annotated with the owning employer's
/// aggregate rating so listings can show reputation without a second trip.
#[derive(Debug, Clone, Serialize)]
pub struct JobSearchResult {
    #[serde(flatten)]
    pub job: Job,
    pub average_review_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct JobSearchPage {
    pub jobs: Vec<JobSearchResult>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// Search page plus the salary statistic computed over that page.
#[derive(Debug, Serialize)]
pub struct SalaryStatisticsPage {
    pub jobs: Vec<JobSearchResult>,
    pub total_pages: u32,
    pub current_page: u32,
    pub average_salary: SalaryBreakdown,
}

impl<J, E, V> JobBoardService<J, E, V>
where
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    V: ReviewRepository + 'static,
{
    pub fn new(jobs: Arc<J>, employers: Arc<E>, reviews: Arc<V>) -> Self {
        Self {
            jobs,
            employers,
            reviews,
        }
    }

    /// Validate and store a new posting for an existing employer.
    pub fn post_job(&self, draft: JobDraft, now: DateTime<Utc>) -> Result<Job, JobServiceError> {
        if self.employers.fetch(&draft.employer_id)?.is_none() {
            return Err(JobServiceError::EmployerNotFound);
        }

        let job = draft.into_job(next_job_id(), now)?;
        let stored = self.jobs.insert(job)?;
        Ok(stored)
    }

    /// Employer-driven Open/Paused/Closed toggle; the only other writer of
    /// job status is the deadline sweep.
    pub fn update_status(
        &self,
        employer: &EmployerId,
        id: &JobId,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> Result<(), JobServiceError> {
        let job = self.jobs.fetch(id)?.ok_or(JobServiceError::JobNotFound)?;
        if &job.employer_id != employer {
            return Err(JobServiceError::NotJobOwner);
        }

        self.jobs.set_status(id, status, now)?;
        Ok(())
    }

    /// Run the filter, order newest first, cut the requested page, and
    /// annotate each row with the employer's rating.
    pub fn search(
        &self,
        filter: &JobSearchFilter,
        pagination: Pagination,
        now: DateTime<Utc>,
    ) -> Result<JobSearchPage, JobServiceError> {
        let mut matches = self.jobs.search(filter, now)?;
        matches.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

        let pagination = pagination.normalized();
        let total_pages = pagination.total_pages(matches.len());

        let mut jobs = Vec::new();
        for job in pagination.slice(&matches) {
            let reviews = self.reviews.for_employer(&job.employer_id)?;
            let summary = RatingSummary::from_reviews(&reviews);
            jobs.push(JobSearchResult {
                job: job.clone(),
                average_review_rating: summary.average_review_rating,
            });
        }

        Ok(JobSearchPage {
            jobs,
            total_pages,
            current_page: pagination.page,
        })
    }

    /// Same filter shape as `search`, additionally carrying the median pay
    /// of the returned page projected into every quoting period.
    pub fn salary_statistics(
        &self,
        filter: &JobSearchFilter,
        pagination: Pagination,
        now: DateTime<Utc>,
    ) -> Result<SalaryStatisticsPage, JobServiceError> {
        let page = self.search(filter, pagination, now)?;
        let values = page
            .jobs
            .iter()
            .filter_map(|row| row.job.monthly_pay())
            .collect();

        Ok(SalaryStatisticsPage {
            average_salary: SalaryBreakdown::from_monthly_values(values),
            jobs: page.jobs,
            total_pages: page.total_pages,
            current_page: page.current_page,
        })
    }
}

/// Error raised by the job board service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error(transparent)]
    Validation(#[from] JobValidationError),
    #[error("employer not found")]
    EmployerNotFound,
    #[error("job not found")]
    JobNotFound,
    #[error("job does not belong to this employer")]
    NotJobOwner,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
