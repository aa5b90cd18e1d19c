use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::marketplace::jobs::domain::{JobId, JobStatus};
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::parties::{EmployeeId, EmployerDirectory, EmployerId};
use crate::marketplace::storage::StorageError;

use super::domain::{
    ApplicationId, ApplicationStatus, ApplicationStatusCounts, AppliedJob, SavedJob,
};
use super::repository::{
    ApplicationNotice, ApplicationRepository, NotificationPublisher, SavedJobRepository,
};

/// Service composing application storage, bookmarks, the job table, the
/// employer directory, and the notification hook.
pub struct ApplicationService<A, S, J, E, N> {
    applications: Arc<A>,
    saved: Arc<S>,
    jobs: Arc<J>,
    employers: Arc<E>,
    notifications: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<A, S, J, E, N> ApplicationService<A, S, J, E, N>
where
    A: ApplicationRepository + 'static,
    S: SavedJobRepository + 'static,
    J: JobRepository + 'static,
    E: EmployerDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(
        applications: Arc<A>,
        saved: Arc<S>,
        jobs: Arc<J>,
        employers: Arc<E>,
        notifications: Arc<N>,
    ) -> Self {
        Self {
            applications,
            saved,
            jobs,
            employers,
            notifications,
        }
    }

    /// Apply to an Open job, snapshotting the job title and company name
    /// onto the record. The repository insert is what actually guarantees
    /// one application per employee and job.
    pub fn apply(
        &self,
        employee: &EmployeeId,
        job_id: &JobId,
        now: DateTime<Utc>,
    ) -> Result<AppliedJob, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;
        if job.status != JobStatus::Open {
            return Err(ApplicationServiceError::JobNotOpen);
        }

        let company_name = self
            .employers
            .fetch(&job.employer_id)?
            .ok_or(ApplicationServiceError::EmployerNotFound)?
            .company_name;

        let record = AppliedJob {
            id: next_application_id(),
            employee_id: employee.clone(),
            job_id: job_id.clone(),
            employee_status: None,
            employer_status: ApplicationStatus::Applied,
            applied_at: now,
            job_title: job.title.clone(),
            company_name,
        };

        let stored = self.applications.insert(record).map_err(|error| match error {
            StorageError::Conflict => ApplicationServiceError::AlreadyApplied,
            other => ApplicationServiceError::Storage(other),
        })?;

        // The application is already durable; a dead notification transport
        // must not undo it.
        let notice = ApplicationNotice {
            application_id: stored.id.clone(),
            employer_id: job.employer_id.clone(),
            job_title: stored.job_title.clone(),
        };
        if let Err(error) = self.notifications.publish(notice) {
            warn!(application_id = %stored.id.0, %error, "failed to publish application notice");
        }

        Ok(stored)
    }

    /// The employee's self-reported track; any enum value is accepted.
    pub fn update_employee_status(
        &self,
        employee: &EmployeeId,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<AppliedJob, ApplicationServiceError> {
        let mut record = self
            .applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;
        if &record.employee_id != employee {
            return Err(ApplicationServiceError::NotApplicant);
        }

        record.employee_status = Some(status);
        self.applications.update(record.clone())?;
        Ok(record)
    }

    /// The employer's track; the caller must own the job the application
    /// points at.
    pub fn update_employer_status(
        &self,
        employer: &EmployerId,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<AppliedJob, ApplicationServiceError> {
        let mut record = self
            .applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;

        let job = self
            .jobs
            .fetch(&record.job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;
        if &job.employer_id != employer {
            return Err(ApplicationServiceError::NotJobOwner);
        }

        record.employer_status = status;
        self.applications.update(record.clone())?;
        Ok(record)
    }

    /// Hard-delete the application. A second withdraw reports not-found.
    pub fn withdraw(
        &self,
        employee: &EmployeeId,
        id: &ApplicationId,
    ) -> Result<(), ApplicationServiceError> {
        let record = self
            .applications
            .fetch(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;
        if &record.employee_id != employee {
            return Err(ApplicationServiceError::NotApplicant);
        }

        self.applications.delete(id).map_err(|error| match error {
            StorageError::NotFound => ApplicationServiceError::ApplicationNotFound,
            other => ApplicationServiceError::Storage(other),
        })
    }

    pub fn applications_for(
        &self,
        employee: &EmployeeId,
    ) -> Result<Vec<AppliedJob>, ApplicationServiceError> {
        Ok(self.applications.for_employee(employee)?)
    }

    /// Applicants for one posting, visible only to the posting's owner.
    pub fn applicants_for_job(
        &self,
        employer: &EmployerId,
        job_id: &JobId,
    ) -> Result<Vec<AppliedJob>, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;
        if &job.employer_id != employer {
            return Err(ApplicationServiceError::NotJobOwner);
        }

        Ok(self.applications.for_job(job_id)?)
    }

    /// Employer-side roll-up of application counts across all postings.
    pub fn status_counts_for_employer(
        &self,
        employer: &EmployerId,
    ) -> Result<ApplicationStatusCounts, ApplicationServiceError> {
        let mut counts = ApplicationStatusCounts::default();
        for job in self.jobs.for_employer(employer)? {
            for application in self.applications.for_job(&job.id)? {
                counts.record(application.employer_status);
            }
        }
        Ok(counts)
    }

    /// Bookmark a job; duplicate bookmarks are rejected.
    pub fn save_job(
        &self,
        employee: &EmployeeId,
        job_id: &JobId,
        now: DateTime<Utc>,
    ) -> Result<SavedJob, ApplicationServiceError> {
        if self.jobs.fetch(job_id)?.is_none() {
            return Err(ApplicationServiceError::JobNotFound);
        }

        let saved = SavedJob {
            employee_id: employee.clone(),
            job_id: job_id.clone(),
            saved_at: now,
        };
        self.saved.insert(saved).map_err(|error| match error {
            StorageError::Conflict => ApplicationServiceError::AlreadySaved,
            other => ApplicationServiceError::Storage(other),
        })
    }

    pub fn unsave_job(
        &self,
        employee: &EmployeeId,
        job_id: &JobId,
    ) -> Result<(), ApplicationServiceError> {
        self.saved.delete(employee, job_id).map_err(|error| match error {
            StorageError::NotFound => ApplicationServiceError::SavedJobNotFound,
            other => ApplicationServiceError::Storage(other),
        })
    }

    pub fn saved_jobs_for(
        &self,
        employee: &EmployeeId,
    ) -> Result<Vec<SavedJob>, ApplicationServiceError> {
        Ok(self.saved.for_employee(employee)?)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("job not found")]
    JobNotFound,
    #[error("job is not accepting applications")]
    JobNotOpen,
    #[error("employer not found")]
    EmployerNotFound,
    #[error("application not found")]
    ApplicationNotFound,
    #[error("an application for this job already exists")]
    AlreadyApplied,
    #[error("application does not belong to this employee")]
    NotApplicant,
    #[error("application does not belong to a job owned by this employer")]
    NotJobOwner,
    #[error("job already saved")]
    AlreadySaved,
    #[error("saved job not found")]
    SavedJobNotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
