use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use jobmarket::marketplace::applications::{
    ApplicationId, ApplicationNotice, ApplicationRepository, AppliedJob, NotificationError,
    NotificationPublisher, SavedJob, SavedJobRepository,
};
use jobmarket::marketplace::jobs::{Job, JobId, JobRepository, JobSearchFilter, JobStatus};
use jobmarket::marketplace::parties::{
    EmployeeId, EmployerDirectory, EmployerId, EmployerProfile,
};
use jobmarket::marketplace::reviews::{Review, ReviewId, ReviewRepository};
use jobmarket::marketplace::storage::StorageError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    records: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: Job) -> Result<Job, StorageError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn search(
        &self,
        filter: &JobSearchFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Job>, StorageError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| filter.matches(job, now))
            .cloned()
            .collect())
    }

    fn for_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, StorageError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| &job.employer_id == employer)
            .cloned()
            .collect())
    }

    fn expired_open(&self, now: DateTime<Utc>) -> Result<Vec<Job>, StorageError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard
            .values()
            .filter(|job| job.status == JobStatus::Open && job.deadline_elapsed(now))
            .cloned()
            .collect())
    }

    fn set_status(
        &self,
        id: &JobId,
        status: JobStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("job mutex poisoned");
        match guard.get_mut(id) {
            Some(job) => {
                job.status = status;
                job.updated_at = updated_at;
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, AppliedJob>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: AppliedJob) -> Result<AppliedJob, StorageError> {
        // The pair uniqueness check and the insert share one lock scope, so
        // two racing applies cannot both pass the check.
        let mut guard = self.records.lock().expect("application mutex poisoned");
        let duplicate = guard.values().any(|existing| {
            existing.employee_id == application.employee_id
                && existing.job_id == application.job_id
        });
        if duplicate {
            return Err(StorageError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: AppliedJob) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if !guard.contains_key(&application.id) {
            return Err(StorageError::NotFound);
        }
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<AppliedJob>, StorageError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound),
        }
    }

    fn for_employee(&self, employee: &EmployeeId) -> Result<Vec<AppliedJob>, StorageError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.employee_id == employee)
            .cloned()
            .collect())
    }

    fn for_job(&self, job: &JobId) -> Result<Vec<AppliedJob>, StorageError> {
        let guard = self.records.lock().expect("application mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.job_id == job)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySavedJobRepository {
    records: Arc<Mutex<Vec<SavedJob>>>,
}

impl SavedJobRepository for InMemorySavedJobRepository {
    fn insert(&self, saved: SavedJob) -> Result<SavedJob, StorageError> {
        let mut guard = self.records.lock().expect("saved-job mutex poisoned");
        let duplicate = guard.iter().any(|existing| {
            existing.employee_id == saved.employee_id && existing.job_id == saved.job_id
        });
        if duplicate {
            return Err(StorageError::Conflict);
        }
        guard.push(saved.clone());
        Ok(saved)
    }

    fn delete(&self, employee: &EmployeeId, job: &JobId) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("saved-job mutex poisoned");
        let before = guard.len();
        guard.retain(|saved| !(&saved.employee_id == employee && &saved.job_id == job));
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    fn for_employee(&self, employee: &EmployeeId) -> Result<Vec<SavedJob>, StorageError> {
        let guard = self.records.lock().expect("saved-job mutex poisoned");
        Ok(guard
            .iter()
            .filter(|saved| &saved.employee_id == employee)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewRepository {
    records: Arc<Mutex<Vec<Review>>>,
}

impl ReviewRepository for InMemoryReviewRepository {
    fn insert(&self, review: Review) -> Result<Review, StorageError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        let duplicate = guard.iter().any(|existing| {
            existing.employee_id == review.employee_id
                && existing.employer_id == review.employer_id
        });
        if duplicate {
            return Err(StorageError::Conflict);
        }
        guard.push(review.clone());
        Ok(review)
    }

    fn delete(&self, id: &ReviewId) -> Result<(), StorageError> {
        let mut guard = self.records.lock().expect("review mutex poisoned");
        let before = guard.len();
        guard.retain(|review| &review.id != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    fn for_employer(&self, employer: &EmployerId) -> Result<Vec<Review>, StorageError> {
        let guard = self.records.lock().expect("review mutex poisoned");
        Ok(guard
            .iter()
            .filter(|review| &review.employer_id == employer)
            .cloned()
            .collect())
    }
}

/// Employer accounts live in the out-of-scope account system; this tier
/// ships with a seeded directory so postings and reviews have owners.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEmployerDirectory {
    profiles: Arc<Mutex<HashMap<EmployerId, EmployerProfile>>>,
}

impl InMemoryEmployerDirectory {
    pub(crate) fn seeded() -> Self {
        let directory = Self::default();
        let mut guard = directory
            .profiles
            .lock()
            .expect("employer mutex poisoned");
        for (id, name) in [
            ("org-harbor", "Harbor Cafe"),
            ("org-north", "North Logistics"),
            ("org-bright", "Brightpath Tutoring"),
        ] {
            let employer_id = EmployerId(id.to_string());
            guard.insert(
                employer_id.clone(),
                EmployerProfile {
                    employer_id,
                    company_name: name.to_string(),
                },
            );
        }
        drop(guard);
        directory
    }
}

impl EmployerDirectory for InMemoryEmployerDirectory {
    fn fetch(&self, id: &EmployerId) -> Result<Option<EmployerProfile>, StorageError> {
        let guard = self.profiles.lock().expect("employer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<EmployerProfile>, StorageError> {
        let guard = self.profiles.lock().expect("employer mutex poisoned");
        let mut profiles: Vec<EmployerProfile> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| a.company_name.cmp(&b.company_name));
        Ok(profiles)
    }
}

/// Notification publisher that records and logs instead of sending e-mail.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    events: Arc<Mutex<Vec<ApplicationNotice>>>,
}

impl LoggingNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<ApplicationNotice> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotificationError> {
        info!(
            application_id = %notice.application_id.0,
            employer_id = %notice.employer_id.0,
            job_title = %notice.job_title,
            "application notice"
        );
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notice);
        Ok(())
    }
}
