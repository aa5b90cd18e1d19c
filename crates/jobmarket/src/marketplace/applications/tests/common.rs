use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::marketplace::applications::domain::{ApplicationId, AppliedJob, SavedJob};
use crate::marketplace::applications::repository::{
    ApplicationNotice, ApplicationRepository, NotificationError, NotificationPublisher,
    SavedJobRepository,
};
use crate::marketplace::applications::service::ApplicationService;
use crate::marketplace::jobs::domain::{
    Compensation, Job, JobAddress, JobId, JobStatus, JobType, LocationMode, PayRate,
};
use crate::marketplace::jobs::filter::JobSearchFilter;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::parties::{EmployeeId, EmployerDirectory, EmployerId, EmployerProfile};
use crate::marketplace::storage::StorageError;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub(super) fn employee(id: &str) -> EmployeeId {
    EmployeeId(id.to_string())
}

pub(super) fn open_job(id: &str, employer: &str) -> Job {
    Job {
        id: JobId(id.to_string()),
        title: "Line Cook".to_string(),
        location_mode: LocationMode::OnSite,
        employer_id: EmployerId(employer.to_string()),
        address: JobAddress {
            city: "Boston".to_string(),
            area: "Back Bay".to_string(),
            pincode: "02116".to_string(),
            street_address: "12 Clarendon St".to_string(),
        },
        job_types: vec![JobType::FullTime],
        skills: Vec::new(),
        languages: Vec::new(),
        education: Vec::new(),
        compensation: Some(Compensation::Exact {
            amount: 4000,
            rate: PayRate::PerMonth,
        }),
        deadline: None,
        status: JobStatus::Open,
        posted_at: now(),
        updated_at: now(),
    }
}

#[derive(Default)]
pub(super) struct MemoryJobs {
    records: Mutex<HashMap<JobId, Job>>,
}

impl MemoryJobs {
    pub(super) fn with(jobs: Vec<Job>) -> Self {
        let map = jobs.into_iter().map(|job| (job.id.clone(), job)).collect();
        Self {
            records: Mutex::new(map),
        }
    }
}

impl JobRepository for MemoryJobs {
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

#[derive(Default)]
pub(super) struct MemoryApplications {
    records: Mutex<HashMap<ApplicationId, AppliedJob>>,
}

impl MemoryApplications {
    pub(super) fn count(&self) -> usize {
        self.records.lock().expect("application mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, application: AppliedJob) -> Result<AppliedJob, StorageError> {
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

#[derive(Default)]
pub(super) struct MemorySavedJobs {
    records: Mutex<Vec<SavedJob>>,
}

impl SavedJobRepository for MemorySavedJobs {
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

#[derive(Default)]
pub(super) struct MemoryEmployers {
    profiles: Mutex<HashMap<EmployerId, EmployerProfile>>,
}

impl MemoryEmployers {
    pub(super) fn with(profiles: Vec<EmployerProfile>) -> Self {
        let map = profiles
            .into_iter()
            .map(|profile| (profile.employer_id.clone(), profile))
            .collect();
        Self {
            profiles: Mutex::new(map),
        }
    }
}

impl EmployerDirectory for MemoryEmployers {
    fn fetch(&self, id: &EmployerId) -> Result<Option<EmployerProfile>, StorageError> {
        let guard = self.profiles.lock().expect("employer mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<EmployerProfile>, StorageError> {
        let guard = self.profiles.lock().expect("employer mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifications {
    events: Mutex<Vec<ApplicationNotice>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<ApplicationNotice> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notice);
        Ok(())
    }
}

/// Notification double standing in for a dead e-mail transport.
pub(super) struct DeadLetterNotifications;

impl NotificationPublisher for DeadLetterNotifications {
    fn publish(&self, _notice: ApplicationNotice) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

pub(super) fn employer_profile(id: &str, name: &str) -> EmployerProfile {
    EmployerProfile {
        employer_id: EmployerId(id.to_string()),
        company_name: name.to_string(),
    }
}

pub(super) type MemoryService = ApplicationService<
    MemoryApplications,
    MemorySavedJobs,
    MemoryJobs,
    MemoryEmployers,
    MemoryNotifications,
>;

pub(super) fn build_service(
    jobs: Vec<Job>,
    employers: Vec<EmployerProfile>,
) -> (
    MemoryService,
    Arc<MemoryApplications>,
    Arc<MemoryNotifications>,
) {
    let applications = Arc::new(MemoryApplications::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = ApplicationService::new(
        applications.clone(),
        Arc::new(MemorySavedJobs::default()),
        Arc::new(MemoryJobs::with(jobs)),
        Arc::new(MemoryEmployers::with(employers)),
        notifications.clone(),
    );
    (service, applications, notifications)
}

pub(super) fn harbor_world() -> (MemoryService, Arc<MemoryApplications>, Arc<MemoryNotifications>)
{
    build_service(
        vec![open_job("job-1", "org-1")],
        vec![employer_profile("org-1", "Harbor Cafe")],
    )
}
