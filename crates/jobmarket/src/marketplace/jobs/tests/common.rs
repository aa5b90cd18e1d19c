use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::marketplace::jobs::domain::{
    Compensation, Job, JobAddress, JobId, JobStatus, JobType, LocationMode, PayRate,
};
use crate::marketplace::jobs::filter::JobSearchFilter;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::jobs::service::JobBoardService;
use crate::marketplace::parties::{EmployeeId, EmployerDirectory, EmployerId, EmployerProfile};
use crate::marketplace::reviews::domain::{Review, ReviewId};
use crate::marketplace::reviews::repository::ReviewRepository;
use crate::marketplace::storage::StorageError;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
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
        job_types: vec![JobType::FullTime, JobType::Permanent],
        skills: vec!["Grilling".to_string(), "Food safety".to_string()],
        languages: vec!["English".to_string()],
        education: vec!["High school".to_string()],
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

pub(super) fn review(id: &str, employee: &str, employer: &str, rating: f64) -> Review {
    Review {
        id: ReviewId(id.to_string()),
        employee_id: EmployeeId(employee.to_string()),
        employer_id: EmployerId(employer.to_string()),
        comment: "steady shifts".to_string(),
        rating,
        description: String::new(),
        created_at: now(),
    }
}

#[derive(Default)]
pub(super) struct MemoryJobs {
    pub(super) records: Mutex<HashMap<JobId, Job>>,
}

impl MemoryJobs {
    pub(super) fn with(jobs: Vec<Job>) -> Self {
        let map = jobs.into_iter().map(|job| (job.id.clone(), job)).collect();
        Self {
            records: Mutex::new(map),
        }
    }

    pub(super) fn status_of(&self, id: &JobId) -> Option<JobStatus> {
        let guard = self.records.lock().expect("job mutex poisoned");
        guard.get(id).map(|job| job.status)
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

/// Repository double whose status writes fail for one designated job, so
/// sweep tests can show the batch continuing past a bad row.
pub(super) struct StuckRowJobs {
    pub(super) inner: MemoryJobs,
    pub(super) stuck: JobId,
}

impl JobRepository for StuckRowJobs {
    fn insert(&self, job: Job) -> Result<Job, StorageError> {
        self.inner.insert(job)
    }

    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError> {
        self.inner.fetch(id)
    }

    fn search(
        &self,
        filter: &JobSearchFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Job>, StorageError> {
        self.inner.search(filter, now)
    }

    fn for_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, StorageError> {
        self.inner.for_employer(employer)
    }

    fn expired_open(&self, now: DateTime<Utc>) -> Result<Vec<Job>, StorageError> {
        self.inner.expired_open(now)
    }

    fn set_status(
        &self,
        id: &JobId,
        status: JobStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        if id == &self.stuck {
            return Err(StorageError::Unavailable("row lock timeout".to_string()));
        }
        self.inner.set_status(id, status, updated_at)
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
        let mut profiles: Vec<EmployerProfile> = guard.values().cloned().collect();
        profiles.sort_by(|a, b| a.employer_id.0.cmp(&b.employer_id.0));
        Ok(profiles)
    }
}

#[derive(Default)]
pub(super) struct MemoryReviews {
    records: Mutex<Vec<Review>>,
}

impl MemoryReviews {
    pub(super) fn with(reviews: Vec<Review>) -> Self {
        Self {
            records: Mutex::new(reviews),
        }
    }
}

impl ReviewRepository for MemoryReviews {
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

pub(super) fn employer(id: &str, name: &str) -> EmployerProfile {
    EmployerProfile {
        employer_id: EmployerId(id.to_string()),
        company_name: name.to_string(),
    }
}

pub(super) fn board_with(
    jobs: Vec<Job>,
    employers: Vec<EmployerProfile>,
    reviews: Vec<Review>,
) -> (
    JobBoardService<MemoryJobs, MemoryEmployers, MemoryReviews>,
    Arc<MemoryJobs>,
) {
    let jobs = Arc::new(MemoryJobs::with(jobs));
    let service = JobBoardService::new(
        jobs.clone(),
        Arc::new(MemoryEmployers::with(employers)),
        Arc::new(MemoryReviews::with(reviews)),
    );
    (service, jobs)
}
