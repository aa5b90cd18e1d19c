use chrono::{DateTime, Utc};

use crate::marketplace::parties::EmployerId;
use crate::marketplace::storage::StorageError;

use super::domain::{Job, JobId, JobStatus};
use super::filter::JobSearchFilter;

/// Storage abstraction over the job table.
///
/// `search` receives the whole criteria bag so a database-backed
/// implementation can push the predicates down; the in-memory tier applies
/// [`JobSearchFilter::matches`] row by row. Writers touch single rows, never
/// ranges, so implementations only need row-level locking.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: Job) -> Result<Job, StorageError>;
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, StorageError>;
    fn search(&self, filter: &JobSearchFilter, now: DateTime<Utc>)
        -> Result<Vec<Job>, StorageError>;
    fn for_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, StorageError>;
    /// Every Open job whose deadline is at or before `now`.
    fn expired_open(&self, now: DateTime<Utc>) -> Result<Vec<Job>, StorageError>;
    fn set_status(
        &self,
        id: &JobId,
        status: JobStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}
