use serde::{Deserialize, Serialize};

use crate::marketplace::jobs::domain::JobId;
use crate::marketplace::parties::{EmployeeId, EmployerId};
use crate::marketplace::storage::StorageError;

use super::domain::{ApplicationId, AppliedJob, SavedJob};

/// Storage abstraction over application records.
///
/// `insert` must enforce the one-application-per-(employee, job) constraint
/// inside its own critical section and report a duplicate as
/// `StorageError::Conflict`; the service's existence checks alone cannot
/// close the race between two concurrent applies.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: AppliedJob) -> Result<AppliedJob, StorageError>;
    fn update(&self, application: AppliedJob) -> Result<(), StorageError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<AppliedJob>, StorageError>;
    fn delete(&self, id: &ApplicationId) -> Result<(), StorageError>;
    fn for_employee(&self, employee: &EmployeeId) -> Result<Vec<AppliedJob>, StorageError>;
    fn for_job(&self, job: &JobId) -> Result<Vec<AppliedJob>, StorageError>;
}

/// Storage abstraction over saved-job bookmarks, keyed by the pair.
pub trait SavedJobRepository: Send + Sync {
    fn insert(&self, saved: SavedJob) -> Result<SavedJob, StorageError>;
    fn delete(&self, employee: &EmployeeId, job: &JobId) -> Result<(), StorageError>;
    fn for_employee(&self, employee: &EmployeeId) -> Result<Vec<SavedJob>, StorageError>;
}

/// Trait describing the outbound notification hook; e-mail delivery lives
/// behind it as an external collaborator.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: ApplicationNotice) -> Result<(), NotificationError>;
}

/// Payload handed to the notification transport when an application lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationNotice {
    pub application_id: ApplicationId,
    pub employer_id: EmployerId,
    pub job_title: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
