use crate::marketplace::parties::EmployerId;
use crate::marketplace::storage::StorageError;

use super::domain::{Review, ReviewId};

/// Storage abstraction over reviews.
///
/// `insert` must enforce the one-review-per-(employee, employer) constraint
/// inside its critical section and report duplicates as `Conflict`.
pub trait ReviewRepository: Send + Sync {
    fn insert(&self, review: Review) -> Result<Review, StorageError>;
    fn delete(&self, id: &ReviewId) -> Result<(), StorageError>;
    fn for_employer(&self, employer: &EmployerId) -> Result<Vec<Review>, StorageError>;
}
