use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::marketplace::jobs::domain::Job;
use crate::marketplace::jobs::repository::JobRepository;
use crate::marketplace::parties::{EmployerDirectory, EmployerId, EmployerProfile};
use crate::marketplace::storage::StorageError;

use super::domain::{
    RatingHistogram, RatingSummary, Review, ReviewDraft, ReviewId, ReviewValidationError,
};
use super::repository::ReviewRepository;

/// Service composing review storage, the employer directory, and the job
/// table into the review and reputation operations.
pub struct ReviewService<V, E, J> {
    reviews: Arc<V>,
    employers: Arc<E>,
    jobs: Arc<J>,
}

static REVIEW_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_review_id() -> ReviewId {
    let id = REVIEW_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReviewId(format!("review-{id:06}"))
}

/// Directory row: the employer plus its aggregate reputation.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerListing {
    pub employer_id: EmployerId,
    pub company_name: String,
    #[serde(flatten)]
    pub summary: RatingSummary,
}

/// Everything the employer detail view needs in one trip: the reviews, the
/// roll-ups over them, and the employer's own postings.
#[derive(Debug, Serialize)]
pub struct EmployerReviewReport {
    pub employer: EmployerProfile,
    pub reviews: Vec<Review>,
    #[serde(flatten)]
    pub summary: RatingSummary,
    pub histogram: RatingHistogram,
    pub jobs: Vec<Job>,
}

impl<V, E, J> ReviewService<V, E, J>
where
    V: ReviewRepository + 'static,
    E: EmployerDirectory + 'static,
    J: JobRepository + 'static,
{
    pub fn new(reviews: Arc<V>, employers: Arc<E>, jobs: Arc<J>) -> Self {
        Self {
            reviews,
            employers,
            jobs,
        }
    }

    /// Validate and store a review; one per employee and employer.
    pub fn add_review(
        &self,
        draft: ReviewDraft,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewServiceError> {
        if self.employers.fetch(&draft.employer_id)?.is_none() {
            return Err(ReviewServiceError::EmployerNotFound);
        }

        let review = draft.into_review(next_review_id(), now)?;
        self.reviews.insert(review).map_err(|error| match error {
            StorageError::Conflict => ReviewServiceError::DuplicateReview,
            other => ReviewServiceError::Storage(other),
        })
    }

    pub fn delete_review(&self, id: &ReviewId) -> Result<(), ReviewServiceError> {
        self.reviews.delete(id).map_err(|error| match error {
            StorageError::NotFound => ReviewServiceError::ReviewNotFound,
            other => ReviewServiceError::Storage(other),
        })
    }

    /// All employers with their rating summaries, optionally narrowed by a
    /// case-insensitive company-name fragment.
    pub fn directory(
        &self,
        company_name: Option<&str>,
    ) -> Result<Vec<EmployerListing>, ReviewServiceError> {
        let needle = company_name
            .map(str::trim)
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_lowercase);

        let mut listings = Vec::new();
        for employer in self.employers.list()? {
            if let Some(fragment) = &needle {
                if !employer.company_name.to_lowercase().contains(fragment) {
                    continue;
                }
            }

            let reviews = self.reviews.for_employer(&employer.employer_id)?;
            listings.push(EmployerListing {
                employer_id: employer.employer_id,
                company_name: employer.company_name,
                summary: RatingSummary::from_reviews(&reviews),
            });
        }

        Ok(listings)
    }

    /// The employer detail view: reviews, roll-ups, and the employer's jobs.
    pub fn employer_detail(
        &self,
        employer_id: &EmployerId,
    ) -> Result<EmployerReviewReport, ReviewServiceError> {
        let employer = self
            .employers
            .fetch(employer_id)?
            .ok_or(ReviewServiceError::EmployerNotFound)?;

        let reviews = self.reviews.for_employer(employer_id)?;
        let summary = RatingSummary::from_reviews(&reviews);
        let histogram = RatingHistogram::from_reviews(&reviews);
        let jobs = self.jobs.for_employer(employer_id)?;

        Ok(EmployerReviewReport {
            employer,
            reviews,
            summary,
            histogram,
            jobs,
        })
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Validation(#[from] ReviewValidationError),
    #[error("employer not found")]
    EmployerNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("a review for this employer already exists")]
    DuplicateReview,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
