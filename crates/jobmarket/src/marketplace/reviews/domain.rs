use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::parties::{EmployeeId, EmployerId};

/// Identifier wrapper for reviews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub String);

/// One employee's review of one employer. Immutable once written; the only
/// mutation is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub employee_id: EmployeeId,
    pub employer_id: EmployerId,
    pub comment: String,
    pub rating: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Loose wire shape of a review submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
    pub employee_id: EmployeeId,
    pub employer_id: EmployerId,
    pub comment: String,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

impl ReviewDraft {
    pub fn into_review(
        self,
        id: ReviewId,
        now: DateTime<Utc>,
    ) -> Result<Review, ReviewValidationError> {
        let comment = self.comment.trim().to_string();
        if comment.is_empty() {
            return Err(ReviewValidationError::EmptyComment);
        }
        if !(1.0..=5.0).contains(&self.rating) {
            return Err(ReviewValidationError::RatingOutOfRange {
                found: self.rating,
            });
        }

        Ok(Review {
            id,
            employee_id: self.employee_id,
            employer_id: self.employer_id,
            comment,
            rating: self.rating,
            description: self.description,
            created_at: now,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewValidationError {
    #[error("review comment must not be empty")]
    EmptyComment,
    #[error("rating {found} is outside the 1-5 star range")]
    RatingOutOfRange { found: f64 },
}

/// Count plus mean rating for one employer; the mean is absent rather than
/// zero when there is nothing to average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub total_review_count: usize,
    pub average_review_rating: Option<f64>,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                total_review_count: 0,
                average_review_rating: None,
            };
        }

        let sum: f64 = reviews.iter().map(|review| review.rating).sum();
        let mean = sum / reviews.len() as f64;
        Self {
            total_review_count: reviews.len(),
            average_review_rating: Some(round1(mean)),
        }
    }
}

/// Whole-star counts for the employer detail view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingHistogram {
    pub rating_count_1: usize,
    pub rating_count_2: usize,
    pub rating_count_3: usize,
    pub rating_count_4: usize,
    pub rating_count_5: usize,
}

impl RatingHistogram {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut histogram = Self::default();
        for review in reviews {
            histogram.record(review.rating);
        }
        histogram
    }

    pub fn record(&mut self, rating: f64) {
        match star_bucket(rating) {
            1 => self.rating_count_1 += 1,
            2 => self.rating_count_2 += 1,
            3 => self.rating_count_3 += 1,
            4 => self.rating_count_4 += 1,
            5 => self.rating_count_5 += 1,
            _ => {}
        }
    }
}

/// Floor the rating to a whole star, rounding half up: anything at least
/// half a star above the floor bumps to the next bucket.
pub fn star_bucket(rating: f64) -> u8 {
    let floor = rating.floor();
    let star = if rating >= floor + 0.5 { floor + 1.0 } else { floor };
    star.clamp(1.0, 5.0) as u8
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
