//! Employer reviews and the reputation roll-ups attached to search results.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    star_bucket, RatingHistogram, RatingSummary, Review, ReviewDraft, ReviewId,
    ReviewValidationError,
};
pub use repository::ReviewRepository;
pub use router::review_router;
pub use service::{EmployerListing, EmployerReviewReport, ReviewService, ReviewServiceError};
