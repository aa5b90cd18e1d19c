//! Application intake, the two independent status tracks, and saved-job
//! bookmarks.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationStatus, ApplicationStatusCounts, AppliedJob, SavedJob,
};
pub use repository::{
    ApplicationNotice, ApplicationRepository, NotificationError, NotificationPublisher,
    SavedJobRepository,
};
pub use router::{application_router, ApplicationView};
pub use service::{ApplicationService, ApplicationServiceError};
