/// Error enumeration shared by every storage seam in the marketplace.
///
/// Uniqueness constraints (one application per employee and job, one review
/// per employee and employer, one bookmark per pair) are enforced inside the
/// implementation's critical section and reported as `Conflict`, so two
/// concurrent inserts can never both succeed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
