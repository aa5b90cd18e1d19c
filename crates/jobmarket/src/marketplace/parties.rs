use serde::{Deserialize, Serialize};

use super::storage::StorageError;

/// Identifier wrapper for employee accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for employer accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployerId(pub String);

/// The slice of an employer account the engine needs: enough to snapshot a
/// company name onto applications and to label review roll-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerProfile {
    pub employer_id: EmployerId,
    pub company_name: String,
}

/// Read-only lookup into the employer accounts owned by the (out of scope)
/// account-management system.
pub trait EmployerDirectory: Send + Sync {
    fn fetch(&self, id: &EmployerId) -> Result<Option<EmployerProfile>, StorageError>;
    fn list(&self) -> Result<Vec<EmployerProfile>, StorageError>;
}
