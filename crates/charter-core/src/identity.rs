//! # Procedure Identifiers
//!
//! Each procedural record gets a random identifier at creation so audit
//! tooling can correlate a history digest with the procedure it belongs to.
//! Two records for identical subjects are still distinct procedures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of one procedural record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcedureId(Uuid);

impl ProcedureId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one loaded from an audit log.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProcedureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "procedure:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(ProcedureId::new(), ProcedureId::new());
    }

    #[test]
    fn test_display_prefix() {
        let id = ProcedureId::from_uuid(Uuid::nil());
        assert_eq!(
            id.to_string(),
            "procedure:00000000-0000-0000-0000-000000000000"
        );
    }
}
