//! Tenant context carried by every service.

use crate::{TesseraError, TesseraResult};
use serde::{Deserialize, Serialize};

/// Tenant scope for all data access.
///
/// Every operation is isolated to a single business; some services
/// additionally narrow their scope to one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    business_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    staff_id: Option<String>,
}

impl TenantContext {
    /// Creates a context scoped to a business.
    pub fn new(business_id: impl Into<String>) -> TesseraResult<Self> {
        let business_id = business_id.into();
        if business_id.trim().is_empty() {
            return Err(TesseraError::validation("business id must not be empty"));
        }
        Ok(Self {
            business_id,
            staff_id: None,
        })
    }

    /// Narrows the context to a single staff member.
    #[must_use]
    pub fn with_staff(mut self, staff_id: impl Into<String>) -> Self {
        let staff_id = staff_id.into();
        if !staff_id.trim().is_empty() {
            self.staff_id = Some(staff_id);
        }
        self
    }

    /// Returns the business identifier.
    #[must_use]
    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    /// Returns the staff identifier, if the context is staff-scoped.
    #[must_use]
    pub fn staff_id(&self) -> Option<&str> {
        self.staff_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_business_id() {
        assert!(TenantContext::new("").is_err());
        assert!(TenantContext::new("   ").is_err());
    }

    #[test]
    fn test_business_scope() {
        let ctx = TenantContext::new("business003").unwrap();
        assert_eq!(ctx.business_id(), "business003");
        assert!(ctx.staff_id().is_none());
    }

    #[test]
    fn test_staff_scope() {
        let ctx = TenantContext::new("business003")
            .unwrap()
            .with_staff("stf001");
        assert_eq!(ctx.staff_id(), Some("stf001"));
    }

    #[test]
    fn test_blank_staff_id_is_ignored() {
        let ctx = TenantContext::new("business003").unwrap().with_staff("  ");
        assert!(ctx.staff_id().is_none());
    }
}
