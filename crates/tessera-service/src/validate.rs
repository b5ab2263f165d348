//! Tenant context validation shared by the service constructors.

use tessera_core::{TenantContext, TesseraError, TesseraResult};
use tessera_repository::{BusinessDao, StaffDao};

/// Checks that the context's business exists in the tenant registry.
pub(crate) async fn validate_business(
    dao: &dyn BusinessDao,
    ctx: &TenantContext,
) -> TesseraResult<()> {
    if dao.get(ctx.business_id()).await?.is_none() {
        return Err(TesseraError::invalid_reference(
            "business",
            ctx.business_id(),
        ));
    }
    Ok(())
}

/// Checks that the context's staff member exists, when one is set.
pub(crate) async fn validate_staff(dao: &dyn StaffDao, ctx: &TenantContext) -> TesseraResult<()> {
    if let Some(staff_id) = ctx.staff_id() {
        if dao.get(staff_id).await?.is_none() {
            return Err(TesseraError::invalid_reference("staff", staff_id));
        }
    }
    Ok(())
}
