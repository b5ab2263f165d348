//! Reports service.

use crate::validate::validate_business;
use async_trait::async_trait;
use std::sync::Arc;
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tessera_repository::{BusinessDao, ReportsDao};
use tracing::debug;

/// Reports service trait.
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Builds the per-staff, per-day attendance summary.
    async fn attendance_summary(&self, query: &ListQuery) -> TesseraResult<ListResult>;
}

/// Reports service implementation.
pub struct ReportsServiceImpl {
    dao: Arc<dyn ReportsDao>,
    ctx: TenantContext,
}

impl ReportsServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn ReportsDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl ReportsService for ReportsServiceImpl {
    async fn attendance_summary(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!(
            "Building attendance summary for business {}",
            self.ctx.business_id()
        );
        self.dao.attendance_summary(query).await
    }
}

impl std::fmt::Debug for ReportsServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportsServiceImpl").finish_non_exhaustive()
    }
}
