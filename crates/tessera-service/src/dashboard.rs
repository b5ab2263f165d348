//! Dashboard service.

use crate::validate::validate_business;
use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;
use tessera_core::{TenantContext, TesseraResult};
use tessera_repository::{BusinessDao, DashboardDao};
use tracing::debug;

/// Dashboard service trait.
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Returns leave counts for the dashboard.
    async fn dashboard_data(&self) -> TesseraResult<Document>;
}

/// Dashboard service implementation.
pub struct DashboardServiceImpl {
    dao: Arc<dyn DashboardDao>,
    ctx: TenantContext,
}

impl DashboardServiceImpl {
    /// Creates the service after validating the tenant context.
    pub async fn new(
        dao: Arc<dyn DashboardDao>,
        business_dao: Arc<dyn BusinessDao>,
        ctx: TenantContext,
    ) -> TesseraResult<Self> {
        validate_business(business_dao.as_ref(), &ctx).await?;
        Ok(Self { dao, ctx })
    }
}

#[async_trait]
impl DashboardService for DashboardServiceImpl {
    async fn dashboard_data(&self) -> TesseraResult<Document> {
        debug!(
            "Collecting dashboard data for business {}",
            self.ctx.business_id()
        );
        self.dao.dashboard_data().await
    }
}

impl std::fmt::Debug for DashboardServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{business_dao_with, StubDashboardDao};
    use bson::doc;

    #[tokio::test]
    async fn test_dashboard_delegates_to_dao() {
        let dao = Arc::new(StubDashboardDao {
            data: doc! {
                "total_leave": 4_i64,
                "leave": 1_i64,
                "permission": 2_i64,
                "sick_leave": 1_i64,
                "casual_leave": 0_i64,
            },
        });

        let service = DashboardServiceImpl::new(
            dao,
            business_dao_with(&["business003"]),
            TenantContext::new("business003").unwrap(),
        )
        .await
        .unwrap();

        let data = service.dashboard_data().await.unwrap();
        assert_eq!(data.get_i64("total_leave").unwrap(), 4);
        assert_eq!(data.get_i64("permission").unwrap(), 2);
    }
}
