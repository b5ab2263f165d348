//! Dashboard DAO (MongoDB).

use crate::dao::DashboardDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common;
use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{TenantContext, TesseraResult};
use tracing::debug;

/// Leave types broken out on the dashboard.
const LEAVE_TYPES: [(&str, &str); 4] = [
    ("leave", "Leave"),
    ("permission", "Permission"),
    ("sick_leave", "sick Leave"),
    ("casual_leave", "Casual Leave"),
];

/// MongoDB dashboard DAO.
#[derive(Debug, Clone)]
pub struct MongoDashboardDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoDashboardDao {
    /// Creates a dashboard DAO scoped to the given tenant (and staff
    /// member, when the context carries one).
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_LEAVES)
    }
}

#[async_trait]
impl DashboardDao for MongoDashboardDao {
    async fn dashboard_data(&self) -> TesseraResult<Document> {
        debug!(
            "Collecting dashboard data for business {}",
            self.ctx.business_id()
        );

        let collection = self.collection();
        let scope = common::staff_scope(Document::new(), &self.ctx);

        let total_leave = collection.count_documents(scope.clone()).await?;

        let mut data = doc! { "total_leave": total_leave as i64 };
        for (key, leave_type) in LEAVE_TYPES {
            let mut filter = scope.clone();
            filter.insert(fields::LEAVE_TYPE, leave_type);
            let count = collection.count_documents(filter).await?;
            data.insert(key, count as i64);
        }

        Ok(data)
    }
}
