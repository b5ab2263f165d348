//! Reports DAO (MongoDB).

use crate::dao::ReportsDao;
use crate::handle::DatabaseHandle;
use crate::mongo::common;
use crate::mongo::pipeline::{ListPipeline, LookupSpec};
use async_trait::async_trait;
use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::Collection;
use std::sync::Arc;
use tessera_core::fields::{self, coll};
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::debug;

/// MongoDB reports DAO.
///
/// The attendance summary groups clock events per staff member per
/// calendar day and enriches each group with staff, shift, and
/// work-location records.
#[derive(Debug, Clone)]
pub struct MongoReportsDao {
    handle: Arc<DatabaseHandle>,
    ctx: TenantContext,
}

impl MongoReportsDao {
    /// Creates a reports DAO scoped to the given tenant (and staff member,
    /// when the context carries one).
    #[must_use]
    pub fn new(handle: Arc<DatabaseHandle>, ctx: TenantContext) -> Self {
        Self { handle, ctx }
    }

    fn collection(&self) -> Collection<Document> {
        self.handle.collection(coll::HR_ATTENDANCES)
    }

    /// Group key: staff member + calendar day of the clock event.
    fn group_stage() -> Document {
        doc! {
            "_id": {
                fields::STAFF_ID: format!("${}", fields::STAFF_ID),
                fields::FOR_DATE: {
                    "$dateToString": {
                        "format": "%Y-%m-%d",
                        "date": format!("${}", fields::DATE_TIME),
                    }
                },
            },
            "docs": { "$push": "$$ROOT" },
        }
    }

    /// Drops audit and geolocation fields from the grouped rows.
    fn docs_projection() -> Document {
        doc! {
            "docs.created_at": 0,
            "docs.updated_at": 0,
            "docs.is_deleted": 0,
            "docs.attendance_id": 0,
            "docs.business_id": 0,
            "docs.latitude": 0,
            "docs.longitude": 0,
        }
    }

    fn lookups() -> [LookupSpec; 3] {
        [
            LookupSpec::new(
                coll::APP_USERS,
                "_id.staff_id",
                fields::APP_USER_ID,
                fields::STAFF_INFO,
            )
            .hide(fields::APP_USER_PASSWORD),
            LookupSpec::new(
                coll::HR_SHIFTS,
                "docs.type_of_work",
                fields::SHIFT_ID,
                fields::SHIFT_INFO,
            ),
            LookupSpec::new(
                coll::HR_WORK_LOCATIONS,
                "docs.work_location",
                fields::WORK_LOCATION_ID,
                fields::WORK_LOCATION_INFO,
            ),
        ]
    }
}

#[async_trait]
impl ReportsDao for MongoReportsDao {
    async fn attendance_summary(&self, query: &ListQuery) -> TesseraResult<ListResult> {
        debug!(
            "Building attendance summary for business {}",
            self.ctx.business_id()
        );

        let caller = common::parse_filter(query.filter.as_deref());
        let scoped = common::staff_scope(caller, &self.ctx);
        let base = common::staff_scope(Document::new(), &self.ctx);

        let mut pipeline = ListPipeline::new()
            .match_stage(scoped.clone())
            .group(Self::group_stage())
            .project(Self::docs_projection());
        for lookup in &Self::lookups() {
            pipeline = pipeline.lookup(lookup);
        }
        let pipeline = pipeline
            .sort(common::parse_sort(query.sort.as_deref()))
            .paginate(query.skip, query.limit)
            .build();

        let cursor = self.collection().aggregate(pipeline).await?;
        let items: Vec<Document> = cursor.try_collect().await?;

        let filtered_size = self.collection().count_documents(scoped).await?;
        let total_size = self.collection().count_documents(base).await?;

        Ok(ListResult::new(items, total_size, filtered_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_stage_keys_on_staff_and_day() {
        let stage = MongoReportsDao::group_stage();
        let key = stage.get_document("_id").unwrap();
        assert_eq!(key.get_str("staff_id").unwrap(), "$staff_id");

        let for_date = key.get_document("for_date").unwrap();
        let date_to_string = for_date.get_document("$dateToString").unwrap();
        assert_eq!(date_to_string.get_str("format").unwrap(), "%Y-%m-%d");
        assert_eq!(date_to_string.get_str("date").unwrap(), "$date_time");
    }

    #[test]
    fn test_docs_projection_hides_audit_and_location_fields() {
        let projection = MongoReportsDao::docs_projection();
        for hidden in [
            "docs.created_at",
            "docs.updated_at",
            "docs.is_deleted",
            "docs.attendance_id",
            "docs.business_id",
            "docs.latitude",
            "docs.longitude",
        ] {
            assert_eq!(projection.get_i32(hidden).unwrap(), 0);
        }
    }

    #[test]
    fn test_lookups_cover_staff_shift_and_location() {
        let lookups = MongoReportsDao::lookups();
        let froms: Vec<String> = lookups
            .iter()
            .map(|spec| {
                spec.stage()
                    .get_document("$lookup")
                    .unwrap()
                    .get_str("from")
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(froms, vec!["app_users", "hr_shifts", "hr_work_locations"]);
    }
}
