//! Shared document plumbing for the MongoDB DAOs: caller-input parsing,
//! scope injection, audit stamping, and the two list executors.

use bson::{doc, Bson, Document};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::Collection;
use tessera_core::fields;
use tessera_core::{ListQuery, ListResult, TenantContext, TesseraResult};
use tracing::warn;

/// Parses a caller-supplied extended-JSON filter expression.
///
/// Malformed input is ignored: the request proceeds with an empty
/// predicate rather than failing.
#[must_use]
pub fn parse_filter(filter: Option<&str>) -> Document {
    match filter {
        Some(text) if !text.trim().is_empty() => match parse_document(text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Ignoring unparsable filter expression: {}", e);
                Document::new()
            }
        },
        _ => Document::new(),
    }
}

/// Parses a caller-supplied extended-JSON sort expression.
///
/// Malformed input disables sorting for the request.
#[must_use]
pub fn parse_sort(sort: Option<&str>) -> Option<Document> {
    match sort {
        Some(text) if !text.trim().is_empty() => match parse_document(text) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Ignoring unparsable sort expression: {}", e);
                None
            }
        },
        _ => None,
    }
}

fn parse_document(text: &str) -> anyhow::Result<Document> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    match Bson::try_from(value)? {
        Bson::Document(doc) => Ok(doc),
        other => anyhow::bail!("expected a document, got {}", other),
    }
}

/// Appends the mandatory scope predicates: tenant and soft-delete flag.
#[must_use]
pub fn tenant_scope(mut base: Document, ctx: &TenantContext) -> Document {
    base.insert(fields::BUSINESS_ID, ctx.business_id());
    base.insert(fields::IS_DELETED, false);
    base
}

/// Appends the mandatory scope predicates plus the staff predicate when
/// the context is staff-scoped.
#[must_use]
pub fn staff_scope(base: Document, ctx: &TenantContext) -> Document {
    let mut doc = tenant_scope(base, ctx);
    if let Some(staff_id) = ctx.staff_id() {
        doc.insert(fields::STAFF_ID, staff_id);
    }
    doc
}

/// Keyed read filter: id + tenant + not deleted.
#[must_use]
pub fn keyed_scope(id_field: &str, id: &str, ctx: &TenantContext) -> Document {
    doc! {
        id_field: id,
        fields::BUSINESS_ID: ctx.business_id(),
        fields::IS_DELETED: false,
    }
}

/// Keyed write filter: id + tenant. No soft-delete predicate, so the
/// delete flag itself stays writable in both directions.
#[must_use]
pub fn keyed(id_field: &str, id: &str, ctx: &TenantContext) -> Document {
    doc! {
        id_field: id,
        fields::BUSINESS_ID: ctx.business_id(),
    }
}

/// Adds create metadata: audit timestamps and a cleared delete flag.
#[must_use]
pub fn stamp_for_create(mut data: Document) -> Document {
    let now = bson::DateTime::from_chrono(Utc::now());
    data.insert(fields::CREATED_AT, now);
    data.insert(fields::UPDATED_AT, now);
    data.insert(fields::IS_DELETED, false);
    data
}

/// Adds update metadata; the creation timestamp is immutable.
#[must_use]
pub fn stamp_for_update(mut data: Document) -> Document {
    data.remove(fields::CREATED_AT);
    data.insert(
        fields::UPDATED_AT,
        bson::DateTime::from_chrono(Utc::now()),
    );
    data
}

/// Strips store-internal fields from a row before returning it.
#[must_use]
pub fn amend_for_get(mut data: Document) -> Document {
    data.remove(fields::DOC_ID);
    data
}

/// Runs a find-based list: query, page, and both summary counts.
pub(crate) async fn execute_find_list(
    collection: &Collection<Document>,
    scoped_filter: Document,
    base_scope: Document,
    query: &ListQuery,
) -> TesseraResult<ListResult> {
    let mut find = collection.find(scoped_filter.clone());
    if let Some(sort) = parse_sort(query.sort.as_deref()) {
        find = find.sort(sort);
    }
    if query.skip > 0 {
        find = find.skip(query.skip as u64);
    }
    if query.limit > 0 {
        find = find.limit(query.limit);
    }

    let cursor = find.await?;
    let rows: Vec<Document> = cursor.try_collect().await?;
    let items: Vec<Document> = rows.into_iter().map(amend_for_get).collect();

    let filtered_size = collection.count_documents(scoped_filter).await?;
    let total_size = collection.count_documents(base_scope).await?;

    Ok(ListResult::new(items, total_size, filtered_size))
}

/// Runs an aggregation-based list: pipeline, and both summary counts.
pub(crate) async fn execute_pipeline_list(
    collection: &Collection<Document>,
    pipeline: Vec<Document>,
    scoped_filter: Document,
    base_scope: Document,
) -> TesseraResult<ListResult> {
    let cursor = collection.aggregate(pipeline).await?;
    let items: Vec<Document> = cursor.try_collect().await?;

    let filtered_size = collection.count_documents(scoped_filter).await?;
    let total_size = collection.count_documents(base_scope).await?;

    Ok(ListResult::new(items, total_size, filtered_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TenantContext {
        TenantContext::new("business003").unwrap()
    }

    fn staff_ctx() -> TenantContext {
        TenantContext::new("business003").unwrap().with_staff("stf001")
    }

    #[test]
    fn test_parse_filter_valid() {
        let doc = parse_filter(Some(r#"{"leave_type": "Permission"}"#));
        assert_eq!(doc.get_str("leave_type").unwrap(), "Permission");
    }

    #[test]
    fn test_parse_filter_malformed_is_ignored() {
        assert!(parse_filter(Some("{not json")).is_empty());
        assert!(parse_filter(Some("[1, 2]")).is_empty());
    }

    #[test]
    fn test_parse_filter_empty_input() {
        assert!(parse_filter(None).is_empty());
        assert!(parse_filter(Some("")).is_empty());
        assert!(parse_filter(Some("   ")).is_empty());
    }

    #[test]
    fn test_parse_filter_extended_json_date() {
        let doc = parse_filter(Some(
            r#"{"date_time": {"$gte": {"$date": "2023-08-01T00:00:00Z"}}}"#,
        ));
        let range = doc.get_document("date_time").unwrap();
        assert!(matches!(range.get("$gte"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn test_parse_sort() {
        let sort = parse_sort(Some(r#"{"created_at": -1}"#)).unwrap();
        assert_eq!(sort.get_i32("created_at").unwrap(), -1);
        assert!(parse_sort(Some("{bad")).is_none());
        assert!(parse_sort(None).is_none());
    }

    #[test]
    fn test_tenant_scope_overrides_caller_fields() {
        // A caller filter must not be able to widen the tenant scope.
        let base = doc! { "business_id": "someone-else", "is_deleted": true };
        let scoped = tenant_scope(base, &ctx());
        assert_eq!(scoped.get_str("business_id").unwrap(), "business003");
        assert_eq!(scoped.get_bool("is_deleted").unwrap(), false);
    }

    #[test]
    fn test_staff_scope() {
        let scoped = staff_scope(Document::new(), &staff_ctx());
        assert_eq!(scoped.get_str("staff_id").unwrap(), "stf001");

        let unscoped = staff_scope(Document::new(), &ctx());
        assert!(unscoped.get("staff_id").is_none());
    }

    #[test]
    fn test_keyed_filters() {
        let read = keyed_scope("leave_id", "leav01", &ctx());
        assert_eq!(read.get_str("leave_id").unwrap(), "leav01");
        assert_eq!(read.get_bool("is_deleted").unwrap(), false);

        let write = keyed("leave_id", "leav01", &ctx());
        assert!(write.get("is_deleted").is_none());
        assert_eq!(write.get_str("business_id").unwrap(), "business003");
    }

    #[test]
    fn test_stamp_for_create() {
        let stamped = stamp_for_create(doc! { "staff_id": "stf001" });
        assert!(stamped.get_datetime("created_at").is_ok());
        assert!(stamped.get_datetime("updated_at").is_ok());
        assert_eq!(stamped.get_bool("is_deleted").unwrap(), false);
    }

    #[test]
    fn test_stamp_for_update_drops_created_at() {
        let stamped = stamp_for_update(doc! {
            "shift_description": "night",
            "created_at": bson::DateTime::from_chrono(Utc::now()),
        });
        assert!(stamped.get("created_at").is_none());
        assert!(stamped.get_datetime("updated_at").is_ok());
    }

    #[test]
    fn test_amend_for_get() {
        let row = amend_for_get(doc! { "_id": 1, "staff_id": "stf001" });
        assert!(row.get("_id").is_none());
        assert_eq!(row.get_str("staff_id").unwrap(), "stf001");
    }
}
