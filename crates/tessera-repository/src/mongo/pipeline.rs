//! Aggregation pipeline construction for list operations.
//!
//! Every aggregation list emits the same deterministic stage sequence:
//! `$unset _id` → `$match` (scoped filter) → `$lookup`… → optional
//! `$sort` → optional `$skip`/`$limit`. Report-style pipelines insert
//! `$group`/`$project` stages between the match and the lookups.

use bson::{doc, Document};
use tessera_core::fields;

/// A join stage attaching related-collection rows to each result row.
///
/// The joined sub-documents are projected through an inner pipeline that
/// removes store-internal fields (`_id`, audit timestamps, the delete
/// flag, the tenant key) plus any explicitly hidden fields such as
/// secrets.
#[derive(Debug, Clone)]
pub struct LookupSpec {
    from: &'static str,
    local_field: String,
    foreign_field: &'static str,
    as_field: &'static str,
    hidden_fields: Vec<&'static str>,
}

impl LookupSpec {
    /// Creates a lookup joining `from.foreign_field` to `local_field`.
    #[must_use]
    pub fn new(
        from: &'static str,
        local_field: impl Into<String>,
        foreign_field: &'static str,
        as_field: &'static str,
    ) -> Self {
        Self {
            from,
            local_field: local_field.into(),
            foreign_field,
            as_field,
            hidden_fields: Vec::new(),
        }
    }

    /// Hides an additional field from the joined sub-documents.
    #[must_use]
    pub fn hide(mut self, field: &'static str) -> Self {
        self.hidden_fields.push(field);
        self
    }

    /// Renders the `$lookup` stage.
    #[must_use]
    pub fn stage(&self) -> Document {
        let mut projection = doc! {
            fields::DOC_ID: 0,
            fields::IS_DELETED: 0,
            fields::CREATED_AT: 0,
            fields::UPDATED_AT: 0,
            fields::BUSINESS_ID: 0,
        };
        for field in &self.hidden_fields {
            projection.insert(*field, 0);
        }

        doc! {
            "$lookup": {
                "from": self.from,
                "localField": self.local_field.as_str(),
                "foreignField": self.foreign_field,
                "as": self.as_field,
                "pipeline": [ { "$project": projection } ],
            }
        }
    }
}

/// Builder for the list aggregation pipeline.
#[derive(Debug, Clone)]
pub struct ListPipeline {
    stages: Vec<Document>,
}

impl ListPipeline {
    /// Starts a pipeline; the leading stage drops the store-internal `_id`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: vec![doc! { "$unset": fields::DOC_ID }],
        }
    }

    /// Appends the `$match` stage for the scoped filter.
    #[must_use]
    pub fn match_stage(mut self, filter: Document) -> Self {
        self.stages.push(doc! { "$match": filter });
        self
    }

    /// Appends a join stage.
    #[must_use]
    pub fn lookup(mut self, spec: &LookupSpec) -> Self {
        self.stages.push(spec.stage());
        self
    }

    /// Appends a `$group` stage.
    #[must_use]
    pub fn group(mut self, spec: Document) -> Self {
        self.stages.push(doc! { "$group": spec });
        self
    }

    /// Appends a `$project` stage.
    #[must_use]
    pub fn project(mut self, spec: Document) -> Self {
        self.stages.push(doc! { "$project": spec });
        self
    }

    /// Appends a `$sort` stage when a sort document is present.
    #[must_use]
    pub fn sort(mut self, sort: Option<Document>) -> Self {
        if let Some(sort) = sort {
            self.stages.push(doc! { "$sort": sort });
        }
        self
    }

    /// Appends `$skip`/`$limit` stages; each only when positive.
    #[must_use]
    pub fn paginate(mut self, skip: i64, limit: i64) -> Self {
        if skip > 0 {
            self.stages.push(doc! { "$skip": skip });
        }
        if limit > 0 {
            self.stages.push(doc! { "$limit": limit });
        }
        self
    }

    /// Returns the ordered stage list.
    #[must_use]
    pub fn build(self) -> Vec<Document> {
        self.stages
    }
}

impl Default for ListPipeline {
    fn default() -> Self {
        Self::new()
    }
}
