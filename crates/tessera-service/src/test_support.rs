//! In-memory DAO stand-ins for service unit tests.

use async_trait::async_trait;
use bson::{doc, Document};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tessera_core::{ListQuery, ListResult, TesseraResult};
use tessera_repository::{
    AttendanceDao, BusinessDao, ClientDao, DashboardDao, HoursFactorDao, LeaveDao, ProjectDao,
    ReportsDao, ShiftDao, StaffDao,
};

mockall::mock! {
    pub BusinessDao {}

    #[async_trait]
    impl BusinessDao for BusinessDao {
        async fn get(&self, business_id: &str) -> TesseraResult<Option<Document>>;
    }
}

/// A business DAO that knows exactly the given business ids.
pub fn business_dao_with(businesses: &[&str]) -> Arc<MockBusinessDao> {
    let known: Vec<String> = businesses.iter().map(|b| (*b).to_string()).collect();
    let mut mock = MockBusinessDao::new();
    mock.expect_get().returning(move |business_id| {
        if known.iter().any(|b| b == business_id) {
            Ok(Some(doc! { "business_id": business_id }))
        } else {
            Ok(None)
        }
    });
    Arc::new(mock)
}

/// An in-memory collection mimicking the MongoDB DAO semantics: documents
/// keyed by their id field, soft-deleted rows invisible to reads.
pub struct MemoryCollection {
    id_field: &'static str,
    docs: Mutex<HashMap<String, Document>>,
}

impl MemoryCollection {
    pub fn new(id_field: &'static str) -> Self {
        Self {
            id_field,
            docs: Mutex::new(HashMap::new()),
        }
    }

    fn is_visible(doc: &Document) -> bool {
        !doc.get_bool("is_deleted").unwrap_or(false)
    }

    /// Returns the raw stored document, soft-deleted or not.
    pub fn raw(&self, id: &str) -> Option<Document> {
        self.docs.lock().unwrap().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    fn list(&self) -> ListResult {
        let docs = self.docs.lock().unwrap();
        let mut items: Vec<Document> = docs.values().filter(|d| Self::is_visible(d)).cloned().collect();
        items.sort_by_key(|d| d.get_str(self.id_field).unwrap_or_default().to_string());
        let count = items.len() as u64;
        ListResult::new(items, count, count)
    }

    fn get(&self, id: &str) -> Option<Document> {
        self.docs
            .lock()
            .unwrap()
            .get(id)
            .filter(|d| Self::is_visible(d))
            .cloned()
    }

    fn find_first(&self) -> Option<Document> {
        self.list().items.into_iter().next()
    }

    fn create(&self, mut data: Document) -> Document {
        data.insert("is_deleted", false);
        let id = data.get_str(self.id_field).expect("id field missing").to_string();
        self.docs.lock().unwrap().insert(id, data.clone());
        data
    }

    fn update(&self, id: &str, data: Document) -> Document {
        let mut docs = self.docs.lock().unwrap();
        if let Some(existing) = docs.get_mut(id) {
            for (key, value) in data.clone() {
                existing.insert(key, value);
            }
        }
        data
    }

    fn delete(&self, id: &str) -> u64 {
        u64::from(self.docs.lock().unwrap().remove(id).is_some())
    }

    fn delete_all(&self) -> u64 {
        let mut docs = self.docs.lock().unwrap();
        let count = docs.len() as u64;
        docs.clear();
        count
    }
}

macro_rules! memory_dao {
    ($name:ident, $trait:ident, $id_field:literal $(, $delete_all:ident)?) => {
        pub struct $name(pub Arc<MemoryCollection>);

        impl $name {
            pub fn new() -> Arc<Self> {
                Arc::new(Self(Arc::new(MemoryCollection::new($id_field))))
            }

            pub fn store(&self) -> Arc<MemoryCollection> {
                Arc::clone(&self.0)
            }
        }

        #[async_trait]
        impl $trait for $name {
            async fn list(&self, _query: &ListQuery) -> TesseraResult<ListResult> {
                Ok(self.0.list())
            }

            async fn get(&self, id: &str) -> TesseraResult<Option<Document>> {
                Ok(self.0.get(id))
            }

            async fn find(&self, _filter: &str) -> TesseraResult<Option<Document>> {
                Ok(self.0.find_first())
            }

            async fn create(&self, data: Document) -> TesseraResult<Document> {
                Ok(self.0.create(data))
            }

            async fn update(&self, id: &str, data: Document) -> TesseraResult<Document> {
                Ok(self.0.update(id, data))
            }

            async fn delete(&self, id: &str) -> TesseraResult<u64> {
                Ok(self.0.delete(id))
            }

            $(
                async fn $delete_all(&self) -> TesseraResult<u64> {
                    Ok(self.0.delete_all())
                }
            )?
        }
    };
}

memory_dao!(MemoryStaffDao, StaffDao, "staff_id");
memory_dao!(MemoryAttendanceDao, AttendanceDao, "attendance_id");
memory_dao!(MemoryLeaveDao, LeaveDao, "leave_id");
memory_dao!(MemoryShiftDao, ShiftDao, "shift_id");
memory_dao!(MemoryProjectDao, ProjectDao, "project_id", delete_all);
memory_dao!(MemoryClientDao, ClientDao, "client_id", delete_all);
memory_dao!(MemoryHoursFactorDao, HoursFactorDao, "hours_factor_id", delete_all);

/// A reports DAO returning a canned summary.
pub struct StubReportsDao {
    pub result: ListResult,
}

#[async_trait]
impl ReportsDao for StubReportsDao {
    async fn attendance_summary(&self, _query: &ListQuery) -> TesseraResult<ListResult> {
        Ok(self.result.clone())
    }
}

/// A dashboard DAO returning canned counts.
pub struct StubDashboardDao {
    pub data: Document,
}

#[async_trait]
impl DashboardDao for StubDashboardDao {
    async fn dashboard_data(&self) -> TesseraResult<Document> {
        Ok(self.data.clone())
    }
}
