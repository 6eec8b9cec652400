//! Employee Repository

use std::sync::Arc;

use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use serde_json::Value;
use shared::{Employee, SearchCriteria};

use super::{RepoError, RepoResult};
use crate::db::models::EmployeeDocument;
use crate::db::models::employee::EMPLOYEE_ID_FIELD;
use crate::db::store::{Document, DocumentRef, DocumentStore, StoredDocument};

/// Employee store adapter
///
/// Employees are addressed by their business `id`. When several documents
/// share an id (possible without the unique index), delete and update act
/// on the first one the store returns.
#[derive(Clone, Debug)]
pub struct EmployeeRepository {
    store: Arc<dyn DocumentStore>,
    collection: Arc<str>,
}

impl EmployeeRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Install the store-level unique index on the business id
    pub async fn ensure_unique_id(&self) -> RepoResult<()> {
        self.store
            .ensure_unique(&self.collection, EMPLOYEE_ID_FIELD)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64, limit: Option<usize>) -> RepoResult<Vec<StoredDocument>> {
        let docs = self
            .store
            .query_equals(&self.collection, EMPLOYEE_ID_FIELD, Value::from(id), limit)
            .await?;
        Ok(docs)
    }

    async fn find_first_ref(&self, id: i64) -> RepoResult<Option<DocumentRef>> {
        Ok(self
            .find_by_id(id, Some(1))
            .await?
            .into_iter()
            .next()
            .map(|doc| doc.reference))
    }

    /// True when no stored employee carries `id`
    pub async fn is_id_unique(&self, id: i64) -> RepoResult<bool> {
        Ok(self.find_by_id(id, Some(1)).await?.is_empty())
    }

    /// True when at least one stored employee carries `id`
    pub async fn is_present(&self, id: i64) -> RepoResult<bool> {
        Ok(!self.is_id_unique(id).await?)
    }

    /// Insert a new employee document
    ///
    /// Does not check uniqueness itself; with the unique index installed a
    /// duplicate id fails with [`RepoError::Duplicate`].
    pub async fn create(&self, employee: &Employee) -> RepoResult<DocumentRef> {
        let document = encode(employee)?;
        let reference = self.store.insert(&self.collection, document).await?;
        tracing::debug!(employee_id = employee.id, document = %reference, "Employee inserted");
        Ok(reference)
    }

    /// Remove the first employee with `id`. Returns false if none exists.
    pub async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let Some(reference) = self.find_first_ref(id).await? else {
            return Ok(false);
        };
        self.store.delete_document(&reference).await?;
        tracing::debug!(employee_id = id, document = %reference, "Employee deleted");
        Ok(true)
    }

    /// Overwrite every field of the first employee with `id`.
    ///
    /// The stored business id stays `id`; `employee.id` is ignored.
    /// Returns false if no such employee exists.
    pub async fn update_by_id(&self, id: i64, employee: &Employee) -> RepoResult<bool> {
        let Some(reference) = self.find_first_ref(id).await? else {
            return Ok(false);
        };
        let document = encode(&Employee {
            id,
            ..employee.clone()
        })?;
        let updated = self.store.update_fields(&reference, document).await?;
        tracing::debug!(employee_id = id, document = %reference, updated, "Employee updated");
        Ok(updated)
    }

    /// Lazily decode every stored employee
    pub async fn stream_all(&self) -> RepoResult<BoxStream<'static, RepoResult<Employee>>> {
        let stream = self.store.scan_all(&self.collection).await?;
        Ok(stream
            .map(|item| item.map_err(RepoError::from).and_then(decode))
            .boxed())
    }

    /// Every stored employee, in store order
    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.stream_all().await?.try_collect().await
    }

    /// Every stored employee matching `criteria`, in store order
    pub async fn search(&self, criteria: &SearchCriteria) -> RepoResult<Vec<Employee>> {
        self.stream_all()
            .await?
            .try_filter(|emp| futures::future::ready(criteria.matches(emp)))
            .try_collect()
            .await
    }

    /// Round-trip to the underlying store
    pub async fn ping(&self) -> RepoResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}

fn encode(employee: &Employee) -> RepoResult<Document> {
    let doc = EmployeeDocument::try_from(employee).map_err(|e| RepoError::Decode(e.to_string()))?;
    match serde_json::to_value(doc) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(RepoError::Decode(format!("Unexpected document shape: {other}"))),
        Err(e) => Err(RepoError::Decode(e.to_string())),
    }
}

fn decode(doc: StoredDocument) -> RepoResult<Employee> {
    let stored: EmployeeDocument = serde_json::from_value(Value::Object(doc.fields))
        .map_err(|e| RepoError::Decode(format!("{}: {e}", doc.reference)))?;
    Employee::try_from(stored).map_err(|e| RepoError::Decode(format!("{}: {e}", doc.reference)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MemoryStore;
    use rust_decimal::Decimal;

    fn employee(id: i64, first: &str) -> Employee {
        Employee {
            id,
            first_name: first.into(),
            last_name: "Doe".into(),
            email: format!("{}@example.com", first.to_lowercase()),
            password: "pw".into(),
            role: "developer".into(),
            salary: Decimal::from(50000).into(),
            phone_number: "1234567890".into(),
        }
    }

    fn repo() -> (Arc<MemoryStore>, EmployeeRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = EmployeeRepository::new(store.clone(), "employees");
        (store, repo)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (_, repo) = repo();
        repo.create(&employee(1, "Jane")).await.unwrap();
        repo.create(&employee(2, "John")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], employee(1, "Jane"));
        assert_eq!(all[1].first_name, "John");
    }

    #[tokio::test]
    async fn test_uniqueness_and_presence() {
        let (_, repo) = repo();
        assert!(repo.is_id_unique(1).await.unwrap());
        assert!(!repo.is_present(1).await.unwrap());

        repo.create(&employee(1, "Jane")).await.unwrap();
        assert!(!repo.is_id_unique(1).await.unwrap());
        assert!(repo.is_present(1).await.unwrap());
        assert!(repo.is_id_unique(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_first_match_only() {
        let (store, repo) = repo();
        repo.create(&employee(1, "Jane")).await.unwrap();
        repo.create(&employee(1, "Janet")).await.unwrap();

        assert!(repo.delete_by_id(1).await.unwrap());
        assert_eq!(store.len("employees"), 1);
        assert_eq!(repo.find_all().await.unwrap()[0].first_name, "Janet");

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
        assert!(store.is_empty("employees"));
    }

    #[tokio::test]
    async fn test_update_keeps_business_id() {
        let (_, repo) = repo();
        repo.create(&employee(5, "Jane")).await.unwrap();

        let replacement = Employee {
            role: "manager".into(),
            ..employee(99, "Joan")
        };
        assert!(repo.update_by_id(5, &replacement).await.unwrap());

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 5);
        assert_eq!(all[0].first_name, "Joan");
        assert_eq!(all[0].role, "manager");

        assert!(!repo.update_by_id(6, &replacement).await.unwrap());
    }

    #[tokio::test]
    async fn test_unique_index_maps_to_duplicate() {
        let (_, repo) = repo();
        repo.ensure_unique_id().await.unwrap();
        repo.create(&employee(1, "Jane")).await.unwrap();
        let err = repo.create(&employee(1, "Other")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_search_filters_in_store_order() {
        let (_, repo) = repo();
        repo.create(&employee(1, "John")).await.unwrap();
        repo.create(&employee(2, "Jane")).await.unwrap();
        repo.create(&employee(3, "Johanna")).await.unwrap();

        let criteria = SearchCriteria {
            first_name: Some("JO".into()),
            ..Default::default()
        };
        let ids: Vec<i64> = repo
            .search(&criteria)
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_decode_error() {
        let (store, repo) = repo();
        let mut doc = Document::new();
        doc.insert("employee_id".into(), Value::from("not-a-number"));
        store.insert("employees", doc).await.unwrap();

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, RepoError::Decode(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_database_error() {
        let (store, repo) = repo();
        store.set_simulate_failure(true);
        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
