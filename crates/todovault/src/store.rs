//! The todo store: an authoritative in-memory view of the durable
//! todo document, with lazy loading, mutation, and pagination.
//!
//! The collection lives behind a `tokio::sync::RwLock` as an
//! `Option<Vec<Todo>>`: `None` is the unloaded state, `Some` is
//! loaded. Mutations hold the write lock across the whole
//! read-modify-persist-commit sequence, so at most one mutation is in
//! flight at a time; reads take the read lock and always observe a
//! fully-formed pre- or post-mutation snapshot.
//!
//! Every mutation builds the next collection as a clone, persists it
//! to the object store, and only then commits it into the shared
//! state. A failed durable write therefore leaves the in-memory
//! collection untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use todovault_core::storage::{BlobError, ObjectStore, Page, Result, StoreError};
use todovault_core::todo::{sort_by_due_date, NewTodo, Todo, TodoPatch};

/// Wire shape of the durable blob: `{"todos": [Todo, ...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TodoDocument {
    #[serde(default)]
    todos: Vec<Todo>,
}

/// In-memory cache of the durable todo document.
///
/// The ordered sequence is the single authoritative representation;
/// by-id lookup derives from it, so id membership can never diverge
/// between a list and an index.
pub struct TodoStore {
    blobs: Arc<dyn ObjectStore>,
    key: String,
    todos: RwLock<Option<Vec<Todo>>>,
}

impl TodoStore {
    /// Creates a store over the given blob backend and document key.
    /// The collection is not fetched until first use.
    pub fn new(blobs: Arc<dyn ObjectStore>, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
            todos: RwLock::new(None),
        }
    }

    /// Loads the collection from durable storage if not already loaded.
    ///
    /// Idempotent: once loaded, returns without a storage round-trip.
    /// A missing blob initializes an empty collection rather than
    /// failing. The collection is sorted ascending by due date before
    /// it is exposed.
    pub async fn ensure_loaded(&self) -> Result<()> {
        {
            let todos = self.todos.read().await;
            if todos.is_some() {
                return Ok(());
            }
        }

        let mut todos = self.todos.write().await;
        self.loaded_mut(&mut todos).await?;
        Ok(())
    }

    /// Adds a new todo and persists the collection.
    ///
    /// Assigns an id when the payload carries none. Adding with an id
    /// that already exists replaces the old entry wholesale
    /// (last-write-wins); the collection never holds two entries
    /// sharing an id.
    pub async fn add(&self, payload: NewTodo) -> Result<Todo> {
        let todo = payload.into_todo()?;

        let mut guard = self.todos.write().await;
        let todos = self.loaded_mut(&mut guard).await?;

        let mut next = todos.clone();
        next.retain(|t| t.id != todo.id);
        next.push(todo.clone());
        sort_by_due_date(&mut next);

        self.persist(&next).await?;
        *todos = next;

        tracing::info!(todo_id = %todo.id, title = %todo.title, "Added todo");
        Ok(todo)
    }

    /// Applies a partial update to the todo with the given id.
    ///
    /// Only fields present in the patch overwrite; all others retain
    /// their prior value. Fails with `NotFound` when the id is absent.
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo> {
        let mut guard = self.todos.write().await;
        let todos = self.loaded_mut(&mut guard).await?;

        let mut next = todos.clone();
        let todo = next
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        patch.apply_to(todo)?;
        let updated = todo.clone();
        sort_by_due_date(&mut next);

        self.persist(&next).await?;
        *todos = next;

        tracing::info!(todo_id = %id, "Updated todo");
        Ok(updated)
    }

    /// Deletes the todo with the given id and persists the collection.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut guard = self.todos.write().await;
        let todos = self.loaded_mut(&mut guard).await?;

        if !todos.iter().any(|t| t.id == id) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        let mut next = todos.clone();
        next.retain(|t| t.id != id);

        self.persist(&next).await?;
        *todos = next;

        tracing::info!(todo_id = %id, "Deleted todo");
        Ok(())
    }

    /// Fetches a single todo by id.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Todo> {
        self.ensure_loaded().await?;
        let guard = self.todos.read().await;
        guard
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    /// Returns the requested page window over the ordered collection.
    ///
    /// A page number past the end is a valid response: empty todos with
    /// the requested page number and the computed total.
    pub async fn get_page(&self, page_number: usize, page_size: usize) -> Result<Page> {
        self.ensure_loaded().await?;
        let guard = self.todos.read().await;
        Ok(Page::of(
            guard.as_deref().unwrap_or(&[]),
            page_number,
            page_size,
        ))
    }

    /// Loads the collection into the guarded slot if it is unloaded,
    /// returning a mutable reference to the loaded sequence.
    async fn loaded_mut<'a>(&self, slot: &'a mut Option<Vec<Todo>>) -> Result<&'a mut Vec<Todo>> {
        match slot {
            Some(todos) => Ok(todos),
            None => {
                let todos = self.fetch_collection().await?;
                Ok(slot.insert(todos))
            }
        }
    }

    /// Fetches and deserializes the durable document, sorted by due date.
    async fn fetch_collection(&self) -> Result<Vec<Todo>> {
        let mut todos = match self.blobs.get(&self.key).await {
            Ok(bytes) => parse_document(&bytes)?,
            Err(BlobError::NotFound { .. }) => {
                tracing::debug!(key = %self.key, "No durable document, starting empty");
                Vec::new()
            }
            Err(BlobError::Unavailable(msg)) => return Err(StoreError::StorageUnavailable(msg)),
        };
        sort_by_due_date(&mut todos);
        Ok(todos)
    }

    /// Serializes the whole collection and overwrites the durable blob.
    async fn persist(&self, todos: &[Todo]) -> Result<()> {
        let document = serialize_document(todos)?;
        self.blobs
            .put(&self.key, document, "application/json")
            .await
            .map_err(|e| StoreError::StorageUnavailable(e.to_string()))
    }
}

/// Parses the durable document bytes, treating an empty or
/// todo-less blob as an empty collection.
fn parse_document(bytes: &[u8]) -> Result<Vec<Todo>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let document: TodoDocument =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(document.todos)
}

fn serialize_document(todos: &[Todo]) -> Result<Vec<u8>> {
    #[derive(Serialize)]
    struct DocumentRef<'a> {
        todos: &'a [Todo],
    }
    serde_json::to_vec(&DocumentRef { todos }).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::inmemory::InMemoryBlobStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    const KEY: &str = "todos.json";

    fn store() -> (TodoStore, Arc<InMemoryBlobStore>) {
        let blobs = Arc::new(InMemoryBlobStore::default());
        (TodoStore::new(blobs.clone(), KEY), blobs)
    }

    fn new_todo(title: &str, due_date: &str) -> NewTodo {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "dueDate": due_date,
        }))
        .unwrap()
    }

    fn new_todo_with_id(id: &str, title: &str, due_date: &str) -> NewTodo {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "dueDate": due_date,
        }))
        .unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // ==================== Loader ====================

    #[tokio::test]
    async fn test_missing_blob_loads_empty_collection() {
        let (store, _) = store();
        let page = store.get_page(1, 10).await.unwrap();

        assert!(page.todos.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn test_empty_blob_loads_empty_collection() {
        let (store, blobs) = store();
        blobs.put_blocking(KEY, b"  ".to_vec());

        let page = store.get_page(1, 10).await.unwrap();
        assert!(page.todos.is_empty());
    }

    #[tokio::test]
    async fn test_document_without_todos_field_loads_empty() {
        let (store, blobs) = store();
        blobs.put_blocking(KEY, b"{}".to_vec());

        let page = store.get_page(1, 10).await.unwrap();
        assert!(page.todos.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_blob_is_a_serialization_error() {
        let (store, blobs) = store();
        blobs.put_blocking(KEY, b"{not json".to_vec());

        let result = store.get_page(1, 10).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_load_sorts_ascending_by_due_date() {
        // A fresh process loading a blob written out of order must
        // re-establish ascending due-date order.
        let (first, blobs) = store();
        first.add(new_todo("Later", "2025-02-01")).await.unwrap();
        first.add(new_todo("Sooner", "2025-01-01")).await.unwrap();

        let fresh = TodoStore::new(blobs, KEY);
        let page = fresh.get_page(1, 10).await.unwrap();

        assert_eq!(page.todos[0].due_date, date(2025, 1, 1));
        assert_eq!(page.todos[1].due_date, date(2025, 2, 1));
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields() {
        let (first, blobs) = store();
        let created: NewTodo = serde_json::from_value(serde_json::json!({
            "title": "Prepare slides",
            "description": "Quarterly review",
            "priority": "High",
            "dueDate": "2025-03-15",
            "completed": true,
        }))
        .unwrap();
        let added = first.add(created).await.unwrap();

        let fresh = TodoStore::new(blobs, KEY);
        let loaded = fresh.fetch_by_id(&added.id).await.unwrap();

        assert_eq!(loaded, added);
    }

    // ==================== Mutator ====================

    #[tokio::test]
    async fn test_add_to_empty_store() {
        let (store, _) = store();
        let added = store.add(new_todo("A", "2025-01-10")).await.unwrap();

        assert!(!added.id.is_empty());
        assert!(!added.completed);

        let page = store.get_page(1, 10).await.unwrap();
        assert_eq!(page.todos, vec![added]);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_add_keeps_ids_unique() {
        let (store, _) = store();
        for i in 0..20 {
            store
                .add(new_todo(&format!("Todo {i}"), "2025-01-10"))
                .await
                .unwrap();
        }
        store
            .add(new_todo_with_id("fixed", "With id", "2025-01-11"))
            .await
            .unwrap();
        store
            .add(new_todo_with_id("fixed", "With id again", "2025-01-12"))
            .await
            .unwrap();

        let page = store.get_page(1, 100).await.unwrap();
        let ids: HashSet<&str> = page.todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), page.todos.len());
    }

    #[tokio::test]
    async fn test_add_with_duplicate_id_is_last_write_wins() {
        let (store, _) = store();
        store
            .add(new_todo_with_id("42", "First title", "2025-01-10"))
            .await
            .unwrap();
        store
            .add(new_todo_with_id("42", "Second title", "2025-01-20"))
            .await
            .unwrap();

        let fetched = store.fetch_by_id("42").await.unwrap();
        assert_eq!(fetched.title, "Second title");

        let page = store.get_page(1, 10).await.unwrap();
        assert_eq!(page.todos.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_payload() {
        let (store, _) = store();

        let result = store.add(new_todo("", "2025-01-10")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = store.add(new_todo("A", "not a date")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_keeps_due_date_order() {
        let (store, _) = store();
        store.add(new_todo("Later", "2025-02-01")).await.unwrap();
        store.add(new_todo("Sooner", "2025-01-01")).await.unwrap();
        store.add(new_todo("Middle", "2025-01-15")).await.unwrap();

        let page = store.get_page(1, 10).await.unwrap();
        let titles: Vec<&str> = page.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Sooner", "Middle", "Later"]);
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_fields() {
        let (store, _) = store();
        let before = store
            .add(new_todo_with_id("t-1", "Original", "2025-01-10"))
            .await
            .unwrap();

        let patch: TodoPatch = serde_json::from_value(serde_json::json!({
            "completed": true,
        }))
        .unwrap();
        let after = store.update("t-1", patch).await.unwrap();

        assert!(after.completed);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.priority, before.priority);
        assert_eq!(after.due_date, before.due_date);
    }

    #[tokio::test]
    async fn test_update_due_date_resorts() {
        let (store, _) = store();
        store
            .add(new_todo_with_id("a", "A", "2025-01-10"))
            .await
            .unwrap();
        store
            .add(new_todo_with_id("b", "B", "2025-01-20"))
            .await
            .unwrap();

        let patch: TodoPatch = serde_json::from_value(serde_json::json!({
            "dueDate": "2025-03-01",
        }))
        .unwrap();
        store.update("a", patch).await.unwrap();

        let page = store.get_page(1, 10).await.unwrap();
        let ids: Vec<&str> = page.todos.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_not_found() {
        let (store, _) = store();
        let result = store.update("missing", TodoPatch::default()).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_not_found() {
        let (store, _) = store();
        let added = store.add(new_todo("A", "2025-01-10")).await.unwrap();

        store.delete(&added.id).await.unwrap();

        let result = store.fetch_by_id(&added.id).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let (store, _) = store();
        let result = store.delete("missing").await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_survives_reload() {
        let (first, blobs) = store();
        let keep = first.add(new_todo("Keep", "2025-01-10")).await.unwrap();
        let doomed = first.add(new_todo("Drop", "2025-01-11")).await.unwrap();
        first.delete(&doomed.id).await.unwrap();

        let fresh = TodoStore::new(blobs, KEY);
        let page = fresh.get_page(1, 10).await.unwrap();

        assert_eq!(page.todos.len(), 1);
        assert_eq!(page.todos[0].id, keep.id);
    }

    // ==================== Paginator ====================

    #[tokio::test]
    async fn test_pages_concatenate_to_whole_collection() {
        let (store, _) = store();
        for day in 1..=23 {
            store
                .add(new_todo(&format!("Todo {day}"), &format!("2025-01-{day:02}")))
                .await
                .unwrap();
        }

        let first = store.get_page(1, 10).await.unwrap();
        assert_eq!(first.total_pages, 3);

        let mut collected = Vec::new();
        for n in 1..=first.total_pages {
            collected.extend(store.get_page(n, 10).await.unwrap().todos);
        }

        let ids: HashSet<&str> = collected.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(collected.len(), 23);
        assert_eq!(ids.len(), 23);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty_not_an_error() {
        let (store, _) = store();
        store.add(new_todo("A", "2025-01-10")).await.unwrap();

        let page = store.get_page(5, 10).await.unwrap();

        assert!(page.todos.is_empty());
        assert_eq!(page.current_page, 5);
        assert_eq!(page.total_pages, 1);
    }

    // ==================== Persistence ordering ====================

    /// Blob store whose writes always fail, for exercising the
    /// persist-then-commit ordering.
    struct FailingPutStore {
        inner: InMemoryBlobStore,
    }

    #[async_trait]
    impl ObjectStore for FailingPutStore {
        async fn get(&self, key: &str) -> std::result::Result<Vec<u8>, BlobError> {
            self.inner.get(key).await
        }

        async fn put(
            &self,
            _key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> std::result::Result<(), BlobError> {
            Err(BlobError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_memory_unchanged() {
        let seeded = InMemoryBlobStore::default();
        seeded.put_blocking(
            KEY,
            serde_json::to_vec(&serde_json::json!({
                "todos": [{
                    "id": "t-1",
                    "title": "Existing",
                    "dueDate": "2025-01-10",
                }],
            }))
            .unwrap(),
        );
        let store = TodoStore::new(Arc::new(FailingPutStore { inner: seeded }), KEY);

        let result = store.add(new_todo("New", "2025-01-05")).await;
        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));

        // The rejected todo must not be observable afterwards.
        let page = store.get_page(1, 10).await.unwrap();
        assert_eq!(page.todos.len(), 1);
        assert_eq!(page.todos[0].id, "t-1");
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_memory_unchanged() {
        let seeded = InMemoryBlobStore::default();
        seeded.put_blocking(
            KEY,
            serde_json::to_vec(&serde_json::json!({
                "todos": [{
                    "id": "t-1",
                    "title": "Existing",
                    "dueDate": "2025-01-10",
                }],
            }))
            .unwrap(),
        );
        let store = TodoStore::new(Arc::new(FailingPutStore { inner: seeded }), KEY);

        let result = store.delete("t-1").await;
        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));

        assert!(store.fetch_by_id("t-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_unavailable_storage_propagates_on_load() {
        struct FailingGetStore;

        #[async_trait]
        impl ObjectStore for FailingGetStore {
            async fn get(&self, _key: &str) -> std::result::Result<Vec<u8>, BlobError> {
                Err(BlobError::Unavailable("connection refused".to_string()))
            }

            async fn put(
                &self,
                _key: &str,
                _bytes: Vec<u8>,
                _content_type: &str,
            ) -> std::result::Result<(), BlobError> {
                Ok(())
            }
        }

        let store = TodoStore::new(Arc::new(FailingGetStore), KEY);
        let result = store.ensure_loaded().await;

        assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let (store, blobs) = store();
        store.ensure_loaded().await.unwrap();
        store.add(new_todo("A", "2025-01-10")).await.unwrap();

        // Overwrite the blob behind the store's back; the loaded cache
        // must keep serving without another fetch.
        blobs.put_blocking(KEY, b"{\"todos\": []}".to_vec());

        let page = store.get_page(1, 10).await.unwrap();
        assert_eq!(page.todos.len(), 1);
    }
}
