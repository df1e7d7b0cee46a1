//! In-memory task collection.
//!
//! All access goes through [`TaskStore`]; the collection itself is never
//! exposed. Mutating operations hold the write lock for their whole
//! read-compute-mutate span, so id assignment is atomic with the insert and
//! concurrent creates can never race to the same id.

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Priority, Task};
use crate::tasks::validate::TaskFields;

pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Build a store over an initial (seeded) population.
    ///
    /// Seed tasks are trusted as-is; insertion order is the default listing
    /// order for undated tasks.
    pub fn new(seed: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(seed),
        }
    }

    /// Snapshot of the collection, optionally filtered on `completed`,
    /// sorted by `date` descending.
    ///
    /// Tasks without a parseable `date` sort after all dated tasks; the sort
    /// is stable, so ties keep insertion order.
    pub async fn list(&self, completed: Option<bool>) -> Vec<Task> {
        let guard = self.tasks.read().await;
        let mut out: Vec<Task> = guard
            .iter()
            .filter(|t| completed.map_or(true, |want| t.completed == want))
            .cloned()
            .collect();
        out.sort_by(|a, b| match (a.sort_date(), b.sort_date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        out
    }

    pub async fn get(&self, id: u64) -> Option<Task> {
        self.tasks.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// Tasks whose `priority` attribute matches `level`, case-insensitively.
    /// Tasks with no `priority` attribute are excluded. Insertion order.
    pub async fn by_priority(&self, level: Priority) -> Vec<Task> {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|t| {
                t.priority()
                    .is_some_and(|p| p.eq_ignore_ascii_case(level.as_str()))
            })
            .cloned()
            .collect()
    }

    /// Insert a new task from a validated payload and return it.
    ///
    /// The assigned id is `max(existing ids) + 1` (1 for an empty store), so
    /// ids are never reused even after deletions.
    pub async fn create(&self, fields: TaskFields) -> Task {
        let mut guard = self.tasks.write().await;
        let id = guard.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let task = Task {
            id,
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
            extra: fields.extra,
        };
        guard.push(task.clone());
        task
    }

    /// Overwrite exactly `title`, `description` and `completed` on the
    /// matching task, in place. The id and every attribute-bag field are left
    /// untouched; extra fields in the update payload are ignored.
    pub async fn update(&self, id: u64, fields: TaskFields) -> Option<Task> {
        let mut guard = self.tasks.write().await;
        let task = guard.iter_mut().find(|t| t.id == id)?;
        task.title = fields.title;
        task.description = fields.description;
        task.completed = fields.completed;
        Some(task.clone())
    }

    /// Remove the task with the given id. Returns `false` if absent.
    pub async fn delete(&self, id: u64) -> bool {
        let mut guard = self.tasks.write().await;
        let before = guard.len();
        guard.retain(|t| t.id != id);
        guard.len() < before
    }

    /// Current collection size (startup logging).
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }
}

/// Thread-safe wrapper for use in `AppContext`.
pub type SharedTaskStore = Arc<TaskStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn fields(title: &str, completed: bool) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: format!("about {title}"),
            completed,
            extra: Map::new(),
        }
    }

    fn fields_with(title: &str, completed: bool, extra: &[(&str, Value)]) -> TaskFields {
        let mut f = fields(title, completed);
        for (k, v) in extra {
            f.extra.insert((*k).to_string(), v.clone());
        }
        f
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let store = TaskStore::new(Vec::new());
        let created = store
            .create(fields_with("a", false, &[("priority", json!("high"))]))
            .await;
        assert_eq!(created.id, 1);
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.title, "a");
        assert_eq!(fetched.priority(), Some("high"));
    }

    #[tokio::test]
    async fn test_ids_never_reused_after_delete() {
        let store = TaskStore::new(Vec::new());
        let a = store.create(fields("a", false)).await;
        let b = store.create(fields("b", false)).await;
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete(b.id).await);
        let c = store.create(fields("c", false)).await;
        // max+1, not len+1: a len-based policy would hand out 2 again.
        assert_eq!(c.id, 2);
        assert!(store.delete(a.id).await);
        assert!(store.delete(c.id).await);
        let d = store.create(fields("d", false)).await;
        assert_eq!(d.id, 1, "empty store restarts at 1");
    }

    #[tokio::test]
    async fn test_update_touches_only_required_fields() {
        let store = TaskStore::new(Vec::new());
        let created = store
            .create(fields_with(
                "a",
                false,
                &[("priority", json!("low")), ("owner", json!("sam"))],
            ))
            .await;

        let updated = store
            .update(created.id, fields("renamed", true))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "renamed");
        assert!(updated.completed);
        assert_eq!(updated.priority(), Some("low"));
        assert_eq!(updated.extra.get("owner"), Some(&json!("sam")));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_id() {
        let store = TaskStore::new(Vec::new());
        assert!(store.update(999, fields("x", true)).await.is_none());
        assert!(!store.delete(999).await);
    }

    #[tokio::test]
    async fn test_list_completed_filter_partitions() {
        let store = TaskStore::new(Vec::new());
        store.create(fields("a", true)).await;
        store.create(fields("b", false)).await;
        store.create(fields("c", true)).await;

        let done = store.list(Some(true)).await;
        let open = store.list(Some(false)).await;
        let all = store.list(None).await;
        assert!(done.iter().all(|t| t.completed));
        assert!(open.iter().all(|t| !t.completed));
        assert_eq!(done.len() + open.len(), all.len());
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_sorted_by_date_descending_undated_last() {
        let store = TaskStore::new(Vec::new());
        store
            .create(fields_with("old", false, &[("date", json!("2024-01-01"))]))
            .await;
        store.create(fields("undated", false)).await;
        store
            .create(fields_with("new", false, &[("date", json!("2024-06-01"))]))
            .await;
        store
            .create(fields_with("junk", false, &[("date", json!("soon"))]))
            .await;

        let listed = store.list(None).await;
        let titles: Vec<&str> = listed.iter().map(|t| t.title.as_str()).collect();
        // An unparseable date sorts with the undated tail, insertion order kept.
        assert_eq!(titles, vec!["new", "old", "undated", "junk"]);
    }

    #[tokio::test]
    async fn test_by_priority_case_insensitive_and_excludes_unset() {
        let store = TaskStore::new(Vec::new());
        store
            .create(fields_with("a", false, &[("priority", json!("LOW"))]))
            .await;
        store
            .create(fields_with("b", false, &[("priority", json!("high"))]))
            .await;
        store.create(fields("no-priority", false)).await;

        let low = store.by_priority(Priority::Low).await;
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].title, "a");
        assert!(store.by_priority(Priority::Medium).await.is_empty());
    }
}
