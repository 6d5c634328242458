use std::sync::Arc;

use manabi_core::model::{ItemKey, ProgressKind, ProgressRecord};
use storage::{JsonProgressStore, ProgressRepository};

const PRINCIPAL: &str = "user@example.com";

#[tokio::test]
async fn records_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    let mut record = ProgressRecord::empty();
    record.toggle(ProgressKind::Lesson, "python-01");
    record.toggle_favorite(&ItemKey::lesson("python-01"));

    {
        let store = JsonProgressStore::new(dir.path()).unwrap();
        store.save(PRINCIPAL, &record).await.unwrap();
    }

    // A fresh store instance over the same directory sees the same record.
    let store: Arc<dyn ProgressRepository> =
        Arc::new(JsonProgressStore::new(dir.path()).unwrap());
    let loaded = store.load(PRINCIPAL).await.into_record();
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn principals_get_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonProgressStore::new(dir.path()).unwrap();

    let mut record = ProgressRecord::empty();
    record.toggle(ProgressKind::Lesson, "python-01");
    store.save(PRINCIPAL, &record).await.unwrap();

    let other = store.load("other@example.com").await;
    assert!(other.is_fresh());
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        1,
        "only the saved principal has a file"
    );
}
