use std::sync::Arc;

use manabi_core::model::{ItemKey, ProgressKind};
use manabi_core::time::fixed_clock;
use services::ProgressService;
use storage::InMemoryProgressStore;

const PRINCIPAL: &str = "user@example.com";

fn service() -> ProgressService {
    ProgressService::new(fixed_clock(), Arc::new(InMemoryProgressStore::new()))
}

#[tokio::test]
async fn a_full_study_session_round_trips() {
    let svc = service();

    assert!(svc.toggle(PRINCIPAL, ProgressKind::Lesson, "python-01").await.unwrap());
    assert!(svc.toggle(PRINCIPAL, ProgressKind::Task, "task-responsive").await.unwrap());

    let key = ItemKey::lesson("python-01");
    assert!(svc.toggle_favorite(PRINCIPAL, &key).await.unwrap());
    svc.save_note(PRINCIPAL, &key, "リスト内包表記を復習").await.unwrap();

    let record = svc.record_study_today(PRINCIPAL).await.unwrap();
    assert!(record.is_completed(ProgressKind::Lesson, "python-01"));
    assert!(record.is_completed(ProgressKind::Task, "task-responsive"));
    assert!(record.is_favorite(&key));
    assert_eq!(record.note(&key), Some("リスト内包表記を復習"));
    assert_eq!(record.streak(svc.today()), 1);
}

#[tokio::test]
async fn recording_the_same_day_twice_keeps_streak_at_one() {
    let svc = service();
    svc.record_study_today(PRINCIPAL).await.unwrap();
    let record = svc.record_study_today(PRINCIPAL).await.unwrap();
    assert_eq!(record.study_dates.len(), 1);
    assert_eq!(svc.streak(PRINCIPAL).await, 1);
}

#[tokio::test]
async fn principals_do_not_share_progress() {
    let svc = service();
    svc.toggle(PRINCIPAL, ProgressKind::Lesson, "python-01").await.unwrap();

    let other = svc.snapshot("other@example.com").await;
    assert!(!other.is_completed(ProgressKind::Lesson, "python-01"));
}
