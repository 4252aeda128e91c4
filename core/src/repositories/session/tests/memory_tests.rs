use crate::domain::entities::session::RefreshSession;
use crate::repositories::session::{InMemoryRefreshSessionRepository, RefreshSessionRepository};

fn session(subject: &str, jti: &str, hash: &str, now: i64) -> RefreshSession {
    RefreshSession::new(subject, jti.to_string(), hash.to_string(), now)
}

#[tokio::test]
async fn test_save_assigns_ids_and_finds() {
    let repo = InMemoryRefreshSessionRepository::new();

    let saved = repo.save(session("u1", "j1", "h1", 10)).await.unwrap();
    assert!(saved.id > 0);

    let by_hash = repo.find_by_hash("h1").await.unwrap().unwrap();
    assert_eq!(by_hash, saved);
    assert_eq!(repo.find_by_jti("j1").await.unwrap().unwrap().id, saved.id);
    assert_eq!(repo.find_by_subject("u1").await.unwrap().unwrap().id, saved.id);
    assert!(repo.find_by_hash("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_rejects_duplicate_hash_or_jti() {
    let repo = InMemoryRefreshSessionRepository::new();
    repo.save(session("u1", "j1", "h1", 10)).await.unwrap();

    assert!(repo.save(session("u2", "j2", "h1", 10)).await.is_err());
    assert!(repo.save(session("u2", "j1", "h2", 10)).await.is_err());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_by_subject_returns_latest() {
    let repo = InMemoryRefreshSessionRepository::new();
    repo.save(session("u1", "j1", "h1", 10)).await.unwrap();
    repo.save(session("u1", "j2", "h2", 20)).await.unwrap();

    let latest = repo.find_by_subject("u1").await.unwrap().unwrap();
    assert_eq!(latest.jti, "j2");
}

#[tokio::test]
async fn test_rotate_compares_version() {
    let repo = InMemoryRefreshSessionRepository::new();
    let saved = repo.save(session("u1", "j1", "h1", 10)).await.unwrap();

    let rotated = saved.rotated("j2".into(), "h2".into(), 20);
    assert!(repo.rotate(&rotated, saved.version).await.unwrap());

    // The old version no longer matches
    let stale = saved.rotated("j3".into(), "h3".into(), 30);
    assert!(!repo.rotate(&stale, saved.version).await.unwrap());

    assert!(repo.find_by_hash("h1").await.unwrap().is_none());
    let current = repo.find_by_hash("h2").await.unwrap().unwrap();
    assert_eq!(current.version, 1);
    assert_eq!(current.last_refreshed_at, 20);
    assert_eq!(current.created_at, 10);
}

#[tokio::test]
async fn test_remove() {
    let repo = InMemoryRefreshSessionRepository::new();
    let saved = repo.save(session("u1", "j1", "h1", 10)).await.unwrap();

    repo.remove(&saved).await.unwrap();
    assert!(repo.is_empty().await);
    // Removing again is a no-op
    repo.remove(&saved).await.unwrap();
}

#[tokio::test]
async fn test_remove_by_subject_drops_all_rows() {
    let repo = InMemoryRefreshSessionRepository::new();
    repo.save(session("u1", "j1", "h1", 10)).await.unwrap();
    repo.save(session("u1", "j2", "h2", 20)).await.unwrap();
    repo.save(session("u2", "j3", "h3", 30)).await.unwrap();

    assert_eq!(repo.remove_by_subject("u1").await.unwrap(), 2);
    assert_eq!(repo.remove_by_subject("u1").await.unwrap(), 0);
    assert!(repo.find_by_subject("u1").await.unwrap().is_none());
    assert_eq!(repo.len().await, 1);
}
