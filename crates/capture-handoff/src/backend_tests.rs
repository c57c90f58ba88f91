use super::*;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_backend_roundtrip() {
    let backend = MemoryBackend::new();
    assert!(backend.get(HandoffKey::BusinessName).await.unwrap().is_none());

    backend.set(HandoffKey::BusinessName, json!("Acme")).await.unwrap();
    assert_eq!(
        backend.get(HandoffKey::BusinessName).await.unwrap(),
        Some(json!("Acme"))
    );

    backend.remove(HandoffKey::BusinessName).await.unwrap();
    assert!(backend.get(HandoffKey::BusinessName).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_backend_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path().join("handoff.json")).await.unwrap();

    for key in HandoffKey::ALL {
        assert!(backend.get(key).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_file_backend_creates_parent_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("handoff.json");
    let backend = FileBackend::new(&path).await.unwrap();

    backend.set(HandoffKey::RefreshToken, json!(5)).await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_file_backend_shared_between_instances() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handoff.json");

    let origin = FileBackend::new(&path).await.unwrap();
    let registry = FileBackend::new(&path).await.unwrap();

    origin.set(HandoffKey::BusinessName, json!("Acme LLC")).await.unwrap();
    origin
        .set(HandoffKey::OriginBase, json!("http://localhost:5000"))
        .await
        .unwrap();

    assert_eq!(
        registry.get(HandoffKey::BusinessName).await.unwrap(),
        Some(json!("Acme LLC"))
    );

    registry.set(HandoffKey::RefreshToken, json!(42)).await.unwrap();
    assert_eq!(origin.get(HandoffKey::RefreshToken).await.unwrap(), Some(json!(42)));
    // Other keys survive a write to a different key.
    assert_eq!(
        origin.get(HandoffKey::OriginBase).await.unwrap(),
        Some(json!("http://localhost:5000"))
    );
}

#[tokio::test]
async fn test_file_backend_remove() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FileBackend::new(temp_dir.path().join("handoff.json")).await.unwrap();

    backend.set(HandoffKey::BusinessName, json!("Acme")).await.unwrap();
    backend.remove(HandoffKey::BusinessName).await.unwrap();
    assert!(backend.get(HandoffKey::BusinessName).await.unwrap().is_none());

    // Removing a missing key is fine.
    backend.remove(HandoffKey::OriginBase).await.unwrap();
}

#[tokio::test]
async fn test_file_backend_corrupt_file_reads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handoff.json");
    std::fs::write(&path, "not json").unwrap();

    let backend = FileBackend::new(&path).await.unwrap();
    assert!(backend.get(HandoffKey::BusinessName).await.unwrap().is_none());

    backend.set(HandoffKey::BusinessName, json!("Recovered")).await.unwrap();
    assert_eq!(
        backend.get(HandoffKey::BusinessName).await.unwrap(),
        Some(json!("Recovered"))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_file_backend_concurrent_writers_keep_both_keys() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handoff.json");

    let origin = FileBackend::new(&path).await.unwrap();
    let registry = FileBackend::new(&path).await.unwrap();

    for round in 0..100u64 {
        let name = format!("Acme {}", round);
        let (named, tokened) = tokio::join!(
            origin.set(HandoffKey::BusinessName, json!(name)),
            registry.set(HandoffKey::RefreshToken, json!(round + 1)),
        );
        named.unwrap();
        tokened.unwrap();

        assert_eq!(
            origin.get(HandoffKey::BusinessName).await.unwrap(),
            Some(json!(name)),
            "business name lost in round {}",
            round
        );
        assert_eq!(
            registry.get(HandoffKey::RefreshToken).await.unwrap(),
            Some(json!(round + 1)),
            "refresh token lost in round {}",
            round
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_file_backend_concurrent_set_and_remove() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handoff.json");

    let watcher = FileBackend::new(&path).await.unwrap();
    let trigger = FileBackend::new(&path).await.unwrap();

    for round in 0..50u64 {
        watcher.set(HandoffKey::RefreshToken, json!(round + 1)).await.unwrap();
        let (removed, named) = tokio::join!(
            watcher.remove(HandoffKey::RefreshToken),
            trigger.set(HandoffKey::OriginBase, json!(format!("http://localhost:{}", round))),
        );
        removed.unwrap();
        named.unwrap();

        assert!(trigger.get(HandoffKey::RefreshToken).await.unwrap().is_none());
        assert_eq!(
            watcher.get(HandoffKey::OriginBase).await.unwrap(),
            Some(json!(format!("http://localhost:{}", round)))
        );
    }
}

#[tokio::test]
async fn test_file_backend_leaves_no_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handoff.json");
    let backend = FileBackend::new(&path).await.unwrap();

    backend.set(HandoffKey::BusinessName, json!("Acme")).await.unwrap();
    backend.set(HandoffKey::RefreshToken, json!(7)).await.unwrap();
    backend.remove(HandoffKey::RefreshToken).await.unwrap();

    let mut names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["handoff.json", "handoff.json.lock"]);
    assert_eq!(backend.lock_path(), temp_dir.path().join("handoff.json.lock"));
}
