//! Integration tests for the full cache lifecycle.

use std::collections::HashSet;
use tempfile::TempDir;
use timeline_cache::TimelineCache;
use timeline_cache::timeline::{EventKind, SessionList, SessionSummary, TraceEvent};

fn make_list(ids: &[&str]) -> SessionList {
    SessionList {
        sessions: ids
            .iter()
            .map(|id| SessionSummary::new(id, &format!("Session {id}")))
            .collect(),
    }
}

fn make_events(text: &str) -> Vec<TraceEvent> {
    let mut user = TraceEvent::new(EventKind::UserMessage);
    user.text = Some(text.to_string());

    let mut call = TraceEvent::new(EventKind::ToolCall);
    call.tool_name = Some("bash".to_string());
    call.tool_call_id = Some("call-1".to_string());
    call.args = Some(serde_json::json!({"command": "cargo test"}));

    let mut result = TraceEvent::new(EventKind::ToolResult);
    result.tool_name = Some("bash".to_string());
    result.tool_call_id = Some("call-1".to_string());
    result.output = Some(serde_json::json!({"exit_code": 0}));
    result.is_error = Some(false);

    let mut assistant = TraceEvent::new(EventKind::AssistantMessage);
    assistant.text = Some("tests pass".to_string());

    vec![user, call, result, assistant]
}

#[tokio::test]
async fn full_lifecycle_save_load_evict() {
    let temp = TempDir::new().unwrap();
    let cache = TimelineCache::with_root(temp.path().to_path_buf());

    // Step 1: cold start, everything is a miss.
    assert!(cache.load_session_list().await.unwrap().is_none());
    assert!(cache.load_trace("s-1").await.unwrap().is_none());

    // Step 2: populate from a (simulated) upstream refresh.
    let list = make_list(&["s-1", "s-2", "s-3"]);
    cache.save_session_list(&list).await.unwrap();
    for id in ["s-1", "s-2", "s-3"] {
        cache
            .save_trace(id, &make_events(&format!("work on {id}")))
            .await
            .unwrap();
    }

    // Step 3: everything hits.
    let loaded = cache.load_session_list().await.unwrap().unwrap();
    assert_eq!(loaded, list);
    let trace = cache.load_trace("s-2").await.unwrap().unwrap();
    assert_eq!(trace.events.len(), 4);
    assert_eq!(trace.events[0].text.as_deref(), Some("work on s-2"));

    // Step 4: upstream dropped s-3; reconcile on-disk traces explicitly.
    let keep: HashSet<String> = ["s-1".to_string(), "s-2".to_string()].into();
    let removed = cache.evict_stale_traces(&keep).await.unwrap();
    assert_eq!(removed, 1);
    assert!(cache.load_trace("s-1").await.unwrap().is_some());
    assert!(cache.load_trace("s-3").await.unwrap().is_none());

    // Step 5: eviction is idempotent.
    let removed_again = cache.evict_stale_traces(&keep).await.unwrap();
    assert_eq!(removed_again, 0);
}

#[tokio::test]
async fn reopening_the_cache_sees_previous_state() {
    let temp = TempDir::new().unwrap();

    {
        let cache = TimelineCache::with_root(temp.path().to_path_buf());
        cache
            .save_session_list(&make_list(&["s-1"]))
            .await
            .unwrap();
        cache
            .save_trace("s-1", &make_events("persisted"))
            .await
            .unwrap();
    }

    // A fresh instance over the same root, as after an app restart.
    let reopened = TimelineCache::with_root(temp.path().to_path_buf());
    let list = reopened.load_session_list().await.unwrap().unwrap();
    assert_eq!(list.sessions[0].id, "s-1");
    let trace = reopened.load_trace("s-1").await.unwrap().unwrap();
    assert_eq!(trace.events[0].text.as_deref(), Some("persisted"));
}

#[tokio::test]
async fn corruption_recovers_to_miss_then_repopulates() {
    let temp = TempDir::new().unwrap();
    let cache = TimelineCache::with_root(temp.path().to_path_buf());

    cache
        .save_trace("s-1", &make_events("original"))
        .await
        .unwrap();

    // Corrupt the trace on disk behind the cache's back.
    let trace_path = temp.path().join("traces").join("s-1.json");
    std::fs::write(&trace_path, "{\"events\": [{\"id\": tru").unwrap();

    // The bad record reads as a miss and is removed from disk.
    assert!(cache.load_trace("s-1").await.unwrap().is_none());
    assert!(!trace_path.exists());

    // The caller's refresh path repopulates; subsequent loads hit again.
    cache
        .save_trace("s-1", &make_events("refetched"))
        .await
        .unwrap();
    let trace = cache.load_trace("s-1").await.unwrap().unwrap();
    assert_eq!(trace.events[0].text.as_deref(), Some("refetched"));
}

#[tokio::test]
async fn metrics_track_the_lifecycle() {
    let temp = TempDir::new().unwrap();
    let cache = TimelineCache::with_root(temp.path().to_path_buf());

    let before = cache.metrics().await;
    assert_eq!(before.root, temp.path());
    assert_eq!(before.file_count, 0);

    cache
        .save_session_list(&make_list(&["s-1", "s-2"]))
        .await
        .unwrap();
    cache
        .save_trace("s-1", &make_events("hello"))
        .await
        .unwrap();
    cache
        .save_trace("s-2", &make_events("world"))
        .await
        .unwrap();

    let populated = cache.metrics().await;
    assert_eq!(populated.file_count, 3);
    assert!(populated.total_bytes > before.total_bytes);

    let keep: HashSet<String> = HashSet::new();
    cache.evict_stale_traces(&keep).await.unwrap();

    let evicted = cache.metrics().await;
    assert_eq!(evicted.file_count, 1); // session list remains
}
