//! Behaviour every cache engine must share, run against each engine's tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use watched_core::ports::{Cache, CacheExt};
use watched_core::{MAX_TTL, Ttl};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Counter {
    n: u32,
}

/// Run the shared checks. Keys are prefixed per run so a shared backend can be reused.
pub async fn check(cache: &dyn Cache) {
    let prefix = format!("contract-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0));
    let key = |name: &str| format!("{prefix}:{name}");

    // Never written
    assert_eq!(cache.get(&key("missing")).await.unwrap(), None);
    assert!(!cache.exists(&key("missing")).await.unwrap());

    // Infinite ttl
    cache.set(&key("a"), json!({"n": 1}), Some(Ttl::Infinite)).await.unwrap();
    assert_eq!(cache.get(&key("a")).await.unwrap(), Some(json!({"n": 1})));
    assert!(cache.exists(&key("a")).await.unwrap());
    assert_eq!(
        cache.get_as::<Counter>(&key("a")).await.unwrap(),
        Some(Counter { n: 1 })
    );

    cache.delete(&key("a")).await.unwrap();
    assert_eq!(cache.get(&key("a")).await.unwrap(), None);
    assert!(!cache.exists(&key("a")).await.unwrap());

    // No ttl
    cache.set_as(&key("plain"), &Counter { n: 7 }, None).await.unwrap();
    assert_eq!(cache.get(&key("plain")).await.unwrap(), Some(json!({"n": 7})));

    // Upsert replaces
    cache.set(&key("up"), json!("v1"), Some(Ttl::Infinite)).await.unwrap();
    cache.set(&key("up"), json!("v2"), Some(Ttl::from_millis(60_000))).await.unwrap();
    assert_eq!(cache.get(&key("up")).await.unwrap(), Some(json!("v2")));

    // Finite ttl: live, then expired but still present
    cache
        .set(&key("short"), json!([1, 2, 3]), Some(Ttl::from_millis(300)))
        .await
        .unwrap();
    assert_eq!(cache.get(&key("short")).await.unwrap(), Some(json!([1, 2, 3])));
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(cache.get(&key("short")).await.unwrap(), None);
    assert!(cache.exists(&key("short")).await.unwrap());

    // Oversized finite ttl is accepted unclamped
    let oversized = Ttl::Finite(MAX_TTL * 2);
    cache.set(&key("big"), json!(true), Some(oversized)).await.unwrap();
    assert_eq!(cache.get(&key("big")).await.unwrap(), Some(json!(true)));

    // Deleting a missing key is fine
    cache.delete(&key("never")).await.unwrap();
    assert!(!cache.exists(&key("never")).await.unwrap());

    for name in ["plain", "up", "short", "big"] {
        cache.delete(&key(name)).await.unwrap();
    }
}
