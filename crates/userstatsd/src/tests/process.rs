//! Serving loop driven by an injected shutdown future.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::oneshot;

use crate::bootstrap::{StaticConfigLoader, bootstrap_with};
use crate::process::{LaunchError, serve};
use crate::transport::MemoryBus;

use super::support::{HealthEvent, RecordingHealthReporter, RecordingStore, SUBJECT, test_config};

const TIMEOUT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn serves_until_shutdown_then_releases_subject() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon = bootstrap_with(&StaticConfigLoader::new(test_config()), reporter.clone())
        .expect("bootstrap");
    let bus = Arc::new(MemoryBus::new());
    let (stop, stopped) = oneshot::channel::<()>();

    let server = serve(
        &daemon,
        Arc::new(RecordingStore::default()),
        bus.clone(),
        async move { stopped.await.map_err(io::Error::other) },
    );
    let client = async {
        while bus.subscriber_count(SUBJECT) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let reply = bus
            .request(
                SUBJECT,
                serde_json::to_vec(&json!({"command": "system.health"})).expect("encode"),
                TIMEOUT,
            )
            .await
            .expect("health reply");
        stop.send(()).expect("server awaits shutdown");
        serde_json::from_slice::<Value>(&reply.payload).expect("decode")
    };

    let (served, health) = tokio::join!(server, client);

    served.expect("clean shutdown");
    assert_eq!(health["data"]["status"], json!("healthy"));
    assert_eq!(bus.subscriber_count(SUBJECT), 0);
    let events = reporter.events();
    assert!(events.contains(&HealthEvent::SubscriptionReady(SUBJECT.to_owned())));
    assert!(events.contains(&HealthEvent::SubscriptionReleased(SUBJECT.to_owned())));
}

#[tokio::test]
async fn subscription_failure_aborts_startup() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon = bootstrap_with(&StaticConfigLoader::new(test_config()), reporter)
        .expect("bootstrap");
    let bus = Arc::new(MemoryBus::new());
    bus.refuse_subscriptions(true);

    let result = serve(
        &daemon,
        Arc::new(RecordingStore::default()),
        bus,
        std::future::pending::<io::Result<()>>(),
    )
    .await;

    assert!(matches!(result, Err(LaunchError::Transport { .. })));
}

#[tokio::test]
async fn signal_failure_is_reported_after_release() {
    let reporter = Arc::new(RecordingHealthReporter::default());
    let daemon = bootstrap_with(&StaticConfigLoader::new(test_config()), reporter.clone())
        .expect("bootstrap");
    let bus = Arc::new(MemoryBus::new());

    let result = serve(
        &daemon,
        Arc::new(RecordingStore::default()),
        bus.clone(),
        async { Err(io::Error::other("no signals")) },
    )
    .await;

    assert!(matches!(result, Err(LaunchError::Signal { .. })));
    assert_eq!(bus.subscriber_count(SUBJECT), 0);
}
