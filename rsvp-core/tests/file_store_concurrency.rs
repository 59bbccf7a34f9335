//! Concurrent submissions against the JSON file backend.
//!
//! Appends are serialized by the sidecar lock, so every submission must
//! survive: no lost updates.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use rsvp_core::store::FileStore;
use rsvp_core::{NewRsvp, RsvpError, RsvpService, RsvpStore};

fn input(n: usize) -> NewRsvp {
    NewRsvp {
        name: Some(format!("Guest {n}")),
        email: Some(format!("guest{n}@example.com")),
        attendees: Some(1),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_concurrent_submissions_both_persist() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("rsvps.json")).await.unwrap());
    let service = Arc::new(RsvpService::new(store.clone()));

    let a = tokio::spawn({
        let service = service.clone();
        async move { service.submit_rsvp(input(1)).await }
    });
    let b = tokio::spawn({
        let service = service.clone();
        async move { service.submit_rsvp(input(2)).await }
    });
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    assert_eq!(store.list_all().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_writers_on_separate_handles_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsvps.json");

    // Each writer opens its own store, like separate server processes would.
    let mut handles = Vec::new();
    for n in 0..32 {
        let path = path.clone();
        handles.push(tokio::spawn(async move {
            let store = FileStore::open(path).await?;
            let service = RsvpService::new(Arc::new(store));
            service.submit_rsvp(input(n)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let store = FileStore::open(&path).await.unwrap();
    let mut names: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_burst_stamps_stay_within_each_call() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("rsvps.json")).await.unwrap());
    let service = Arc::new(RsvpService::new(store.clone()));

    let mut handles = Vec::new();
    for n in 0..200 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let mut new = input(n);
            if n % 2 == 1 {
                new.email = None;
            }
            let before = Utc::now().trunc_subsecs(3);
            let result = service.submit_rsvp(new).await;
            let after = Utc::now();
            (before, result, after)
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            (before, Ok(rsvp), after) => {
                accepted += 1;
                assert!(rsvp.submitted_at >= before, "{} < {before}", rsvp.submitted_at);
                assert!(rsvp.submitted_at <= after, "{} > {after}", rsvp.submitted_at);
            }
            (_, Err(err), _) => assert!(matches!(err, RsvpError::Validation(_))),
        }
    }

    assert_eq!(accepted, 100);
    assert_eq!(store.list_all().await.unwrap().len(), 100);
}
