use std::cell::Cell;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::*;

#[test]
fn zero_limit_is_rejected() {
    assert_eq!(BatchExecutor::new(0).unwrap_err(), BatchError::InvalidLimit);
    assert!(BatchExecutor::new(1).is_ok());
}

#[tokio::test(start_paused = true)]
async fn never_exceeds_limit() {
    let active = Cell::new(0usize);
    let peak = Cell::new(0usize);
    let tasks = (0..10u64).map(|i| {
        let active = &active;
        let peak = &peak;
        async move {
            active.set(active.get() + 1);
            peak.set(peak.get().max(active.get()));
            sleep(Duration::from_millis(10 + i * 7)).await;
            active.set(active.get() - 1);
            i
        }
    });

    let results = BatchExecutor::new(3).unwrap().run(tasks).await.unwrap();
    assert_eq!(results.len(), 10);
    assert_eq!(peak.get(), 3);
    assert_eq!(active.get(), 0);
}

#[tokio::test(start_paused = true)]
async fn results_keep_input_order() {
    let tasks = (0..10u64).map(|i| async move {
        sleep(Duration::from_millis((10 - i) * 20)).await;
        format!("r{i}")
    });
    let results = BatchExecutor::unbounded().run(tasks).await.unwrap();
    let expected: Vec<String> = (0..10).map(|i| format!("r{i}")).collect();
    assert_eq!(results, expected);
}

#[tokio::test(start_paused = true)]
async fn monitor_sees_start_ticks_and_one_final_call() {
    let mut calls: Vec<BatchSnapshot> = Vec::new();
    let tasks = (0..10u64).map(|i| async move {
        sleep(Duration::from_millis(300 * (i + 1))).await;
    });

    BatchExecutor::new(5)
        .unwrap()
        .with_monitor_interval(Duration::from_secs(1))
        .run_with_monitor(tasks, |s| calls.push(*s))
        .await
        .unwrap();

    assert!(calls.len() >= 3, "calls: {calls:?}");
    assert_eq!(calls[0].num_done, 0);
    assert_eq!(calls[0].num_total, 10);
    let finals: Vec<_> = calls.iter().filter(|s| s.num_done == 10).collect();
    assert_eq!(finals.len(), 1);
    assert_eq!(calls.last().unwrap().num_done, 10);
    assert!(calls.windows(2).all(|w| w[0].num_done <= w[1].num_done));
}

#[tokio::test]
async fn empty_batch_returns_immediately() {
    let mut calls = Vec::new();
    let tasks: Vec<std::future::Ready<u8>> = Vec::new();
    let results = BatchExecutor::new(4)
        .unwrap()
        .run_with_monitor(tasks, |s| calls.push(*s))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].num_done, calls[0].num_total), (0, 0));
}

#[tokio::test(start_paused = true)]
async fn failures_are_collected_not_raised() {
    let mut last = None;
    let tasks = (0..6u32).map(|i| async move {
        sleep(Duration::from_millis(5)).await;
        if i % 2 == 0 {
            Ok(i)
        } else {
            Err(format!("task {i} failed"))
        }
    });
    let results = BatchExecutor::new(2)
        .unwrap()
        .run_with_monitor(tasks, |s| last = Some(*s))
        .await
        .unwrap();
    assert_eq!(results.iter().filter(|r| r.is_err()).count(), 3);
    assert_eq!(results[1], Err("task 1 failed".to_string()));
    let last = last.unwrap();
    assert_eq!((last.num_done, last.num_total), (6, 6));
}

#[tokio::test]
async fn precancelled_token_starts_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let started = Cell::new(false);
    let tasks = (0..3).map(|_| {
        let started = &started;
        async move { started.set(true) }
    });
    let err = BatchExecutor::new(2)
        .unwrap()
        .with_cancellation(token)
        .run(tasks)
        .await
        .unwrap_err();
    assert_eq!(err, BatchError::Cancelled { done: 0, total: 3 });
    assert!(!started.get());
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_in_flight_tasks() {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let tasks = (0..4u64).map(|i| async move {
        sleep(Duration::from_millis(20 + i * 1000)).await;
    });
    let err = BatchExecutor::unbounded()
        .with_cancellation(token)
        .run(tasks)
        .await
        .unwrap_err();
    assert_eq!(err, BatchError::Cancelled { done: 1, total: 4 });
}

#[test]
fn snapshot_completion() {
    assert!(BatchSnapshot::new(0, 0).is_complete());
    assert!(!BatchSnapshot::new(3, 4).is_complete());
    assert!(BatchSnapshot::new(4, 4).is_complete());
}
