//! End-to-end distribution runs
//!
//! Real template loading and the real worker pool, with the scripted
//! FakeRepositoriesService standing in for GitHub.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mobydick_core::application::distribution::COMMIT_MESSAGE;
use mobydick_core::application::{
    cancellation_channel, DistributionManager, ExecutionContext, WorkerPool,
};
use mobydick_core::domain::Visibility;
use mobydick_core::port::repositories::mocks::{fake_repositories, FakeRepositoriesService};
use mobydick_core::port::time_provider::SystemTimeProvider;
use mobydick_core::port::RemoteError;
use mobydick_core::AppError;
use mobydick_infra_template::load_workflow_file;

const TEMPLATE: &str = "name: mobydick\non: [push]\njobs:\n  scan:\n    runs-on: ubuntu-latest\n    steps:\n      - uses: pequod/mobydick@{{ version }}\n";

fn write_template() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mobydick-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mobydick.yaml");
    std::fs::write(&path, TEMPLATE).unwrap();
    path
}

fn manager(
    service: Arc<FakeRepositoriesService>,
    concurrency: usize,
    dry_run: bool,
) -> DistributionManager {
    let template = write_template();
    let workflow_file = load_workflow_file(&template, "v1.2.3").unwrap();
    std::fs::remove_dir_all(template.parent().unwrap()).ok();

    DistributionManager::new(
        "pequod",
        dry_run,
        workflow_file,
        WorkerPool::new(concurrency).unwrap(),
        service,
        Arc::new(SystemTimeProvider),
    )
}

#[tokio::test]
async fn test_paginated_listing_commits_rendered_file_everywhere() {
    let service = Arc::new(FakeRepositoriesService::new());
    service.push_page(fake_repositories(["ahab", "ishmael"]), 2);
    service.push_page(fake_repositories(["queequeg", "starbuck"]), 0);

    let report = manager(Arc::clone(&service), 3, false)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await
        .unwrap();

    assert_eq!(service.list_call_count(), 2);
    assert_eq!(report.success_count(), 4);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(report.path, ".github/workflows/mobydick.yaml");

    let committed = service.committed();
    assert_eq!(committed.len(), 4);
    for file in &committed {
        assert_eq!(file.organisation, "pequod");
        assert_eq!(file.path, ".github/workflows/mobydick.yaml");
        assert_eq!(file.message, COMMIT_MESSAGE);
        let content = String::from_utf8(file.content.clone()).unwrap();
        assert!(content.contains("pequod/mobydick@v1.2.3"));
        assert!(content.ends_with('\n'));
    }
}

#[tokio::test]
async fn test_dry_run_lists_but_never_commits() {
    let service = Arc::new(FakeRepositoriesService::with_repositories([
        "ahab", "ishmael", "queequeg",
    ]));

    let report = manager(Arc::clone(&service), 2, true)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.success_count(), 3);
    assert_eq!(service.create_call_count(), 0);
    assert!(service.committed().is_empty());
}

#[tokio::test]
async fn test_listing_error_aborts_the_run() {
    let service = Arc::new(FakeRepositoriesService::new());
    service.push_page(fake_repositories(["ahab", "ishmael"]), 2);
    service.push_error(RemoteError::new(Some(502), "Bad Gateway"));

    let result = manager(Arc::clone(&service), 2, false)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await;

    match result {
        Err(AppError::Listing(e)) => {
            assert_eq!(e.status_code, Some(502));
            assert_eq!(e.message, "Bad Gateway");
        }
        Err(e) => panic!("expected listing error, got {}", e),
        Ok(report) => panic!("expected listing error, got report for {} repositories", report.total()),
    }
    assert_eq!(service.list_call_count(), 2);
    assert_eq!(service.create_call_count(), 0);
}

#[tokio::test]
async fn test_failing_repository_does_not_stop_the_others() {
    let service = Arc::new(FakeRepositoriesService::with_repositories([
        "ahab", "ishmael", "queequeg", "starbuck", "stubb",
    ]));
    service.fail_commits_for("queequeg");

    let report = manager(Arc::clone(&service), 2, false)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await
        .unwrap();

    assert_eq!(service.create_call_count(), 5);
    assert_eq!(report.success_count(), 4);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failed[0].repository, "queequeg");
    assert!(report.failed[0].error.contains("HTTP 422"));
    assert_eq!(report.succeeded, vec!["ahab", "ishmael", "starbuck", "stubb"]);
}

#[tokio::test(start_paused = true)]
async fn test_concurrency_bounds_wall_clock() {
    let names: Vec<String> = (0..10).map(|i| format!("repo-{}", i)).collect();
    let service = Arc::new(
        FakeRepositoriesService::with_repositories(names).with_commit_delay(Duration::from_secs(1)),
    );

    let start = tokio::time::Instant::now();
    let report = manager(Arc::clone(&service), 2, false)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.success_count(), 10);
    assert!(elapsed >= Duration::from_secs(5), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(6), "elapsed {:?}", elapsed);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_reports_every_repository() {
    let service = Arc::new(
        FakeRepositoriesService::with_repositories(["ahab", "ishmael", "queequeg", "starbuck"])
            .with_commit_delay(Duration::from_secs(10)),
    );
    let manager = manager(Arc::clone(&service), 2, false);

    let (cancel, ctx) = cancellation_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        cancel.cancel();
    });

    let report = manager.distribute(&ctx, Visibility::All).await.unwrap();

    assert_eq!(report.total(), 4);
    assert_eq!(report.failure_count(), 4);
    assert!(service.committed().is_empty());
}

#[tokio::test]
async fn test_exactly_full_last_page_is_listed_once() {
    let names: Vec<String> = (0..100).map(|i| format!("repo-{}", i)).collect();
    let service = Arc::new(FakeRepositoriesService::new());
    service.push_page(fake_repositories(names), 0);
    // Would only be consumed by a speculative follow-up request
    service.push_error(RemoteError::new(Some(500), "unexpected extra page"));

    let report = manager(Arc::clone(&service), 5, true)
        .distribute(&ExecutionContext::background(), Visibility::All)
        .await
        .unwrap();

    assert_eq!(service.list_call_count(), 1);
    assert_eq!(report.success_count(), 100);
}
