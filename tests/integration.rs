//! Integration tests for handle-forge

use handle_forge::limiter::ManualClock;
use handle_forge::registry::testing::ScriptedRegistry;
use handle_forge::registry::RegistryAnswer;
use handle_forge::{
    AvailabilityStatus, BatchRunner, CheckConfig, GithubRegistry, HandleChecker, HandleGenerator,
    HandleValidator, LimiterConfig, RateLimiter, StateStore, StatsRecorder,
};
use std::sync::Arc;
use std::time::Duration;

struct NoEvents;
impl handle_forge::BatchEvents for NoEvents {}

fn pipeline(
    registry: ScriptedRegistry,
    max_calls: u32,
) -> (tempfile::TempDir, BatchRunner, Arc<StatsRecorder>) {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let limiter_config = LimiterConfig {
        max_calls,
        min_spacing: Duration::ZERO,
        ..Default::default()
    };
    let limiter = Arc::new(RateLimiter::with_clock(
        limiter_config,
        store.clone(),
        ManualClock::starting_at(1_000_000),
    ));
    let stats = Arc::new(StatsRecorder::load(store));
    let checker = HandleChecker::new(Arc::new(registry), Arc::clone(&limiter), Arc::clone(&stats));
    let check_config = CheckConfig {
        batch_size: 2,
        batch_delay: Duration::from_millis(5),
        ..Default::default()
    };
    let runner = BatchRunner::new(checker, limiter, &check_config);
    (dir, runner, stats)
}

#[tokio::test]
async fn test_generate_then_check_pipeline() {
    let generator = HandleGenerator::new();
    let validator = HandleValidator::new();
    let candidates = generator.generate("alice");
    assert!(!candidates.is_empty());
    for candidate in &candidates {
        assert!(validator.is_valid(candidate));
    }

    let (_dir, runner, stats) = pipeline(ScriptedRegistry::new(), 55);
    let report = runner.run(&candidates, &NoEvents).await;

    assert_eq!(report.results.len(), candidates.len());
    assert!(report
        .results
        .iter()
        .all(|r| r.status == AvailabilityStatus::Available));
    assert_eq!(stats.snapshot().total_checks, candidates.len() as u64);
    assert_eq!(stats.snapshot().total_available, candidates.len() as u64);
}

#[tokio::test]
async fn test_mixed_outcomes_aggregate() {
    let registry = ScriptedRegistry::new()
        .with_answer("octocat", RegistryAnswer::Found)
        .with_answer("surely-unclaimed", RegistryAnswer::NotFound);
    let (_dir, runner, _stats) = pipeline(registry, 55);

    let handles = vec!["octocat".to_string(), "surely-unclaimed".to_string()];
    let report = runner.run(&handles, &NoEvents).await;

    assert_eq!(report.with_status(AvailabilityStatus::Taken).len(), 1);
    assert_eq!(report.with_status(AvailabilityStatus::Available).len(), 1);
}

#[tokio::test]
async fn test_quota_exhaustion_end_to_end() {
    let (_dir, runner, _stats) = pipeline(ScriptedRegistry::new(), 3);

    let handles: Vec<String> = (0..6).map(|i| format!("handle{}", i)).collect();
    let report = runner.run(&handles, &NoEvents).await;

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.skipped.len(), 3);
}

#[tokio::test]
async fn test_limiter_state_shared_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let clock = ManualClock::starting_at(1_000_000);
    let limiter_config = LimiterConfig {
        max_calls: 5,
        min_spacing: Duration::ZERO,
        ..Default::default()
    };

    {
        let limiter = Arc::new(RateLimiter::with_clock(
            limiter_config.clone(),
            store.clone(),
            clock.clone(),
        ));
        let stats = Arc::new(StatsRecorder::load(store.clone()));
        let checker =
            HandleChecker::new(Arc::new(ScriptedRegistry::new()), Arc::clone(&limiter), stats);
        let config = CheckConfig {
            batch_delay: Duration::from_millis(1),
            ..Default::default()
        };
        let runner = BatchRunner::new(checker, limiter, &config);
        runner
            .run(&["a".to_string(), "b".to_string(), "c".to_string()], &NoEvents)
            .await;
    }

    // A fresh limiter over the same store sees the spent quota
    let limiter = RateLimiter::with_clock(limiter_config, store, clock);
    assert_eq!(limiter.remaining(), 2);
}

#[tokio::test]
async fn test_github_registry_against_live_api() {
    // Network access is not guaranteed in test environments; only assert
    // when the lookup actually succeeds
    let registry = GithubRegistry::new();
    use handle_forge::registry::RegistryLookup;

    match registry.lookup("torvalds").await {
        Ok(answer) => assert_eq!(answer, RegistryAnswer::Found),
        Err(_) => {
            println!("Network error checking torvalds - this is acceptable in tests");
        }
    }
}

#[test]
fn test_validator_and_generator_contracts() {
    let validator = HandleValidator::new();

    assert!(validator.validate("alice").is_ok());
    assert!(validator.validate("-bad-").is_err());
    assert!(validator.validate("a--b").is_err());
    assert!(validator.validate("").is_err());

    let generator = HandleGenerator::new();
    let candidates = generator.generate("integration");
    assert!(candidates.len() <= generator.config().max_candidates);
}

#[test]
fn test_error_handling() {
    use handle_forge::HandleForgeError;

    let error = HandleForgeError::config("config error");
    assert!(error.to_string().contains("config error"));

    let error = HandleForgeError::network("boom", Some(429), None);
    assert!(error.is_throttle());

    let error = HandleForgeError::internal("internal error");
    assert!(error.to_string().contains("internal error"));
}

#[test]
fn test_library_initialization() {
    // Test that the library can be initialized without panicking
    let result = handle_forge::init();
    assert!(result.is_ok());
}
