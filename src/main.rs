//! Handle Forge - username generation and availability checking
//!
//! Forge candidate usernames from a name or keyword and check them against
//! GitHub in real time, without blowing through the lookup quota.

use handle_forge::{
    AvailabilityStatus, BatchEvents, BatchReport, BatchRunner, CheckConfig, GithubRegistry,
    HandleChecker, HandleGenerator, LimiterConfig, RateLimiter, Result, StateStore, StatsRecorder,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the library
    if let Err(e) = handle_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    // Get command line arguments
    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    let seed = args[1..].join(" ");
    if seed.trim().is_empty() {
        println!("Please provide a name or keyword to forge handles from.");
        println!("Example: handle-forge \"alice\"    (use --help for details)");
        return Ok(());
    }

    // Run the main flow
    if let Err(e) = run_handle_forge(&seed).await {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }

    Ok(())
}

/// Main handle forge workflow
async fn run_handle_forge(seed: &str) -> Result<()> {
    // Show welcome message
    println!("⚒️  Handle Forge - username generation and availability checking");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let store = StateStore::new(state_dir());
    let stats = Arc::new(StatsRecorder::load(store.clone()));
    stats.session_started();
    let _flush_task = Arc::clone(&stats).spawn_flush_task();

    let limiter = Arc::new(RateLimiter::new(LimiterConfig::default(), store));

    // Generate candidates
    println!("🎯 Forging handles for: \"{}\"", seed);
    let generator = HandleGenerator::new();
    let candidates = generator.generate(seed);

    if candidates.is_empty() {
        println!("❌ Nothing usable in that seed. Try something with letters or digits.");
        return Ok(());
    }
    stats.record_generated(candidates.len() as u64);

    display_candidates(&candidates);

    // Check availability
    let remaining = limiter.remaining();
    println!("🔍 Checking availability ({} lookups left this hour)...", remaining);
    println!();

    let check_config = check_config_from_env();
    let registry = Arc::new(GithubRegistry::with_config(&check_config));
    let checker = HandleChecker::new(registry, Arc::clone(&limiter), Arc::clone(&stats));
    let runner = BatchRunner::new(checker, Arc::clone(&limiter), &check_config);

    let progress = ProgressEvents::new(candidates.len() as u64);
    let report = runner.run(&candidates, &progress).await;
    progress.finish();

    display_report(&report);
    display_session_summary(&stats, &limiter);

    stats.flush();
    Ok(())
}

/// Resolve the state directory, honoring the env override
fn state_dir() -> PathBuf {
    env::var("HANDLE_FORGE_STATE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| StateStore::default_dir())
}

/// Build check configuration, honoring the env override
fn check_config_from_env() -> CheckConfig {
    let mut config = CheckConfig::default();
    if let Ok(base) = env::var("HANDLE_FORGE_API_BASE") {
        config.api_base = base;
    }
    config
}

/// Progress bar adapter over the batch event callbacks
struct ProgressEvents {
    bar: ProgressBar,
}

impl ProgressEvents {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .expect("static progress template")
                .progress_chars("=> "),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BatchEvents for ProgressEvents {
    fn on_result(&self, handle: &str, status: AvailabilityStatus) {
        self.bar.inc(1);
        self.bar.set_message(format!("{} → {}", handle, status));
    }

    fn on_progress(&self, _current: usize, _total: usize, remaining_quota: u32) {
        self.bar
            .set_message(format!("{} lookups left", remaining_quota));
    }

    fn on_rate_limited(&self, retry_hint: Option<Duration>) {
        let hint = retry_hint
            .map(|d| format!("retry in ~{}min", (d.as_secs() / 60).max(1)))
            .unwrap_or_else(|| "retry later".to_string());
        self.bar.println(format!("⏱️  Rate limited - {}", hint));
    }

    fn on_skipped(&self, handles: &[String]) {
        self.bar.println(format!(
            "⏭️  Skipped {} handle(s), not enough quota left this hour",
            handles.len()
        ));
    }
}

/// Display generated candidates in a compact grid
fn display_candidates(candidates: &[String]) {
    println!();
    println!("🎨 Generated Handles ({}):", candidates.len());
    println!("═══════════════════");

    let mut count = 0;
    for candidate in candidates {
        count += 1;
        print!("{:2}. {:<22}", count, candidate);

        // New line every 3 handles for readability
        if count % 3 == 0 {
            println!();
        }
    }
    if candidates.len() % 3 != 0 {
        println!();
    }
    println!();
}

/// Display check results grouped by outcome
fn display_report(report: &BatchReport) {
    let available = report.with_status(AvailabilityStatus::Available);
    let taken = report.with_status(AvailabilityStatus::Taken);
    let errors = report.with_status(AvailabilityStatus::Error);

    println!();
    if !available.is_empty() {
        println!("🎉 Available Handles ({}):", available.len());
        println!("─────────────────────────");
        for result in &available {
            println!("✅ {} - AVAILABLE", result.handle);
        }
        println!();
    }

    if !taken.is_empty() {
        println!("❌ Taken Handles ({}):", taken.len());
        println!("─────────────────────");
        for result in &taken {
            println!("❌ {} - TAKEN", result.handle);
        }
        println!();
    }

    if !errors.is_empty() {
        println!("⚠️  Checking Issues ({}):", errors.len());
        println!("───────────────────────");
        for result in &errors {
            let detail = result.error_message.as_deref().unwrap_or("Check Error");
            println!("⚠️  {} - {}", result.handle, detail);
        }
        println!();
    }

    if report.halted_on_rate_limit {
        println!("⏱️  Stopped early: the lookup quota for this hour is spent.");
    }
    if !report.skipped.is_empty() {
        println!(
            "⏭️  Not checked ({}): {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    if available.is_empty() {
        println!();
        println!("😔 No available handles this round. Try another seed!");
    } else {
        println!();
        println!("🎉 {} handle(s) up for grabs!", available.len());
    }
}

/// Display accumulated session statistics
fn display_session_summary(stats: &StatsRecorder, limiter: &RateLimiter) {
    let snapshot = stats.snapshot();

    println!();
    println!("📈 Session Summary:");
    println!("   📊 Checks performed (all time): {}", snapshot.total_checks);
    println!("   🎨 Handles generated (all time): {}", snapshot.total_generated);
    println!("   ✅ Available found (all time): {}", snapshot.total_available);
    if snapshot.rate_limit_hits > 0 {
        println!("   ⏱️  Registry rate-limit hits: {}", snapshot.rate_limit_hits);
    }
    println!("   🔢 Sessions: {}", snapshot.sessions_count);
    println!("   🕐 Lookups left this hour: {}", limiter.remaining());
}

/// Print help information
fn print_help() {
    println!("⚒️  Handle Forge - username generation and availability checking");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    handle-forge <NAME>");
    println!();
    println!("EXAMPLES:");
    println!("    handle-forge alice             # Forge handles from a name");
    println!("    handle-forge \"Alice Smith\"     # Spaces are stripped");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    HANDLE_FORGE_API_BASE     Override the registry lookup endpoint");
    println!("    HANDLE_FORGE_STATE_DIR    Where call history and stats live");
    println!("                              (default: ~/.handle-forge)");
    println!();
    println!("FEATURES:");
    println!("    • Professional username candidates from any name or keyword");
    println!("    • Real-time availability checking against GitHub");
    println!("    • Sliding-window rate limiting that survives restarts");
    println!("    • Session statistics across runs");
    println!();
    println!("Made with ❤️ and 🦀 Rust");
}
