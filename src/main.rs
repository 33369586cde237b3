//! RunFlow - Running Training Companion
//!
//! Main entry point: loads the stored state and prints the dashboard.

use anyhow::Context;
use chrono::{Local, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runflow::metrics::{format_elapsed, round_to, PlanZoneReport};
use runflow::recording::ZERO_PACE;
use runflow::storage::{load_config, Database};
use runflow::AppState;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RunFlow v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    let state = db.load_state().context("Failed to load stored data")?;

    print_dashboard(&state, config.training.recent_window_days);
    Ok(())
}

fn print_dashboard(state: &AppState, recent_days: u32) {
    let now = Local::now();

    match &state.plan {
        Some(plan) => {
            println!("Plan: {} ({} weeks, {})", plan.name, plan.total_weeks, plan.goal);

            let focus = state.today_focus(&now);
            if focus.today.is_empty() {
                println!("Today: rest day");
            }
            for workout in &focus.today {
                let status = if workout.is_completed { "done" } else { "todo" };
                println!(
                    "Today: {} {:.1} km [{}]",
                    workout.title, workout.distance_km, status
                );
            }
            if let Some(next) = focus.next {
                println!("Next: {} on {}", next.workout.title, next.date);
            }

            let report = PlanZoneReport::from_plan(plan);
            if report.boundaries.is_available() {
                for (zone, km) in report.totals.breakdown() {
                    println!("  {:<10} {:>6.1} km", zone.name(), km);
                }
            }
        }
        None => println!("No active plan"),
    }

    let totals = state.totals();
    println!(
        "Last {} days: {:.1} km",
        recent_days,
        state.recent_distance(Utc::now(), recent_days)
    );
    println!(
        "Total: {} runs, {:.1} km, {} h",
        totals.run_count,
        round_to(totals.distance_km, 1),
        totals.duration_hours()
    );

    if let Some(last) = state.logs.iter().max_by_key(|log| log.date) {
        let pace = if last.pace.is_empty() { ZERO_PACE } else { last.pace.as_str() };
        println!(
            "Last run: {:.2} km in {} ({}/km)",
            last.distance_km,
            format_elapsed(last.duration_sec),
            pace
        );
    }

    for shoe in state.active_shoes() {
        println!(
            "Shoe: {} {:.0}/{:.0} km ({:.0}%)",
            shoe.display_name(),
            shoe.distance,
            shoe.max_distance,
            shoe.wear_percent()
        );
    }
}
