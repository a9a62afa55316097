use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use grants_dashboard::{display, top_n, AmountPolicy, GrantStore, NormalizationEngine};

const TOP_ORGS: usize = 20;
const LABEL_WIDTH: usize = 40;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut snapshot: Option<String> = None;
    let mut as_json = false;
    let mut policy = AmountPolicy::Drop;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => as_json = true,
            "--zero-fill" => policy = AmountPolicy::ZeroFill,
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            other if other.starts_with('-') => bail!("Unknown flag: {}", other),
            other => snapshot = Some(other.to_string()),
        }
    }

    let snapshot = match snapshot {
        Some(path) => path,
        None => {
            print_usage(&args[0]);
            std::process::exit(2);
        }
    };

    run_summary(Path::new(&snapshot), policy, as_json)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--json] [--zero-fill] <snapshot.csv>", program);
    eprintln!();
    eprintln!("  --json       print the derived views as JSON instead of a summary");
    eprintln!("  --zero-fill  keep rows with bad amounts as $0 instead of dropping them");
}

fn run_summary(snapshot: &Path, policy: AmountPolicy, as_json: bool) -> Result<()> {
    if !as_json {
        println!("📂 Loading grants snapshot: {}", snapshot.display());
    }

    let store = GrantStore::from_path(snapshot, NormalizationEngine::with_policy(policy))?;

    if !as_json {
        println!(
            "✓ {} grants loaded, {} rows rejected",
            store.records().len(),
            store.rejected_count()
        );
        for err in store.rejected() {
            eprintln!("  ✗ {}", err);
        }
    }

    let dashboard = match store.dashboard() {
        Some(dashboard) => dashboard,
        None => {
            eprintln!("No usable rows in snapshot, nothing to summarize.");
            return Ok(());
        }
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    // Focus areas, smallest first (same order the dashboard charts them)
    println!("\n━━━ Focus Areas ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let area_keys: Vec<String> = dashboard.focus_areas.iter().map(|a| a.key.clone()).collect();
    let area_labels = display::display_labels(&area_keys, LABEL_WIDTH);
    for (aggregate, label) in dashboard.focus_areas.iter().zip(&area_labels) {
        println!(
            "  {:<42} {:>14}  ({} grants)",
            label,
            display::format_usd(aggregate.total_amount),
            aggregate.grant_count
        );
    }

    // Largest organizations
    println!("\n━━━ Top {} Organizations ━━━━━━━━━━━━━━━━━━━", TOP_ORGS);
    let top = top_n(dashboard.organizations.clone(), TOP_ORGS);
    let org_keys: Vec<String> = top.iter().map(|a| a.key.clone()).collect();
    let org_labels = display::display_labels(&org_keys, LABEL_WIDTH);
    for (aggregate, label) in top.iter().zip(&org_labels) {
        println!(
            "  {:<42} {:>14}  ({} grants)",
            label,
            display::format_usd(aggregate.total_amount),
            aggregate.grant_count
        );
    }

    // Monthly range
    println!("\n━━━ Monthly ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let first = dashboard.monthly.first().expect("non-empty dashboard");
    let last = dashboard.monthly.last().expect("non-empty dashboard");
    let empty_months = dashboard
        .monthly
        .iter()
        .filter(|b| b.grant_count == 0)
        .count();
    println!(
        "  {} months from {} to {} ({} without grants)",
        dashboard.monthly.len(),
        first.month,
        last.month,
        empty_months
    );

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "✓ Total granted: {} across {} grants",
        display::format_usd(dashboard.total_granted()),
        dashboard.grant_count()
    );

    Ok(())
}
