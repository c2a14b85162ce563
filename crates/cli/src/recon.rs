//! `orecon recon`: order-level reconciliation of two datasets.

use std::path::{Path, PathBuf};

use orderrecon_engine::Locale;
use orderrecon_recon::{reconcile_matrices, ReconConfig, ReconResult};

use crate::exit_codes::EXIT_DISCREPANCIES;
use crate::{CliError, Context};

pub fn cmd_recon(
    ctx: &Context,
    a: &Path,
    b: &Path,
    output: Option<PathBuf>,
    tolerance_cents: Option<i64>,
    fail_on_discrepancy: bool,
) -> Result<(), CliError> {
    let config = effective_config(ctx, tolerance_cents)?;

    let matrix_a = ctx.load(a)?;
    let matrix_b = ctx.load(b)?;
    let result = reconcile_matrices(&matrix_a, &matrix_b, &ctx.settings.analysis, &config);

    if let Some(ref path) = output {
        write_report(&result, path)?;
    }

    if ctx.json {
        let json = result.to_json().map_err(|e| CliError::error(e.to_string()))?;
        println!("{json}");
    } else {
        print_items(&result);
    }

    // Human summary to stderr
    print_summary(&result, &ctx.settings.analysis.locale);

    if fail_on_discrepancy && !result.is_clean() {
        return Err(CliError {
            code: EXIT_DISCREPANCIES,
            message: format!("{} discrepancies found", result.summary.discrepancy_count),
            hint: None,
        });
    }
    Ok(())
}

/// Settings' recon section with command-line overrides applied.
pub fn effective_config(ctx: &Context, tolerance_cents: Option<i64>) -> Result<ReconConfig, CliError> {
    let mut config = ctx.settings.recon.clone();
    if let Some(cents) = tolerance_cents {
        config.tolerance_cents = cents;
    }
    config
        .validate()
        .map_err(|e| CliError::args(e.to_string()))?;
    Ok(config)
}

pub fn write_report(result: &ReconResult, path: &Path) -> Result<(), CliError> {
    orderrecon_io::write_report(result, path).map_err(CliError::load)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn print_items(result: &ReconResult) {
    if result.items.is_empty() {
        println!("no orders on either side");
        return;
    }
    let width = result
        .items
        .iter()
        .map(|i| i.order_key.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);
    for item in &result.items {
        println!(
            "{:<width$}  {:<15}  {}",
            item.order_key,
            item.status.label(),
            item.message
        );
    }
}

pub fn print_summary(result: &ReconResult, locale: &Locale) {
    let s = &result.summary;
    eprintln!(
        "recon: {} orders in A, {} in B; {} matched ({}%), {} amount mismatches, {} missing in B, {} missing in A",
        s.total_a,
        s.total_b,
        s.match_count,
        s.match_percentage,
        s.mismatch_count,
        s.missing_in_b,
        s.missing_in_a,
    );
    if s.duplicate_rows_a + s.duplicate_rows_b > 0 {
        eprintln!(
            "note: {} duplicate rows in A and {} in B were folded into their order",
            s.duplicate_rows_a, s.duplicate_rows_b
        );
    }
    let net: f64 = result.items.iter().filter_map(|i| i.difference).sum();
    if s.mismatch_count > 0 {
        eprintln!("net amount difference (B - A): {}", locale.format_amount(net));
    }
}
