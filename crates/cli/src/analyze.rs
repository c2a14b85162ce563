//! `orecon analyze`: Order Log header, target counts, statistics/health of the
//! Billing Export and reconciliation of both, as one JSON report.

use std::path::{Path, PathBuf};

use orderrecon_engine::{count_targets, extract_header, HeaderRecord, TargetCounts};
use orderrecon_recon::{reconcile_matrices, ReconResult};
use serde::Serialize;

use crate::inspect::{targets_from_order_log, StatsReport};
use crate::recon::{effective_config, print_summary, write_report};
use crate::{print_json, CliError, Context};

#[derive(Serialize)]
struct AnalysisReport {
    order_log: String,
    billing: String,
    header: HeaderRecord,
    targets: Vec<String>,
    target_counts: TargetCounts,
    billing_stats: StatsReport,
    reconciliation: ReconResult,
}

pub fn cmd_analyze(
    ctx: &Context,
    order_log_path: &Path,
    billing_path: &Path,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = effective_config(ctx, None)?;
    let order_log = ctx.load(order_log_path)?;
    let billing = ctx.load(billing_path)?;
    let analysis = &ctx.settings.analysis;

    let header = extract_header(&order_log, &analysis.header);
    let targets = targets_from_order_log(ctx, &order_log);
    let target_counts = count_targets(&billing, &targets);
    let billing_stats = StatsReport::build(ctx, &billing);
    let reconciliation = reconcile_matrices(&order_log, &billing, analysis, &config);

    if let Some(ref path) = output {
        write_report(&reconciliation, path)?;
    }

    eprintln!(
        "targets: {} of {} found in billing ({} matches)",
        target_counts.unique_targets_found,
        targets.len(),
        target_counts.total_matches
    );
    eprintln!("health: {}/100", billing_stats.health.score);
    print_summary(&reconciliation, &analysis.locale);

    let report = AnalysisReport {
        order_log: order_log_path.display().to_string(),
        billing: billing_path.display().to_string(),
        header,
        targets: targets.iter().map(str::to_string).collect(),
        target_counts,
        billing_stats,
        reconciliation,
    };
    print_json(&report)
}
