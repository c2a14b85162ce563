//! `orecon header`, `orecon count`, `orecon stats`: single-pass analysis commands.

use std::path::{Path, PathBuf};

use orderrecon_engine::{
    assess_data_health, calculate_date_range, calculate_statistics, count_targets, extract_header,
    generate_trend_data, ColumnMap, DateRange, HealthAssessment, HeaderRecord, Locale, Matrix,
    Statistics, TargetCounts, TargetSet,
};
use serde::Serialize;

use crate::{print_json, CliError, Context};

// ============================================================================
// header
// ============================================================================

pub fn cmd_header(ctx: &Context, order_log: &Path) -> Result<(), CliError> {
    let matrix = ctx.load(order_log)?;
    let header = extract_header(&matrix, &ctx.settings.analysis.header);

    if header.is_empty() {
        log::warn!("{}: no header labels found", order_log.display());
    }

    if ctx.json {
        return print_json(&header);
    }
    print_header(&header);
    Ok(())
}

pub fn print_header(header: &HeaderRecord) {
    let rows = [
        ("Date", &header.date),
        ("Order number", &header.order_number),
        ("Location", &header.location),
        ("Customer", &header.customer),
        ("Facility", &header.facility),
    ];
    for (label, value) in rows {
        let value = if value.is_empty() { "-" } else { value.as_str() };
        println!("{:<14} {}", format!("{label}:"), value);
    }
}

// ============================================================================
// count
// ============================================================================

#[derive(Serialize)]
struct CountReport<'a> {
    targets: usize,
    #[serde(flatten)]
    counts: &'a TargetCounts,
    ranked: Vec<RankedTarget<'a>>,
    missing: Vec<&'a str>,
}

#[derive(Serialize)]
struct RankedTarget<'a> {
    target: &'a str,
    count: usize,
}

pub fn cmd_count(
    ctx: &Context,
    billing: &Path,
    targets: Option<String>,
    targets_file: Option<PathBuf>,
    order_log: Option<PathBuf>,
    top: Option<usize>,
) -> Result<(), CliError> {
    let target_set = resolve_targets(ctx, targets, targets_file, order_log)?;
    if target_set.is_empty() {
        return Err(CliError::args("target list is empty")
            .with_hint("pass identifiers with --targets, --targets-file or --order-log"));
    }

    let matrix = ctx.load(billing)?;
    let counts = count_targets(&matrix, &target_set);
    log::info!(
        "{} of {} targets found, {} matches",
        counts.unique_targets_found,
        target_set.len(),
        counts.total_matches
    );

    let limit = top.unwrap_or(usize::MAX);
    let report = CountReport {
        targets: target_set.len(),
        counts: &counts,
        ranked: counts
            .ranked()
            .into_iter()
            .take(limit)
            .map(|(target, count)| RankedTarget { target, count })
            .collect(),
        missing: counts.missing(),
    };

    if ctx.json {
        return print_json(&report);
    }

    println!(
        "{} of {} targets found, {} matches in {} rows",
        counts.unique_targets_found,
        report.targets,
        counts.total_matches,
        counts.row_count
    );
    for entry in &report.ranked {
        println!("  {:>6}  {}", entry.count, entry.target);
    }
    if !report.missing.is_empty() {
        println!("not found: {}", report.missing.join(", "));
    }
    Ok(())
}

fn resolve_targets(
    ctx: &Context,
    targets: Option<String>,
    targets_file: Option<PathBuf>,
    order_log: Option<PathBuf>,
) -> Result<TargetSet, CliError> {
    if let Some(list) = targets {
        return Ok(TargetSet::parse(&list));
    }
    if let Some(path) = targets_file {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| CliError::load(orderrecon_io::LoadError::Io {
                path: path.clone(),
                message: e.to_string(),
            }))?;
        return Ok(TargetSet::parse(&text));
    }
    if let Some(path) = order_log {
        let matrix = ctx.load(&path)?;
        return Ok(targets_from_order_log(ctx, &matrix));
    }
    Err(CliError::args("one of --targets, --targets-file or --order-log is required"))
}

/// Order column of the Order Log, else its header order number.
pub fn targets_from_order_log(ctx: &Context, order_log: &Matrix) -> TargetSet {
    let analysis = &ctx.settings.analysis;
    let header = extract_header(order_log, &analysis.header);
    TargetSet::from_order_log(order_log, &analysis.columns, &header.order_number)
}

// ============================================================================
// stats
// ============================================================================

#[derive(Serialize)]
pub struct StatsReport {
    pub columns: ColumnMap,
    pub statistics: Statistics,
    pub date_range: DateRange,
    pub trend: Vec<f64>,
    pub health: HealthAssessment,
}

impl StatsReport {
    pub fn build(ctx: &Context, matrix: &Matrix) -> Self {
        let options = &ctx.settings.analysis;
        let statistics = calculate_statistics(matrix, options);
        let trend = generate_trend_data(&statistics.amounts, options.trend_points);
        Self {
            columns: ColumnMap::detect(matrix, &options.columns),
            date_range: calculate_date_range(matrix, options),
            health: assess_data_health(matrix, options),
            statistics,
            trend,
        }
    }

    pub fn print(&self, locale: &Locale) {
        let s = &self.statistics;
        let amount = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| locale.format_amount(v));

        println!("Transactions:  {}", s.transaction_count);
        println!("Total:         {}", locale.format_amount(s.total_amount));
        println!("Average:       {}", locale.format_amount(s.average_amount));
        println!("Min / Max:     {} / {}", amount(s.min_amount), amount(s.max_amount));
        match self.date_range.days {
            Some(days) => println!("Period:        {} ({days} days)", self.date_range.label),
            None => println!("Period:        {}", self.date_range.label),
        }
        println!(
            "Health:        {}/100 ({} complete)",
            self.health.score,
            locale.format_number(self.health.completeness, 1) + " %"
        );
        for issue in &self.health.issues {
            println!("  - {issue}");
        }
    }
}

pub fn cmd_stats(ctx: &Context, file: &Path) -> Result<(), CliError> {
    let matrix = ctx.load(file)?;
    let report = StatsReport::build(ctx, &matrix);

    if ctx.json {
        return print_json(&report);
    }
    report.print(&ctx.settings.analysis.locale);
    Ok(())
}
