use super::stats::SummaryStats;
use crate::analyzer::RunSummary;
use crate::utils::time::format_duration;
use colored::Colorize;

const RULE_WIDTH: usize = 40;

/// Render the console summary
pub fn render_text(summary: &RunSummary, stats: &SummaryStats) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", heavy));
    out.push_str(&format!("{}\n", "📊 Stress Test Summary".bold()));
    out.push_str(&format!("{}\n", heavy));
    out.push_str(&format!("Target app     : {}\n", summary.target_package.cyan()));
    out.push_str(&format!("Actions        : {} steps\n", stats.total_actions));
    if let Some(secs) = stats.duration_secs {
        out.push_str(&format!("Duration       : {}\n", format_duration(secs)));
    }
    out.push_str(&format!("{}\n", light));

    match (stats.peak_memory_mb, stats.avg_memory_mb) {
        (Some(peak), Some(avg)) => {
            out.push_str(&format!("Memory peak    : {} MB\n", peak));
            out.push_str(&format!("Memory average : {} MB\n", avg));
        }
        _ => {
            out.push_str(&format!("Memory         : {}\n", "no data".dimmed()));
        }
    }
    if let Some(cpu) = stats.avg_cpu_percent {
        out.push_str(&format!("CPU average    : {:.1}%\n", cpu));
    }
    if let Some(temp) = stats.peak_temp_celsius {
        out.push_str(&format!("Peak temp      : {}°C\n", temp));
    }
    if let Some(ping) = stats.avg_ping_ms {
        out.push_str(&format!("Ping average   : {:.1} ms\n", ping));
    }
    let failures = stats.net_failures.to_string();
    out.push_str(&format!(
        "Ping failures  : {}\n",
        if stats.net_failures > 0 {
            failures.red()
        } else {
            failures.normal()
        }
    ));
    out.push_str(&format!("{}\n", light));

    out.push_str(&format!("Warnings       : {}\n", stats.warnings.to_string().yellow()));
    let errors = stats.total_errors.to_string();
    out.push_str(&format!(
        "Errors         : {}\n",
        if stats.total_errors > 0 {
            errors.red().bold()
        } else {
            errors.green()
        }
    ));
    for (kind, count) in &stats.error_breakdown {
        out.push_str(&format!("   - {:<12} : {}\n", kind.label(), count));
    }
    if summary.anr_count > 0 {
        out.push_str(&format!("ANRs           : {}\n", summary.anr_count.to_string().red()));
    }
    if summary.process_restarts > 0 {
        out.push_str(&format!("Restarts       : {}\n", summary.process_restarts));
    }
    if summary.assert_passed + summary.assert_failed > 0 {
        out.push_str(&format!(
            "Assertions     : {} passed, {} failed\n",
            summary.assert_passed.to_string().green(),
            summary.assert_failed.to_string().red()
        ));
    }

    out.push_str(&format!("{}\n", heavy));
    out.push_str(&format!("Snapshots      : {}\n", stats.snapshot_count));
    if let Some(reason) = &summary.stop_reason {
        out.push_str(&format!("Stop reason    : {}\n", reason));
    }

    out
}

pub fn print_summary(summary: &RunSummary, stats: &SummaryStats) {
    print!("{}", render_text(summary, stats));
}
