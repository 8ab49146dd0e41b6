use super::stats::SummaryStats;
use crate::analyzer::{RunSummary, Sample};
use crate::error::{AnalyzeError, Result};
use crate::utils::config::Config;
use crate::utils::time::format_duration;
use serde::Serialize;
use std::path::Path;

/// Write the HTML report to `path`
pub fn write_html(summary: &RunSummary, config: &Config, path: &Path) -> Result<()> {
    let stats = SummaryStats::from_summary(summary, config.timeout_sentinel_ms);
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let html = generate_html(summary, &stats, config, &generated_at);

    std::fs::write(path, html).map_err(|e| AnalyzeError::write_output(path, e))?;
    println!("HTML report saved to: {}", path.display());
    Ok(())
}

/// Self-contained report page. Every chart array is valid even when empty.
pub fn generate_html(
    summary: &RunSummary,
    stats: &SummaryStats,
    config: &Config,
    generated_at: &str,
) -> String {
    let mem_times = js_array(&times(&summary.mem_records));
    let mem_values = js_array(&values(&summary.mem_records));
    let cpu_values = js_array(&values(&summary.cpu_records));
    let temp_values = js_array(&values(&summary.temp_records));
    let net_times = js_array(&times(&summary.net_records));
    let net_values = js_array(&values(&summary.net_records));

    let pie: Vec<serde_json::Value> = stats
        .error_breakdown
        .iter()
        .map(|(kind, count)| serde_json::json!({ "value": count, "name": kind.label() }))
        .collect();
    let pie_data = js_array(&pie);

    let danger = |n: u64| if n > 0 { "failed" } else { "" };
    let peak_memory = stats
        .peak_memory_mb
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let duration = stats
        .duration_secs
        .map(format_duration)
        .unwrap_or_else(|| "N/A".to_string());

    let skip = summary
        .error_timeline
        .len()
        .saturating_sub(config.recent_errors);
    let mut errors_html = String::new();
    for event in &summary.error_timeline[skip..] {
        errors_html.push_str(&format!(
            r#"
                <tr>
                    <td class="mono">{}</td>
                    <td><span class="badge">{}</span></td>
                    <td class="mono">{}</td>
                </tr>"#,
            html_escape(&event.time),
            event.error_type.label(),
            html_escape(&event.message)
        ));
    }
    if summary.error_timeline.is_empty() {
        errors_html.push_str(
            r#"
                <tr><td colspan="3" class="empty">No critical errors recorded</td></tr>"#,
        );
    }

    let stop_reason_html = summary
        .stop_reason
        .as_ref()
        .map(|r| format!("<span>Stop reason: {}</span>", html_escape(r)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {target}</title>
    <script src="{script_url}"></script>
    <style>
        :root {{
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --red: #ef4444;
            --yellow: #f59e0b;
            --purple: #8b5cf6;
        }}

        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}

        body {{
            font-family: 'Inter', system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}

        .container {{
            max-width: 1200px;
            margin: 0 auto;
        }}

        header {{
            margin-bottom: 3rem;
            display: flex;
            justify-content: space-between;
            align-items: flex-end;
        }}

        h1 {{
            font-size: 2.25rem;
            font-weight: 800;
            letter-spacing: -0.025em;
        }}

        h3 {{
            margin: 2.5rem 0 1rem;
            padding-left: 0.75rem;
            border-left: 4px solid var(--purple);
        }}

        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 1.5rem;
        }}

        .stat {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 1.5rem;
            border-radius: 1rem;
        }}

        .stat-value {{
            font-size: 2.5rem;
            font-weight: 800;
            margin-bottom: 0.25rem;
        }}

        .stat-label {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            font-weight: 500;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }}

        .stat.failed .stat-value {{ color: var(--red); }}

        .chart-box {{
            height: 400px;
            width: 100%;
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 1rem;
        }}

        table {{
            width: 100%;
            border-collapse: collapse;
            background: var(--bg-secondary);
            border-radius: 1rem;
            overflow: hidden;
        }}

        td, th {{
            padding: 0.75rem 1rem;
            border-bottom: 1px solid var(--border);
            text-align: left;
            font-size: 0.875rem;
        }}

        .mono {{ font-family: 'JetBrains Mono', monospace; }}
        .empty {{ color: var(--text-secondary); text-align: center; }}

        .badge {{
            padding: 0.25rem 0.75rem;
            border-radius: 9999px;
            font-size: 0.75rem;
            font-weight: 600;
            background: rgba(239, 68, 68, 0.1);
            color: var(--red);
        }}

        .meta {{
            margin-top: 4rem;
            padding-top: 2rem;
            border-top: 1px solid var(--border);
            color: var(--text-secondary);
            font-size: 0.875rem;
            display: flex;
            justify-content: center;
            gap: 2rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <div>
                <div style="font-size: 0.875rem; font-weight: 600; color: var(--purple); text-transform: uppercase; letter-spacing: 0.1em; margin-bottom: 0.5rem;">Stress Monitoring</div>
                <h1>{title}</h1>
                <div style="color: var(--text-secondary);">Target: <strong>{target}</strong></div>
            </div>
            <div style="text-align: right;">
                <div style="font-size: 0.875rem; color: var(--text-secondary);">Run Duration</div>
                <div style="font-size: 1.25rem; font-weight: 700;">{duration}</div>
            </div>
        </header>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{actions}</div>
                <div class="stat-label">Actions</div>
            </div>
            <div class="stat">
                <div class="stat-value">{peak_memory}</div>
                <div class="stat-label">Peak Memory (MB)</div>
            </div>
            <div class="stat {net_class}">
                <div class="stat-value">{net_failures}</div>
                <div class="stat-label">Ping Timeouts</div>
            </div>
            <div class="stat {error_class}">
                <div class="stat-value">{total_errors}</div>
                <div class="stat-label">Critical Errors</div>
            </div>
            <div class="stat">
                <div class="stat-value">{warnings}</div>
                <div class="stat-label">Warnings</div>
            </div>
        </div>

        <h3>Memory / CPU / Temperature</h3>
        <div id="comboChart" class="chart-box"></div>

        <h3>Network Latency (Ping)</h3>
        <div id="netChart" class="chart-box"></div>

        <h3>Error Distribution</h3>
        <div id="pieChart" class="chart-box" style="height: 350px;"></div>

        <h3>Recent Critical Errors</h3>
        <table>
            <thead>
                <tr><th>Time</th><th>Type</th><th>Message</th></tr>
            </thead>
            <tbody>{errors_html}
            </tbody>
        </table>

        <div class="meta">
            <span>Snapshots: {snapshots}</span>
            {stop_reason_html}
            <span>Generated: {generated_at}</span>
        </div>
    </div>

    <script type="text/javascript">
        var memTimes = {mem_times};
        var memValues = {mem_values};
        var cpuValues = {cpu_values};
        var tempValues = {temp_values};
        var netTimes = {net_times};
        var netValues = {net_values};
        var pieData = {pie_data};

        var comboChart = echarts.init(document.getElementById('comboChart'), 'dark');
        comboChart.setOption({{
            tooltip: {{ trigger: 'axis', axisPointer: {{ type: 'cross' }} }},
            legend: {{ data: ['Memory (MB)', 'CPU (%)', 'Temp (°C)'] }},
            grid: {{ right: '20%' }},
            xAxis: [{{ type: 'category', data: memTimes }}],
            yAxis: [
                {{ type: 'value', name: 'Memory', position: 'left' }},
                {{ type: 'value', name: 'CPU', position: 'right' }},
                {{ type: 'value', name: 'Temp', position: 'right', offset: 80 }}
            ],
            series: [
                {{ name: 'Memory (MB)', type: 'line', yAxisIndex: 0, data: memValues, smooth: true, areaStyle: {{ opacity: 0.1 }} }},
                {{ name: 'CPU (%)', type: 'line', yAxisIndex: 1, data: cpuValues, smooth: true }},
                {{ name: 'Temp (°C)', type: 'line', yAxisIndex: 2, data: tempValues, smooth: true }}
            ]
        }});

        var netChart = echarts.init(document.getElementById('netChart'), 'dark');
        netChart.setOption({{
            tooltip: {{ trigger: 'axis' }},
            xAxis: {{ type: 'category', data: netTimes }},
            yAxis: {{ type: 'value', name: 'ms' }},
            visualMap: {{
                show: false,
                pieces: [{{ gt: 0, lte: {ping_warn}, color: '#10b981' }}, {{ gt: {ping_warn}, color: '#ef4444' }}]
            }},
            series: [{{ type: 'line', data: netValues, markLine: {{ data: [{{ yAxis: {timeout}, name: 'Timeout' }}] }} }}]
        }});

        var pieChart = echarts.init(document.getElementById('pieChart'), 'dark');
        pieChart.setOption({{
            tooltip: {{ trigger: 'item' }},
            series: [{{ type: 'pie', radius: '60%', data: pieData }}]
        }});

        window.onresize = function() {{ comboChart.resize(); netChart.resize(); pieChart.resize(); }};
    </script>
</body>
</html>"#,
        title = html_escape(&config.report_title),
        target = html_escape(&summary.target_package),
        script_url = html_escape(&config.chart_script_url),
        duration = duration,
        actions = stats.total_actions,
        peak_memory = peak_memory,
        net_class = danger(stats.net_failures),
        net_failures = stats.net_failures,
        error_class = danger(stats.total_errors),
        total_errors = stats.total_errors,
        warnings = stats.warnings,
        errors_html = errors_html,
        snapshots = stats.snapshot_count,
        stop_reason_html = stop_reason_html,
        generated_at = generated_at,
        mem_times = mem_times,
        mem_values = mem_values,
        cpu_values = cpu_values,
        temp_values = temp_values,
        net_times = net_times,
        net_values = net_values,
        pie_data = pie_data,
        ping_warn = config.ping_warn_ms,
        timeout = config.timeout_sentinel_ms,
    )
}

fn times<T>(records: &[Sample<T>]) -> Vec<&str> {
    records.iter().map(|s| s.time.as_str()).collect()
}

fn values<T: Copy>(records: &[Sample<T>]) -> Vec<T> {
    records.iter().map(|s| s.value).collect()
}

/// JSON array literal safe to inline in a `<script>` block
fn js_array<T: Serialize>(items: &[T]) -> String {
    serde_json::to_string(items)
        .map(|s| s.replace("</", "<\\/"))
        .unwrap_or_else(|_| "[]".to_string())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ErrorEvent;
    use crate::parser::types::ErrorType;

    fn render(summary: &RunSummary, config: &Config) -> String {
        let stats = SummaryStats::from_summary(summary, config.timeout_sentinel_ms);
        generate_html(summary, &stats, config, "2025-12-24 12:00")
    }

    #[test]
    fn test_empty_summary_renders_empty_arrays() {
        let html = render(&RunSummary::new(), &Config::default());
        assert!(html.contains("var memTimes = [];"));
        assert!(html.contains("var memValues = [];"));
        assert!(html.contains("var cpuValues = [];"));
        assert!(html.contains("var tempValues = [];"));
        assert!(html.contains("var netTimes = [];"));
        assert!(html.contains("var netValues = [];"));
        assert!(html.contains("var pieData = [];"));
        assert!(html.contains("No critical errors recorded"));
        assert!(html.contains("yAxis: 1000, name: 'Timeout'"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_series_are_embedded() {
        let mut summary = RunSummary::new();
        summary.mem_records = vec![
            Sample::new("2025-12-24 10:00:00", 100),
            Sample::new("2025-12-24 10:01:00", 150),
        ];
        summary.net_records = vec![Sample::new("2025-12-24 10:00:30", 12.5)];
        summary.error_counts.insert(ErrorType::Oom, 1);

        let html = render(&summary, &Config::default());
        assert!(html.contains(r#"var memTimes = ["2025-12-24 10:00:00","2025-12-24 10:01:00"];"#));
        assert!(html.contains("var memValues = [100,150];"));
        assert!(html.contains("var netValues = [12.5];"));
        assert!(html.contains(r#"var pieData = [{"name":"OOM","value":1}];"#));
    }

    #[test]
    fn test_only_recent_errors_are_listed() {
        let mut summary = RunSummary::new();
        for i in 0..15 {
            summary.error_timeline.push(ErrorEvent {
                time: format!("2025-12-24 10:00:{:02}", i),
                error_type: ErrorType::Kernel,
                message: format!("event-{:02}", i),
            });
        }
        let html = render(&summary, &Config::default());
        assert!(!html.contains("event-04"));
        assert!(html.contains("event-05"));
        assert!(html.contains("event-14"));
        assert_eq!(html.matches("<td><span class=\"badge\">KERNEL</span></td>").count(), 10);
    }

    #[test]
    fn test_zero_recent_errors_is_not_an_empty_run() {
        let mut summary = RunSummary::new();
        summary.error_timeline.push(ErrorEvent {
            time: "2025-12-24 10:00:00".into(),
            error_type: ErrorType::Oom,
            message: "lowmemorykiller".into(),
        });
        let config = Config {
            recent_errors: 0,
            ..Config::default()
        };
        let html = render(&summary, &config);
        assert!(!html.contains("No critical errors recorded"));
        assert!(!html.contains("lowmemorykiller"));
    }

    #[test]
    fn test_log_text_is_escaped() {
        let mut summary = RunSummary::new();
        summary.target_package = "com.<evil>".into();
        summary.error_timeline.push(ErrorEvent {
            time: "2025-12-24 10:00:00".into(),
            error_type: ErrorType::Media,
            message: "<script>alert(1)</script>".into(),
        });
        let html = render(&summary, &Config::default());
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("com.&lt;evil&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn test_write_html_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        write_html(&RunSummary::new(), &Config::default(), &path).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
