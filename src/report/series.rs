use crate::analyzer::{RunSummary, Sample};
use crate::error::{AnalyzeError, Result};
use std::fmt::Display;
use std::path::Path;

/// Export every time series in long format: `series,time,value`
pub fn write_csv(summary: &RunSummary, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| AnalyzeError::write_output(path, e))?;
    write_series(summary, file)?;
    println!("CSV series saved to: {}", path.display());
    Ok(())
}

pub fn write_series<W: std::io::Write>(summary: &RunSummary, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["series", "time", "value"])?;

    push_series(&mut writer, "memory_mb", &summary.mem_records)?;
    push_series(&mut writer, "cpu_percent", &summary.cpu_records)?;
    push_series(&mut writer, "temp_celsius", &summary.temp_records)?;
    push_series(&mut writer, "ping_ms", &summary.net_records)?;

    writer
        .flush()
        .map_err(|e| AnalyzeError::Csv(csv::Error::from(e)))?;
    Ok(())
}

fn push_series<W: std::io::Write, T: Display>(
    writer: &mut csv::Writer<W>,
    name: &str,
    records: &[Sample<T>],
) -> Result<()> {
    for sample in records {
        let value = sample.value.to_string();
        writer.write_record([name, sample.time.as_str(), value.as_str()])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rows() {
        let mut summary = RunSummary::new();
        summary.mem_records = vec![Sample::new("2025-12-24 10:00:00", 100)];
        summary.cpu_records = vec![Sample::new("2025-12-24 10:00:00", 7.5)];
        summary.net_records = vec![Sample::new("2025-12-24 10:00:10", 1000.0)];

        let mut buf = Vec::new();
        write_series(&summary, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "series,time,value\n\
             memory_mb,2025-12-24 10:00:00,100\n\
             cpu_percent,2025-12-24 10:00:00,7.5\n\
             ping_ms,2025-12-24 10:00:10,1000\n"
        );
    }

    #[test]
    fn test_empty_summary_has_header_only() {
        let mut buf = Vec::new();
        write_series(&RunSummary::new(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "series,time,value\n");
    }
}
