use crate::models::{Dataset, EnrichedRecord, RawRecord};
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

/// Reads a student data CSV into a dataset. The header row supplies the
/// column names; cell order and column order are preserved.
pub fn read_csv(file_path: &str) -> Result<Dataset> {
    let file = std::fs::File::open(file_path)
        .with_context(|| format!("Failed to open CSV file: {}", file_path))?;
    parse_csv(file).with_context(|| format!("Failed to parse CSV file: {}", file_path))
}

fn parse_csv(reader: impl io::Read) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.context("Failed to read CSV row")?;
        // Short rows pad with absent cells; empty cells count as absent.
        let values = (0..headers.len())
            .map(|i| {
                row.get(i)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
            .collect();
        records.push(RawRecord { values });
    }

    Ok(Dataset { headers, records })
}

/// Writes the enriched record set back out as UTF-8 CSV: all original
/// columns first, then the derived `state` and `college_name` columns.
/// An absent college name serializes as an empty cell.
pub fn write_enriched_csv(
    headers: &[String],
    records: &[EnrichedRecord],
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut header_row: Vec<&str> = headers.iter().map(String::as_str).collect();
    header_row.push("state");
    header_row.push("college_name");
    writer.write_record(&header_row)?;

    for record in records {
        let mut row: Vec<&str> = record
            .raw
            .values
            .iter()
            .map(|value| value.as_deref().unwrap_or(""))
            .collect();
        row.push(&record.state);
        row.push(record.college_name.as_deref().unwrap_or(""));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a two-column count table (label, count) as CSV.
pub fn write_counts_csv(
    label_header: &str,
    count_header: &str,
    counts: &[(String, usize)],
    path: &Path,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    writer.write_record([label_header, count_header])?;
    for (label, count) in counts {
        writer.write_record([label.as_str(), &count.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
