use crate::utils::error::{BigPandaError, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Serializes rows of string maps to CSV. The header is the sorted union of
/// all keys; missing values become empty fields. Every field is quoted, the
/// line terminator is '\n'.
pub fn rows_to_csv(rows: &[BTreeMap<String, String>]) -> Result<String> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut fieldnames: BTreeSet<&str> = BTreeSet::new();
    for row in rows {
        fieldnames.extend(row.keys().map(String::as_str));
    }
    let fieldnames: Vec<&str> = fieldnames.into_iter().collect();
    if fieldnames.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(&fieldnames)?;
    for row in rows {
        let record: Vec<&str> = fieldnames
            .iter()
            .map(|field| row.get(*field).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e).into())
}

/// Extracts the enrichment name from a CSV file: by convention it is the
/// second column of the header row.
pub fn enrichment_name_from_csv(csv_path: &Path) -> Result<String> {
    let file = File::open(csv_path)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;

    first_line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .nth(1)
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| BigPandaError::InvalidArgument {
            message: format!(
                "CSV file '{}' has no second header column to name the enrichment",
                csv_path.display()
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn row(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn header_is_sorted_union_of_keys() {
        let rows = vec![
            row(&[("host", "web1"), ("team", "ops")]),
            row(&[("host", "db1"), ("owner", "alice")]),
        ];
        let csv = rows_to_csv(&rows).unwrap();
        assert_eq!(
            csv,
            "\"host\",\"owner\",\"team\"\n\"web1\",\"\",\"ops\"\n\"db1\",\"alice\",\"\"\n"
        );
    }

    #[test]
    fn empty_rows_produce_empty_output() {
        let csv = rows_to_csv(&[]).unwrap();
        assert_eq!(csv, "");
    }

    #[test]
    fn extracts_name_from_second_header_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "host,my_enrichment").unwrap();
        writeln!(file, "web1,db-cluster").unwrap();

        let name = enrichment_name_from_csv(file.path()).unwrap();
        assert_eq!(name, "my_enrichment");
    }

    #[test]
    fn strips_quotes_from_header_name() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\"host\",\"my_enrichment\"").unwrap();

        let name = enrichment_name_from_csv(file.path()).unwrap();
        assert_eq!(name, "my_enrichment");
    }

    #[test]
    fn errors_on_single_column_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "host").unwrap();

        assert!(enrichment_name_from_csv(file.path()).is_err());
    }
}
