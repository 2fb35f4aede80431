use crate::dashboard::filter_countries;
use crate::data::{CONTINENTS, POPULATION_HISTORY, TOP_COUNTRIES};
use crate::models::RegionFilter;
use anyhow::{Context, Result, bail};
use csv::WriterBuilder;
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Tables that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    History,
    Continents,
    Countries,
}

impl FromStr for Table {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" => Ok(Table::History),
            "continents" => Ok(Table::Continents),
            "countries" => Ok(Table::Countries),
            other => bail!("unknown table '{other}' (history, continents, countries)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => bail!(
                "cannot infer export format from '{}' (use .csv/.json or --format)",
                path.display()
            ),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => bail!("unknown export format '{other}' (csv, json)"),
        }
    }
}

/// Save rows as CSV with a header taken from the field names.
pub fn save_csv<T: Serialize, P: AsRef<Path>>(rows: &[T], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_json<T: Serialize, P: AsRef<Path>>(rows: &[T], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

fn save<T: Serialize>(rows: &[T], format: ExportFormat, path: &Path) -> Result<usize> {
    match format {
        ExportFormat::Csv => save_csv(rows, path)?,
        ExportFormat::Json => save_json(rows, path)?,
    }
    Ok(rows.len())
}

/// Write one built-in table. The region filter only applies to `Table::Countries`.
/// Returns the number of rows written.
pub fn export_table<P: AsRef<Path>>(
    table: Table,
    region: RegionFilter,
    format: ExportFormat,
    path: P,
) -> Result<usize> {
    let path = path.as_ref();
    let n = match table {
        Table::History => save(&POPULATION_HISTORY, format, path)?,
        Table::Continents => save(&CONTINENTS, format, path)?,
        Table::Countries => save(&filter_countries(&TOP_COUNTRIES, region), format, path)?,
    };
    debug!("exported {n} rows of {table:?} to {}", path.display());
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        save_csv(&CONTINENTS, &csvp).unwrap();
        save_json(&CONTINENTS, &jsonp).unwrap();
        let csv_text = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv_text.starts_with("name,value,color"));
        assert!(csv_text.contains("Asia,4750,#6366f1"));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&jsonp).unwrap()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 6);
    }

    #[test]
    fn filtered_country_export() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("latam.csv");
        let n = export_table(
            Table::Countries,
            RegionFilter::Only(Region::Latam),
            ExportFormat::Csv,
            &p,
        )
        .unwrap();
        assert_eq!(n, 2);
        let text = std::fs::read_to_string(&p).unwrap();
        assert!(text.contains("Brasil,216,Latam"));
        assert!(text.contains("México,128,Latam"));
    }

    #[test]
    fn format_and_table_names() {
        assert_eq!(ExportFormat::from_path(Path::new("a.JSON")).unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_path(Path::new("a.txt")).is_err());
        assert_eq!("history".parse::<Table>().unwrap(), Table::History);
        assert!("people".parse::<Table>().is_err());
    }
}
