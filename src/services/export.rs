//! CSV export of what a table currently shows

use crate::model::table::Table;
use anyhow::Result;
use std::io;
use std::path::Path;

fn write_rows<W: io::Write>(table: &Table, writer: &mut csv::Writer<W>) -> Result<usize> {
    writer.write_record(&table.headers)?;
    let mut written = 0;
    for (_, row) in table.visible_rows() {
        writer.write_record(&row.cells)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Write the header and visible rows to `path`; returns the row count
pub fn export_visible<P: AsRef<Path>>(table: &Table, path: P) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(table, &mut writer)
}

/// Default export file name for a table
pub fn default_export_name(table_id: &str) -> String {
    format!("{}.csv", table_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{RecordFamily, RecordRef};
    use crate::model::table::Row;

    fn table() -> Table {
        let rows = ["Ikeja", "Yaba", "Ikeja, Lagos"]
            .iter()
            .enumerate()
            .map(|(i, station)| {
                Row::new(
                    RecordRef {
                        family: RecordFamily::Replacement,
                        id: i as i64,
                    },
                    vec![format!("Rider {i}"), station.to_string()],
                )
            })
            .collect();
        Table::new("replacements", "Replacements", vec!["Rider".into(), "Station".into()])
            .with_rows(rows)
    }

    #[test]
    fn test_export_only_visible_rows() {
        let mut table = table();
        table.filter("ikeja");

        let mut writer = csv::Writer::from_writer(Vec::new());
        assert_eq!(write_rows(&table, &mut writer).unwrap(), 2);
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "Rider,Station\nRider 0,Ikeja\nRider 2,\"Ikeja, Lagos\"\n");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(default_export_name("replacements"));
        assert_eq!(export_visible(&table(), &path).unwrap(), 3);
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("Rider,Station\n"));
    }
}
