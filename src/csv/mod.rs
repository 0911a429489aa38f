use std::io::{Read, Write};

use csv::{ReaderBuilder, Result, StringRecord, Writer};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    recipient::{ImportRow, RowStatus},
    table::CsvTable,
};

/// Reads a recipient file that may use RFC 4180 quoting.
///
/// Unlike [`CsvTable::parse`], quoted cells may hold commas and newlines.
/// Rows may have any number of cells; blank lines are skipped and the first
/// record is the header.
pub fn read_table(reader: impl Read) -> Result<CsvTable> {
    let records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .into_records()
        .filter(|record| !record.as_ref().is_ok_and(is_blank))
        .map(|record| record.map(|record| record.iter().map(str::to_owned).collect()))
        .collect::<Result<Vec<Vec<String>>>>()?;

    Ok(CsvTable::from_records(records))
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    wallet: &'a str,
    allocation: Decimal,
    status: RowStatus,
    error: &'a str,
}

/// Writes classified rows as a CSV report with a header line.
pub fn write_rows<'a>(rows: impl IntoIterator<Item = &'a ImportRow>, writer: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for row in rows {
        writer.serialize(ReportRecord {
            wallet: &row.wallet,
            allocation: row.allocation,
            status: row.status,
            error: row.error.as_deref().unwrap_or_default(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
