//! CSV loading for race results
//!
//! Expects a header row with `horseId`, `entryFee` and `finishTime` columns.
//! All columns are read as strings and parsed here so that a bad value can be
//! reported with its line number.

use polars::prelude::*;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use super::store::{RecordStore, StoreError};

pub const COL_HORSE_ID: &str = "horseId";
pub const COL_ENTRY_FEE: &str = "entryFee";
pub const COL_FINISH_TIME: &str = "finishTime";

/// One parsed result row
#[derive(Debug, Clone, PartialEq)]
pub struct RaceRow {
    /// Line number in the source file (header is line 1)
    pub line: usize,
    pub entity_id: u32,
    pub entry_cost: f64,
    pub finish_time: f64,
}

/// Read and validate all rows from a CSV file
pub fn read_rows<P: AsRef<Path>>(csv_path: P) -> Result<Vec<RaceRow>, StoreError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(csv_path.as_ref().to_path_buf()))?
        .finish()?;

    rows_from_dataframe(&df)
}

/// Convert a string-typed DataFrame into rows, failing on the first bad value
pub fn rows_from_dataframe(df: &DataFrame) -> Result<Vec<RaceRow>, StoreError> {
    let id_col = string_column(df, COL_HORSE_ID)?;
    let fee_col = string_column(df, COL_ENTRY_FEE)?;
    let time_col = string_column(df, COL_FINISH_TIME)?;

    let mut rows = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let line = i + 2;
        let entity_id: u32 = parse_field(id_col.get(i), line, COL_HORSE_ID)?;
        if entity_id == 0 {
            return Err(invalid(id_col.get(i), line, COL_HORSE_ID));
        }

        let entry_cost: f64 = parse_field(fee_col.get(i), line, COL_ENTRY_FEE)?;
        if !(entry_cost.is_finite() && entry_cost >= 0.0) {
            return Err(invalid(fee_col.get(i), line, COL_ENTRY_FEE));
        }

        // Speeds divide by the finish time
        let finish_time: f64 = parse_field(time_col.get(i), line, COL_FINISH_TIME)?;
        if !(finish_time.is_finite() && finish_time > 0.0) {
            return Err(invalid(time_col.get(i), line, COL_FINISH_TIME));
        }

        rows.push(RaceRow {
            line,
            entity_id,
            entry_cost,
            finish_time,
        });
    }

    Ok(rows)
}

/// Ingest rows into a store that has not been finalized yet, then finalize it.
///
/// A finalized store rejects the load before any row is applied, so loading
/// the same file twice never double-counts finish times.
pub fn ingest(store: &mut RecordStore, rows: &[RaceRow]) -> Result<(), StoreError> {
    if store.is_finalized() {
        return Err(StoreError::Finalized);
    }

    for row in rows {
        store.find_or_create(row.entity_id, row.entry_cost)?;
        store.append_finish_time(row.entity_id, row.finish_time)?;
    }

    store.finalize();
    Ok(())
}

/// Read a CSV file into `store`
pub fn load_into<P: AsRef<Path>>(store: &mut RecordStore, csv_path: P) -> Result<(), StoreError> {
    if store.is_finalized() {
        return Err(StoreError::Finalized);
    }

    let rows = read_rows(&csv_path)?;
    ingest(store, &rows)?;

    info!(
        "Loaded {} race results for {} horses from {:?}",
        rows.len(),
        store.len(),
        csv_path.as_ref()
    );
    Ok(())
}

/// Load a CSV file into a new, finalized store
pub fn load_races<P: AsRef<Path>>(csv_path: P) -> Result<RecordStore, StoreError> {
    let mut store = RecordStore::new();
    load_into(&mut store, csv_path)?;
    Ok(store)
}

fn string_column<'a>(
    df: &'a DataFrame,
    name: &'static str,
) -> Result<&'a StringChunked, StoreError> {
    let column = df
        .column(name)
        .map_err(|_| StoreError::MissingColumn(name))?;
    Ok(column.str()?)
}

fn parse_field<T: FromStr>(
    raw: Option<&str>,
    line: usize,
    field: &'static str,
) -> Result<T, StoreError> {
    raw.unwrap_or("")
        .trim()
        .parse::<T>()
        .map_err(|_| invalid(raw, line, field))
}

fn invalid(raw: Option<&str>, line: usize, field: &'static str) -> StoreError {
    StoreError::Parse {
        line,
        field,
        value: raw.unwrap_or("").to_string(),
    }
}
