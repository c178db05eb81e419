//! Reconstructs typed results from persisted run files.
//!
//! Inverts what the writer produced: generic JSON records are decoded
//! per kind, and compact functional-dependency files are decoded by
//! first rebuilding the inverse table/column dictionaries from the
//! header block. Line order is preserved, so the returned sequence
//! matches the original receipt order.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use profdump_core::{
    BasicStatistic, ColumnCombination, ColumnIdentifier, ConditionalUniqueColumnCombination,
    FunctionalDependency, InclusionDependency, OrderDependency, ProfdumpError, ProfilingResult,
    Result, ResultKind, UniqueColumnCombination,
};
use tracing::debug;

use crate::encoder::{
    COLUMN_MARKER, DETERMINANT_SEPARATOR, FD_SEPARATOR, RESULT_MARKER, TABLE_MARKER,
};

/// Reads back every result persisted in one file of the given kind.
///
/// A malformed header or an undecodable line aborts reconstruction of
/// this file with a `Read` error; other files of the run are unaffected.
pub fn read_results(path: impl AsRef<Path>, kind: ResultKind) -> Result<Vec<ProfilingResult>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ProfdumpError::io(format!("could not open result file {}", path.display()), e)
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line.map_err(|e| {
            ProfdumpError::io(format!("could not read result file {}", path.display()), e)
        })?);
    }

    let compact = kind == ResultKind::FunctionalDependency
        && lines.first().map(String::as_str) == Some(TABLE_MARKER);

    let results = if compact {
        decode_compact_file(&lines, path)?
    } else {
        let mut results = Vec::with_capacity(lines.len());
        for line in lines.iter().filter(|line| !line.is_empty()) {
            results.push(decode_generic(line, kind)?);
        }
        results
    };

    debug!(
        path = %path.display(),
        kind = kind.name(),
        count = results.len(),
        "read persisted results"
    );
    Ok(results)
}

/// Reads back every result of one run, across all kinds.
///
/// File existence is the only run-level metadata: kinds that never
/// occurred have no file and contribute nothing.
pub fn read_run(
    output_directory: impl AsRef<Path>,
    execution_id: &str,
) -> Result<Vec<ProfilingResult>> {
    let directory = output_directory.as_ref();
    let mut results = Vec::new();

    for kind in ResultKind::ALL {
        let path = directory.join(format!("{execution_id}{}", kind.file_suffix()));
        if path.exists() {
            results.extend(read_results(&path, kind)?);
        }
    }

    Ok(results)
}

fn decode_generic(line: &str, kind: ResultKind) -> Result<ProfilingResult> {
    let decoded = match kind {
        ResultKind::Statistic => {
            serde_json::from_str::<BasicStatistic>(line).map(ProfilingResult::Statistic)
        }
        ResultKind::FunctionalDependency => serde_json::from_str::<FunctionalDependency>(line)
            .map(ProfilingResult::FunctionalDependency),
        ResultKind::InclusionDependency => serde_json::from_str::<InclusionDependency>(line)
            .map(ProfilingResult::InclusionDependency),
        ResultKind::UniqueColumnCombination => {
            serde_json::from_str::<UniqueColumnCombination>(line)
                .map(ProfilingResult::UniqueColumnCombination)
        }
        ResultKind::ConditionalUniqueColumnCombination => {
            serde_json::from_str::<ConditionalUniqueColumnCombination>(line)
                .map(ProfilingResult::ConditionalUniqueColumnCombination)
        }
        ResultKind::OrderDependency => {
            serde_json::from_str::<OrderDependency>(line).map(ProfilingResult::OrderDependency)
        }
    };

    decoded.map_err(|e| ProfdumpError::read(format!("invalid {} record: {e}", kind.name())))
}

/// Decodes a compact functional-dependency file: header block first,
/// then one indexed dependency per line.
fn decode_compact_file(lines: &[String], path: &Path) -> Result<Vec<ProfilingResult>> {
    let mut tables: HashMap<u32, String> = HashMap::new();
    let mut columns: HashMap<u32, ColumnIdentifier> = HashMap::new();

    let mut iter = lines.iter();
    // First line is the table marker, checked by the caller.
    iter.next();

    let mut reached_columns = false;
    for line in iter.by_ref() {
        if line.as_str() == COLUMN_MARKER {
            reached_columns = true;
            break;
        }
        let (name, index) = split_dictionary_entry(line)?;
        tables.insert(index, name.to_string());
    }
    if !reached_columns {
        return Err(ProfdumpError::read(format!(
            "{}: dictionary header has no column section",
            path.display()
        )));
    }

    let mut reached_results = false;
    for line in iter.by_ref() {
        if line.as_str() == RESULT_MARKER {
            reached_results = true;
            break;
        }
        let (qualified, index) = split_dictionary_entry(line)?;
        columns.insert(index, resolve_qualified_key(qualified, &tables)?);
    }
    if !reached_results {
        return Err(ProfdumpError::read(format!(
            "{}: dictionary header has no result section",
            path.display()
        )));
    }

    let mut results = Vec::new();
    for line in iter.filter(|line| !line.is_empty()) {
        results.push(ProfilingResult::FunctionalDependency(decode_compact_line(
            line, &columns,
        )?));
    }
    Ok(results)
}

/// Splits a `key\tindex` dictionary entry.
fn split_dictionary_entry(line: &str) -> Result<(&str, u32)> {
    let (key, index_raw) = line.split_once('\t').ok_or_else(|| {
        ProfdumpError::read(format!("malformed dictionary entry '{line}'"))
    })?;
    let index = index_raw
        .parse()
        .map_err(|_| ProfdumpError::read(format!("malformed dictionary index in '{line}'")))?;
    Ok((key, index))
}

/// Turns a qualified key `"<tableIndex>.<column>"` back into a column
/// identifier using the already-parsed table section.
fn resolve_qualified_key(
    qualified: &str,
    tables: &HashMap<u32, String>,
) -> Result<ColumnIdentifier> {
    let (table_index_raw, column_name) = qualified.split_once('.').ok_or_else(|| {
        ProfdumpError::read(format!("malformed qualified column key '{qualified}'"))
    })?;
    let table_index: u32 = table_index_raw.parse().map_err(|_| {
        ProfdumpError::read(format!("malformed table index in column key '{qualified}'"))
    })?;
    let table = tables.get(&table_index).ok_or_else(|| {
        ProfdumpError::read(format!(
            "unknown table index {table_index} in column key '{qualified}'"
        ))
    })?;

    Ok(ColumnIdentifier::new(table.clone(), column_name))
}

fn decode_compact_line(
    line: &str,
    columns: &HashMap<u32, ColumnIdentifier>,
) -> Result<FunctionalDependency> {
    let (determinant_raw, dependant_raw) = line.split_once(FD_SEPARATOR).ok_or_else(|| {
        ProfdumpError::read(format!("malformed functional dependency line '{line}'"))
    })?;

    let mut determinant = Vec::new();
    for raw in determinant_raw
        .split(DETERMINANT_SEPARATOR)
        .filter(|raw| !raw.is_empty())
    {
        determinant.push(lookup_column(raw, columns, line)?);
    }
    let dependant = lookup_column(dependant_raw, columns, line)?;

    Ok(FunctionalDependency {
        determinant: ColumnCombination::new(determinant),
        dependant,
    })
}

fn lookup_column(
    raw_index: &str,
    columns: &HashMap<u32, ColumnIdentifier>,
    line: &str,
) -> Result<ColumnIdentifier> {
    let index: u32 = raw_index.parse().map_err(|_| {
        ProfdumpError::read(format!("malformed column index '{raw_index}' in line '{line}'"))
    })?;
    columns.get(&index).cloned().ok_or_else(|| {
        ProfdumpError::read(format!("column index {index} is not in the dictionary"))
    })
}
