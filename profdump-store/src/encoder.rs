//! Line encodings for persisted results.
//!
//! Two paths exist. The generic path serializes a result as one
//! self-describing JSON record per line and works for every kind. The
//! compact path applies only to functional dependencies under a finite
//! accepted scope: column names are replaced by their dictionary indices,
//! and the dictionary itself is written once per file as a header block.

use std::io::{self, Write};

use profdump_core::{
    FunctionalDependency, IdentifierMappings, ProfdumpError, ProfilingResult, Result,
};

/// Marker line opening the table section of a dictionary header.
pub(crate) const TABLE_MARKER: &str = "# TABLES";
/// Marker line opening the qualified-column section.
pub(crate) const COLUMN_MARKER: &str = "# COLUMN";
/// Marker line after which compact result lines follow.
pub(crate) const RESULT_MARKER: &str = "# RESULTS";

/// Separator between determinant and dependant in a compact line.
pub(crate) const FD_SEPARATOR: &str = "->";
/// Separator between determinant column indices.
pub(crate) const DETERMINANT_SEPARATOR: &str = ",";

/// Serializes a result as one generic JSON record.
pub(crate) fn generic_record(result: &ProfilingResult) -> Result<String> {
    let encoded = match result {
        ProfilingResult::Statistic(statistic) => serde_json::to_string(statistic),
        ProfilingResult::FunctionalDependency(fd) => serde_json::to_string(fd),
        ProfilingResult::InclusionDependency(ind) => serde_json::to_string(ind),
        ProfilingResult::UniqueColumnCombination(ucc) => serde_json::to_string(ucc),
        ProfilingResult::ConditionalUniqueColumnCombination(cucc) => serde_json::to_string(cucc),
        ProfilingResult::OrderDependency(od) => serde_json::to_string(od),
    };

    encoded.map_err(|e| {
        ProfdumpError::encoding(format!("{} record", result.kind().name()), e)
    })
}

/// Renders a functional dependency as a compact indexed line, e.g. `1,2->3`.
///
/// Callers run the validation gate first, so every referenced column is
/// expected to resolve; an unresolvable column means the result is outside
/// the accepted scope after all.
pub(crate) fn compact_functional_dependency(
    fd: &FunctionalDependency,
    mappings: &IdentifierMappings,
) -> Result<String> {
    let mut determinant = Vec::with_capacity(fd.determinant.columns.len());
    for column in &fd.determinant.columns {
        let index = mappings.column_index(column).ok_or_else(|| {
            ProfdumpError::validation(format!("column {column} is outside the accepted scope"))
        })?;
        determinant.push(index.to_string());
    }

    let dependant = mappings.column_index(&fd.dependant).ok_or_else(|| {
        ProfdumpError::validation(format!(
            "column {} is outside the accepted scope",
            fd.dependant
        ))
    })?;

    Ok(format!(
        "{}{FD_SEPARATOR}{dependant}",
        determinant.join(DETERMINANT_SEPARATOR)
    ))
}

/// Writes the dictionary header block: table section, column section,
/// result marker. Entries appear in dictionary assignment order.
pub(crate) fn write_dictionary_header<W: Write>(
    sink: &mut W,
    mappings: &IdentifierMappings,
) -> io::Result<()> {
    writeln!(sink, "{TABLE_MARKER}")?;
    for (table, index) in mappings.tables() {
        writeln!(sink, "{table}\t{index}")?;
    }

    writeln!(sink, "{COLUMN_MARKER}")?;
    for (qualified, index) in mappings.columns() {
        writeln!(sink, "{qualified}\t{index}")?;
    }

    writeln!(sink, "{RESULT_MARKER}")?;
    Ok(())
}
