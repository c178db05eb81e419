//! Accepted identifier scope and the derived compression dictionaries.
//!
//! A run either declares the finite set of table/column identifiers its
//! inputs contain, or runs unconstrained (e.g. when results come from a
//! database connection and the column universe is unknown). The finite
//! form doubles as the source of the table/column index dictionaries used
//! by the compact functional-dependency encoding; the unconstrained form
//! disables both validation and compaction.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::models::{ColumnIdentifier, ProfilingResult};

/// The identifier universe a run accepts results over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedScope {
    /// No universe is known; every result is accepted and nothing is
    /// compacted.
    Unbounded,
    /// The ordered list of identifiers valid for this run. Order is
    /// significant: it drives dictionary index assignment.
    Columns(Vec<ColumnIdentifier>),
}

impl AcceptedScope {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, AcceptedScope::Unbounded)
    }

    /// Validation gate: true iff every identifier the result references
    /// is part of this scope. Unbounded scopes accept everything.
    pub fn accepts(&self, result: &ProfilingResult) -> bool {
        match self {
            AcceptedScope::Unbounded => true,
            AcceptedScope::Columns(columns) => result
                .column_identifiers()
                .into_iter()
                .all(|identifier| columns.contains(identifier)),
        }
    }
}

/// Table and qualified-column index dictionaries derived from a finite
/// accepted scope.
///
/// Tables are numbered from 1 in first-seen order; columns are keyed by
/// `"<tableIndex>.<columnName>"` and numbered from 1 in first-seen order.
/// Built once at writer construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct IdentifierMappings {
    table_indices: HashMap<String, u32>,
    table_order: Vec<String>,
    column_indices: HashMap<String, u32>,
    column_order: Vec<String>,
}

impl IdentifierMappings {
    /// Derives the dictionaries from a scope. Returns `None` for an
    /// unbounded scope, which has no dictionary.
    pub fn from_scope(scope: &AcceptedScope) -> Option<Self> {
        let columns = match scope {
            AcceptedScope::Unbounded => return None,
            AcceptedScope::Columns(columns) => columns,
        };

        let mut mappings = Self {
            table_indices: HashMap::new(),
            table_order: Vec::new(),
            column_indices: HashMap::new(),
            column_order: Vec::new(),
        };

        for identifier in columns {
            let table_count = mappings.table_order.len() as u32;
            let table_index = match mappings.table_indices.entry(identifier.table.clone()) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let index = table_count + 1;
                    entry.insert(index);
                    mappings.table_order.push(identifier.table.clone());
                    index
                }
            };

            let qualified = format!("{table_index}.{}", identifier.column);
            let column_count = mappings.column_order.len() as u32;
            if let Entry::Vacant(entry) = mappings.column_indices.entry(qualified.clone()) {
                entry.insert(column_count + 1);
                mappings.column_order.push(qualified);
            }
        }

        Some(mappings)
    }

    /// Index assigned to a table name, if the table is part of the scope.
    pub fn table_index(&self, table: &str) -> Option<u32> {
        self.table_indices.get(table).copied()
    }

    /// Index assigned to a column, resolved through its table's index.
    pub fn column_index(&self, identifier: &ColumnIdentifier) -> Option<u32> {
        let table_index = self.table_index(&identifier.table)?;
        let qualified = format!("{table_index}.{}", identifier.column);
        self.column_indices.get(&qualified).copied()
    }

    /// Table entries in assignment order, for dictionary header emission.
    pub fn tables(&self) -> impl Iterator<Item = (&str, u32)> {
        self.table_order
            .iter()
            .enumerate()
            .map(|(position, name)| (name.as_str(), position as u32 + 1))
    }

    /// Qualified-column entries in assignment order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, u32)> {
        self.column_order
            .iter()
            .enumerate()
            .map(|(position, key)| (key.as_str(), position as u32 + 1))
    }
}
