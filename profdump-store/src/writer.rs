//! The result writer: a per-kind stream multiplexer over one run's
//! output files.
//!
//! Results arrive one at a time from the driving execution context; the
//! writer validates each against the run's accepted scope, encodes it,
//! and appends it to the sink for its kind. Sinks are opened lazily on
//! the first accepted result of a kind and released together in
//! [`ResultWriter::close`].
//!
//! The write path is single-threaded by contract: callers must serialize
//! invocations themselves. No internal locking is performed.

use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use profdump_core::{
    AcceptedScope, BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency,
    IdentifierMappings, InclusionDependency, OrderDependency, ProfdumpError, ProfilingResult,
    Result, ResultKind, UniqueColumnCombination,
};
use tracing::debug;

use crate::encoder;

/// Writes all received results of one run to disk, one file per kind.
///
/// Functional dependencies are stored compactly when the scope is finite:
/// the file then starts with a dictionary header and each line references
/// column indices instead of names. Every other kind (and every kind under
/// an unbounded scope) is stored as one JSON record per line.
pub struct ResultWriter {
    directory: PathBuf,
    execution_id: String,
    scope: AcceptedScope,
    mappings: Option<IdentifierMappings>,
    sinks: HashMap<ResultKind, BufWriter<File>>,
    header_written: HashSet<ResultKind>,
    poisoned: HashSet<ResultKind>,
}

impl ResultWriter {
    /// Creates a writer for one run.
    ///
    /// The output directory is created if missing. Each kind's file is
    /// named `<execution_id><kind suffix>` inside it and only comes into
    /// existence once a result of that kind is received.
    pub fn new(
        output_directory: impl Into<PathBuf>,
        execution_id: impl Into<String>,
        scope: AcceptedScope,
    ) -> Result<Self> {
        let directory = output_directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            ProfdumpError::io(
                format!("could not create result directory {}", directory.display()),
                e,
            )
        })?;

        let mappings = IdentifierMappings::from_scope(&scope);

        Ok(Self {
            directory,
            execution_id: execution_id.into(),
            scope,
            mappings,
            sinks: HashMap::new(),
            header_written: HashSet::new(),
            poisoned: HashSet::new(),
        })
    }

    /// The run's execution identifier, which prefixes every output file.
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }

    /// Path of the output file for a kind, whether or not it exists yet.
    pub fn file_path(&self, kind: ResultKind) -> PathBuf {
        self.directory
            .join(format!("{}{}", self.execution_id, kind.file_suffix()))
    }

    /// Directory all of this run's result files live in.
    pub fn output_directory(&self) -> &Path {
        &self.directory
    }

    /// Routes one result to the sink for its kind.
    ///
    /// Validation or encoding failure leaves every sink and file
    /// untouched by this result. An I/O failure poisons the affected
    /// kind: later results of that kind keep failing while other kinds
    /// continue unaffected.
    pub fn receive(&mut self, result: &ProfilingResult) -> Result<()> {
        let kind = result.kind();

        if !self.scope.accepts(result) {
            return Err(ProfdumpError::validation(format!(
                "{} references table/column names that do not match the input",
                kind.name()
            )));
        }

        // Encode before touching any sink so a failed result cannot leave
        // a partial line behind.
        let (line, compact) = match (result, self.mappings.as_ref()) {
            (ProfilingResult::FunctionalDependency(fd), Some(mappings)) => {
                (encoder::compact_functional_dependency(fd, mappings)?, true)
            }
            _ => (encoder::generic_record(result)?, false),
        };

        if self.poisoned.contains(&kind) {
            return Err(ProfdumpError::io(
                format!("sink for {} failed earlier in this run", kind.name()),
                io::Error::other("sink unavailable"),
            ));
        }

        self.ensure_sink(kind)?;

        if compact && !self.header_written.contains(&kind) {
            self.write_header(kind)?;
        }

        self.append_line(kind, &line)
    }

    /// Receives a basic statistic.
    pub fn receive_statistic(&mut self, statistic: BasicStatistic) -> Result<()> {
        self.receive(&ProfilingResult::Statistic(statistic))
    }

    /// Receives a functional dependency.
    pub fn receive_functional_dependency(&mut self, fd: FunctionalDependency) -> Result<()> {
        self.receive(&ProfilingResult::FunctionalDependency(fd))
    }

    /// Receives an inclusion dependency.
    pub fn receive_inclusion_dependency(&mut self, ind: InclusionDependency) -> Result<()> {
        self.receive(&ProfilingResult::InclusionDependency(ind))
    }

    /// Receives a unique column combination.
    pub fn receive_unique_column_combination(
        &mut self,
        ucc: UniqueColumnCombination,
    ) -> Result<()> {
        self.receive(&ProfilingResult::UniqueColumnCombination(ucc))
    }

    /// Receives a conditional unique column combination.
    pub fn receive_conditional_unique_column_combination(
        &mut self,
        cucc: ConditionalUniqueColumnCombination,
    ) -> Result<()> {
        self.receive(&ProfilingResult::ConditionalUniqueColumnCombination(cucc))
    }

    /// Receives an order dependency.
    pub fn receive_order_dependency(&mut self, od: OrderDependency) -> Result<()> {
        self.receive(&ProfilingResult::OrderDependency(od))
    }

    /// Releases every open sink.
    ///
    /// Release continues past individual failures so no sink is left
    /// behind; failures are aggregated into one error. Calling `close`
    /// again once all sinks are released is a no-op.
    pub fn close(&mut self) -> Result<()> {
        let mut failures = Vec::new();

        for (kind, mut sink) in self.sinks.drain() {
            if let Err(e) = sink.flush() {
                failures.push(format!("{}: {e}", kind.name()));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ProfdumpError::io(
                format!("failed to release {} result sink(s)", failures.len()),
                io::Error::other(failures.join("; ")),
            ))
        }
    }

    fn ensure_sink(&mut self, kind: ResultKind) -> Result<()> {
        if self.sinks.contains_key(&kind) {
            return Ok(());
        }

        let path = self.file_path(kind);
        match File::create(&path) {
            Ok(file) => {
                debug!(kind = kind.name(), path = %path.display(), "opened result sink");
                self.sinks.insert(kind, BufWriter::new(file));
                Ok(())
            }
            Err(e) => {
                self.poisoned.insert(kind);
                Err(ProfdumpError::io(
                    format!("could not open result file {}", path.display()),
                    e,
                ))
            }
        }
    }

    fn write_header(&mut self, kind: ResultKind) -> Result<()> {
        // Only reachable on the compact path, where both exist.
        let (Some(mappings), Some(sink)) = (self.mappings.as_ref(), self.sinks.get_mut(&kind))
        else {
            return Ok(());
        };

        if let Err(e) = encoder::write_dictionary_header(sink, mappings) {
            self.poisoned.insert(kind);
            return Err(ProfdumpError::io(
                format!("could not write dictionary header for {}", kind.name()),
                e,
            ));
        }

        self.header_written.insert(kind);
        debug!(kind = kind.name(), "wrote dictionary header");
        Ok(())
    }

    fn append_line(&mut self, kind: ResultKind, line: &str) -> Result<()> {
        let Some(sink) = self.sinks.get_mut(&kind) else {
            return Err(ProfdumpError::io(
                format!("no open sink for {}", kind.name()),
                io::Error::other("sink unavailable"),
            ));
        };

        // Flush per record, mirroring append-then-sync semantics: data is
        // durable even if the run aborts before close().
        let outcome = writeln!(sink, "{line}").and_then(|()| sink.flush());
        if let Err(e) = outcome {
            self.poisoned.insert(kind);
            return Err(ProfdumpError::io(
                format!("could not append {} record", kind.name()),
                e,
            ));
        }

        Ok(())
    }
}
