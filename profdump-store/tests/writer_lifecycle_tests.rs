//! Writer lifecycle tests: validation gating, lazy sink creation,
//! close semantics, and reader error handling for malformed files.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use profdump_core::{
    AcceptedScope, ColumnCombination, ColumnIdentifier, ColumnPermutation, FunctionalDependency,
    InclusionDependency, ProfdumpError, ResultKind, UniqueColumnCombination,
};
use profdump_store::{ResultWriter, read_results};

fn column(table: &str, name: &str) -> ColumnIdentifier {
    ColumnIdentifier::new(table, name)
}

fn scenario_scope() -> AcceptedScope {
    AcceptedScope::Columns(vec![
        column("T1", "A"),
        column("T1", "B"),
        column("T2", "A"),
    ])
}

#[test]
fn test_rejected_result_creates_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut writer =
        ResultWriter::new(dir.path(), "run", scenario_scope()).expect("create writer");

    let out_of_scope = InclusionDependency {
        dependant: ColumnPermutation::new(vec![column("T3", "A")]),
        referenced: ColumnPermutation::new(vec![column("T1", "A")]),
    };
    let error = writer
        .receive_inclusion_dependency(out_of_scope)
        .unwrap_err();

    assert!(matches!(error, ProfdumpError::Validation { .. }));
    assert!(!writer.file_path(ResultKind::InclusionDependency).exists());
    writer.close().expect("close");
}

#[test]
fn test_rejected_result_leaves_existing_sink_unmodified() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut writer =
        ResultWriter::new(dir.path(), "run", scenario_scope()).expect("create writer");

    writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
        })
        .expect("receive ucc");

    let error = writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T9", "Z")]),
        })
        .unwrap_err();
    assert!(matches!(error, ProfdumpError::Validation { .. }));

    writer.close().expect("close");

    let content = std::fs::read_to_string(writer.file_path(ResultKind::UniqueColumnCombination))
        .expect("read file");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_unbounded_scope_accepts_everything() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut writer =
        ResultWriter::new(dir.path(), "run", AcceptedScope::Unbounded).expect("create writer");

    writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("Unknown", "Column")]),
        })
        .expect("receive ucc");
    writer.close().expect("close");
}

#[test]
fn test_sink_open_failure_poisons_kind_but_not_others() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut writer =
        ResultWriter::new(dir.path(), "run", scenario_scope()).expect("create writer");

    // Occupy the functional-dependency path with a directory so the sink
    // cannot be opened.
    std::fs::create_dir(writer.file_path(ResultKind::FunctionalDependency)).expect("block path");

    let fd = FunctionalDependency {
        determinant: ColumnCombination::new(vec![column("T1", "A")]),
        dependant: column("T1", "B"),
    };

    let error = writer.receive_functional_dependency(fd.clone()).unwrap_err();
    assert!(matches!(error, ProfdumpError::Io { .. }));

    // The kind stays unusable for the rest of the run.
    let error = writer.receive_functional_dependency(fd).unwrap_err();
    assert!(matches!(error, ProfdumpError::Io { .. }));

    // Other kinds are unaffected, and close succeeds.
    writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
        })
        .expect("other kinds keep persisting");
    writer.close().expect("close");

    let content = std::fs::read_to_string(writer.file_path(ResultKind::UniqueColumnCombination))
        .expect("read file");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_close_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut writer =
        ResultWriter::new(dir.path(), "run", scenario_scope()).expect("create writer");

    writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
        })
        .expect("receive ucc");

    writer.close().expect("first close");
    writer.close().expect("second close is a no-op");
}

#[test]
fn test_files_are_named_by_execution_id_and_suffix() {
    let dir = tempfile::tempdir().expect("tempdir");
    let writer =
        ResultWriter::new(dir.path(), "HyFD_2026-08-28", scenario_scope()).expect("create writer");

    let path = writer.file_path(ResultKind::FunctionalDependency);
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("HyFD_2026-08-28_fds")
    );
}

#[test]
fn test_writer_creates_missing_output_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("results").join("2026");

    let mut writer =
        ResultWriter::new(&nested, "run", scenario_scope()).expect("create writer");
    writer
        .receive_unique_column_combination(UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
        })
        .expect("receive ucc");
    writer.close().expect("close");

    assert!(nested.join("run_uccs").exists());
}

#[test]
fn test_reading_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = read_results(dir.path().join("absent_fds"), ResultKind::FunctionalDependency)
        .unwrap_err();
    assert!(matches!(error, ProfdumpError::Io { .. }));
}

#[test]
fn test_truncated_dictionary_header_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run_fds");
    std::fs::write(&path, "# TABLES\nT1\t1\n# COLUMN\n1.A\t1\n").expect("write file");

    let error = read_results(&path, ResultKind::FunctionalDependency).unwrap_err();
    assert!(matches!(error, ProfdumpError::Read { .. }));
}

#[test]
fn test_data_line_with_unknown_index_is_a_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("run_fds");
    std::fs::write(
        &path,
        "# TABLES\nT1\t1\n# COLUMN\n1.A\t1\n# RESULTS\n1->7\n",
    )
    .expect("write file");

    let error = read_results(&path, ResultKind::FunctionalDependency).unwrap_err();
    assert!(matches!(error, ProfdumpError::Read { .. }));
}
