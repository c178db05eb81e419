//! Data model for profiling results.
//!
//! Profiling algorithms emit findings over table/column identifiers. The
//! closed set of result kinds is modeled as a tagged enum so that routing
//! and decoding stay exhaustive-match checked; adding a kind is a
//! compile-time exercise, not a runtime registration.

use serde::{Deserialize, Serialize};

/// A single column, qualified by the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnIdentifier {
    pub table: String,
    pub column: String,
}

impl ColumnIdentifier {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl std::fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// An unordered group of columns, kept in the order it was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCombination {
    pub columns: Vec<ColumnIdentifier>,
}

impl ColumnCombination {
    pub fn new(columns: Vec<ColumnIdentifier>) -> Self {
        Self { columns }
    }
}

/// An ordered sequence of columns; position is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnPermutation {
    pub columns: Vec<ColumnIdentifier>,
}

impl ColumnPermutation {
    pub fn new(columns: Vec<ColumnIdentifier>) -> Self {
        Self { columns }
    }
}

/// A named statistic over a column combination.
///
/// The value is kept as arbitrary JSON because algorithms report
/// heterogeneous measurements (counts, ratios, histograms, strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicStatistic {
    pub statistic_name: String,
    pub columns: ColumnCombination,
    pub value: serde_json::Value,
}

/// A functional dependency: the determinant columns uniquely determine
/// the dependant column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalDependency {
    pub determinant: ColumnCombination,
    pub dependant: ColumnIdentifier,
}

/// An inclusion dependency: every value combination of the dependant
/// columns also occurs in the referenced columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclusionDependency {
    pub dependant: ColumnPermutation,
    pub referenced: ColumnPermutation,
}

/// A column combination whose value combinations are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueColumnCombination {
    pub columns: ColumnCombination,
}

/// A single equality condition restricting a conditional result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCondition {
    pub column: ColumnIdentifier,
    pub value: String,
}

/// A column combination that is unique on the rows matching the conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalUniqueColumnCombination {
    pub columns: ColumnCombination,
    pub conditions: Vec<ColumnCondition>,
}

/// How row order is compared in an order dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Lexicographical,
    Pointwise,
}

/// Comparison operator underlying an order dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    SmallerEqual,
    StrictlySmaller,
}

/// An order dependency: ordering rows by the left-hand side also orders
/// them by the right-hand side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDependency {
    pub lhs: ColumnPermutation,
    pub rhs: ColumnPermutation,
    pub order_type: OrderType,
    pub comparison_operator: ComparisonOperator,
}

/// The closed set of result kinds, with the per-kind file suffix used
/// for run output naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultKind {
    Statistic,
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
    ConditionalUniqueColumnCombination,
    OrderDependency,
}

impl ResultKind {
    /// All kinds, in the order run read-back scans them.
    pub const ALL: [ResultKind; 6] = [
        ResultKind::Statistic,
        ResultKind::FunctionalDependency,
        ResultKind::InclusionDependency,
        ResultKind::UniqueColumnCombination,
        ResultKind::ConditionalUniqueColumnCombination,
        ResultKind::OrderDependency,
    ];

    /// File suffix appended to the run output prefix for this kind.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            ResultKind::Statistic => "_stats",
            ResultKind::FunctionalDependency => "_fds",
            ResultKind::InclusionDependency => "_inds",
            ResultKind::UniqueColumnCombination => "_uccs",
            ResultKind::ConditionalUniqueColumnCombination => "_cuccs",
            ResultKind::OrderDependency => "_ods",
        }
    }

    /// Human-readable kind name, used in log and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ResultKind::Statistic => "Basic Statistic",
            ResultKind::FunctionalDependency => "Functional Dependency",
            ResultKind::InclusionDependency => "Inclusion Dependency",
            ResultKind::UniqueColumnCombination => "Unique Column Combination",
            ResultKind::ConditionalUniqueColumnCombination => {
                "Conditional Unique Column Combination"
            }
            ResultKind::OrderDependency => "Order Dependency",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One profiling result of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilingResult {
    Statistic(BasicStatistic),
    FunctionalDependency(FunctionalDependency),
    InclusionDependency(InclusionDependency),
    UniqueColumnCombination(UniqueColumnCombination),
    ConditionalUniqueColumnCombination(ConditionalUniqueColumnCombination),
    OrderDependency(OrderDependency),
}

impl ProfilingResult {
    /// The kind tag of this result, used for sink routing and file naming.
    pub const fn kind(&self) -> ResultKind {
        match self {
            ProfilingResult::Statistic(_) => ResultKind::Statistic,
            ProfilingResult::FunctionalDependency(_) => ResultKind::FunctionalDependency,
            ProfilingResult::InclusionDependency(_) => ResultKind::InclusionDependency,
            ProfilingResult::UniqueColumnCombination(_) => ResultKind::UniqueColumnCombination,
            ProfilingResult::ConditionalUniqueColumnCombination(_) => {
                ResultKind::ConditionalUniqueColumnCombination
            }
            ProfilingResult::OrderDependency(_) => ResultKind::OrderDependency,
        }
    }

    /// Every table/column identifier this result references.
    ///
    /// The validation gate checks these against the run's accepted scope.
    pub fn column_identifiers(&self) -> Vec<&ColumnIdentifier> {
        match self {
            ProfilingResult::Statistic(statistic) => statistic.columns.columns.iter().collect(),
            ProfilingResult::FunctionalDependency(fd) => {
                let mut identifiers: Vec<&ColumnIdentifier> =
                    fd.determinant.columns.iter().collect();
                identifiers.push(&fd.dependant);
                identifiers
            }
            ProfilingResult::InclusionDependency(ind) => ind
                .dependant
                .columns
                .iter()
                .chain(ind.referenced.columns.iter())
                .collect(),
            ProfilingResult::UniqueColumnCombination(ucc) => ucc.columns.columns.iter().collect(),
            ProfilingResult::ConditionalUniqueColumnCombination(cucc) => cucc
                .columns
                .columns
                .iter()
                .chain(cucc.conditions.iter().map(|condition| &condition.column))
                .collect(),
            ProfilingResult::OrderDependency(od) => od
                .lhs
                .columns
                .iter()
                .chain(od.rhs.columns.iter())
                .collect(),
        }
    }
}

impl From<BasicStatistic> for ProfilingResult {
    fn from(statistic: BasicStatistic) -> Self {
        ProfilingResult::Statistic(statistic)
    }
}

impl From<FunctionalDependency> for ProfilingResult {
    fn from(fd: FunctionalDependency) -> Self {
        ProfilingResult::FunctionalDependency(fd)
    }
}

impl From<InclusionDependency> for ProfilingResult {
    fn from(ind: InclusionDependency) -> Self {
        ProfilingResult::InclusionDependency(ind)
    }
}

impl From<UniqueColumnCombination> for ProfilingResult {
    fn from(ucc: UniqueColumnCombination) -> Self {
        ProfilingResult::UniqueColumnCombination(ucc)
    }
}

impl From<ConditionalUniqueColumnCombination> for ProfilingResult {
    fn from(cucc: ConditionalUniqueColumnCombination) -> Self {
        ProfilingResult::ConditionalUniqueColumnCombination(cucc)
    }
}

impl From<OrderDependency> for ProfilingResult {
    fn from(od: OrderDependency) -> Self {
        ProfilingResult::OrderDependency(od)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(table: &str, name: &str) -> ColumnIdentifier {
        ColumnIdentifier::new(table, name)
    }

    #[test]
    fn test_column_identifier_display() {
        assert_eq!(column("customers", "id").to_string(), "customers.id");
    }

    #[test]
    fn test_kind_dispatch() {
        let result: ProfilingResult = UniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
        }
        .into();

        assert_eq!(result.kind(), ResultKind::UniqueColumnCombination);
        assert_eq!(result.kind().file_suffix(), "_uccs");
    }

    #[test]
    fn test_file_suffixes_are_distinct() {
        let mut suffixes: Vec<&str> = ResultKind::ALL.iter().map(|k| k.file_suffix()).collect();
        suffixes.sort_unstable();
        suffixes.dedup();
        assert_eq!(suffixes.len(), ResultKind::ALL.len());
    }

    #[test]
    fn test_functional_dependency_identifiers() {
        let fd = FunctionalDependency {
            determinant: ColumnCombination::new(vec![column("T1", "A"), column("T1", "B")]),
            dependant: column("T1", "C"),
        };
        let result = ProfilingResult::from(fd);

        let identifiers = result.column_identifiers();
        assert_eq!(identifiers.len(), 3);
        assert_eq!(identifiers[2], &column("T1", "C"));
    }

    #[test]
    fn test_conditional_ucc_references_condition_columns() {
        let cucc = ConditionalUniqueColumnCombination {
            columns: ColumnCombination::new(vec![column("T1", "A")]),
            conditions: vec![ColumnCondition {
                column: column("T1", "B"),
                value: "archived".to_string(),
            }],
        };
        let result = ProfilingResult::from(cucc);

        assert!(result.column_identifiers().contains(&&column("T1", "B")));
    }

    #[test]
    fn test_order_dependency_serde_round_trip() {
        let od = OrderDependency {
            lhs: ColumnPermutation::new(vec![column("T1", "A")]),
            rhs: ColumnPermutation::new(vec![column("T1", "B")]),
            order_type: OrderType::Lexicographical,
            comparison_operator: ComparisonOperator::SmallerEqual,
        };

        let json = serde_json::to_string(&od).expect("serialize");
        let back: OrderDependency = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(od, back);
    }
}
