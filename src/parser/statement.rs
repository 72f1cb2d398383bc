use crate::core::Value;

/// The structured, already-parsed representation of one query, consumed by
/// the execution engine.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub from: TableRef,
    pub joins: Vec<JoinSpec>,
    pub filter: Option<Condition>,
    pub select: Vec<SelectItem>,
    pub order_by: Vec<OrderKey>,
    /// Signed so a nonsensical TOP/LIMIT is rejected by plan validation
    /// rather than swallowed at parse time.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub table: String,
    pub alias: String,
}

impl TableRef {
    #[must_use]
    pub fn new(table: impl Into<String>, alias: Option<String>) -> Self {
        let table = table.into();
        let alias = alias.unwrap_or_else(|| table.clone());
        Self { table, alias }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinSpec {
    pub kind: JoinKind,
    pub table: TableRef,
    /// Required to be a single `left.field = right.field` equality; any other
    /// shape fails plan validation.
    pub on: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Wildcard,
    Field { field: String, output: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderKey {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bare or alias-qualified field name.
    Field(String),
    Literal(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
        };
        write!(f, "{op}")
    }
}

/// A boolean condition tree over one record (or a joined composite record).
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Compare { left: Operand, op: CompareOp, right: Operand },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// Walks the tree and yields every field name referenced by a leaf.
    pub fn referenced_fields(&self, out: &mut Vec<String>) {
        match self {
            Self::Compare { left, right, .. } => {
                for operand in [left, right] {
                    if let Operand::Field(name) = operand {
                        out.push(name.clone());
                    }
                }
            }
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.referenced_fields(out);
                }
            }
            Self::Not(child) => child.referenced_fields(out),
        }
    }
}
