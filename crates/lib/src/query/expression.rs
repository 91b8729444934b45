//! Generic filter expressions.
//!
//! These are the trees handed over by the document-model layer. They name fields by their
//! logical names and know nothing about the XML layout; [`MarkLogicQueryBuilder`] lowers
//! them.
//!
//! [`MarkLogicQueryBuilder`]: super::MarkLogicQueryBuilder

use std::fmt;

use chrono::{DateTime, Utc};

/// Operators of a comparison.
///
/// This is the full operator set of the filter language. Some of them (the arithmetic
/// ones) have no `cts:` counterpart and are rejected when lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Between,
    NotBetween,
    In,
    NotIn,
    Like,
    NotLike,
    ILike,
    NotILike,
    StartsWith,
    IsNull,
    IsNotNull,
    Sum,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Returns the operator as written in the filter language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::LtEq => "<=",
            Operator::GtEq => ">=",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotILike => "NOT ILIKE",
            Operator::StartsWith => "STARTSWITH",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::Sum => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Long(i64),
    Double(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => "string",
            Literal::Long(_) => "long",
            Literal::Double(_) => "double",
            Literal::Boolean(_) => "boolean",
            Literal::Date(_) => "date",
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Long(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Long(value as i64)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Double(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Date(value)
    }
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No operand (`IS NULL`, `IS NOT NULL`)
    None,
    Literal(Literal),
    /// A literal list (`IN`, `BETWEEN`)
    List(Vec<Literal>),
}

/// A filter expression.
///
/// `And`/`Or` keep their children grouped exactly as given.
///
/// ```
/// use docstate_marklogic::query::{Expression, Literal};
///
/// let expression = Expression::and([
///     Expression::eq("dc:title", "Document 1"),
///     Expression::or([
///         Expression::is_null("ecm:lockOwner"),
///         Expression::in_list("ecm:primaryType", ["File", "Note"]),
///     ]),
/// ]);
/// # let _ = expression;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Compare {
        field: String,
        operator: Operator,
        operand: Operand,
    },
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn compare(field: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Expression::Compare {
            field: field.into(),
            operator,
            operand,
        }
    }

    /// `field operator literal`
    pub fn literal(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<Literal>,
    ) -> Self {
        Self::compare(field, operator, Operand::Literal(value.into()))
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::literal(field, Operator::Eq, value)
    }

    pub fn in_list<I, L>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self::compare(
            field,
            Operator::In,
            Operand::List(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self::compare(field, Operator::IsNull, Operand::None)
    }

    pub fn and(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::Or(children.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(expression: Expression) -> Self {
        Expression::Not(Box::new(expression))
    }
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}
