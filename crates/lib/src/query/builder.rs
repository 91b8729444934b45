//! Lowering of filter expressions to MarkLogic searches.
//!
//! [`MarkLogicQueryBuilder`] turns an [`Expression`] into a `cts:` query, and the rest of a
//! search (projection, ordering, security principals, paging) into the XQuery that runs it.
//! Field names are resolved through the injected [`PathResolver`]; the builder itself
//! holds no session state.
//!
//! Fields nested below containers are matched inside `cts:element-query` wrappers, one per
//! enclosing element, so `picture:views/*/width = 640` only matches a `width` element that
//! sits inside a `picture__views` element.

use tracing::{debug, trace};

use super::cts;
use super::{
    Expression, Literal, Operand, Operator, OrderBy, PathResolver, QueryConfig, QueryError,
    ResolvedPath, unsupported,
};
use crate::Result;
use crate::constants::{
    DOCUMENT_ROOT, KEY_ANCESTOR_IDS, KEY_ID, KEY_READ_ACL, QUERY_FULLTEXT, QUERY_PATH,
};
use crate::helper;

static EMPTY_CONFIG: QueryConfig = QueryConfig {
    range_element_indexes: Vec::new(),
};

/// A search ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkLogicQuery {
    query: String,
    projection: Vec<String>,
    order: Vec<String>,
    limit: Option<u64>,
    offset: u64,
}

impl MarkLogicQuery {
    /// The `cts:` query selecting the documents.
    pub fn cts_query(&self) -> &str {
        &self.query
    }

    /// Element paths below the root returned for each document; empty returns whole documents.
    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    /// `cts:index-order` specifications, most significant first.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Renders the XQuery main module running the search.
    ///
    /// ```text
    /// xquery version "1.0-ml";
    /// let $query := cts:element-value-query(fn:QName("","ecm__id"),"ID",("exact"))
    /// for $doc in cts:search(fn:doc(),$query)[1 to 10]
    /// return $doc
    /// ```
    pub fn search_query(&self) -> String {
        let search = if self.order.is_empty() {
            "cts:search(fn:doc(),$query)".to_string()
        } else {
            format!("cts:search(fn:doc(),$query,({}))", self.order.join(","))
        };
        let first = self.offset.saturating_add(1);
        let range = match self.limit {
            Some(limit) => format!("[{first} to {}]", self.offset.saturating_add(limit)),
            None if self.offset > 0 => format!("[{first} to fn:last()]"),
            None => String::new(),
        };
        let result = if self.projection.is_empty() {
            "$doc".to_string()
        } else {
            let fields: String = self
                .projection
                .iter()
                .map(|path| format!("{{$doc/{DOCUMENT_ROOT}/{path}}}"))
                .collect();
            format!("<{DOCUMENT_ROOT}>{fields}</{DOCUMENT_ROOT}>")
        };

        format!(
            "xquery version \"1.0-ml\";\nlet $query := {}\nfor $doc in {search}{range}\nreturn {result}",
            self.query
        )
    }
}

/// Builds a [`MarkLogicQuery`] from a filter expression.
///
/// ```
/// use docstate_marklogic::query::{Expression, MarkLogicQueryBuilder, SchemaResolver};
///
/// let resolver = SchemaResolver::new();
/// let query = MarkLogicQueryBuilder::new(&resolver)
///     .filter(Expression::eq("ecm:uuid", "ID"))
///     .limit(10)
///     .build()?;
/// assert_eq!(
///     query.cts_query(),
///     r#"cts:element-value-query(fn:QName("","ecm__id"),"ID",("exact"))"#
/// );
/// # Ok::<(), docstate_marklogic::Error>(())
/// ```
#[derive(Clone)]
pub struct MarkLogicQueryBuilder<'a> {
    resolver: &'a dyn PathResolver,
    config: &'a QueryConfig,
    filter: Option<Expression>,
    projection: Vec<String>,
    order_by: Vec<OrderBy>,
    principals: Vec<String>,
    limit: Option<u64>,
    offset: u64,
}

impl<'a> MarkLogicQueryBuilder<'a> {
    pub fn new(resolver: &'a dyn PathResolver) -> Self {
        Self {
            resolver,
            config: &EMPTY_CONFIG,
            filter: None,
            projection: Vec::new(),
            order_by: Vec::new(),
            principals: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    /// Uses the range element indexes declared in `config`.
    pub fn with_config(mut self, config: &'a QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn filter(mut self, expression: Expression) -> Self {
        self.filter = Some(expression);
        self
    }

    /// Returns only `fields` of each matching document.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by.push(order);
        self
    }

    /// Restricts matches to documents readable by one of `principals`.
    pub fn principals<I, S>(mut self, principals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.principals
            .extend(principals.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn build(&self) -> Result<MarkLogicQuery> {
        let mut parts = Vec::new();
        if let Some(filter) = &self.filter {
            parts.push(self.lower(filter)?);
        }
        if !self.principals.is_empty() {
            let path = self.resolver.resolve(KEY_READ_ACL)?;
            let acl = cts::value_query(path.leaf(), &self.principals, cts::EXACT);
            parts.push(wrap(&path, acl));
        }
        let query = match parts.len() {
            0 => cts::TRUE_QUERY.to_string(),
            1 => parts.remove(0),
            _ => cts::and_query(&parts),
        };

        let projection = self
            .projection
            .iter()
            .map(|field| self.resolver.resolve(field).map(|path| path.field_xpath()))
            .collect::<Result<Vec<_>>>()?;
        let order = self
            .order_by
            .iter()
            .map(|order| self.index_order(order))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            projection = projection.len(),
            order = order.len(),
            principals = self.principals.len(),
            limit = ?self.limit,
            offset = self.offset,
            "Built MarkLogic query"
        );
        trace!(query = %query, "Lowered filter");

        Ok(MarkLogicQuery {
            query,
            projection,
            order,
            limit: self.limit,
            offset: self.offset,
        })
    }

    fn lower(&self, expression: &Expression) -> Result<String> {
        match expression {
            Expression::And(children) => Ok(cts::and_query(&self.lower_all(children)?)),
            Expression::Or(children) => Ok(cts::or_query(&self.lower_all(children)?)),
            Expression::Not(inner) => Ok(cts::not_query(&self.lower(inner)?)),
            Expression::Compare {
                field,
                operator,
                operand,
            } => self.lower_compare(field, *operator, operand),
        }
    }

    fn lower_all(&self, children: &[Expression]) -> Result<Vec<String>> {
        children.iter().map(|child| self.lower(child)).collect()
    }

    fn lower_compare(&self, field: &str, operator: Operator, operand: &Operand) -> Result<String> {
        match field {
            QUERY_PATH => return self.lower_path(operator, operand),
            QUERY_FULLTEXT => {
                return Err(unsupported(operator, "fulltext search is not supported"));
            }
            _ => {}
        }

        let path = self.resolver.resolve(field)?;
        let leaf = path.leaf();
        let query = match operator {
            Operator::Eq => wrap(&path, self.equals(&path, operator, operand)?),
            Operator::NotEq => cts::not_query(&wrap(&path, self.equals(&path, operator, operand)?)),
            Operator::Lt | Operator::Gt | Operator::LtEq | Operator::GtEq => {
                let literal = single(operator, operand)?;
                let value = self.typed(&path, operator, literal)?;
                wrap(&path, cts::range_query(leaf, operator.as_str(), &value))
            }
            Operator::Between | Operator::NotBetween => {
                let (low, high) = pair(operator, operand)?;
                let between = cts::and_query(&[
                    cts::range_query(leaf, ">=", &self.typed(&path, operator, low)?),
                    cts::range_query(leaf, "<=", &self.typed(&path, operator, high)?),
                ]);
                let between = wrap(&path, between);
                if operator == Operator::NotBetween {
                    cts::not_query(&between)
                } else {
                    between
                }
            }
            Operator::In | Operator::NotIn => {
                let literals = list(operator, operand)?;
                let texts = literals
                    .iter()
                    .map(|literal| text(&path, operator, literal))
                    .collect::<Result<Vec<_>>>()?;
                match (operator, texts.is_empty()) {
                    (Operator::In, true) => cts::FALSE_QUERY.to_string(),
                    (_, true) => cts::TRUE_QUERY.to_string(),
                    (Operator::In, false) => {
                        wrap(&path, cts::value_query(leaf, &texts, cts::EXACT))
                    }
                    (_, false) => cts::not_query(&wrap(
                        &path,
                        cts::value_query(leaf, &texts, cts::EXACT),
                    )),
                }
            }
            Operator::Like | Operator::NotLike | Operator::ILike | Operator::NotILike => {
                let pattern = like_pattern(operator, string(operator, operand)?)?;
                let options = match operator {
                    Operator::ILike | Operator::NotILike => cts::WILDCARDED_CASE_INSENSITIVE,
                    _ => cts::WILDCARDED,
                };
                let like = wrap(&path, cts::value_query(leaf, &[pattern], options));
                match operator {
                    Operator::NotLike | Operator::NotILike => cts::not_query(&like),
                    _ => like,
                }
            }
            Operator::StartsWith => {
                let prefix = string(operator, operand)?;
                if prefix.contains(['*', '?']) {
                    return Err(unsupported(
                        operator,
                        format!("prefix '{prefix}' contains a wildcard character"),
                    ));
                }
                let pattern = format!("{prefix}*");
                wrap(&path, cts::value_query(leaf, &[pattern], cts::WILDCARDED))
            }
            Operator::IsNull => {
                none(operator, operand)?;
                cts::or_query(&[
                    cts::not_query(&wrap(&path, cts::exists(leaf))),
                    wrap(&path, cts::nil_query(leaf)),
                ])
            }
            Operator::IsNotNull => {
                none(operator, operand)?;
                cts::and_query(&[
                    wrap(&path, cts::exists(leaf)),
                    cts::not_query(&wrap(&path, cts::nil_query(leaf))),
                ])
            }
            Operator::Sum | Operator::Sub | Operator::Mul | Operator::Div => {
                return Err(unsupported(
                    operator,
                    "arithmetic has no cts query equivalent",
                ));
            }
        };
        trace!(field, %operator, "Lowered comparison");
        Ok(query)
    }

    /// Equality, through the range index when the field has one.
    fn equals(&self, path: &ResolvedPath, operator: Operator, operand: &Operand) -> Result<String> {
        let literal = single(operator, operand)?;
        let value = text(path, operator, literal)?;
        match self.config.range_index(&path.field) {
            Some(index) => Ok(cts::range_query(
                path.leaf(),
                "=",
                &cts::typed_value(&index.kind, &value),
            )),
            None => Ok(cts::value_query(path.leaf(), &[value], cts::EXACT)),
        }
    }

    /// A typed value for a range comparison; the index type wins over the literal's.
    fn typed(&self, path: &ResolvedPath, operator: Operator, literal: &Literal) -> Result<String> {
        let value = text(path, operator, literal)?;
        let kind = match self.config.range_index(&path.field) {
            Some(index) => index.kind.as_str(),
            None => literal_kind(path, literal),
        };
        Ok(cts::typed_value(kind, &value))
    }

    /// `ecm:path` is not stored: paths are looked up through the resolver.
    fn lower_path(&self, operator: Operator, operand: &Operand) -> Result<String> {
        let path = string(operator, operand)?;
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        let id = self.resolver.document_id_by_path(path);
        debug!(path, found = id.is_some(), "Resolved document path");

        match operator {
            Operator::Eq | Operator::NotEq => {
                let matched = match &id {
                    Some(id) => {
                        let path = self.resolver.resolve(KEY_ID)?;
                        wrap(
                            &path,
                            cts::value_query(path.leaf(), std::slice::from_ref(id), cts::EXACT),
                        )
                    }
                    None => cts::FALSE_QUERY.to_string(),
                };
                match (operator, &id) {
                    (Operator::Eq, _) => Ok(matched),
                    (_, Some(_)) => Ok(cts::not_query(&matched)),
                    (_, None) => Ok(cts::TRUE_QUERY.to_string()),
                }
            }
            Operator::StartsWith => match id {
                Some(id) => {
                    let path = self.resolver.resolve(KEY_ANCESTOR_IDS)?;
                    Ok(wrap(&path, cts::value_query(path.leaf(), &[id], cts::EXACT)))
                }
                None => Ok(cts::FALSE_QUERY.to_string()),
            },
            _ => Err(unsupported(
                operator,
                format!("{QUERY_PATH} only supports =, <> and STARTSWITH"),
            )),
        }
    }

    fn index_order(&self, order: &OrderBy) -> Result<String> {
        let path = self.resolver.resolve(&order.field)?;
        let index = self
            .config
            .range_index(&path.field)
            .ok_or_else(|| QueryError::MissingRangeIndex {
                field: order.field.clone(),
            })?;
        Ok(cts::index_order(path.leaf(), &index.kind, order.descending))
    }
}

/// Wraps `query` in one `cts:element-query` per enclosing element of the leaf.
fn wrap(path: &ResolvedPath, query: String) -> String {
    path.containers()
        .rev()
        .fold(query, |inner, container| cts::element_query(container, &inner))
}

fn single(operator: Operator, operand: &Operand) -> Result<&Literal> {
    match operand {
        Operand::Literal(literal) => Ok(literal),
        _ => Err(unsupported(operator, "expects a single literal")),
    }
}

fn string(operator: Operator, operand: &Operand) -> Result<&str> {
    match single(operator, operand)? {
        Literal::String(value) => Ok(value),
        other => Err(unsupported(
            operator,
            format!("expects a string, got a {}", other.type_name()),
        )),
    }
}

fn pair(operator: Operator, operand: &Operand) -> Result<(&Literal, &Literal)> {
    match operand {
        Operand::List(literals) if literals.len() == 2 => Ok((&literals[0], &literals[1])),
        _ => Err(unsupported(operator, "expects a list of two literals")),
    }
}

fn list(operator: Operator, operand: &Operand) -> Result<&[Literal]> {
    match operand {
        Operand::List(literals) => Ok(literals),
        _ => Err(unsupported(operator, "expects a list of literals")),
    }
}

fn none(operator: Operator, operand: &Operand) -> Result<()> {
    match operand {
        Operand::None => Ok(()),
        _ => Err(unsupported(operator, "takes no operand")),
    }
}

/// Text of a literal as stored; boolean fields take 0 and 1 for false and true.
fn text(path: &ResolvedPath, operator: Operator, literal: &Literal) -> Result<String> {
    Ok(match literal {
        Literal::Long(0) if path.boolean => "false".to_string(),
        Literal::Long(1) if path.boolean => "true".to_string(),
        Literal::Long(value) if path.boolean => {
            return Err(unsupported(
                operator,
                format!("boolean field '{}' compared with {value}", path.field),
            ));
        }
        Literal::String(value) => value.clone(),
        Literal::Long(value) => value.to_string(),
        Literal::Double(value) => helper::double_to_text(*value),
        Literal::Boolean(value) => value.to_string(),
        Literal::Date(value) => helper::calendar_to_text(value),
    })
}

fn literal_kind(path: &ResolvedPath, literal: &Literal) -> &'static str {
    match literal {
        Literal::Long(_) if path.boolean => "boolean",
        Literal::String(_) => "string",
        Literal::Long(_) => "long",
        Literal::Double(_) => "double",
        Literal::Boolean(_) => "boolean",
        Literal::Date(_) => "dateTime",
    }
}

/// Translates a LIKE pattern to a cts wildcard pattern.
///
/// `%` becomes `*` and `_` becomes `?`; a backslash escapes the next character. cts has no
/// escape for its own wildcard characters, so literal `*` and `?` are rejected.
fn like_pattern(operator: Operator, pattern: &str) -> Result<String> {
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('%' | '_' | '\\')) => translated.push(escaped),
                Some(other) => {
                    translated.push('\\');
                    translated.push(other);
                }
                None => translated.push('\\'),
            },
            '%' => translated.push('*'),
            '_' => translated.push('?'),
            '*' | '?' => {
                return Err(unsupported(
                    operator,
                    format!("pattern '{pattern}' contains a literal '{c}'"),
                ));
            }
            c => translated.push(c),
        }
    }
    Ok(translated)
}
