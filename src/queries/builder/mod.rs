//! Injection-safe query building.
//!
//! # Architecture
//!
//! The query building system has three layers:
//!
//! 1. **Predicates** - `PredicateBuilder` turns a `FilterSpec` into a `Clause`
//!    tree whose fragments carry the neutral `?` marker
//! 2. **Compilation** - `QueryCompiler` and `AggregationAssembler` render
//!    statements; a `BackendCompiler` supplies store-specific syntax
//! 3. **Execution** - the resulting `CompiledQuery` goes to a `DatabaseBackend`
//!
//! Identifiers in the text always come from an `EntitySchema`. Values only
//! ever travel in `CompiledQuery::arguments`.
//!
//! # Example
//!
//! ```ignore
//! let dialect = get_compiler(backend)?;
//! let predicate = PredicateBuilder::new(&POSTS, dialect.as_ref()).build(&spec)?;
//! let compiled = QueryCompiler::new(dialect.as_ref()).compile(
//!     POSTS.projection, POSTS.table, predicate.as_ref(), &ordering, pagination,
//! )?;
//! let result = backend.execute_query(&compiled, &ctx)?;
//! ```

pub mod aggregate;
pub mod compiler;
pub mod compilers;
pub mod helpers;
pub mod predicate;

use crate::db::Value;
use crate::error::CompileError;

use compilers::BackendCompiler;
use helpers::{count_markers, number_markers};

/// Neutral placeholder marker used in clause fragments.
pub const PLACEHOLDER: char = '?';

/// Boolean connective of a composite clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            BoolOp::And => "AND",
            BoolOp::Or => "OR",
        }
    }
}

/// A predicate tree.
///
/// Predicate leaves hold one fragment with exactly one marker and the value
/// bound to it. Fixed leaves are schema constants with no marker at all.
/// Composites combine children with a single connective.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Predicate { fragment: String, argument: Value },
    Fixed { fragment: &'static str },
    Composite { operator: BoolOp, children: Vec<Clause> },
}

impl Clause {
    pub fn predicate(fragment: impl Into<String>, argument: impl Into<Value>) -> Self {
        Clause::Predicate {
            fragment: fragment.into(),
            argument: argument.into(),
        }
    }

    /// A condition taken verbatim from an `EntitySchema`.
    pub fn fixed(fragment: &'static str) -> Self {
        Clause::Fixed { fragment }
    }

    pub fn and(children: Vec<Clause>) -> Self {
        Clause::Composite {
            operator: BoolOp::And,
            children,
        }
    }

    pub fn or(children: Vec<Clause>) -> Self {
        Clause::Composite {
            operator: BoolOp::Or,
            children,
        }
    }

    /// Bound values in traversal order.
    pub fn arguments(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.collect_arguments(&mut out);
        out
    }

    fn collect_arguments<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Clause::Predicate { argument, .. } => out.push(argument),
            Clause::Fixed { .. } => {}
            Clause::Composite { children, .. } => {
                for child in children {
                    child.collect_arguments(out);
                }
            }
        }
    }
}

/// A statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub text: String,
    pub arguments: Vec<Value>,
}

impl CompiledQuery {
    /// Get the number of bound arguments in this query.
    pub fn param_count(&self) -> usize {
        self.arguments.len()
    }
}

/// Statement text under construction, with neutral markers and the
/// arguments collected so far.
#[derive(Debug, Default)]
pub struct StatementBuilder {
    text: String,
    arguments: Vec<Value>,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append trusted SQL text (identifiers from a schema, keywords).
    pub fn push_sql(&mut self, sql: &str) -> &mut Self {
        self.text.push_str(sql);
        self
    }

    /// Append one marker bound to `value`.
    pub fn bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.text.push(PLACEHOLDER);
        self.arguments.push(value.into());
        self
    }

    /// Append a rendered clause tree and its arguments.
    pub fn push_clause(&mut self, clause: &Clause) -> Result<&mut Self, CompileError> {
        self.render(clause, false)?;
        Ok(self)
    }

    fn render(&mut self, clause: &Clause, nested: bool) -> Result<(), CompileError> {
        match clause {
            Clause::Predicate { fragment, argument } => {
                let markers = count_markers(fragment);
                if markers != 1 {
                    return Err(CompileError::PlaceholderMismatch {
                        markers,
                        arguments: 1,
                    });
                }
                self.text.push_str(fragment);
                self.arguments.push(argument.clone());
            }
            Clause::Fixed { fragment } => {
                let markers = count_markers(fragment);
                if markers != 0 {
                    return Err(CompileError::PlaceholderMismatch {
                        markers,
                        arguments: 0,
                    });
                }
                self.text.push_str(fragment);
            }
            Clause::Composite { children, .. } if children.is_empty() => {
                return Err(CompileError::EmptyComposite);
            }
            Clause::Composite { children, .. } if children.len() == 1 => {
                self.render(&children[0], nested)?;
            }
            Clause::Composite { operator, children } => {
                if nested {
                    self.text.push('(');
                }
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        self.text.push(' ');
                        self.text.push_str(operator.keyword());
                        self.text.push(' ');
                    }
                    self.render(child, true)?;
                }
                if nested {
                    self.text.push(')');
                }
            }
        }
        Ok(())
    }

    /// Check markers against arguments and apply the backend's placeholders.
    pub fn finish(self, dialect: &dyn BackendCompiler) -> Result<CompiledQuery, CompileError> {
        let markers = count_markers(&self.text);
        if markers != self.arguments.len() {
            return Err(CompileError::PlaceholderMismatch {
                markers,
                arguments: self.arguments.len(),
            });
        }

        Ok(CompiledQuery {
            text: number_markers(&self.text, |i| dialect.parameter_placeholder(i)),
            arguments: self.arguments,
        })
    }
}
