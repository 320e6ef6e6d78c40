//! Statement assembly and execution
//!
//! - `criteria`: the fluent [`QueryCriteria`] predicate builder
//! - `statement`: pure SQL rendering into [`RenderedStatement`]
//! - `executor`: prepare, bind and run rendered statements
//! - `parse`: text forms of column maps and criteria clauses

mod criteria;
mod executor;
pub mod parse;
pub mod statement;

pub use criteria::{Combinator, PredicateOperator, QueryCriteria};
pub use executor::{Executor, RowErrorPolicy};
pub use statement::RenderedStatement;
