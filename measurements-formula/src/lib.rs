//! Sandboxed formula language for product measurement codes.
//!
//! A formula is a single expression over the measurement fields of a product
//! template, e.g.
//!
//! ```text
//! str(length) + length_uom.symbol + ' x ' + str(diameter) + '∅'
//! ```
//!
//! The language supports literals, arithmetic, string concatenation,
//! comparisons and membership, `and`/`or`/`not`, the conditional
//! `a if cond else b`, attribute reads on unit objects and a fixed set of
//! builtins. It has no loops, definitions, assignments or imports: the
//! grammar has no productions for them. Every identifier is resolved when the
//! formula is compiled, so a formula naming anything outside the measurement
//! [`Variable`]s is rejected before it runs.

mod ast;
mod context;
mod error;
mod eval;
mod formula;
mod lexer;
mod parser;
mod value;

pub use ast::{Attribute, BinaryOp, Builtin, CmpOp, Expr, UnaryOp, Variable};
pub use context::Context;
pub use error::{EvaluationError, Result};
pub use eval::MAX_COLLECTION_LEN;
pub use formula::{Formula, DEFAULT_FORMULA};
pub use parser::MAX_DEPTH;
pub use value::Value;

/// Compiles `formula` and evaluates it against `context`, requiring a
/// string result.
pub fn evaluate_code(formula: &str, context: &Context) -> Result<String> {
    Formula::compile(formula)?.evaluate_code(context)
}
