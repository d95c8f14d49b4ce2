use crate::ast::Expr;
use crate::context::Context;
use crate::error::{EvaluationError, Result};
use crate::eval::eval;
use crate::parser::parse;
use crate::value::Value;
use tracing::debug;

/// The measurement-code formula used when none is configured.
///
/// Services get no code; parallelepipeds render `L x H x W` and cylinders
/// `L x D∅`, each value followed by its unit symbol and left blank when unset.
pub const DEFAULT_FORMULA: &str = "'' if type == 'service' else \
    str(length if length else '') + \
    str(length_uom.symbol if length_uom else '') + ' x ' + \
    str(height if height else '') + \
    str(height_uom.symbol if height_uom else '') + ' x ' + \
    str(width if width else '') + \
    str(width_uom.symbol if width_uom else '') \
    if shape == 'parallelepiped' else \
    str(length if length else '') + \
    str(length_uom.symbol if length_uom else '') + ' x ' + \
    str(diameter if diameter else '') + \
    str(diameter_uom.symbol if diameter_uom else '') + '∅' \
    if shape == 'cylinder' else ''";

/// A parsed formula whose names have all been resolved.
///
/// Compiling is the only step that can reject the formula's structure;
/// evaluation errors depend on the values in the [`Context`].
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parses `source` and resolves every name against the measurement
    /// variables, attributes and builtins.
    pub fn compile(source: &str) -> Result<Self> {
        let expr = parse(source)?;
        debug!(formula = %source, "compiled measurement code formula");
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates the formula to any value.
    pub fn evaluate(&self, context: &Context) -> Result<Value> {
        eval(&self.expr, context)
    }

    /// Evaluates the formula and requires a string result.
    pub fn evaluate_code(&self, context: &Context) -> Result<String> {
        match self.evaluate(context)? {
            Value::Str(code) => Ok(code),
            other => Err(EvaluationError::NotAString(other.type_name())),
        }
    }
}
