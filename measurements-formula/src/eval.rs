//! Tree-walking evaluator.
//!
//! Evaluation is total over the AST: there are no loops or user-defined
//! functions, so cost is bounded by the size of the formula plus the
//! [`MAX_COLLECTION_LEN`] cap on the total size of every string and list
//! built, nested lists and `str()` output included.

use crate::ast::{Attribute, BinaryOp, Builtin, CmpOp, Expr, UnaryOp};
use crate::context::Context;
use crate::error::{EvaluationError, Result};
use crate::value::Value;
use std::cmp::Ordering;

/// Upper bound on the size of strings and lists built during evaluation.
///
/// A string counts its bytes; a list counts its elements plus the size of
/// each element.
pub const MAX_COLLECTION_LEN: usize = 1 << 16;

pub(crate) fn eval(expr: &Expr, ctx: &Context) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Variable(variable) => Ok(ctx.get(*variable).clone()),
        Expr::Attribute { object, attribute } => {
            let object = eval(object, ctx)?;
            read_attribute(&object, *attribute)
        }
        Expr::Call { function, args } => {
            let args = args
                .iter()
                .map(|arg| eval(arg, ctx))
                .collect::<Result<Vec<_>>>()?;
            call(*function, args)
        }
        Expr::Unary { op, operand } => {
            let operand = eval(operand, ctx)?;
            unary(*op, operand)
        }
        Expr::Binary { op, left, right } => {
            let left = eval(left, ctx)?;
            let right = eval(right, ctx)?;
            binary(*op, left, right)
        }
        Expr::Compare { first, rest } => {
            let mut left = eval(first, ctx)?;
            for (op, right) in rest {
                let right = eval(right, ctx)?;
                if !compare(*op, &left, &right)? {
                    return Ok(Value::Bool(false));
                }
                left = right;
            }
            Ok(Value::Bool(true))
        }
        Expr::And(left, right) => {
            let left = eval(left, ctx)?;
            if left.is_truthy() {
                eval(right, ctx)
            } else {
                Ok(left)
            }
        }
        Expr::Or(left, right) => {
            let left = eval(left, ctx)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                eval(right, ctx)
            }
        }
        Expr::Conditional {
            condition,
            then,
            otherwise,
        } => {
            if eval(condition, ctx)?.is_truthy() {
                eval(then, ctx)
            } else {
                eval(otherwise, ctx)
            }
        }
        Expr::Sequence(items) => {
            let list = Value::List(
                items
                    .iter()
                    .map(|item| eval(item, ctx))
                    .collect::<Result<Vec<_>>>()?,
            );
            check_len(list.size())?;
            Ok(list)
        }
    }
}

fn read_attribute(object: &Value, attribute: Attribute) -> Result<Value> {
    let Value::Uom(uom) = object else {
        return Err(EvaluationError::InvalidAttribute {
            type_name: object.type_name(),
            attribute: attribute.name(),
        });
    };
    Ok(match attribute {
        Attribute::Id => Value::Str(uom.id.clone()),
        Attribute::Name => Value::Str(uom.name.clone()),
        Attribute::Symbol => Value::Str(uom.symbol.clone()),
        Attribute::Factor => Value::Float(uom.factor),
        Attribute::Rounding => Value::Float(uom.rounding),
        Attribute::Digits => Value::Int(i64::from(uom.digits)),
        Attribute::Category => Value::Str(uom.category.as_str().to_string()),
    })
}

fn unary(op: UnaryOp, operand: Value) -> Result<Value> {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(i)) => i.checked_neg().map(Value::Int).ok_or(EvaluationError::Overflow),
        (UnaryOp::Neg, Value::Bool(b)) => Ok(Value::Int(-i64::from(b))),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, Value::Bool(b)) => Ok(Value::Int(i64::from(b))),
        (UnaryOp::Pos, v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        (op, v) => Err(EvaluationError::UnsupportedOperand {
            op: if op == UnaryOp::Neg { "-" } else { "+" },
            operand: v.type_name(),
        }),
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::UnsupportedOperands {
        op: op.symbol(),
        left: left.type_name(),
        right: right.type_name(),
    }
}

fn check_len(len: usize) -> Result<()> {
    if len > MAX_COLLECTION_LEN {
        return Err(EvaluationError::ResultTooLarge {
            limit: MAX_COLLECTION_LEN,
        });
    }
    Ok(())
}

fn repeat_count(count: i64, unit_len: usize) -> Result<usize> {
    let count = usize::try_from(count.max(0)).map_err(|_| EvaluationError::Overflow)?;
    check_len(unit_len.saturating_mul(count))?;
    Ok(count)
}

fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    match (op, &left, &right) {
        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => {
            check_len(a.len() + b.len())?;
            Ok(Value::Str(format!("{a}{b}")))
        }
        (BinaryOp::Add, Value::List(a), Value::List(b)) => {
            check_len(left.size().saturating_add(right.size()))?;
            Ok(Value::List(a.iter().chain(b).cloned().collect()))
        }
        (BinaryOp::Mul, Value::Str(s), n) | (BinaryOp::Mul, n, Value::Str(s))
            if n.as_i64().is_some() =>
        {
            let count = repeat_count(n.as_i64().unwrap_or(0), s.len())?;
            Ok(Value::Str(s.repeat(count)))
        }
        (BinaryOp::Mul, Value::List(items), n) | (BinaryOp::Mul, n, Value::List(items))
            if n.as_i64().is_some() =>
        {
            let unit = items
                .iter()
                .fold(items.len(), |total, item| total.saturating_add(item.size()));
            let count = repeat_count(n.as_i64().unwrap_or(0), unit)?;
            Ok(Value::List(
                std::iter::repeat_n(items.iter().cloned(), count)
                    .flatten()
                    .collect(),
            ))
        }
        _ => {
            if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
                return int_arithmetic(op, a, b);
            }
            match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => float_arithmetic(op, a, b),
                _ => Err(unsupported(op, &left, &right)),
            }
        }
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<Value> {
    let checked = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => return float_arithmetic(op, a as f64, b as f64),
        BinaryOp::FloorDiv | BinaryOp::Mod => {
            if b == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            let (q, r) = (a.checked_div(b), a.checked_rem(b));
            let (Some(mut q), Some(mut r)) = (q, r) else {
                return Err(EvaluationError::Overflow);
            };
            // Floor semantics: the remainder takes the divisor's sign.
            if r != 0 && ((r < 0) != (b < 0)) {
                q -= 1;
                r += b;
            }
            Some(if op == BinaryOp::FloorDiv { q } else { r })
        }
        BinaryOp::Pow => {
            if b < 0 {
                return float_arithmetic(op, a as f64, b as f64);
            }
            u32::try_from(b).ok().and_then(|e| a.checked_pow(e))
        }
    };
    checked.map(Value::Int).ok_or(EvaluationError::Overflow)
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<Value> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            a / b
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            (a / b).floor()
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            a - b * (a / b).floor()
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            a.powf(b)
        }
    };
    Ok(Value::Float(result))
}

/// Equality across types: numbers compare by value, units by id.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Uom(a), Value::Uom(b)) => a.id == b.id,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn ordering(op: CmpOp, left: &Value, right: &Value) -> Result<Option<Ordering>> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(a.partial_cmp(&b)),
            _ => Err(EvaluationError::UnsupportedOperands {
                op: op.symbol(),
                left: left.type_name(),
                right: right.type_name(),
            }),
        },
    }
}

fn contains(op: CmpOp, needle: &Value, haystack: &Value) -> Result<bool> {
    match (needle, haystack) {
        (Value::Str(n), Value::Str(h)) => Ok(h.contains(n.as_str())),
        (_, Value::List(items)) => Ok(items.iter().any(|item| values_equal(needle, item))),
        _ => Err(EvaluationError::UnsupportedOperands {
            op: op.symbol(),
            left: needle.type_name(),
            right: haystack.type_name(),
        }),
    }
}

fn identical(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::None, Value::None) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Uom(a), Value::Uom(b)) => a.id == b.id,
        _ => false,
    }
}

fn compare(op: CmpOp, left: &Value, right: &Value) -> Result<bool> {
    Ok(match op {
        CmpOp::Eq => values_equal(left, right),
        CmpOp::NotEq => !values_equal(left, right),
        CmpOp::Lt => ordering(op, left, right)? == Some(Ordering::Less),
        CmpOp::Le => matches!(
            ordering(op, left, right)?,
            Some(Ordering::Less | Ordering::Equal)
        ),
        CmpOp::Gt => ordering(op, left, right)? == Some(Ordering::Greater),
        CmpOp::Ge => matches!(
            ordering(op, left, right)?,
            Some(Ordering::Greater | Ordering::Equal)
        ),
        CmpOp::In => contains(op, left, right)?,
        CmpOp::NotIn => !contains(op, left, right)?,
        CmpOp::Is => identical(left, right),
        CmpOp::IsNot => !identical(left, right),
    })
}

fn arity(function: Builtin, expected: &'static str, found: usize) -> EvaluationError {
    EvaluationError::ArgumentCount {
        function: function.name(),
        expected,
        found,
    }
}

fn invalid(function: Builtin, message: impl Into<String>) -> EvaluationError {
    EvaluationError::InvalidArgument {
        function: function.name(),
        message: message.into(),
    }
}

fn call(function: Builtin, args: Vec<Value>) -> Result<Value> {
    match function {
        Builtin::Str => match args.as_slice() {
            [] => Ok(Value::Str(String::new())),
            [v] => {
                let rendered = v.to_string();
                check_len(rendered.len())?;
                Ok(Value::Str(rendered))
            }
            _ => Err(arity(function, "0 or 1", args.len())),
        },
        Builtin::Bool => match args.as_slice() {
            [] => Ok(Value::Bool(false)),
            [v] => Ok(Value::Bool(v.is_truthy())),
            _ => Err(arity(function, "0 or 1", args.len())),
        },
        Builtin::Int => match args.as_slice() {
            [v] => to_int(function, v),
            _ => Err(arity(function, "1", args.len())),
        },
        Builtin::Float => match args.as_slice() {
            [v] => to_float(function, v),
            _ => Err(arity(function, "1", args.len())),
        },
        Builtin::Abs => match args.as_slice() {
            [Value::Int(i)] => i.checked_abs().map(Value::Int).ok_or(EvaluationError::Overflow),
            [Value::Bool(b)] => Ok(Value::Int(i64::from(*b))),
            [Value::Float(f)] => Ok(Value::Float(f.abs())),
            [v] => Err(invalid(function, format!("bad operand type '{}'", v.type_name()))),
            _ => Err(arity(function, "1", args.len())),
        },
        Builtin::Len => match args.as_slice() {
            [Value::Str(s)] => Ok(Value::Int(s.chars().count() as i64)),
            [Value::List(items)] => Ok(Value::Int(items.len() as i64)),
            [v] => Err(invalid(function, format!("object of type '{}' has no len()", v.type_name()))),
            _ => Err(arity(function, "1", args.len())),
        },
        Builtin::Round => match args.as_slice() {
            [v] => round(function, v, None),
            [v, digits] => {
                let Some(digits) = digits.as_i64() else {
                    return Err(invalid(function, "ndigits must be an integer"));
                };
                round(function, v, Some(digits))
            }
            _ => Err(arity(function, "1 or 2", args.len())),
        },
        Builtin::Min | Builtin::Max => {
            let items = match args.as_slice() {
                [] => return Err(arity(function, "at least 1", 0)),
                [Value::List(items)] => items.clone(),
                _ => args,
            };
            extreme(function, items)
        }
    }
}

fn to_int(function: Builtin, v: &Value) -> Result<Value> {
    match v {
        Value::Int(_) => Ok(v.clone()),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        Value::Float(f) => {
            let truncated = f.trunc();
            if !truncated.is_finite() || truncated.abs() >= 9.2e18 {
                return Err(invalid(function, format!("cannot convert {f} to integer")));
            }
            Ok(Value::Int(truncated as i64))
        }
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(function, format!("invalid literal '{s}'"))),
        other => Err(invalid(function, format!("bad operand type '{}'", other.type_name()))),
    }
}

fn to_float(function: Builtin, v: &Value) -> Result<Value> {
    match v {
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(function, format!("could not convert string '{s}'"))),
        other => other
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| invalid(function, format!("bad operand type '{}'", other.type_name()))),
    }
}

/// Rounds half to even, like the host's `round`.
fn round(function: Builtin, v: &Value, digits: Option<i64>) -> Result<Value> {
    match (v, digits) {
        (Value::Int(_) | Value::Bool(_), _) => Ok(Value::Int(v.as_i64().unwrap_or(0))),
        (Value::Float(f), None) => {
            let rounded = f.round_ties_even();
            if !rounded.is_finite() || rounded.abs() >= 9.2e18 {
                return Err(invalid(function, format!("cannot round {f} to integer")));
            }
            Ok(Value::Int(rounded as i64))
        }
        (Value::Float(f), Some(digits)) => {
            let digits = digits.clamp(-308, 308) as i32;
            let scale = 10f64.powi(digits);
            let scaled = f * scale;
            if !scaled.is_finite() || scale == 0.0 {
                return Ok(Value::Float(*f));
            }
            Ok(Value::Float(scaled.round_ties_even() / scale))
        }
        (other, _) => Err(invalid(function, format!("bad operand type '{}'", other.type_name()))),
    }
}

fn extreme(function: Builtin, items: Vec<Value>) -> Result<Value> {
    let wanted = if function == Builtin::Min {
        Ordering::Less
    } else {
        Ordering::Greater
    };
    let mut iter = items.into_iter();
    let Some(mut best) = iter.next() else {
        return Err(invalid(function, "arg is an empty sequence"));
    };
    for item in iter {
        if ordering(CmpOp::Lt, &item, &best)? == Some(wanted) {
            best = item;
        }
    }
    Ok(best)
}
