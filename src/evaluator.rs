//! Pure expression evaluation.
//!
//! [`evaluate`] maps an expression and an environment to a [`Value`]. It never
//! mutates the environment. Both operands of every binary operator are
//! evaluated left to right before the operator is applied; `and`/`or` do not
//! short-circuit.

use log::debug;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::expr::Expr;
use crate::value::Value;

/// Evaluates `expr` against `env`.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Value, RuntimeError> {
    let value = match expr {
        Expr::IntLiteral(n) => Value::Integer(*n),

        Expr::BoolLiteral(b) => Value::Boolean(*b),

        Expr::Var(name) => {
            let value = *env.get(name)?;
            debug!("Variable '{}' evaluated to: {}", name, value);
            value
        }

        Expr::Add(left, right) => {
            let (a, b) = integer_operands("+", left, right, env)?;
            Value::Integer(a.wrapping_add(b))
        }

        Expr::Sub(left, right) => {
            let (a, b) = integer_operands("-", left, right, env)?;
            Value::Integer(a.wrapping_sub(b))
        }

        Expr::And(left, right) => {
            let (a, b) = boolean_operands("and", left, right, env)?;
            Value::Boolean(a && b)
        }

        Expr::Or(left, right) => {
            let (a, b) = boolean_operands("or", left, right, env)?;
            Value::Boolean(a || b)
        }

        Expr::Not(operand) => {
            let b = expect_boolean(evaluate(operand, env)?, "operand of `!`")?;
            Value::Boolean(!b)
        }

        Expr::Eq(left, right) => {
            let (a, b) = (evaluate(left, env)?, evaluate(right, env)?);
            Value::Boolean(a == b)
        }

        Expr::NotEq(left, right) => {
            let (a, b) = (evaluate(left, env)?, evaluate(right, env)?);
            Value::Boolean(a != b)
        }
    };

    Ok(value)
}

/// Requires `value` to be a boolean, reporting `location` otherwise.
pub fn expect_boolean(value: Value, location: &str) -> Result<bool, RuntimeError> {
    match value {
        Value::Boolean(b) => Ok(b),

        other => Err(RuntimeError::type_mismatch(
            "boolean",
            other.type_name(),
            location,
        )),
    }
}

fn integer_operands(
    op: &str,
    left: &Expr,
    right: &Expr,
    env: &Environment,
) -> Result<(i64, i64), RuntimeError> {
    let left_val = evaluate(left, env)?;
    let right_val = evaluate(right, env)?;
    debug!("Operands of `{}`: {}, {}", op, left_val, right_val);

    match (left_val, right_val) {
        (Value::Integer(a), Value::Integer(b)) => Ok((a, b)),

        (Value::Integer(_), other) => Err(operand_mismatch("integer", other, "right", op)),

        (other, _) => Err(operand_mismatch("integer", other, "left", op)),
    }
}

fn boolean_operands(
    op: &str,
    left: &Expr,
    right: &Expr,
    env: &Environment,
) -> Result<(bool, bool), RuntimeError> {
    let left_val = evaluate(left, env)?;
    let right_val = evaluate(right, env)?;
    debug!("Operands of `{}`: {}, {}", op, left_val, right_val);

    match (left_val, right_val) {
        (Value::Boolean(a), Value::Boolean(b)) => Ok((a, b)),

        (Value::Boolean(_), other) => Err(operand_mismatch("boolean", other, "right", op)),

        (other, _) => Err(operand_mismatch("boolean", other, "left", op)),
    }
}

fn operand_mismatch(expected: &'static str, found: Value, side: &str, op: &str) -> RuntimeError {
    RuntimeError::type_mismatch(
        expected,
        found.type_name(),
        format!("{} operand of `{}`", side, op),
    )
}
