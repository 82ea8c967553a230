use serde::{Deserialize, Serialize};

/// Expression node. Every operator owns its operands exclusively, so a tree
/// can never contain cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    // Integer constant
    IntLiteral(i64),

    // Boolean constant
    BoolLiteral(bool),

    // Read of a bound variable
    Var(String),

    // Integer arithmetic
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),

    // Boolean logic, both operands always evaluated
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),

    // Structural comparison across any two values
    Eq(Box<Expr>, Box<Expr>),
    NotEq(Box<Expr>, Box<Expr>),
}

#[allow(clippy::should_implement_trait)]
impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::IntLiteral(value)
    }

    pub fn boolean(value: bool) -> Self {
        Expr::BoolLiteral(value)
    }

    pub fn var<S: Into<String>>(name: S) -> Self {
        Expr::Var(name.into())
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Expr::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::Eq(Box::new(lhs), Box::new(rhs))
    }

    pub fn not_eq(lhs: Expr, rhs: Expr) -> Self {
        Expr::NotEq(Box::new(lhs), Box::new(rhs))
    }
}
