use serde::{Deserialize, Serialize};

use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stmt {
    Assign(String, Expr),

    Return(Expr),

    If(Expr, Vec<Stmt>), // condition, body

    While(Expr, Vec<Stmt>), // condition, body
}

/// A whole program is just its top-level statement list.
pub type Program = Vec<Stmt>;

impl Stmt {
    pub fn assign<S: Into<String>>(name: S, expr: Expr) -> Self {
        Stmt::Assign(name.into(), expr)
    }

    pub fn ret(expr: Expr) -> Self {
        Stmt::Return(expr)
    }

    pub fn if_then(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::If(condition, body)
    }

    pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While(condition, body)
    }
}
