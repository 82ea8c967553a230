use crate::expr::Expr;
use crate::stmt::Stmt;

/// Renders Imp trees in prefix (S‑expression) form, e.g. `(+ x 1)`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn expr(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::IntLiteral(n) => n.to_string(),

            Expr::BoolLiteral(b) => b.to_string(),

            Expr::Var(name) => name.clone(),

            // ── operators ───────────────────────────────────────────────
            Expr::Add(left, right) => Self::binary("+", left, right),

            Expr::Sub(left, right) => Self::binary("-", left, right),

            Expr::And(left, right) => Self::binary("and", left, right),

            Expr::Or(left, right) => Self::binary("or", left, right),

            Expr::Eq(left, right) => Self::binary("==", left, right),

            Expr::NotEq(left, right) => Self::binary("!=", left, right),

            Expr::Not(operand) => format!("(! {})", Self::expr(operand)),
        }
    }

    pub fn stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Assign(name, value) => format!("(= {} {})", name, Self::expr(value)),

            Stmt::Return(value) => format!("(return {})", Self::expr(value)),

            Stmt::If(condition, body) => Self::block("if", condition, body),

            Stmt::While(condition, body) => Self::block("while", condition, body),
        }
    }

    /// One top-level statement per line.
    pub fn program(program: &[Stmt]) -> String {
        program
            .iter()
            .map(Self::stmt)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn binary(op: &str, left: &Expr, right: &Expr) -> String {
        format!("({} {} {})", op, Self::expr(left), Self::expr(right))
    }

    fn block(keyword: &str, condition: &Expr, body: &[Stmt]) -> String {
        let mut s = format!("({} {}", keyword, Self::expr(condition));
        for stmt in body {
            s.push(' ');
            s.push_str(&Self::stmt(stmt));
        }
        s.push(')');
        s
    }
}
