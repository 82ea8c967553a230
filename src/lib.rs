pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

pub use environment::Environment;
pub use error::{ImpError, Result, RuntimeError};
pub use evaluator::evaluate;
pub use expr::Expr;
pub use interpreter::{run_program, Flow, Interpreter};
pub use stmt::{Program, Stmt};
pub use value::Value;
