use log::{debug, info};

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::evaluator::{evaluate, expect_boolean};
use crate::stmt::Stmt;
use crate::value::Value;

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

/// Outcome of executing a statement or a statement sequence.
///
/// `Returned` absorbs every remaining statement in all enclosing sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Running(Environment),
    Returned(Environment, Value),
}

impl Flow {
    pub fn env(&self) -> &Environment {
        match self {
            Flow::Running(env) | Flow::Returned(env, _) => env,
        }
    }

    pub fn into_parts(self) -> (Environment, Option<Value>) {
        match self {
            Flow::Running(env) => (env, None),
            Flow::Returned(env, value) => (env, Some(value)),
        }
    }
}

/// Statement executor.
///
/// The interpreter itself holds no variables; the [`Environment`] is moved
/// through every statement and handed back inside the resulting [`Flow`].
#[derive(Debug, Default)]
pub struct Interpreter {
    max_steps: Option<u64>,
    steps: u64,
}

impl Interpreter {
    /// Creates an interpreter without a step budget.
    pub fn new() -> Self {
        info!("Initializing Interpreter");

        Self::default()
    }

    /// Creates an interpreter that aborts once more than `max_steps` steps run.
    ///
    /// Every executed statement is one step, and so is every re-test of a
    /// `while` condition after a completed pass through its body.
    pub fn with_step_limit(max_steps: u64) -> Self {
        info!("Initializing Interpreter with step limit {}", max_steps);

        Self {
            max_steps: Some(max_steps),
            steps: 0,
        }
    }

    /// Steps taken since the last call to [`Interpreter::run`].
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Runs a whole program from an empty environment and returns the value
    /// of the first `return` reached, if any.
    pub fn run(&mut self, program: &[Stmt]) -> IResult<Option<Value>> {
        info!("Running program of {} statements", program.len());
        self.steps = 0;

        let (_, value) = self
            .execute_statements(program, Environment::new())?
            .into_parts();

        match &value {
            Some(v) => info!("Program returned {} after {} steps", v, self.steps),
            None => info!("Program finished without a return after {} steps", self.steps),
        }

        Ok(value)
    }

    /// Executes `statements` in order, stopping at the first `return`.
    pub fn execute_statements(&mut self, statements: &[Stmt], env: Environment) -> IResult<Flow> {
        debug!("Executing {} statements", statements.len());

        let mut env = env;

        for stmt in statements {
            match self.execute(stmt, env)? {
                Flow::Running(next) => env = next,

                returned @ Flow::Returned(..) => return Ok(returned),
            }
        }

        Ok(Flow::Running(env))
    }

    /// Executes a single statement.
    pub fn execute(&mut self, stmt: &Stmt, env: Environment) -> IResult<Flow> {
        self.tick()?;

        match stmt {
            Stmt::Assign(name, expr) => {
                let value = evaluate(expr, &env)?;
                debug!("Assigning {} to '{}'", value, name);
                Ok(Flow::Running(env.bind(name.as_str(), value)))
            }

            Stmt::Return(expr) => {
                let value = evaluate(expr, &env)?;
                debug!("Returning value: {}", value);
                Ok(Flow::Returned(env, value))
            }

            Stmt::If(condition, body) => {
                let taken = expect_boolean(evaluate(condition, &env)?, "condition of `if`")?;
                debug!("If condition is {}", taken);

                if taken {
                    self.execute_statements(body, env)
                } else {
                    Ok(Flow::Running(env))
                }
            }

            // Iterates in place instead of recursing once per pass, so a long
            // loop costs no stack.
            Stmt::While(condition, body) => {
                let mut env = env;

                loop {
                    let again = expect_boolean(evaluate(condition, &env)?, "condition of `while`")?;

                    if !again {
                        debug!("Exited while loop");
                        return Ok(Flow::Running(env));
                    }

                    match self.execute_statements(body, env)? {
                        Flow::Running(next) => env = next,

                        returned @ Flow::Returned(..) => return Ok(returned),
                    }

                    self.tick()?;
                }
            }
        }
    }

    fn tick(&mut self) -> IResult<()> {
        self.steps += 1;

        match self.max_steps {
            Some(limit) if self.steps > limit => {
                debug!("Step budget of {} exhausted", limit);
                Err(RuntimeError::StepLimitExceeded(limit))
            }

            _ => Ok(()),
        }
    }
}

/// Runs `program` from an empty environment with no step budget.
pub fn run_program(program: &[Stmt]) -> IResult<Option<Value>> {
    Interpreter::new().run(program)
}
