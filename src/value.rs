/// Runtime value produced by evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// Name of the value's type, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",

            Value::Boolean(_) => "boolean",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }

            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}
