use crate::ast::Variable;
use crate::value::Value;

/// The frozen measurement snapshot a formula is evaluated against.
///
/// Holds exactly one slot per [`Variable`]; unset slots read as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    values: [Value; Variable::ALL.len()],
}

impl Context {
    /// Creates a context with every variable set to `None`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: std::array::from_fn(|_| Value::None),
        }
    }

    /// Sets a variable, returning the context for chaining.
    #[must_use]
    pub fn with(mut self, variable: Variable, value: impl Into<Value>) -> Self {
        self.set(variable, value);
        self
    }

    pub fn set(&mut self, variable: Variable, value: impl Into<Value>) {
        self.values[variable.index()] = value.into();
    }

    #[must_use]
    pub fn get(&self, variable: Variable) -> &Value {
        &self.values[variable.index()]
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        Variable::ALL
            .iter()
            .map(move |v| (v.name(), &self.values[v.index()]))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
