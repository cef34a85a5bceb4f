use crate::lexer::is_identifier;
use crate::util::{BINARY_FUNCTIONS, CONSTANTS, FUNCTIONS};
use log::warn;
use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

/// A function of a fixed number of `f64` arguments.
///
/// The evaluator always calls it with exactly `arity` arguments, in source
/// order.
#[derive(Clone)]
pub struct Function {
    arity: usize,
    func: Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>,
}

impl Function {
    /// Wrap `func` as a function of `arity` arguments
    pub fn new<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            arity,
            func: Arc::new(func),
        }
    }

    /// Number of arguments the function takes
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call the function, or get `None` if `args` does not hold exactly
    /// `arity` values.
    pub fn call(&self, args: &[f64]) -> Option<f64> {
        if args.len() == self.arity {
            Some((self.func)(args))
        } else {
            None
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Function")
            .field("arity", &self.arity)
            .finish()
    }
}

/// What a name can be bound to
#[derive(Debug, Clone)]
pub enum Binding {
    /// An integer constant, evaluated as `f64`
    Int(i64),
    /// A floating point constant
    Float(f64),
    /// A function, called with `name(arg, ...)`
    Function(Function),
}

impl Binding {
    /// A function taking `arity` arguments
    pub fn function<F>(arity: usize, func: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::Function(Function::new(arity, func))
    }

    /// A single argument function
    ///
    /// ```
    /// use calc::{Binding, Bindings};
    ///
    /// let bindings = Bindings::new().with("inc", Binding::unary(|x| x + 1.0));
    /// assert_eq!(calc::eval_float("inc(inc(1))", &bindings), Ok(3.0));
    /// ```
    pub fn unary<F>(func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::function(1, move |args| func(args[0]))
    }

    /// A two argument function
    pub fn binary<F>(func: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::function(2, move |args| func(args[0], args[1]))
    }

    /// The value of a constant binding, `None` for functions
    pub fn value(&self) -> Option<f64> {
        match *self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(value) => Some(value as f64),
            Self::Float(value) => Some(value),
            Self::Function(_) => None,
        }
    }

    /// The function of a function binding, `None` for constants
    pub fn as_function(&self) -> Option<&Function> {
        match *self {
            Self::Function(ref function) => Some(function),
            Self::Int(_) | Self::Float(_) => None,
        }
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Binding {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Binding {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Function> for Binding {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

/// The variables and functions an expression can refer to.
///
/// Expressions only ever read from the bindings, so a single instance can be
/// shared between threads and reused across evaluations.
///
/// ```
/// use calc::{Binding, Bindings};
///
/// let bindings = Bindings::new()
///     .with("life", 42)
///     .with("π", 3.14)
///     .with("sqdist", Binding::binary(|x, y| x * x + y * y));
/// assert_eq!(calc::eval_float("life/4", &bindings), Ok(10.5));
/// assert_eq!(calc::eval_float("sqdist(3, 4)", &bindings), Ok(25.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    map: HashMap<String, Binding>,
}

impl Bindings {
    /// Create empty bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings holding the usual `f64` functions (`sqrt`, `sin`, `ln`, ...,
    /// `pow`, `atan2`, `hypot`, `min`, `max`) and the constants `pi`, `tau`
    /// and `e`.
    ///
    /// ```
    /// let math = calc::Bindings::math();
    /// assert_eq!(calc::eval_float("max(sqrt(16), 3)", &math), Ok(4.0));
    /// ```
    pub fn math() -> Self {
        let mut bindings = Self::new();
        for (&name, &func) in FUNCTIONS.iter() {
            bindings.insert(name, Binding::unary(func));
        }
        for (&name, &func) in BINARY_FUNCTIONS.iter() {
            bindings.insert(name, Binding::binary(func));
        }
        for &(name, value) in &CONSTANTS {
            bindings.insert(name, value);
        }
        bindings
    }

    /// Bind `name`, returning the binding it replaces if any.
    ///
    /// Names the lexer can not produce are accepted but can never be
    /// referred to from an expression.
    pub fn insert<N, B>(&mut self, name: N, binding: B) -> Option<Binding>
    where
        N: Into<String>,
        B: Into<Binding>,
    {
        let name = name.into();
        if !is_identifier(&name) {
            warn!("binding '{}' is not a valid identifier and can not be referenced", name);
        }
        self.map.insert(name, binding.into())
    }

    /// Builder version of [`insert`](#method.insert)
    #[must_use]
    pub fn with<N, B>(mut self, name: N, binding: B) -> Self
    where
        N: Into<String>,
        B: Into<Binding>,
    {
        self.insert(name, binding);
        self
    }

    /// The binding for `name`
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    /// Check if `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over names and their bindings, in no particular order
    pub fn iter(&self) -> hash_map::Iter<'_, String, Binding> {
        self.map.iter()
    }
}

impl<N, B> FromIterator<(N, B)> for Bindings
where
    N: Into<String>,
    B: Into<Binding>,
{
    fn from_iter<I: IntoIterator<Item = (N, B)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        bindings.extend(iter);
        bindings
    }
}

impl<N, B> Extend<(N, B)> for Bindings
where
    N: Into<String>,
    B: Into<Binding>,
{
    fn extend<I: IntoIterator<Item = (N, B)>>(&mut self, iter: I) {
        for (name, binding) in iter {
            self.insert(name, binding);
        }
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Binding);
    type IntoIter = hash_map::Iter<'a, String, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        let bindings = Bindings::new()
            .with("life", 42)
            .with("big", 1_i64 << 40)
            .with("π", 3.14)
            .with("inc", Binding::unary(|x| x + 1.0));

        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings.get("life").and_then(Binding::value), Some(42.0));
        assert_eq!(
            bindings.get("big").and_then(Binding::value),
            Some(1_099_511_627_776.0)
        );
        assert_eq!(bindings.get("π").and_then(Binding::value), Some(3.14));
        assert_eq!(bindings.get("inc").and_then(Binding::value), None);
        assert!(bindings.get("nope").is_none());
    }

    #[test]
    fn functions() {
        let sqdist = Binding::binary(|x, y| x * x + y * y);
        let function = sqdist.as_function().unwrap();
        assert_eq!(function.arity(), 2);
        assert_eq!(function.call(&[3.0, 4.0]), Some(25.0));
        assert_eq!(function.call(&[3.0]), None);
        assert_eq!(function.call(&[3.0, 4.0, 5.0]), None);

        let sum = Binding::function(3, |args| args.iter().sum());
        assert_eq!(sum.as_function().map(Function::arity), Some(3));
        assert_eq!(sum.as_function().unwrap().call(&[1.0, 2.0, 3.0]), Some(6.0));

        let inc = Binding::unary(|x| x + 1.0);
        assert_eq!(inc.as_function().unwrap().call(&[]), None);
        assert!(Binding::Int(1).as_function().is_none());
    }

    #[test]
    fn insert_replaces() {
        let mut bindings = Bindings::new();
        assert!(bindings.insert("x", 1).is_none());
        let old = bindings.insert("x", 2.5).unwrap();
        assert_eq!(old.value(), Some(1.0));
        assert_eq!(bindings.get("x").and_then(Binding::value), Some(2.5));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn collect() {
        let bindings: Bindings = vec![("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert!(bindings.contains("a"));
        assert!(bindings.contains("b"));
        assert_eq!((&bindings).into_iter().count(), 2);
    }

    #[test]
    fn math() {
        let math = Bindings::math();
        assert!(!math.is_empty());
        for (name, binding) in &math {
            assert!(is_identifier(name), "{} can not be referenced", name);
            if let Some(function) = binding.as_function() {
                assert!(function.arity() == 1 || function.arity() == 2);
            }
        }
        let pow = math.get("pow").and_then(Binding::as_function).unwrap();
        assert_eq!(pow.call(&[2.0, 10.0]), Some(1024.0));
        assert_eq!(
            math.get("pi").and_then(Binding::value),
            Some(std::f64::consts::PI)
        );
    }
}
