use crate::token::Op;
use std::collections::HashMap;

lazy_static! {
    /// Binary operators, by the symbol the lexer recognizes them with.
    /// `+` and `-` may still be lexed as signs depending on their position.
    pub static ref OPERATORS: HashMap<char, Op> = {
        let mut map = HashMap::new();
        for &op in &[Op::Plus, Op::Minus, Op::Mul, Op::Div, Op::Rem, Op::Pow] {
            map.insert(op.symbol(), op);
        }
        map.shrink_to_fit();
        map
    };

    /// Single argument functions offered by
    /// [`Bindings::math`](struct.Bindings.html#method.math).
    pub static ref FUNCTIONS: HashMap<&'static str, fn(f64) -> f64> = {
        let mut map = HashMap::<&'static str, fn(f64) -> f64>::new();
        map.insert("sqrt", f64::sqrt);
        map.insert("cbrt", f64::cbrt);
        map.insert("sin", f64::sin);
        map.insert("cos", f64::cos);
        map.insert("tan", f64::tan);
        map.insert("asin", f64::asin);
        map.insert("acos", f64::acos);
        map.insert("atan", f64::atan);
        map.insert("sinh", f64::sinh);
        map.insert("cosh", f64::cosh);
        map.insert("tanh", f64::tanh);
        map.insert("asinh", f64::asinh);
        map.insert("acosh", f64::acosh);
        map.insert("atanh", f64::atanh);
        map.insert("floor", f64::floor);
        map.insert("ceil", f64::ceil);
        map.insert("abs", f64::abs);
        map.insert("exp", f64::exp);
        map.insert("ln", f64::ln);
        map.insert("log2", f64::log2);
        map.insert("log10", f64::log10);
        map.shrink_to_fit();
        map
    };

    /// Two argument functions offered by
    /// [`Bindings::math`](struct.Bindings.html#method.math).
    pub static ref BINARY_FUNCTIONS: HashMap<&'static str, fn(f64, f64) -> f64> = {
        let mut map = HashMap::<&'static str, fn(f64, f64) -> f64>::new();
        map.insert("pow", libm::pow);
        map.insert("atan2", f64::atan2);
        map.insert("hypot", f64::hypot);
        map.insert("min", f64::min);
        map.insert("max", f64::max);
        map.shrink_to_fit();
        map
    };
}

/// Constants offered by [`Bindings::math`](struct.Bindings.html#method.math)
pub const CONSTANTS: [(&str, f64); 3] = [
    ("pi", std::f64::consts::PI),
    ("tau", std::f64::consts::TAU),
    ("e", std::f64::consts::E),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexable_operators() {
        assert_eq!(OPERATORS.len(), 6);
        assert_eq!(OPERATORS.get(&'%'), Some(&Op::Rem));
        assert_eq!(OPERATORS.get(&'⋅'), None);
    }

    #[test]
    fn function_names_do_not_collide() {
        for name in BINARY_FUNCTIONS.keys() {
            assert!(!FUNCTIONS.contains_key(name));
        }
        for (name, _) in &CONSTANTS {
            assert!(!FUNCTIONS.contains_key(name));
            assert!(!BINARY_FUNCTIONS.contains_key(name));
        }
    }
}
