#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! Calc, a crate for evaluating short mathematical expressions.
//!
//! An expression is a single arithmetic formula embedded in a string. The
//! easiest way to use this crate is with the [`eval_float`](fn.eval_float.html)
//! function:
//!
//! ```
//! assert_eq!(calc::eval_float("3 + 5 * 2", None), Ok(13.0));
//! ```
//!
//! The second argument to `eval_float` is an optional set of
//! [`Bindings`](struct.Bindings.html), defining variables and functions:
//!
//! ```
//! use calc::{Binding, Bindings};
//!
//! let bindings = Bindings::new()
//!     .with("a", 3.5)
//!     .with("inc", Binding::unary(|x| x + 1.0));
//! assert_eq!(calc::eval_float("2a + inc(1)", &bindings), Ok(9.0));
//! ```
//!
//! [`eval_int`](fn.eval_int.html) does the same computation and truncates
//! the result toward zero.
//!
//! # Language definition
//!
//! The language implemented by calc can contain the following elements:
//!
//! - float literal values: `12`, `.5`, `3.`, `0.0045e78`, ...;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division, `%` for the floating point
//!   remainder (with the sign of the dividend) and `^` for exponentiation;
//! - signs: `+` and `-` in front of an operand, as in `-2` or `--(1)`;
//! - implicit multiplication of a number by what directly follows it:
//!   `2x`, `2(3+1)`;
//! - variables. Variable names can start with a letter or `_`, and can
//!   contain letters, digits, `.` or `_`;
//! - function calls: `f(a, b)`, with as many arguments as the function
//!   binding declares.
//!
//! Spaces and tabs are ignored. Any other symbol is forbidden in the input.
//!
//! Precedence, loosest to tightest: binary `+ -`, then `* / %`, then
//! implicit multiplication (so `12/2(1+1)` is `3`), then signs, then the
//! right associative `^` (so `-2^2` is `-4` and `2^3^2` is `512`).
//!
//! # Technical details
//!
//! calc works in three stages, each available on its own:
//! [`tokenize`](fn.tokenize.html) splits the input into
//! [`Token`](enum.Token.html)s, [`to_rpn`](fn.to_rpn.html) reorders them in
//! reverse polish notation with the shunting-yard algorithm, and
//! [`evaluate`](fn.evaluate.html) runs the result on a stack of `f64`.
//! Nothing is cached between calls.
//!
//! Errors found while splitting the input point at the offending character:
//!
//! ```
//! let err = calc::eval_float("2 + 1e999", None).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "calc: bad number (value out of range)\n      2 + 1e999\n          ^"
//! );
//! ```

#[macro_use]
extern crate lazy_static;

mod bindings;
mod error;
mod eval;
mod expr;
mod lexer;
mod rpn;
mod token;
mod util;

pub use bindings::{Binding, Bindings, Function};
pub use error::{Diagnostic, Error, PREFIX};
pub use eval::evaluate;
pub use expr::{eval_float, eval_int};
pub use lexer::{is_identifier, tokenize};
pub use rpn::to_rpn;
pub use token::{Associativity, Op, Sign, Token, Tokens};
pub use util::{BINARY_FUNCTIONS, CONSTANTS, FUNCTIONS};
