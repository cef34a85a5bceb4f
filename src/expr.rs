use crate::bindings::Bindings;
use crate::error::Error;
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::rpn::to_rpn;
use log::debug;

/// Evaluate a single expression from `input`.
///
/// `bindings` provides the variables and functions the expression refers to;
/// pass `None` when there are none.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// use calc::{eval_float, Bindings};
///
/// assert_eq!(eval_float("45 - 2^3", None), Ok(37.0));
///
/// let bindings = Bindings::new().with("x", 4);
/// assert_eq!(eval_float("2x^2-3x+1.5", &bindings), Ok(21.5));
/// ```
pub fn eval_float<'a, B>(input: &str, bindings: B) -> Result<f64, Error>
where
    B: Into<Option<&'a Bindings>>,
{
    let empty = Bindings::new();
    let bindings = bindings.into().unwrap_or(&empty);

    debug!("evaluating {:?}", input);
    let tokens = tokenize(input)?;
    let rpn = to_rpn(&tokens, bindings)?;
    let result = evaluate(&rpn, bindings)?;
    debug!("{:?} = {}", input, result);
    Ok(result)
}

/// Evaluate a single expression from `input`, truncating the result toward
/// zero.
///
/// The evaluation itself is done on `f64`, exactly as in
/// [`eval_float`](fn.eval_float.html). Results out of the `i64` range
/// saturate, and `NaN` gives `0`.
///
/// # Example
///
/// ```
/// assert_eq!(calc::eval_int("1+2*2^3*4/(6-1)", None), Ok(13));
/// assert_eq!(calc::eval_int("-7/2", None), Ok(-3));
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn eval_int<'a, B>(input: &str, bindings: B) -> Result<i64, Error>
where
    B: Into<Option<&'a Bindings>>,
{
    eval_float(input, bindings).map(|value| value as i64)
}
