use crate::bindings::{Binding, Bindings};
use crate::error::Error;
use crate::token::{Op, Sign, Token};
use log::debug;

/// Evaluate a sequence of tokens in reverse polish notation.
///
/// The sequence must leave exactly one value on the stack.
///
/// ```
/// use calc::{evaluate, Bindings, Op, Token};
///
/// let rpn = [Token::Number(1.0), Token::Number(2.0), Token::Operator(Op::Minus)];
/// assert_eq!(evaluate(&rpn, &Bindings::new()), Ok(-1.0));
/// ```
pub fn evaluate(rpn: &[Token], bindings: &Bindings) -> Result<f64, Error> {
    let mut stack: Vec<f64> = Vec::with_capacity(rpn.len());
    for token in rpn {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::UnaryOperator(sign) => {
                let a = stack.pop().ok_or(Error::InvalidExpression)?;
                stack.push(match sign {
                    Sign::Plus => a,
                    Sign::Minus => -a,
                });
            }
            Token::Operator(op) => {
                let b = stack.pop().ok_or(Error::InvalidExpression)?;
                let a = stack.pop().ok_or(Error::InvalidExpression)?;
                stack.push(apply(op, a, b));
            }
            Token::Ident(ref name) => {
                match bindings.get(name) {
                    None => return Err(Error::NotProvided(name.clone())),
                    Some(Binding::Function(function)) => {
                        let arity = function.arity();
                        if stack.len() < arity {
                            return Err(Error::InvalidExpression);
                        }
                        let args = stack.split_off(stack.len() - arity);
                        let result = function.call(&args).ok_or(Error::InvalidExpression)?;
                        debug!("{}{:?} = {}", name, args, result);
                        stack.push(result);
                    }
                    Some(binding) => {
                        if let Some(value) = binding.value() {
                            stack.push(value);
                        }
                    }
                }
            }
            Token::ParenOpen | Token::ParenClose | Token::Separator => {
                return Err(Error::InvalidExpression)
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(Error::InvalidExpression),
    }
}

/// Apply a binary operator
fn apply(op: Op, a: f64, b: f64) -> f64 {
    match op {
        Op::Plus => a + b,
        Op::Minus => a - b,
        Op::Mul | Op::ImplicitMul => a * b,
        Op::Div => a / b,
        Op::Rem => libm::fmod(a, b),
        Op::Pow => libm::pow(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn num(value: f64) -> Token {
        Token::Number(value)
    }

    fn op(op: Op) -> Token {
        Token::Operator(op)
    }

    #[test_case(Op::Plus, 7.0, 2.0 => 9.0 ; "addition")]
    #[test_case(Op::Minus, 7.0, 2.0 => 5.0 ; "right operand is subtracted")]
    #[test_case(Op::Mul, 7.0, 2.0 => 14.0 ; "multiplication")]
    #[test_case(Op::ImplicitMul, 7.0, 2.0 => 14.0 ; "implicit multiplication")]
    #[test_case(Op::Div, 7.0, 2.0 => 3.5 ; "division")]
    #[test_case(Op::Rem, 10.0, 3.0 => 1.0 ; "remainder")]
    #[test_case(Op::Rem, -10.0, 3.0 => -1.0 ; "remainder takes the sign of the dividend")]
    #[test_case(Op::Rem, 5.5, 2.0 => 1.5 ; "fractional remainder")]
    #[test_case(Op::Pow, 2.0, 10.0 => 1024.0 ; "power")]
    #[test_case(Op::Pow, 2.0, -2.0 => 0.25 ; "negative power")]
    fn binary(op: Op, a: f64, b: f64) -> f64 {
        apply(op, a, b)
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let rpn = [num(1.0), num(0.0), op(Op::Div)];
        assert_eq!(evaluate(&rpn, &Bindings::new()), Ok(std::f64::INFINITY));
    }

    #[test]
    fn signs() {
        let rpn = [
            num(1.0),
            Token::UnaryOperator(Sign::Minus),
            Token::UnaryOperator(Sign::Minus),
            Token::UnaryOperator(Sign::Plus),
            Token::UnaryOperator(Sign::Minus),
        ];
        assert_eq!(evaluate(&rpn, &Bindings::new()), Ok(-1.0));
    }

    #[test]
    fn bindings() {
        let bindings = Bindings::new()
            .with("life", 42)
            .with("half", 0.5)
            .with("sqdist", Binding::binary(|x, y| x * x + y * y))
            .with("sub", Binding::binary(|x, y| x - y));

        let rpn = [Token::Ident("life".into()), Token::Ident("half".into()), op(Op::Mul)];
        assert_eq!(evaluate(&rpn, &bindings), Ok(21.0));

        let rpn = [num(3.0), num(4.0), Token::Ident("sqdist".into())];
        assert_eq!(evaluate(&rpn, &bindings), Ok(25.0));

        // arguments come off the stack in source order
        let rpn = [num(10.0), num(3.0), Token::Ident("sub".into())];
        assert_eq!(evaluate(&rpn, &bindings), Ok(7.0));

        let rpn = [num(3.0), Token::Ident("sqdist".into())];
        assert_eq!(evaluate(&rpn, &bindings), Err(Error::InvalidExpression));

        let rpn = [Token::Ident("nope".into())];
        assert_eq!(
            evaluate(&rpn, &bindings),
            Err(Error::NotProvided("nope".into()))
        );
    }

    #[test]
    fn stack_must_end_with_one_value() {
        let bindings = Bindings::new();
        assert_eq!(evaluate(&[], &bindings), Err(Error::InvalidExpression));
        assert_eq!(
            evaluate(&[num(1.0), num(2.0)], &bindings),
            Err(Error::InvalidExpression)
        );
        assert_eq!(
            evaluate(&[num(1.0), op(Op::Plus)], &bindings),
            Err(Error::InvalidExpression)
        );
        assert_eq!(
            evaluate(&[Token::UnaryOperator(Sign::Minus)], &bindings),
            Err(Error::InvalidExpression)
        );
        assert_eq!(
            evaluate(&[num(1.0), Token::ParenOpen], &bindings),
            Err(Error::InvalidExpression)
        );
    }
}
