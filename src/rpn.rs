use crate::bindings::{Binding, Bindings};
use crate::error::Error;
use crate::token::{Associativity, Op, Token, Tokens};
use log::trace;

/// Rearrange `tokens` into reverse polish notation with the shunting-yard
/// algorithm.
///
/// Identifiers are looked up in `bindings`: constants go straight to the
/// output, functions wait on the operator stack for their closing
/// parenthesis. Calls are checked against the function arity.
///
/// ```
/// use calc::{to_rpn, tokenize, Bindings, Op, Token};
///
/// let rpn = to_rpn(&tokenize("2(3+1)").unwrap(), &Bindings::new()).unwrap();
/// assert_eq!(
///     rpn,
///     vec![
///         Token::Number(2.0),
///         Token::Number(3.0),
///         Token::Number(1.0),
///         Token::Operator(Op::Plus),
///         Token::Operator(Op::ImplicitMul),
///     ]
/// );
/// ```
pub fn to_rpn(tokens: &[Token], bindings: &Bindings) -> Result<Vec<Token>, Error> {
    let rpn = ShuntingYard::new(bindings).run(tokens)?;
    trace!("rpn: {}", Tokens(&rpn));
    Ok(rpn)
}

struct ShuntingYard<'a> {
    bindings: &'a Bindings,
    output: Vec<Token>,
    operators: Vec<Token>,
    /// Number of separators seen in each open parenthesis, innermost last
    separators: Vec<usize>,
}

impl<'a> ShuntingYard<'a> {
    fn new(bindings: &'a Bindings) -> Self {
        ShuntingYard {
            bindings,
            output: Vec::new(),
            operators: Vec::new(),
            separators: Vec::new(),
        }
    }

    fn run(mut self, tokens: &[Token]) -> Result<Vec<Token>, Error> {
        for (i, token) in tokens.iter().enumerate() {
            let previous = if i > 0 { tokens.get(i - 1) } else { None };
            let after_number = matches!(previous, Some(Token::Number(_)));

            match *token {
                Token::Number(_) => self.output.push(token.clone()),
                Token::Ident(ref name) => {
                    if after_number {
                        self.operator(Op::ImplicitMul);
                    }
                    match self.bindings.get(name) {
                        None => return Err(Error::NotProvided(name.clone())),
                        Some(Binding::Function(_)) => {
                            if tokens.get(i + 1) != Some(&Token::ParenOpen) {
                                return Err(Error::Uncalled(name.clone()));
                            }
                            self.operators.push(token.clone())
                        }
                        Some(Binding::Int(_)) | Some(Binding::Float(_)) => {
                            self.output.push(token.clone())
                        }
                    }
                }
                Token::Separator => {
                    if matches!(previous, Some(Token::Separator) | Some(Token::ParenOpen)) {
                        return Err(Error::BadComma);
                    }
                    self.pop_until_paren().ok_or(Error::BadComma)?;
                    if let Some(count) = self.separators.last_mut() {
                        *count += 1;
                    }
                }
                Token::UnaryOperator(_) => self.operators.push(token.clone()),
                Token::Operator(op) => self.operator(op),
                Token::ParenOpen => {
                    if after_number {
                        self.operator(Op::ImplicitMul);
                    }
                    self.operators.push(Token::ParenOpen);
                    self.separators.push(0);
                }
                Token::ParenClose => {
                    if matches!(previous, Some(Token::Separator)) {
                        return Err(Error::BadComma);
                    }
                    let empty = matches!(previous, Some(Token::ParenOpen));
                    self.close_paren(empty)?;
                }
            }
        }

        while let Some(token) = self.operators.pop() {
            if token == Token::ParenOpen {
                return Err(Error::MismatchedParentheses);
            }
            self.output.push(token);
        }
        Ok(self.output)
    }

    /// Push a binary operator, first moving to the output every stacked
    /// operator that binds at least as tight.
    fn operator(&mut self, op: Op) {
        while let Some((precedence, _)) = self.operators.last().and_then(Token::metadata) {
            let pop_me = match op.associativity() {
                Associativity::Left => op.precedence() <= precedence,
                Associativity::Right => op.precedence() < precedence,
            };
            if !pop_me {
                break;
            }
            if let Some(top) = self.operators.pop() {
                self.output.push(top);
            }
        }
        self.operators.push(Token::Operator(op));
    }

    /// Move operators to the output up to the innermost open parenthesis,
    /// which stays on the stack. `None` if there is no such parenthesis.
    fn pop_until_paren(&mut self) -> Option<()> {
        loop {
            match self.operators.last() {
                None => return None,
                Some(Token::ParenOpen) => return Some(()),
                Some(_) => {
                    let top = self.operators.pop()?;
                    self.output.push(top);
                }
            }
        }
    }

    fn close_paren(&mut self, empty: bool) -> Result<(), Error> {
        self.pop_until_paren()
            .ok_or(Error::MismatchedParentheses)?;
        self.operators.pop();
        let separators = self.separators.pop().unwrap_or(0);

        let function = match self.operators.last() {
            Some(Token::Ident(name)) => self
                .bindings
                .get(name)
                .and_then(Binding::as_function)
                .map(|function| (name.clone(), function.arity())),
            _ => None,
        };

        match function {
            Some((name, arity)) => {
                let found = if empty { 0 } else { separators + 1 };
                if found != arity {
                    return Err(Error::Arity {
                        name,
                        expected: arity,
                        found,
                    });
                }
                if let Some(top) = self.operators.pop() {
                    self.output.push(top);
                }
            }
            None if separators > 0 => return Err(Error::BadComma),
            None => {}
        }
        Ok(())
    }
}
