use crate::error::{Diagnostic, Error};
use crate::token::{Sign, Token};
use crate::util::OPERATORS;
use log::trace;
use std::iter::Peekable;
use std::str::Chars;

#[must_use]
/// Check if `ident` is a valid identifier, i.e. a name an expression can
/// refer to
///
/// # Examples
///
/// ```
/// # use calc::is_identifier;
///
/// assert_eq!(is_identifier("__abc3"), true);
/// assert_eq!(is_identifier("π"), true);
/// assert_eq!(is_identifier("34zb"), false);
/// ```
pub fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_identifier_start) {
        return false;
    }
    // Check all others
    chars.all(is_identifier_part)
}

/// Split `input` into tokens.
///
/// An empty input gives an empty sequence; rejecting it is left to the later
/// stages.
///
/// ```
/// use calc::{tokenize, Op, Sign, Token};
///
/// assert_eq!(
///     tokenize("-2*x"),
///     Ok(vec![
///         Token::UnaryOperator(Sign::Minus),
///         Token::Number(2.0),
///         Token::Operator(Op::Mul),
///         Token::Ident("x".into()),
///     ])
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let tokens = Lexer::new(input).tokenize()?;
    trace!("tokens for {:?}: {}", input, crate::token::Tokens(&tokens));
    Ok(tokens)
}

/// An helper struct for lexing the input
struct Lexer<'a> {
    source: &'a str,
    input: Peekable<Chars<'a>>,
    /// Offset of the next character, in characters
    offset: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            input: source.chars().peekable(),
            offset: 0,
            tokens: Vec::new(),
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        while let Some(token) = self.next_token()? {
            self.tokens.push(token);
        }
        Ok(self.tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.input.next();
        if c.is_some() {
            self.offset += 1;
        }
        c
    }

    /// Consume the next character if it satisfies `accept`
    fn bump_if(&mut self, accept: impl Fn(char) -> bool, buffer: &mut String) -> bool {
        match self.input.peek() {
            Some(&c) if accept(c) => {
                self.bump();
                buffer.push(c);
                true
            }
            _ => false,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(&' ') | Some(&'\t') = self.input.peek() {
            self.bump();
        }

        let start = self.offset;
        let c = match self.bump() {
            Some(c) => c,
            None => return Ok(None),
        };
        let token = match c {
            c if is_identifier_start(c) => {
                let mut ident = String::new();
                ident.push(c);
                while self.bump_if(is_identifier_part, &mut ident) {}
                Token::Ident(ident)
            }
            c if c.is_ascii_digit() || c == '.' => self.number(c, start)?,
            '+' | '-' if self.sign_expected() => Token::UnaryOperator(if c == '+' {
                Sign::Plus
            } else {
                Sign::Minus
            }),
            '(' => Token::ParenOpen,
            ')' => Token::ParenClose,
            ',' => Token::Separator,
            other => match OPERATORS.get(&other) {
                Some(&op) => Token::Operator(op),
                None => {
                    return Err(Error::BadCharacter(Diagnostic::new(
                        self.source,
                        start,
                        format!("bad character '{}'", other),
                    )));
                }
            },
        };
        Ok(Some(token))
    }

    /// A `+` or `-` is a sign at the start of the input and after anything
    /// that can not end an operand.
    fn sign_expected(&self) -> bool {
        match self.tokens.last() {
            None
            | Some(Token::ParenOpen)
            | Some(Token::Separator)
            | Some(Token::Operator(_))
            | Some(Token::UnaryOperator(_)) => true,
            Some(Token::Number(_)) | Some(Token::Ident(_)) | Some(Token::ParenClose) => false,
        }
    }

    /// Scan a number starting with `first`: digits with at most one decimal
    /// point, then an optional exponent.
    fn number(&mut self, first: char, start: usize) -> Result<Token, Error> {
        let mut literal = String::new();
        literal.push(first);
        let mut seen_point = first == '.';
        loop {
            if self.bump_if(|c| c.is_ascii_digit(), &mut literal) {
                continue;
            }
            if !seen_point && self.bump_if(|c| c == '.', &mut literal) {
                seen_point = true;
                continue;
            }
            break;
        }
        if self.exponent_follows() {
            self.bump_if(|c| c == 'e' || c == 'E', &mut literal);
            self.bump_if(|c| c == '+' || c == '-', &mut literal);
            while self.bump_if(|c| c.is_ascii_digit(), &mut literal) {}
        }

        let bad_number = |reason: &dyn std::fmt::Display| {
            Error::BadNumber(Diagnostic::new(
                self.source,
                start,
                format!("bad number ({})", reason),
            ))
        };
        let value: f64 = literal.parse().map_err(|err| bad_number(&err))?;
        if !value.is_finite() {
            return Err(bad_number(&"value out of range"));
        }
        Ok(Token::Number(value))
    }

    /// Check if the input continues with `e` or `E`, an optional sign and a
    /// digit. Anything else after a mantissa is left for the next token, so
    /// `2e` is `2` times `e`.
    fn exponent_follows(&self) -> bool {
        let mut ahead = self.input.clone();
        if !matches!(ahead.next(), Some('e') | Some('E')) {
            return false;
        }
        match ahead.next() {
            Some('+') | Some('-') => ahead.next().map_or(false, |c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }
}

/// Check if `c` can appear at the first character of an identifier
fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Check if `c` can appear inside an identifier
fn is_identifier_part(c: char) -> bool {
    c == '.' || c == '_' || c.is_alphanumeric()
}
