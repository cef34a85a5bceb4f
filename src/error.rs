use std::fmt::{self, Display, Formatter};

/// Prefix of every rendered error message
pub const PREFIX: &str = "calc: ";

/// A failure located at a precise position of the input.
///
/// Rendered on three lines: the message, the input, and a caret under the
/// offending character.
///
/// ```
/// let err = calc::eval_float("1:5", None).unwrap_err();
/// assert_eq!(err.to_string(), "calc: bad character ':'\n      1:5\n       ^");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    message: String,
    source: String,
    offset: usize,
}

impl Diagnostic {
    pub(crate) fn new(source: &str, offset: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: source.to_owned(),
            offset,
        }
    }

    /// Short description of the problem
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The complete input the problem was found in
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Offset of the offending character, counted in characters
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Display for Diagnostic {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        let margin = PREFIX.len();
        writeln!(fmt, "{}{}", PREFIX, self.message)?;
        writeln!(fmt, "{:margin$}{}", "", self.source, margin = margin)?;
        write!(fmt, "{:>width$}", "^", width = margin + self.offset + 1)
    }
}

/// Error type for the calc crate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A character that starts no token
    #[error("{0}")]
    BadCharacter(Diagnostic),
    /// A numeric literal that does not parse
    #[error("{0}")]
    BadNumber(Diagnostic),
    /// Misplaced argument separator, or a missing argument around one
    #[error("calc: bad comma")]
    BadComma,
    /// Unbalanced or misnested parentheses
    #[error("calc: mismatched parentheses")]
    MismatchedParentheses,
    /// Identifier absent from the bindings
    #[error("calc: '{0}' not provided")]
    NotProvided(String),
    /// Function name not directly followed by its argument list
    #[error("calc: function '{0}' used without parentheses")]
    Uncalled(String),
    /// Function called with the wrong number of arguments
    #[error("calc: '{name}' takes {expected} argument(s), {found} given")]
    Arity {
        /// Function name
        name: String,
        /// Declared arity
        expected: usize,
        /// Arguments found at the call site
        found: usize,
    },
    /// Operand stack underflow, or leftover operands at the end
    #[error("calc: invalid expression")]
    InvalidExpression,
}

impl Error {
    /// The positioned diagnostic, for errors detected by the lexer
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match *self {
            Self::BadCharacter(ref diagnostic) | Self::BadNumber(ref diagnostic) => {
                Some(diagnostic)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 => "calc: oops\n      abc\n      ^" ; "caret under first character")]
    #[test_case(2 => "calc: oops\n      abc\n        ^" ; "caret under last character")]
    #[test_case(3 => "calc: oops\n      abc\n         ^" ; "caret past the end")]
    fn render(offset: usize) -> String {
        Diagnostic::new("abc", offset, "oops").to_string()
    }

    #[test]
    fn messages() {
        assert_eq!(Error::BadComma.to_string(), "calc: bad comma");
        assert_eq!(
            Error::NotProvided("x".into()).to_string(),
            "calc: 'x' not provided"
        );
        assert_eq!(
            Error::Uncalled("inc".into()).to_string(),
            "calc: function 'inc' used without parentheses"
        );
        assert_eq!(
            Error::Arity {
                name: "inc".into(),
                expected: 1,
                found: 2
            }
            .to_string(),
            "calc: 'inc' takes 1 argument(s), 2 given"
        );
    }

    #[test]
    fn only_lexer_errors_are_positioned() {
        let err = Error::BadNumber(Diagnostic::new("1e", 0, "bad number"));
        assert_eq!(err.diagnostic().map(Diagnostic::offset), Some(0));
        assert_eq!(Error::InvalidExpression.diagnostic(), None);
    }
}
