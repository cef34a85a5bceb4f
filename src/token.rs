use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// A variable or function name, resolved against the bindings
    Ident(String),
    /// A binary operator
    Operator(Op),
    /// A sign in front of an operand
    UnaryOperator(Sign),
    /// Left parenthesis
    ParenOpen,
    /// Right parenthesis
    ParenClose,
    /// Function argument separator (comma)
    Separator,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`, floating point remainder
    Rem,
    /// `^`
    Pow,
    /// Multiplication inferred from adjacency, as in `2x` or `2(1+1)`.
    /// Never produced by the lexer.
    ImplicitMul,
}

/// Unary signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

/// Operator associativity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`
    Right,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::ImplicitMul => 3,
            Self::Pow => 5,
        }
    }

    /// Get the operator associativity
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Pow => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// The character this operator is written with
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
            Self::Pow => '^',
            Self::ImplicitMul => '⋅',
        }
    }
}

impl Sign {
    /// Signs bind tighter than every binary operator but `^`, so that `-2^2`
    /// is `-(2^2)`.
    pub fn precedence(self) -> u8 {
        4
    }

    /// Stacked signs apply innermost first
    pub fn associativity(self) -> Associativity {
        Associativity::Right
    }

    /// The character this sign is written with
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl Token {
    /// Precedence and associativity of the token, if it is an operator
    pub fn metadata(&self) -> Option<(u8, Associativity)> {
        match *self {
            Self::Operator(op) => Some((op.precedence(), op.associativity())),
            Self::UnaryOperator(sign) => Some((sign.precedence(), sign.associativity())),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(value) => write!(fmt, "{}", value),
            Self::Ident(ref name) => write!(fmt, "{}", name),
            Self::Operator(op) => write!(fmt, "{}", op.symbol()),
            Self::UnaryOperator(sign) => write!(fmt, "u{}", sign.symbol()),
            Self::ParenOpen => write!(fmt, "("),
            Self::ParenClose => write!(fmt, ")"),
            Self::Separator => write!(fmt, ","),
        }
    }
}

/// Helper to display a token sequence inline, separated by spaces
pub struct Tokens<'a>(pub &'a [Token]);

impl Display for Tokens<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(fmt, " ")?;
            }
            write!(fmt, "{}", token)?;
        }
        Ok(())
    }
}
