//! A restricted arithmetic grammar for coefficient expressions.
//!
//! Textual coefficients like `"-sin(t)"` or `"t^2 / 2"` are parsed into a
//! small AST and evaluated per call. The grammar accepts numeric literals,
//! the variable `t`, the operators `+ - * / ^`, unary minus, parentheses,
//! and the functions `sin`, `cos`, and `exp`. Nothing is ever executed as
//! code; anything outside the grammar is a parse error.
//!
//! `^` is right-associative and binds tighter than unary minus, so `-t^2`
//! evaluates as `-(t^2)`.

use thiserror::Error;

/// Errors from parsing a coefficient expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A character outside the grammar's alphabet.
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A numeric literal that does not parse as `f64`.
    #[error("malformed number literal '{0}'")]
    MalformedNumber(String),

    /// An identifier other than `t`, `sin`, `cos`, or `exp`.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// A token in a position where the grammar does not allow it.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// The expression ended where the grammar required more input.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Input remained after a complete expression was parsed.
    #[error("trailing input after expression")]
    TrailingInput,
}

/// A parsed coefficient expression: a scalar function of `t`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Time,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Exp(Box<Expr>),
}

impl Expr {
    /// Evaluates the expression at time `t`.
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Time => t,
            Expr::Neg(inner) => -inner.eval(t),
            Expr::Add(lhs, rhs) => lhs.eval(t) + rhs.eval(t),
            Expr::Sub(lhs, rhs) => lhs.eval(t) - rhs.eval(t),
            Expr::Mul(lhs, rhs) => lhs.eval(t) * rhs.eval(t),
            Expr::Div(lhs, rhs) => lhs.eval(t) / rhs.eval(t),
            Expr::Pow(base, exponent) => base.eval(t).powf(exponent.eval(t)),
            Expr::Sin(inner) => inner.eval(t).sin(),
            Expr::Cos(inner) => inner.eval(t).cos(),
            Expr::Exp(inner) => inner.eval(t).exp(),
        }
    }
}

/// Parses a coefficient expression.
///
/// # Errors
///
/// Returns an [`ExprError`] if the input is not a single complete expression
/// in the restricted grammar.
pub fn parse(src: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ExprError::TrailingInput);
    }
    Ok(expr)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(value) => value.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_owned(),
            Token::Minus => "-".to_owned(),
            Token::Star => "*".to_owned(),
            Token::Slash => "/".to_owned(),
            Token::Caret => "^".to_owned(),
            Token::LParen => "(".to_owned(),
            Token::RParen => ")".to_owned(),
        }
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| ExprError::MalformedNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() => {
                let mut name = String::new();
                while let Some(&a) = chars.peek() {
                    if a.is_ascii_alphabetic() {
                        name.push(a);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ExprError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, wanted: &Token) -> Result<(), ExprError> {
        let token = self.next()?;
        if token == *wanted {
            Ok(())
        } else {
            Err(ExprError::UnexpectedToken(token.describe()))
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
                }
                Token::Minus => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.peek().cloned() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
                }
                Token::Slash => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    // unary := '-' unary | power
    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            let inner = self.unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.power()
    }

    // power := atom ('^' unary)?
    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Caret) {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    // atom := number | 't' | ('sin' | 'cos' | 'exp') '(' expr ')' | '(' expr ')'
    fn atom(&mut self) -> Result<Expr, ExprError> {
        match self.next()? {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Ident(name) => match name.as_str() {
                "t" => Ok(Expr::Time),
                "sin" | "cos" | "exp" => {
                    self.expect(&Token::LParen)?;
                    let argument = self.expr()?;
                    self.expect(&Token::RParen)?;
                    let argument = Box::new(argument);
                    Ok(match name.as_str() {
                        "sin" => Expr::Sin(argument),
                        "cos" => Expr::Cos(argument),
                        _ => Expr::Exp(argument),
                    })
                }
                _ => Err(ExprError::UnknownIdentifier(name)),
            },
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            other => Err(ExprError::UnexpectedToken(other.describe())),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn literals_and_variable() {
        assert_relative_eq!(parse("2.5").unwrap().eval(0.0), 2.5);
        assert_relative_eq!(parse("t").unwrap().eval(3.0), 3.0);
    }

    #[test]
    fn arithmetic_precedence() {
        // Multiplication binds tighter than addition.
        assert_relative_eq!(parse("1 + 2 * 3").unwrap().eval(0.0), 7.0);
        assert_relative_eq!(parse("(1 + 2) * 3").unwrap().eval(0.0), 9.0);
        assert_relative_eq!(parse("4 / 2 - 1").unwrap().eval(0.0), 1.0);
    }

    #[test]
    fn power_is_right_associative_and_tighter_than_unary_minus() {
        assert_relative_eq!(parse("2 ^ 3 ^ 2").unwrap().eval(0.0), 512.0);
        assert_relative_eq!(parse("-t^2").unwrap().eval(3.0), -9.0);
        assert_relative_eq!(parse("2^-1").unwrap().eval(0.0), 0.5);
    }

    #[test]
    fn functions_of_time() {
        assert_relative_eq!(parse("-sin(t)").unwrap().eval(1.0), -1.0_f64.sin());
        assert_relative_eq!(parse("cos(t)").unwrap().eval(0.5), 0.5_f64.cos());
        assert_relative_eq!(parse("exp(t^2 / 2)").unwrap().eval(2.0), 2.0_f64.exp());
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert_eq!(
            parse("tan(t)"),
            Err(ExprError::UnknownIdentifier("tan".to_owned()))
        );
        assert_eq!(
            parse("x + 1"),
            Err(ExprError::UnknownIdentifier("x".to_owned()))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse("1 +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("(t"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("t 2"), Err(ExprError::TrailingInput));
        assert_eq!(parse("1;2"), Err(ExprError::UnexpectedChar(';')));
        assert_eq!(
            parse("1..5"),
            Err(ExprError::MalformedNumber("1..5".to_owned()))
        );
    }
}
