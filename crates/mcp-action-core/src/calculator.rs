//! Safe arithmetic evaluator: recursive descent over `+ - * / ( )`.
//!
//! Grammar:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Input is first sanitized down to digits, operators, parentheses, dots and
//! whitespace. Anything the sanitizer keeps but the grammar does not accept
//! (`2 ** 3`, `1.2.3`, `()`) is a syntax error, never evaluated.
//! Parentheses nest at most [`MAX_DEPTH`] deep; runs of unary signs are
//! folded iteratively.

use serde::{Deserialize, Serialize};

use crate::format::{number_to_string, to_exponential, to_fixed};
use crate::types::{CoreError, CoreResult};

/// How a calculation result is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Decimal,
    Scientific,
    Fraction,
}

impl NumberFormat {
    pub const NAMES: [&'static str; 3] = ["decimal", "scientific", "fraction"];

    /// Unknown or empty names render as decimal.
    pub fn from_name(name: &str) -> Self {
        match name {
            "scientific" => NumberFormat::Scientific,
            "fraction" => NumberFormat::Fraction,
            _ => NumberFormat::Decimal,
        }
    }

    pub fn render(self, value: f64) -> String {
        match self {
            NumberFormat::Decimal => number_to_string(value),
            NumberFormat::Scientific => to_exponential(value, 6),
            NumberFormat::Fraction => format!("≈ {}", to_fixed(value, 6)),
        }
    }
}

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Drop every character outside `[0-9+\-*/().\s]`.
pub fn sanitize(expression: &str) -> String {
    expression
        .chars()
        .filter(|c| c.is_ascii_digit() || "+-*/().".contains(*c) || c.is_whitespace())
        .collect()
}

/// Sanitize and evaluate an expression.
pub fn evaluate(expression: &str) -> CoreResult<f64> {
    let sanitized = sanitize(expression);
    if sanitized.trim().is_empty() {
        return Err(CoreError::InvalidExpression);
    }

    let tokens = tokenize(&sanitized)?;
    let mut pos = 0;
    let value = parse_expr(&tokens, &mut pos, 0)?;
    if let Some(tok) = tokens.get(pos) {
        return Err(unexpected(tok));
    }

    tracing::debug!("Evaluated '{sanitized}' = {value}");
    Ok(value)
}

fn tokenize(input: &str) -> CoreResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let number = parse_number(&literal)?;
            tokens.push(Token::Number(number));
            continue;
        }

        let tok = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(CoreError::Syntax(format!("Unexpected character '{other}'"))),
        };
        tokens.push(tok);
        i += 1;
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> CoreResult<f64> {
    if literal == "." || literal.matches('.').count() > 1 {
        return Err(CoreError::Syntax(format!("Invalid number '{literal}'")));
    }
    literal
        .parse()
        .map_err(|_| CoreError::Syntax(format!("Invalid number '{literal}'")))
}

fn parse_expr(tokens: &[Token], pos: &mut usize, depth: usize) -> CoreResult<f64> {
    let mut value = parse_term(tokens, pos, depth)?;
    while let Some(tok) = tokens.get(*pos) {
        match tok {
            Token::Plus => {
                *pos += 1;
                value += parse_term(tokens, pos, depth)?;
            }
            Token::Minus => {
                *pos += 1;
                value -= parse_term(tokens, pos, depth)?;
            }
            _ => break,
        }
    }
    Ok(value)
}

fn parse_term(tokens: &[Token], pos: &mut usize, depth: usize) -> CoreResult<f64> {
    let mut value = parse_unary(tokens, pos, depth)?;
    while let Some(tok) = tokens.get(*pos) {
        match tok {
            Token::Star => {
                *pos += 1;
                if tokens.get(*pos) == Some(&Token::Star) {
                    return Err(CoreError::Syntax(
                        "Exponentiation is not supported".to_string(),
                    ));
                }
                value *= parse_unary(tokens, pos, depth)?;
            }
            Token::Slash => {
                *pos += 1;
                value /= parse_unary(tokens, pos, depth)?;
            }
            _ => break,
        }
    }
    Ok(value)
}

fn parse_unary(tokens: &[Token], pos: &mut usize, depth: usize) -> CoreResult<f64> {
    let mut negate = false;
    loop {
        match tokens.get(*pos) {
            Some(Token::Minus) => negate = !negate,
            Some(Token::Plus) => {}
            _ => break,
        }
        *pos += 1;
    }
    let value = parse_primary(tokens, pos, depth)?;
    Ok(if negate { -value } else { value })
}

fn parse_primary(tokens: &[Token], pos: &mut usize, depth: usize) -> CoreResult<f64> {
    match tokens.get(*pos) {
        Some(Token::Number(n)) => {
            *pos += 1;
            Ok(*n)
        }
        Some(Token::LParen) => {
            if depth >= MAX_DEPTH {
                return Err(CoreError::Syntax("Expression nested too deeply".to_string()));
            }
            *pos += 1;
            let value = parse_expr(tokens, pos, depth + 1)?;
            match tokens.get(*pos) {
                Some(Token::RParen) => {
                    *pos += 1;
                    Ok(value)
                }
                Some(tok) => Err(unexpected(tok)),
                None => Err(CoreError::Syntax("Missing closing parenthesis".to_string())),
            }
        }
        Some(tok) => Err(unexpected(tok)),
        None => Err(CoreError::Syntax("Unexpected end of input".to_string())),
    }
}

fn unexpected(tok: &Token) -> CoreError {
    let text = match tok {
        Token::Number(n) => number_to_string(*n),
        Token::Plus => "+".to_string(),
        Token::Minus => "-".to_string(),
        Token::Star => "*".to_string(),
        Token::Slash => "/".to_string(),
        Token::LParen => "(".to_string(),
        Token::RParen => ")".to_string(),
    };
    CoreError::Syntax(format!("Unexpected token '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("12 / 4 / 3").unwrap(), 1.0);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(NumberFormat::from_name("scientific"), NumberFormat::Scientific);
        assert_eq!(NumberFormat::from_name("fraction"), NumberFormat::Fraction);
        assert_eq!(NumberFormat::from_name("hex"), NumberFormat::Decimal);
        assert_eq!(NumberFormat::from_name(""), NumberFormat::Decimal);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5 + 2").unwrap(), -3.0);
        assert_eq!(evaluate("2 - -3").unwrap(), 5.0);
        assert_eq!(evaluate("-(1 + 1)").unwrap(), -2.0);
    }

    #[test]
    fn test_decimals() {
        assert_eq!(evaluate(".5 + 1.5").unwrap(), 2.0);
        assert_eq!(evaluate("3. * 2").unwrap(), 6.0);
    }

    #[test]
    fn test_sanitizer_strips_functions() {
        // "sqrt(16)" sanitizes to "(16)".
        assert_eq!(sanitize("sqrt(16)"), "(16)");
        assert_eq!(evaluate("sqrt(16)").unwrap(), 16.0);
    }

    #[test]
    fn test_empty_after_sanitize() {
        assert_eq!(evaluate("abc"), Err(CoreError::InvalidExpression));
        assert_eq!(evaluate(""), Err(CoreError::InvalidExpression));
        assert_eq!(evaluate("   "), Err(CoreError::InvalidExpression));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(evaluate("2 ** 3").is_err());
        assert!(evaluate("1.2.3 + 1").is_err());
        assert!(evaluate("()").is_err());
        assert!(evaluate("(1 + 2").is_err());
        assert!(evaluate("1 2").is_err());
        assert!(evaluate("4 +").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(evaluate(&nested(MAX_DEPTH)).unwrap(), 1.0);
        assert_eq!(
            evaluate(&nested(MAX_DEPTH + 1)),
            Err(CoreError::Syntax("Expression nested too deeply".to_string()))
        );
        assert!(evaluate(&nested(100_000)).is_err());
    }

    #[test]
    fn test_long_sign_runs() {
        let minuses = format!("{}5", "-".repeat(100_000));
        assert_eq!(evaluate(&minuses).unwrap(), 5.0);
        let odd = format!("{}5", "- ".repeat(100_001));
        assert_eq!(evaluate(&odd).unwrap(), -5.0);
        assert_eq!(evaluate("+-+3").unwrap(), -3.0);
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert!(evaluate("1 / 0").unwrap().is_infinite());
    }

    #[test]
    fn test_format_does_not_change_value() {
        let value = evaluate("2 + 3 * 4").unwrap();
        assert_eq!(NumberFormat::Decimal.render(value), "14");
        assert_eq!(NumberFormat::Scientific.render(value), "1.400000e+1");
        assert_eq!(NumberFormat::Fraction.render(value), "≈ 14.000000");
    }

    #[test]
    fn test_tie_rendering() {
        let value = evaluate("1/128").unwrap();
        assert_eq!(NumberFormat::Fraction.render(value), "≈ 0.007813");
        assert_eq!(NumberFormat::Scientific.render(1.0078125), "1.007813e+0");
    }
}
