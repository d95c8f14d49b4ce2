//! Tokenizer for the formula language.

use crate::error::{EvaluationError, Result};

/// Words with a fixed meaning in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Keyword {
    True,
    False,
    None,
    And,
    Or,
    Not,
    In,
    Is,
    If,
    Else,
}

/// Statement and definition words. The grammar has no production for any of
/// them; they are rejected while tokenizing.
const UNSUPPORTED_WORDS: &[&str] = &[
    "lambda", "for", "while", "def", "class", "import", "from", "return", "yield", "await",
    "async", "with", "try", "except", "finally", "raise", "del", "global", "nonlocal", "pass",
    "break", "continue", "assert", "elif",
];

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    Name(String),
    Keyword(Keyword),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token start in the source.
    pub offset: usize,
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '\'' || c == '"' {
            chars.next();
            let value = lex_string(&mut chars, c, offset)?;
            tokens.push(Token {
                kind: TokenKind::Str(value),
                offset,
            });
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.'
                && input[offset + 1..]
                    .chars()
                    .next()
                    .is_some_and(|n| n.is_ascii_digit()));
        if starts_number {
            let end = scan_number(input, offset);
            for _ in input[offset..end].chars() {
                chars.next();
            }
            tokens.push(Token {
                kind: parse_number(&input[offset..end], offset)?,
                offset,
            });
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut end = offset;
            while let Some(&(i, ch)) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    end = i + ch.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let word = &input[offset..end];
            tokens.push(Token {
                kind: word_kind(word, offset)?,
                offset,
            });
            continue;
        }

        chars.next();
        let next = chars.peek().map(|&(_, n)| n);
        let kind = match (c, next) {
            ('*', Some('*')) => {
                chars.next();
                TokenKind::DoubleStar
            }
            ('/', Some('/')) => {
                chars.next();
                TokenKind::DoubleSlash
            }
            ('=', Some('=')) => {
                chars.next();
                TokenKind::EqEq
            }
            ('!', Some('=')) => {
                chars.next();
                TokenKind::NotEq
            }
            ('<', Some('=')) => {
                chars.next();
                TokenKind::Le
            }
            ('>', Some('=')) => {
                chars.next();
                TokenKind::Ge
            }
            ('+', _) => TokenKind::Plus,
            ('-', _) => TokenKind::Minus,
            ('*', _) => TokenKind::Star,
            ('/', _) => TokenKind::Slash,
            ('%', _) => TokenKind::Percent,
            ('<', _) => TokenKind::Lt,
            ('>', _) => TokenKind::Gt,
            ('(', _) => TokenKind::LParen,
            (')', _) => TokenKind::RParen,
            ('[', _) => TokenKind::LBracket,
            (']', _) => TokenKind::RBracket,
            (',', _) => TokenKind::Comma,
            ('.', _) => TokenKind::Dot,
            ('=', _) => {
                return Err(EvaluationError::syntax(
                    "assignment is not allowed, use '==' to compare",
                    offset,
                ));
            }
            (other, _) => {
                return Err(EvaluationError::syntax(
                    format!("unexpected character '{other}'"),
                    offset,
                ));
            }
        };
        tokens.push(Token { kind, offset });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        offset: input.len(),
    });
    Ok(tokens)
}

fn lex_string(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
    start: usize,
) -> Result<String> {
    let mut value = String::new();
    loop {
        let Some((_, c)) = chars.next() else {
            return Err(EvaluationError::syntax("unterminated string literal", start));
        };
        match c {
            c if c == quote => return Ok(value),
            '\n' => {
                return Err(EvaluationError::syntax("unterminated string literal", start));
            }
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    return Err(EvaluationError::syntax("unterminated string literal", start));
                };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    '\\' | '\'' | '"' => value.push(escaped),
                    other => {
                        // Unknown escapes are kept verbatim.
                        value.push('\\');
                        value.push(other);
                    }
                }
            }
            c => value.push(c),
        }
    }
}

/// Returns the end offset of the numeric literal starting at `start`.
fn scan_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = start;
    let digits = |i: &mut usize| {
        while *i < bytes.len() && (bytes[*i].is_ascii_digit() || bytes[*i] == b'_') {
            *i += 1;
        }
    };
    digits(&mut i);
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        digits(&mut i);
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            digits(&mut i);
        }
    }
    i
}

fn parse_number(text: &str, offset: usize) -> Result<TokenKind> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let is_float = cleaned.contains(['.', 'e', 'E']);
    if is_float {
        cleaned
            .parse::<f64>()
            .map(TokenKind::Float)
            .map_err(|_| EvaluationError::syntax(format!("invalid number '{text}'"), offset))
    } else {
        cleaned
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| EvaluationError::syntax(format!("integer literal too large '{text}'"), offset))
    }
}

fn word_kind(word: &str, offset: usize) -> Result<TokenKind> {
    let keyword = match word {
        "True" => Keyword::True,
        "False" => Keyword::False,
        "None" => Keyword::None,
        "and" => Keyword::And,
        "or" => Keyword::Or,
        "not" => Keyword::Not,
        "in" => Keyword::In,
        "is" => Keyword::Is,
        "if" => Keyword::If,
        "else" => Keyword::Else,
        w if UNSUPPORTED_WORDS.contains(&w) => {
            return Err(EvaluationError::syntax(
                format!("'{w}' is not supported in formulas"),
                offset,
            ));
        }
        w => return Ok(TokenKind::Name(w.to_string())),
    };
    Ok(TokenKind::Keyword(keyword))
}
