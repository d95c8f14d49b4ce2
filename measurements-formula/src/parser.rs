//! Recursive-descent parser producing a resolved [`Expr`].
//!
//! Precedence, lowest first:
//!
//! | Level        | Forms                                        |
//! |--------------|----------------------------------------------|
//! | conditional  | `a if cond else b` (right-associative)       |
//! | `or`         | short-circuit disjunction                    |
//! | `and`        | short-circuit conjunction                    |
//! | `not`        | boolean negation                             |
//! | comparison   | `== != < <= > >= in, not in, is, is not`     |
//! | additive     | `+ -`                                        |
//! | term         | `* / // %`                                   |
//! | unary        | `- +`                                        |
//! | power        | `**` (binds tighter than unary on its left)  |
//! | primary      | literals, names, `x.attr`, `f(...)`, `(...)` |

use crate::ast::{Attribute, BinaryOp, Builtin, CmpOp, Expr, UnaryOp, Variable};
use crate::error::{EvaluationError, Result};
use crate::lexer::{tokenize, Keyword, Token, TokenKind};
use crate::value::Value;

/// Maximum nesting depth accepted by the parser.
pub const MAX_DEPTH: usize = 128;

pub(crate) fn parse(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens);
    parser.parse_formula()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> &TokenKind {
        // The token list always ends with Eof.
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn offset(&self) -> usize {
        let idx = self.pos.min(self.tokens.len() - 1);
        self.tokens[idx].offset
    }

    fn advance(&mut self) -> Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.tokens[idx].clone()
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(&TokenKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, expected: &str) -> EvaluationError {
        EvaluationError::syntax(
            format!("expected {expected}, found {}", describe(self.peek())),
            self.offset(),
        )
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvaluationError::syntax(
                format!("formula nested deeper than {MAX_DEPTH} levels"),
                self.offset(),
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_formula(&mut self) -> Result<Expr> {
        if matches!(self.peek(), TokenKind::Eof) {
            return Err(EvaluationError::syntax("empty formula", 0));
        }
        let expr = self.parse_expression()?;
        if !matches!(self.peek(), TokenKind::Eof) {
            return Err(self.unexpected("end of formula"));
        }
        Ok(expr)
    }

    /// `or_test ['if' or_test 'else' expression]`
    fn parse_expression(&mut self) -> Result<Expr> {
        self.enter()?;
        let then = self.parse_or()?;
        let expr = if self.eat_keyword(Keyword::If) {
            let condition = self.parse_or()?;
            if !self.eat_keyword(Keyword::Else) {
                return Err(self.unexpected("'else'"));
            }
            let otherwise = self.parse_expression()?;
            Expr::Conditional {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            }
        } else {
            then
        };
        self.leave();
        Ok(expr)
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        let mut nested = 0;
        while self.eat_keyword(Keyword::Or) {
            self.enter()?;
            nested += 1;
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        self.depth -= nested;
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_not()?;
        let mut nested = 0;
        while self.eat_keyword(Keyword::And) {
            self.enter()?;
            nested += 1;
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        self.depth -= nested;
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.eat_keyword(Keyword::Not) {
            self.enter()?;
            let operand = self.parse_not()?;
            self.leave();
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let first = self.parse_sum()?;
        let mut rest = Vec::new();
        while let Some(op) = self.comparison_op() {
            rest.push((op, self.parse_sum()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare {
                first: Box::new(first),
                rest,
            })
        }
    }

    /// Consumes a comparison operator if one is next.
    fn comparison_op(&mut self) -> Option<CmpOp> {
        let op = match self.peek() {
            TokenKind::EqEq => CmpOp::Eq,
            TokenKind::NotEq => CmpOp::NotEq,
            TokenKind::Lt => CmpOp::Lt,
            TokenKind::Le => CmpOp::Le,
            TokenKind::Gt => CmpOp::Gt,
            TokenKind::Ge => CmpOp::Ge,
            TokenKind::Keyword(Keyword::In) => CmpOp::In,
            TokenKind::Keyword(Keyword::Not)
                if self.peek_at(1) == &TokenKind::Keyword(Keyword::In) =>
            {
                self.advance();
                CmpOp::NotIn
            }
            TokenKind::Keyword(Keyword::Is) => {
                if self.peek_at(1) == &TokenKind::Keyword(Keyword::Not) {
                    self.advance();
                    CmpOp::IsNot
                } else {
                    CmpOp::Is
                }
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_sum(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;
        let mut nested = 0;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            self.enter()?;
            nested += 1;
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
        self.depth -= nested;
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        let mut nested = 0;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::DoubleSlash => BinaryOp::FloorDiv,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            self.enter()?;
            nested += 1;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        self.depth -= nested;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.parse_power(),
        };
        self.advance();
        self.enter()?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// `primary ['**' unary]`; `-2 ** 2` is `-(2 ** 2)`.
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;
        if self.eat(&TokenKind::DoubleStar) {
            self.enter()?;
            let exponent = self.parse_unary()?;
            self.leave();
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let mut expr = self.parse_atom()?;
        let mut nested = 0;
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    self.enter()?;
                    nested += 1;
                    let token = self.advance();
                    let TokenKind::Name(name) = token.kind else {
                        return Err(EvaluationError::syntax(
                            "expected an attribute name after '.'",
                            token.offset,
                        ));
                    };
                    let attribute = Attribute::from_name(&name).ok_or(
                        EvaluationError::UnknownAttribute {
                            name,
                            offset: token.offset,
                        },
                    )?;
                    expr = Expr::Attribute {
                        object: Box::new(expr),
                        attribute,
                    };
                }
                TokenKind::LParen => {
                    return Err(EvaluationError::syntax(
                        "only builtin functions can be called",
                        self.offset(),
                    ));
                }
                TokenKind::LBracket => {
                    return Err(EvaluationError::syntax(
                        "subscripts are not supported",
                        self.offset(),
                    ));
                }
                _ => break,
            }
        }
        self.depth -= nested;
        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let token = self.advance();
        match token.kind {
            TokenKind::Int(i) => Ok(Expr::Literal(Value::Int(i))),
            TokenKind::Float(f) => Ok(Expr::Literal(Value::Float(f))),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::Str(s))),
            TokenKind::Keyword(Keyword::True) => Ok(Expr::Literal(Value::Bool(true))),
            TokenKind::Keyword(Keyword::False) => Ok(Expr::Literal(Value::Bool(false))),
            TokenKind::Keyword(Keyword::None) => Ok(Expr::Literal(Value::None)),
            TokenKind::Name(name) => {
                if self.peek() == &TokenKind::LParen {
                    let function = Builtin::from_name(&name).ok_or(
                        EvaluationError::UnknownFunction {
                            name,
                            offset: token.offset,
                        },
                    )?;
                    self.advance();
                    let args = self.parse_items(&TokenKind::RParen)?;
                    return Ok(Expr::Call { function, args });
                }
                Variable::from_name(&name)
                    .map(Expr::Variable)
                    .ok_or(EvaluationError::UndefinedName {
                        name,
                        offset: token.offset,
                    })
            }
            TokenKind::LParen => {
                self.enter()?;
                if self.eat(&TokenKind::RParen) {
                    self.leave();
                    return Ok(Expr::Sequence(Vec::new()));
                }
                let first = self.parse_expression()?;
                let expr = if self.eat(&TokenKind::Comma) {
                    let mut items = vec![first];
                    items.extend(self.parse_items(&TokenKind::RParen)?);
                    Expr::Sequence(items)
                } else {
                    self.expect(&TokenKind::RParen, "')'")?;
                    first
                };
                self.leave();
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.enter()?;
                let items = self.parse_items(&TokenKind::RBracket)?;
                self.leave();
                Ok(Expr::Sequence(items))
            }
            other => Err(EvaluationError::syntax(
                format!("expected a value, found {}", describe(&other)),
                token.offset,
            )),
        }
    }

    /// Comma-separated expressions up to `close`; a trailing comma is allowed.
    fn parse_items(&mut self, close: &TokenKind) -> Result<Vec<Expr>> {
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                return Ok(items);
            }
            items.push(self.parse_expression()?);
            if self.eat(close) {
                return Ok(items);
            }
            if !self.eat(&TokenKind::Comma) {
                return Err(self.unexpected("',' or closing bracket"));
            }
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Eof => "end of formula".to_string(),
        TokenKind::Int(i) => format!("number {i}"),
        TokenKind::Float(f) => format!("number {f}"),
        TokenKind::Str(s) => format!("string '{s}'"),
        TokenKind::Name(n) => format!("name '{n}'"),
        TokenKind::Keyword(k) => format!("keyword {k:?}"),
        other => format!("{other:?}"),
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
