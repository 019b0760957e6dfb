//! Tokenizer and recursive-descent parser for calculator expressions
//!
//! The parser only builds an [`AstNode`] tree over `f64` literals, named
//! functions and constants. Nothing in the input is ever executed.

use std::fmt;

use crate::core::{Constant, EvalError, EvalResult, Function, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary (or unary minus/plus) operator
    Operator(Operation),
    /// Function name, must be followed by `(`
    Function(Function),
    /// Named constant
    Constant(Constant),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::Function(func) => f.write_str(func.name()),
            Self::Constant(c) => f.write_str(c.glyph()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Abstract syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal (constants are resolved to their value)
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Function application
    Call {
        /// Function applied
        func: Function,
        /// Argument expression
        arg: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new function call node
    #[must_use]
    pub fn call(func: Function, arg: AstNode) -> Self {
        Self::Call {
            func,
            arg: Box::new(arg),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> EvalResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> EvalResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            c if c.is_alphabetic() => self.read_identifier()?,
            '(' => {
                self.advance();
                Token::LeftParen
            }
            ')' => {
                self.advance();
                Token::RightParen
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                self.advance();
                let op = Operation::from_char(ch)
                    .ok_or_else(|| EvalError::parse(format!("Unexpected character: '{ch}'")))?;
                Token::Operator(op)
            }
            _ => {
                return Err(EvalError::parse(format!("Unexpected character: '{ch}'")));
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| EvalError::parse(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_identifier(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(char::is_alphabetic) {
            self.advance();
        }

        let name = &self.input[start..self.pos];
        if let Some(func) = Function::from_name(name) {
            Ok(Token::Function(func))
        } else if let Some(constant) = Constant::from_name(name) {
            Ok(Token::Constant(constant))
        } else {
            Err(EvalError::parse(format!("Unknown identifier: '{name}'")))
        }
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary)*
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary ('^' unary)?    // Right associative
/// primary    ::= NUMBER | CONSTANT | FUNCTION '(' expression ')' | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Deepest nesting of parentheses, calls, signs and exponents accepted
pub const MAX_DEPTH: usize = 256;

/// Longest token stream accepted
pub const MAX_TOKENS: usize = 4096;

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> EvalResult<AstNode> {
        let mut tokenizer = Tokenizer::new(input);
        let tokens = tokenizer.tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> EvalResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(EvalError::parse("Empty expression"));
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(EvalError::parse(format!(
                "Expression longer than {MAX_TOKENS} tokens"
            )));
        }

        let ast = self.parse_expression()?;

        // Ensure all tokens consumed
        if let Some(token) = self.current() {
            return Err(EvalError::parse(format!(
                "Unexpected '{token}' at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::parse("Expression nested too deeply"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expression(&mut self) -> EvalResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current().copied()
        {
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> EvalResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(
            op @ (Operation::Multiply | Operation::Divide | Operation::Modulo),
        )) = self.current().copied()
        {
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> EvalResult<AstNode> {
        match self.current().copied() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                let inner = self.nested(Self::parse_unary)?;
                Ok(AstNode::negate(inner))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> EvalResult<AstNode> {
        let base = self.parse_primary()?;

        // Power is right-associative; the exponent may carry its own sign
        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            let exponent = self.nested(Self::parse_unary)?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> EvalResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| EvalError::parse("Unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Constant(c) => Ok(AstNode::number(c.value())),
            Token::LeftParen => self.nested(|p| {
                let expr = p.parse_expression()?;
                p.expect_close()?;
                Ok(expr)
            }),
            Token::Function(func) => {
                match self.advance() {
                    Some(Token::LeftParen) => {}
                    _ => {
                        return Err(EvalError::parse(format!(
                            "Expected '(' after '{}'",
                            func.name()
                        )))
                    }
                }
                self.nested(|p| {
                    let arg = p.parse_expression()?;
                    p.expect_close()?;
                    Ok(AstNode::call(func, arg))
                })
            }
            Token::Operator(_) | Token::RightParen => {
                Err(EvalError::parse(format!("Unexpected '{token}'")))
            }
        }
    }

    fn expect_close(&mut self) -> EvalResult<()> {
        match self.advance() {
            Some(Token::RightParen) => Ok(()),
            Some(t) => Err(EvalError::parse(format!("Expected ')' but found '{t}'"))),
            None => Err(EvalError::parse("Unclosed parenthesis")),
        }
    }
}
