//! Keystroke-level construction of the display state
//!
//! The builder never validates the expression it accumulates. Grammar errors
//! surface only when the evaluator runs.

use crate::core::format::{format_number, parse_display_number};
use crate::core::{Constant, DisplayState, Function, Operation, ERROR_SENTINEL, ZERO};

/// Accumulates operand and expression text from discrete key events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuilder {
    state: DisplayState,
}

impl ExpressionBuilder {
    /// Creates a builder showing `{"0", ""}`
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DisplayState::new(),
        }
    }

    /// Creates a builder over an existing display state
    #[must_use]
    pub fn from_state(state: DisplayState) -> Self {
        Self { state }
    }

    /// Returns the display state
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Returns the current operand text
    #[must_use]
    pub fn shown_text(&self) -> &str {
        &self.state.shown_text
    }

    /// Returns the accumulated expression
    #[must_use]
    pub fn expression_text(&self) -> &str {
        &self.state.expression_text
    }

    /// Returns true if the operand shows the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    /// Appends a decimal digit; other characters are ignored
    pub fn append_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.operand_is_placeholder() {
            self.state.shown_text.clear();
        }
        self.state.shown_text.push(digit);
        self.state.expression_text.push(digit);
    }

    /// Appends `.` unless the operand already has one
    pub fn append_decimal_point(&mut self) {
        if self.is_error() || Constant::from_name(&self.state.shown_text).is_some() {
            self.state.shown_text = ZERO.to_string();
        }
        if self.state.shown_text.contains('.') {
            return;
        }
        self.state.shown_text.push('.');
        self.state.expression_text.push('.');
    }

    /// Appends a binary operator and starts a fresh operand
    pub fn apply_operator(&mut self, op: Operation) {
        if self.is_error() {
            return;
        }
        self.state.expression_text.push_str(op.symbol());
        self.reset_operand();
    }

    /// Opens a function call such as `sin(`
    pub fn apply_function_prefix(&mut self, func: Function) {
        if self.is_error() {
            return;
        }
        self.state.expression_text.push_str(func.name());
        self.state.expression_text.push('(');
        self.reset_operand();
    }

    /// Appends `^2` or `^3`; any other exponent is ignored
    pub fn apply_postfix_power(&mut self, exponent: u8) {
        if self.is_error() || !matches!(exponent, 2 | 3) {
            return;
        }
        self.state.expression_text.push('^');
        self.state.expression_text.push(char::from(b'0' + exponent));
    }

    /// Inserts π or e and shows its glyph
    pub fn insert_constant(&mut self, constant: Constant) {
        if self.is_error() {
            return;
        }
        self.state.expression_text.push_str(constant.glyph());
        self.state.shown_text = constant.glyph().to_string();
    }

    /// Appends `(` or `)`; other characters are ignored
    pub fn append_parenthesis(&mut self, paren: char) {
        if !matches!(paren, '(' | ')') {
            return;
        }
        self.state.expression_text.push(paren);
        self.reset_operand();
    }

    /// Flips the sign of the operand and wraps the expression in `(..) * -1`
    ///
    /// A `"0"` or error operand is left as shown; the expression is wrapped
    /// whenever it is non-empty.
    pub fn negate_current(&mut self) {
        let shown = self.state.shown_text.as_str();
        if shown != ZERO && shown != ERROR_SENTINEL {
            if let Some(value) = parse_display_number(shown) {
                self.state.shown_text = format_number(-value);
            }
        }
        if !self.state.expression_text.is_empty() {
            self.state.expression_text = format!("({}) * -1", self.state.expression_text);
        }
    }

    /// Removes the last character of the expression and rebuilds the operand
    pub fn delete_last(&mut self) {
        if self.is_error() {
            self.clear();
            return;
        }
        self.state.expression_text.pop();
        self.state.shown_text = trailing_operand(&self.state.expression_text);
    }

    /// Resets to `{"0", ""}`
    pub fn clear(&mut self) {
        self.state = DisplayState::new();
    }

    /// Sets both texts to `text`
    pub fn seed(&mut self, text: &str) {
        self.state = DisplayState::seeded(text);
    }

    /// Shows the error sentinel, keeping the expression
    pub fn show_error(&mut self) {
        self.state.shown_text = ERROR_SENTINEL.to_string();
    }

    /// Shows `text` as the operand and appends it to the expression
    pub fn append_value(&mut self, text: &str) {
        self.state.shown_text = text.to_string();
        self.state.expression_text.push_str(text);
    }

    fn operand_is_placeholder(&self) -> bool {
        let shown = self.state.shown_text.as_str();
        shown == ZERO || shown == ERROR_SENTINEL || Constant::from_name(shown).is_some()
    }

    fn reset_operand(&mut self) {
        self.state.shown_text = ZERO.to_string();
    }
}

/// Operand text implied by the end of `expression`
fn trailing_operand(expression: &str) -> String {
    let Some(last) = expression.chars().last() else {
        return ZERO.to_string();
    };
    if let Some(constant) = Constant::from_name(last.encode_utf8(&mut [0; 4])) {
        return constant.glyph().to_string();
    }

    let literal_start = expression
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, _)| i);
    let Some(start) = literal_start else {
        return ZERO.to_string();
    };

    let literal = suppress_leading_zeros(&expression[start..]);
    if is_signed(&expression[..start]) {
        format!("-{literal}")
    } else {
        literal
    }
}

/// Rewrites a typed literal the way digit entry would have shown it
fn suppress_leading_zeros(literal: &str) -> String {
    let mut rest = literal;
    while rest.len() > 1 && rest.starts_with('0') && !rest[1..].starts_with('.') {
        rest = &rest[1..];
    }
    if rest.starts_with('.') {
        format!("0{rest}")
    } else {
        rest.to_string()
    }
}

/// True if `prefix` ends in a unary minus
fn is_signed(prefix: &str) -> bool {
    let Some(before) = prefix.strip_suffix('-') else {
        return false;
    };
    match before.trim_end().chars().last() {
        None => true,
        Some(c) => c == '(' || Operation::from_char(c).is_some(),
    }
}
