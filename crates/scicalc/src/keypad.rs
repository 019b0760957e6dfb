//! Keypad model shared by every input surface
//!
//! A keypad is a grid of buttons; a button may span several columns. The
//! same [`KeypadAction`] values drive the session whether they come from a
//! mouse click, a key press or a scripted driver.

use crate::core::{Constant, Function, Operation};

/// Everything a keypad button or key press can ask the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert a binary operator
    Operator(Operation),
    /// Open a function call
    Function(Function),
    /// Append `^2`
    Square,
    /// Append `^3`
    Cube,
    /// Insert π or e
    Constant(Constant),
    /// Open parenthesis
    OpenParen,
    /// Close parenthesis
    CloseParen,
    /// Flip the sign of the operand
    Negate,
    /// Delete the last character
    Delete,
    /// Reset the display
    Clear,
    /// Evaluate the expression
    Equals,
    /// MC
    MemoryClear,
    /// MR
    MemoryRecall,
    /// MS
    MemoryStore,
    /// M+
    MemoryAdd,
    /// M−
    MemorySubtract,
    /// Show or hide the history panel
    ToggleHistory,
    /// Show or hide the scientific keypad
    ToggleScientific,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Function(func) => func.label().to_string(),
            Self::Square => "x²".to_string(),
            Self::Cube => "x³".to_string(),
            Self::Constant(c) => c.glyph().to_string(),
            Self::OpenParen => "(".to_string(),
            Self::CloseParen => ")".to_string(),
            Self::Negate => "±".to_string(),
            Self::Delete => "⌫".to_string(),
            Self::Clear => "C".to_string(),
            Self::Equals => "=".to_string(),
            Self::MemoryClear => "MC".to_string(),
            Self::MemoryRecall => "MR".to_string(),
            Self::MemoryStore => "MS".to_string(),
            Self::MemoryAdd => "M+".to_string(),
            Self::MemorySubtract => "M−".to_string(),
            Self::ToggleHistory => "Hist".to_string(),
            Self::ToggleScientific => "Sci".to_string(),
        }
    }

    /// Returns true for the memory register actions
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(
            self,
            Self::MemoryClear
                | Self::MemoryRecall
                | Self::MemoryStore
                | Self::MemoryAdd
                | Self::MemorySubtract
        )
    }
}

/// Maps a keyboard key name to an action
///
/// Digits, `.`, the six operators, parentheses, `Enter`/`=`, `Backspace`
/// and `Escape`. Anything else is unmapped.
///
/// ```
/// use scicalc::keypad::{key_to_action, KeypadAction};
///
/// assert_eq!(key_to_action("7"), Some(KeypadAction::Digit(7)));
/// assert_eq!(key_to_action("Enter"), Some(KeypadAction::Equals));
/// assert_eq!(key_to_action("x"), None);
/// ```
#[must_use]
pub fn key_to_action(key: &str) -> Option<KeypadAction> {
    match key {
        "Enter" | "=" => return Some(KeypadAction::Equals),
        "Backspace" => return Some(KeypadAction::Delete),
        "Escape" => return Some(KeypadAction::Clear),
        _ => {}
    }

    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    match c {
        '0'..='9' => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(KeypadAction::Digit),
        '.' => Some(KeypadAction::Decimal),
        '(' => Some(KeypadAction::OpenParen),
        ')' => Some(KeypadAction::CloseParen),
        '+' | '-' | '*' | '/' | '^' | '%' => Operation::from_char(c).map(KeypadAction::Operator),
        _ => None,
    }
}

/// A single button placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-width button
    #[must_use]
    pub const fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self::wide(action, row, col, 1)
    }

    /// Creates a button covering `span` columns
    #[must_use]
    pub const fn wide(action: KeypadAction, row: usize, col: usize, span: usize) -> Self {
        Self {
            action,
            row,
            col,
            span,
        }
    }

    /// Returns true if this button covers the given cell
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }
}

/// Grid of keypad buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::standard()
    }
}

impl Keypad {
    /// Builds a keypad from rows of actions; `None` widens the previous button
    fn from_rows(rows: &[&[Option<KeypadAction>]]) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut buttons: Vec<KeypadButtonDef> = Vec::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(action) => buttons.push(KeypadButtonDef::new(*action, row, col)),
                    None => {
                        if let Some(last) = buttons.last_mut().filter(|b| b.row == row) {
                            last.span += 1;
                        }
                    }
                }
            }
        }
        Self {
            buttons,
            rows: rows.len(),
            cols,
        }
    }

    /// Digits, arithmetic and editing
    /// ```text
    /// [ C ] [ ⌫ ] [ % ] [ ÷ ]
    /// [ 7 ] [ 8 ] [ 9 ] [ × ]
    /// [ 4 ] [ 5 ] [ 6 ] [ − ]
    /// [ 1 ] [ 2 ] [ 3 ] [ + ]
    /// [    0    ] [ . ] [ = ]
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        use KeypadAction::{Clear, Decimal, Delete, Digit, Equals, Operator};
        Self::from_rows(&[
            &[
                Some(Clear),
                Some(Delete),
                Some(Operator(Operation::Modulo)),
                Some(Operator(Operation::Divide)),
            ],
            &[
                Some(Digit(7)),
                Some(Digit(8)),
                Some(Digit(9)),
                Some(Operator(Operation::Multiply)),
            ],
            &[
                Some(Digit(4)),
                Some(Digit(5)),
                Some(Digit(6)),
                Some(Operator(Operation::Subtract)),
            ],
            &[
                Some(Digit(1)),
                Some(Digit(2)),
                Some(Digit(3)),
                Some(Operator(Operation::Add)),
            ],
            &[Some(Digit(0)), None, Some(Decimal), Some(Equals)],
        ])
    }

    /// Functions, constants, powers and grouping
    /// ```text
    /// [ sin ] [ cos ] [ tan ] [ π ]
    /// [ log ] [ ln  ] [ e   ] [ √ ]
    /// [ x²  ] [ x³  ] [ ^   ] [ ( ]
    /// [ )   ] [ %   ] [ ±   ]
    /// ```
    #[must_use]
    pub fn scientific() -> Self {
        use KeypadAction::{CloseParen, Cube, Negate, OpenParen, Operator, Square};
        Self::from_rows(&[
            &[
                Some(KeypadAction::Function(Function::Sin)),
                Some(KeypadAction::Function(Function::Cos)),
                Some(KeypadAction::Function(Function::Tan)),
                Some(KeypadAction::Constant(Constant::Pi)),
            ],
            &[
                Some(KeypadAction::Function(Function::Log)),
                Some(KeypadAction::Function(Function::Ln)),
                Some(KeypadAction::Constant(Constant::E)),
                Some(KeypadAction::Function(Function::Sqrt)),
            ],
            &[
                Some(Square),
                Some(Cube),
                Some(Operator(Operation::Power)),
                Some(OpenParen),
            ],
            &[
                Some(CloseParen),
                Some(Operator(Operation::Modulo)),
                Some(Negate),
            ],
        ])
    }

    /// `MC MR MS M+ M−`
    #[must_use]
    pub fn memory() -> Self {
        use KeypadAction::{MemoryAdd, MemoryClear, MemoryRecall, MemoryStore, MemorySubtract};
        Self::from_rows(&[&[
            Some(MemoryClear),
            Some(MemoryRecall),
            Some(MemoryStore),
            Some(MemoryAdd),
            Some(MemorySubtract),
        ]])
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds the button performing an action
    #[must_use]
    pub fn find_button(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }
}
