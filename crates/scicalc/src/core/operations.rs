//! Arithmetic operators, named functions and constants
//!
//! Every primitive checks its own result so a non-finite value never leaks
//! into the rest of an evaluation.

use crate::core::{EvalError, EvalResult};

/// Binary operators accepted by the builder and the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Remainder (%), truncated like `f64 %`
    Modulo,
    /// Power (^)
    Power,
}

impl Operation {
    /// All operators, in keypad order
    pub const ALL: [Operation; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Modulo,
    ];

    /// Returns the evaluable token appended to the expression
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }

    /// Returns the glyph used on keypad buttons
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }

    /// Parses an operator character, accepting display glyphs too
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            '%' => Some(Self::Modulo),
            '^' => Some(Self::Power),
            _ => None,
        }
    }
}

/// Named functions that take one parenthesized argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
    /// Tangent (radians)
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
}

impl Function {
    /// All functions, in keypad order
    pub const ALL: [Function; 6] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
    ];

    /// Returns the name written into the expression
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }

    /// Returns the keypad label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sqrt => "√",
            other => other.name(),
        }
    }

    /// Looks up a function by its expression name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Applies the function to an argument
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log => x.log10(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
        }
    }
}

/// Named constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Returns the glyph shown as the operand (also the evaluable token)
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Looks up a constant by identifier (`π`, `pi`, `e`)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "π" | "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

/// Checked floating-point primitives used by the evaluator
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Applies a binary operation
    pub fn calculate(a: f64, b: f64, op: Operation) -> EvalResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
            Operation::Modulo => Self::modulo(a, b),
            Operation::Power => Self::power(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> EvalResult<f64> {
        Self::check_finite(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> EvalResult<f64> {
        Self::check_finite(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> EvalResult<f64> {
        Self::check_finite(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> EvalResult<f64> {
        if b == 0.0 {
            return Err(EvalError::invalid("division by zero"));
        }
        Self::check_finite(a / b)
    }

    /// Remainder: a % b
    pub fn modulo(a: f64, b: f64) -> EvalResult<f64> {
        if b == 0.0 {
            return Err(EvalError::invalid("remainder by zero"));
        }
        Self::check_finite(a % b)
    }

    /// Power: a ^ b
    pub fn power(a: f64, b: f64) -> EvalResult<f64> {
        Self::check_finite(a.powf(b))
    }

    /// Applies a named function
    pub fn function(func: Function, x: f64) -> EvalResult<f64> {
        Self::check_finite(func.apply(x))
            .map_err(|_| EvalError::invalid(format!("{}({x}) is undefined", func.name())))
    }

    fn check_finite(result: f64) -> EvalResult<f64> {
        if result.is_nan() {
            Err(EvalError::invalid("NaN"))
        } else if result.is_infinite() {
            Err(EvalError::invalid("result is infinite"))
        } else {
            Ok(result)
        }
    }
}
