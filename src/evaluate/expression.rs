//! Formula parsing and evaluation.
//!
//! This module compiles user-entered math expressions into a small AST that
//! the algorithm components evaluate repeatedly without re-parsing. The
//! supported vocabulary is fixed: `+ - * /`, a closed set of named functions,
//! and the constants `pi` and `e`. Exponentiation is spelled `pow(x, y)`;
//! `^` is not an operator.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::recognize,
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formula parsing or evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Failed to parse formula: {message}")]
    ParseError { message: String },

    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("Domain violation: {message}")]
    DomainError { message: String },
}

/// Result type for formula evaluation
pub type ExprResult<T> = Result<T, ExpressionError>;

/// Formula AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Constant number
    Number(f64),

    /// Variable reference
    Variable(String),

    /// Unary operations
    Unary(UnaryOp, Box<Expression>),

    /// Binary operations
    Binary(BinaryOp, Box<Expression>, Box<Expression>),

    /// Call to a named builtin function
    Call(String, Vec<Expression>),
}

/// Unary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
}

/// Binary operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    /// Addition (+)
    Add,

    /// Subtraction (-)
    Sub,

    /// Multiplication (*)
    Mul,

    /// Division (/)
    Div,
}

/// Context for formula evaluation, providing variable values
pub trait EvaluationContext {
    /// Get the value of a variable
    fn get_variable(&self, name: &str) -> ExprResult<f64>;
}

impl EvaluationContext for HashMap<String, f64> {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        self.get(name)
            .copied()
            .ok_or_else(|| ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
    }
}

impl Expression {
    /// Parse a formula from a string
    pub fn parse(input: &str) -> ExprResult<Self> {
        match expr_parser(input.trim()) {
            Ok((remainder, expr)) => {
                // Make sure the entire input was consumed
                if remainder.trim().is_empty() {
                    Ok(expr)
                } else {
                    Err(ExpressionError::ParseError {
                        message: format!("Unexpected trailing characters: '{}'", remainder),
                    })
                }
            }
            Err(e) => Err(ExpressionError::ParseError {
                message: format!("{:?}", e),
            }),
        }
    }

    /// Evaluate the formula with the given context.
    ///
    /// The constants `pi` and `e` are resolved before variable lookup and
    /// cannot be shadowed.
    pub fn evaluate<C: EvaluationContext>(&self, context: &C) -> ExprResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),

            Self::Variable(name) => match name.as_str() {
                "pi" => Ok(std::f64::consts::PI),
                "e" => Ok(std::f64::consts::E),
                _ => context.get_variable(name),
            },

            Self::Unary(op, expr) => {
                let value = expr.evaluate(context)?;
                match op {
                    UnaryOp::Neg => Ok(-value),
                }
            }

            Self::Binary(op, left, right) => {
                let lhs = left.evaluate(context)?;
                let rhs = right.evaluate(context)?;

                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            Err(ExpressionError::DivisionByZero)
                        } else {
                            Ok(lhs / rhs)
                        }
                    }
                }
            }

            Self::Call(name, args) => {
                // Evaluate all arguments
                let mut evaluated_args = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated_args.push(arg.evaluate(context)?);
                }

                call_builtin(name, &evaluated_args)
            }
        }
    }

    /// Find all variable names used in the formula, excluding the constants
    /// `pi` and `e`.
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.retain(|v| v != "pi" && v != "e");
        vars.sort();
        vars.dedup();
        vars
    }

    /// Recursively collect all variable names used in the formula
    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Self::Number(_) => {}

            Self::Variable(name) => {
                vars.push(name.clone());
            }

            Self::Unary(_, expr) => {
                expr.collect_variables(vars);
            }

            Self::Binary(_, left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }

            Self::Call(_, args) => {
                for arg in args {
                    arg.collect_variables(vars);
                }
            }
        }
    }
}

/// Check that a single-argument builtin got exactly one argument.
fn one_arg(name: &str, args: &[f64]) -> ExprResult<f64> {
    if args.len() != 1 {
        return Err(ExpressionError::InvalidOperation {
            message: format!("{}() requires 1 argument, got {}", name, args.len()),
        });
    }
    Ok(args[0])
}

/// Dispatch a call to the closed set of supported builtins.
fn call_builtin(name: &str, args: &[f64]) -> ExprResult<f64> {
    match name {
        "pow" => {
            if args.len() != 2 {
                return Err(ExpressionError::InvalidOperation {
                    message: format!("pow() requires 2 arguments, got {}", args.len()),
                });
            }
            Ok(args[0].powf(args[1]))
        }
        "sin" => Ok(one_arg(name, args)?.sin()),
        "cos" => Ok(one_arg(name, args)?.cos()),
        "tan" => Ok(one_arg(name, args)?.tan()),
        "asin" => {
            let x = one_arg(name, args)?;
            if !(-1.0..=1.0).contains(&x) {
                return Err(ExpressionError::DomainError {
                    message: format!("asin() argument {} outside [-1, 1]", x),
                });
            }
            Ok(x.asin())
        }
        "acos" => {
            let x = one_arg(name, args)?;
            if !(-1.0..=1.0).contains(&x) {
                return Err(ExpressionError::DomainError {
                    message: format!("acos() argument {} outside [-1, 1]", x),
                });
            }
            Ok(x.acos())
        }
        "atan" => Ok(one_arg(name, args)?.atan()),
        "sinh" => Ok(one_arg(name, args)?.sinh()),
        "cosh" => Ok(one_arg(name, args)?.cosh()),
        "tanh" => Ok(one_arg(name, args)?.tanh()),
        "exp" => Ok(one_arg(name, args)?.exp()),
        "sqrt" => {
            let x = one_arg(name, args)?;
            if x < 0.0 {
                return Err(ExpressionError::DomainError {
                    message: format!("sqrt() of negative number {}", x),
                });
            }
            Ok(x.sqrt())
        }
        "abs" => Ok(one_arg(name, args)?.abs()),
        "log" => {
            // log(x) is the natural logarithm; log(x, base) changes the base.
            if args.is_empty() || args.len() > 2 {
                return Err(ExpressionError::InvalidOperation {
                    message: format!("log() requires 1 or 2 arguments, got {}", args.len()),
                });
            }
            let x = args[0];
            if x <= 0.0 {
                return Err(ExpressionError::DomainError {
                    message: format!("log() of non-positive number {}", x),
                });
            }
            if args.len() == 2 {
                let base = args[1];
                if base <= 0.0 || base == 1.0 {
                    return Err(ExpressionError::DomainError {
                        message: format!("log() base {} is not a valid base", base),
                    });
                }
                Ok(x.log(base))
            } else {
                Ok(x.ln())
            }
        }
        "log10" => {
            let x = one_arg(name, args)?;
            if x <= 0.0 {
                return Err(ExpressionError::DomainError {
                    message: format!("log10() of non-positive number {}", x),
                });
            }
            Ok(x.log10())
        }
        _ => Err(ExpressionError::UndefinedFunction {
            name: name.to_string(),
        }),
    }
}

// Parser functions using nom

/// Parse an identifier (variable or function name)
fn identifier(input: &str) -> IResult<&str, String> {
    let mut parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));

    let (input, matched) = parser.parse(input)?;
    Ok((input, matched.to_string()))
}

/// Parse a comma-separated list of expressions (for function arguments)
fn args_list(input: &str) -> IResult<&str, Vec<Expression>> {
    let (input, first) = expr_parser(input)?;
    let mut res = vec![first];

    let mut remainder = input;
    loop {
        let mut comma_parser = delimited(
            multispace0::<&str, nom::error::Error<&str>>,
            char::<&str, nom::error::Error<&str>>(','),
            multispace0::<&str, nom::error::Error<&str>>,
        );

        // Try to parse a comma
        match comma_parser.parse(remainder) {
            Ok((after_comma, _)) => {
                // Try to parse an expression after the comma
                match expr_parser(after_comma) {
                    Ok((after_expr, expr)) => {
                        res.push(expr);
                        remainder = after_expr;
                    }
                    Err(_) => break,
                }
            }
            Err(_) => break,
        }
    }

    Ok((remainder, res))
}

/// Parse a function call
fn function_call(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0::<&str, nom::error::Error<&str>>.parse(input)?;
    let (input, _) = char::<&str, nom::error::Error<&str>>('(').parse(input)?;
    let (input, _) = multispace0::<&str, nom::error::Error<&str>>.parse(input)?;

    // Handle empty arguments case
    let mut close_paren_parser = char::<&str, nom::error::Error<&str>>(')');
    if let Ok((input, _)) = close_paren_parser.parse(input) {
        return Ok((input, Expression::Call(name, vec![])));
    }

    // Handle non-empty arguments case
    let (input, args) = args_list(input)?;
    let (input, _) = multispace0.parse(input)?;

    let (input, _) = close_paren_parser.parse(input)?;

    Ok((input, Expression::Call(name, args)))
}

/// Parse a number
fn number(input: &str) -> IResult<&str, Expression> {
    let (input, num) = double(input)?;
    Ok((input, Expression::Number(num)))
}

/// Parse a variable reference
fn variable(input: &str) -> IResult<&str, Expression> {
    let (input, var_name) = identifier(input)?;
    Ok((input, Expression::Variable(var_name)))
}

/// Parse a parenthesized expression
fn parens(input: &str) -> IResult<&str, Expression> {
    let (input, _) = char('(').parse(input)?;
    let (input, _) = multispace0.parse(input)?;
    let (input, expr) = expr_parser(input)?;
    let (input, _) = multispace0.parse(input)?;
    let (input, _) = char::<_, nom::error::Error<_>>(')').parse(input)?;
    Ok((input, expr))
}

/// Parse a primary expression (number, function call, variable, or
/// parenthesized expression)
fn primary(input: &str) -> IResult<&str, Expression> {
    if let Ok(result) = number(input) {
        return Ok(result);
    }

    if let Ok(result) = function_call(input) {
        return Ok(result);
    }

    if let Ok(result) = variable(input) {
        return Ok(result);
    }

    parens(input)
}

/// Parse a unary expression (-expr)
fn unary(input: &str) -> IResult<&str, Expression> {
    let (input, _) = multispace0.parse(input)?;

    // Try to parse a negated expression
    let mut neg_parser = preceded(char('-'), primary);
    match neg_parser.parse(input) {
        Ok((remaining, expr)) => Ok((remaining, Expression::Unary(UnaryOp::Neg, Box::new(expr)))),
        Err(_) => primary(input),
    }
}

/// Parse a multiplicative expression (expr * expr, expr / expr),
/// left-associative
fn term(input: &str) -> IResult<&str, Expression> {
    let (mut input, mut acc) = unary(input)?;

    loop {
        let (rest, _) = multispace0::<&str, nom::error::Error<&str>>.parse(input)?;

        let op = if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('*').parse(rest) {
            Some((rest, BinaryOp::Mul))
        } else if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('/').parse(rest) {
            Some((rest, BinaryOp::Div))
        } else {
            None
        };

        match op {
            Some((rest, op)) => {
                let (rest, _) = multispace0::<&str, nom::error::Error<&str>>.parse(rest)?;
                let (rest, rhs) = unary(rest)?;
                acc = Expression::Binary(op, Box::new(acc), Box::new(rhs));
                input = rest;
            }
            None => return Ok((input, acc)),
        }
    }
}

/// Parse an additive expression (expr + expr, expr - expr), left-associative
fn expr_parser(input: &str) -> IResult<&str, Expression> {
    let (input, _) = multispace0.parse(input)?;
    let (mut input, mut acc) = term(input)?;

    loop {
        let (rest, _) = multispace0::<&str, nom::error::Error<&str>>.parse(input)?;

        let op = if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('+').parse(rest) {
            Some((rest, BinaryOp::Add))
        } else if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('-').parse(rest) {
            Some((rest, BinaryOp::Sub))
        } else {
            None
        };

        match op {
            Some((rest, op)) => {
                let (rest, _) = multispace0::<&str, nom::error::Error<&str>>.parse(rest)?;
                let (rest, rhs) = term(rest)?;
                acc = Expression::Binary(op, Box::new(acc), Box::new(rhs));
                input = rest;
            }
            None => return Ok((input, acc)),
        }
    }
}
