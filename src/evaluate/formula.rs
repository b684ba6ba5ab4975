//! Compiled formula wrappers.
//!
//! A [`Formula`] is an [`Expression`] compiled once from user input and bound
//! to a fixed variable set, so search and quadrature loops can evaluate it
//! millions of times without re-parsing. Unknown variables are rejected at
//! compile time, not at the millionth evaluation.

use crate::error::Result;
use crate::evaluate::expression::{EvaluationContext, ExprResult, Expression, ExpressionError};
use crate::evaluate::{BivariateFunction, ScalarFunction};

/// Evaluation context over a single bound variable, allocation-free.
struct ScalarScope {
    x: f64,
}

impl EvaluationContext for ScalarScope {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        if name == "x" {
            Ok(self.x)
        } else {
            Err(ExpressionError::UndefinedVariable {
                name: name.to_string(),
            })
        }
    }
}

/// Evaluation context over the pair `(x, y)`, allocation-free.
struct BivariateScope {
    x: f64,
    y: f64,
}

impl EvaluationContext for BivariateScope {
    fn get_variable(&self, name: &str) -> ExprResult<f64> {
        match name {
            "x" => Ok(self.x),
            "y" => Ok(self.y),
            _ => Err(ExpressionError::UndefinedVariable {
                name: name.to_string(),
            }),
        }
    }
}

/// A formula compiled from a string, bound to `x` or to `(x, y)`.
#[derive(Debug, Clone)]
pub struct Formula {
    ast: Expression,
    source: String,
}

impl Formula {
    /// Compile a scalar formula over the variable `x`.
    ///
    /// # Arguments
    ///
    /// * `source` - The formula text, e.g. `"pow(x, 2) - 3 * x"`
    ///
    /// # Returns
    ///
    /// * The compiled formula, or a parse/validation error
    pub fn scalar(source: &str) -> Result<Self> {
        Self::compile(source, &["x"])
    }

    /// Compile a bivariate formula over the variables `x` and `y`.
    pub fn bivariate(source: &str) -> Result<Self> {
        Self::compile(source, &["x", "y"])
    }

    fn compile(source: &str, allowed: &[&str]) -> Result<Self> {
        let ast = Expression::parse(source)?;

        for var in ast.variables() {
            if !allowed.contains(&var.as_str()) {
                return Err(ExpressionError::UndefinedVariable { name: var }.into());
            }
        }

        Ok(Self {
            ast,
            source: source.to_string(),
        })
    }

    /// The original formula text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate at `x`.
    pub fn eval_scalar(&self, x: f64) -> Result<f64> {
        Ok(self.ast.evaluate(&ScalarScope { x })?)
    }

    /// Evaluate at `(x, y)`.
    pub fn eval_bivariate(&self, x: f64, y: f64) -> Result<f64> {
        Ok(self.ast.evaluate(&BivariateScope { x, y })?)
    }
}

impl ScalarFunction for Formula {
    fn evaluate(&self, x: f64) -> Result<f64> {
        self.eval_scalar(x)
    }
}

impl BivariateFunction for Formula {
    fn evaluate(&self, x: f64, y: f64) -> Result<f64> {
        self.eval_bivariate(x, y)
    }
}
