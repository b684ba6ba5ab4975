//! Utility functions and helpers for the numcore library.

pub mod finite_difference;

pub use finite_difference::{first_derivative, second_derivative, step_size};
