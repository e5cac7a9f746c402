//! Input validation for stock and order operations.

mod validate;

pub use validate::*;
