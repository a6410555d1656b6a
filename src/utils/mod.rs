//! Utility functions for short code generation and password hashing.

pub mod codegen;
pub mod password;
