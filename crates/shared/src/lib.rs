//! Wire types shared between the console controller and its REST backend.

pub mod domain;
pub mod error;
pub mod protocol;
