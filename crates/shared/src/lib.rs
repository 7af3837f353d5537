//! Types shared between the roster core and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
