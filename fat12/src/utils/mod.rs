//! Small decoding helpers shared across layers

pub mod datetime;
pub mod string;
