//! Calendar values produced by the generator

pub mod date;
