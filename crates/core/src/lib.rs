#![forbid(unsafe_code)]

pub mod assemble;
pub mod model;
pub mod row;
