//! Quiz domain: catalog data, scoring/progression engine, result
//! calculation, and progress persistence.

pub mod catalog;
pub mod data;
pub mod engine;
pub mod result;
pub mod session;
pub mod storage;
