//! Product Domain Concerns

pub mod products;
