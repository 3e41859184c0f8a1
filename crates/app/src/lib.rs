//! Product data access: records, persistence and the service boundary used by
//! the HTTP layer.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
