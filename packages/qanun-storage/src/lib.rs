//! Storage layer: Postgres slice store, pgvector nearest-neighbour index,
//! and the collaborator traits the retrieval core is written against.

pub mod db;
pub mod schema;
pub mod slices;
pub mod store;
pub mod vector;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
