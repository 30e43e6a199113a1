pub mod types;
pub mod config;
pub mod corpus;
pub mod error;
pub mod stats;
