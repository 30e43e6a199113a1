pub mod taxonomy;
pub mod categorizer;
pub mod store;
