pub mod page;
pub mod chunked;
pub mod cache;
