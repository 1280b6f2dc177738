pub mod error;
pub mod fetch;
pub mod filter;
pub mod flatten;
pub mod keys;
pub mod models;
pub mod render;
pub mod server;
pub mod sort;
pub mod view;
