pub mod aggregate;
pub mod config;
pub mod enrich;
pub mod filter;
pub mod load;
pub mod output;
