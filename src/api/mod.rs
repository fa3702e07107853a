pub mod client;
pub mod models;
pub mod shares;
pub mod xml;
