pub mod client;

pub use client::{MoralisClient, MoralisSettings};
