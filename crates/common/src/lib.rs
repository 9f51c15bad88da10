pub mod constants;
pub mod error;
pub mod raw;
pub mod record;
pub mod traits;
pub mod types;
