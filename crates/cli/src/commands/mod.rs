pub mod configure;
pub mod helpers;
pub mod nft;
pub mod wallet;
