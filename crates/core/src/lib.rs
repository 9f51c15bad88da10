pub mod normalize;
pub mod params;
pub mod service;
pub mod workspace;

pub use normalize::{normalize, normalize_counted};
pub use service::LensService;
pub use workspace::init_workspace;
