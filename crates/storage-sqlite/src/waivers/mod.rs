pub mod model;
pub mod repository;

pub use model::WaiverTierDB;
pub use repository::WaiverTierRepository;
