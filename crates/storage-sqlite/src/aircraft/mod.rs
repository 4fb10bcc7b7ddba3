pub mod model;
pub mod repository;

pub use model::AircraftTypeDB;
pub use repository::AircraftRepository;
