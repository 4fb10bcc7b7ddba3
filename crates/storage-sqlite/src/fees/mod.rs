pub mod model;
pub mod repository;

pub use model::{FeeRuleDB, FeeRuleOverrideDB};
pub use repository::FeeRuleRepository;
