pub mod extraction;
pub(crate) mod health;
pub mod plates;

pub use health::health_check;
