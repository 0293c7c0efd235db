mod plate;
mod seed;

pub use plate::*;
pub use seed::*;
