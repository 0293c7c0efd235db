mod plates;

pub use plates::PlateRepository;
