pub mod errors;
pub mod grids;
pub mod interpolation;
pub mod serialization;
