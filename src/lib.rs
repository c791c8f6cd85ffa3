
pub mod spectral;

pub mod grid;
pub mod planet;
pub mod topography;

pub mod constants;
pub mod error;
pub mod parameters;
pub mod utils;
