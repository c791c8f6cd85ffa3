/// Default planetary constants for Earth, used when the parameter file
/// does not override them.
pub const GRAVITY: f64 = 9.81;
pub const LAYER_DEPTH: f64 = 8000.0;
pub const EARTH_RADIUS: f64 = 6.371e6;
/// 2*pi over the sidereal day
pub const EARTH_ROTATION_RATE: f64 = 7.292e-5;
