//! Signal output drivers.

pub mod chime;
pub mod screen;
pub mod torch;
