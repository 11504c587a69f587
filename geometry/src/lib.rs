//! Geometry primitives for pointer input and the pure math gesture classification is built on.

mod gesture;
mod line;
mod point;

pub use gesture::*;
pub use line::*;
pub use point::*;
