use std::{cell::Cell, rc::Rc};

use tactile_geometry::{Point, Vector};

/// Supplies the origin of the element gestures are recognized on, in the same coordinate space as
/// the pointer samples. Queried once per session when it starts.
pub trait OffsetProvider {
    fn element_offset(&self) -> Vector;
}

/// A fixed offset.
impl OffsetProvider for Point {
    fn element_offset(&self) -> Vector {
        *self
    }
}

/// An offset the host updates while the element moves.
impl OffsetProvider for Rc<Cell<Point>> {
    fn element_offset(&self) -> Vector {
        self.get()
    }
}
