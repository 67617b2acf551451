/// Commands a strategy may issue to the vehicle it protects.
pub trait Vehicle {
    /// Stop horizontal motion and hold the current position.
    fn brake(&mut self);

    /// Give control back to the mission after a brake.
    fn release(&mut self);
}

impl<V: Vehicle + ?Sized> Vehicle for &mut V {
    fn brake(&mut self) {
        (**self).brake();
    }

    fn release(&mut self) {
        (**self).release();
    }
}
