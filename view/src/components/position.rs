use crate::{components::check_finite, Component, ComponentError};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Component for Position {
    const NAME: &'static str = "position";

    fn validate(&self) -> Result<(), ComponentError> {
        check_finite(Self::NAME, "x", &[self.x])?;
        check_finite(Self::NAME, "y", &[self.y])?;
        check_finite(Self::NAME, "z", &[self.z])
    }
}
