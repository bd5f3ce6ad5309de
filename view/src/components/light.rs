use crate::{components::check_finite, Component, ComponentError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightType {
    Spot,
    Point,
}

/// Shadow-casting light attached to an entity's position.
///
/// `width` and `height` are the shadow map dimensions and `sample_count`
/// the number of filtering samples, all of which must be positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub light_type: LightType,
    pub width: i32,
    pub height: i32,
    pub sample_count: i32,
    pub ambient_factor: f32,
    pub exponential_factor: f32,
    pub color: [f32; 3],
}

impl Light {
    pub fn point(width: i32, height: i32, color: [f32; 3]) -> Self {
        Self {
            light_type: LightType::Point,
            width,
            height,
            sample_count: 1,
            ambient_factor: 0.01,
            exponential_factor: 80.0,
            color,
        }
    }
}

impl Component for Light {
    const NAME: &'static str = "light";

    fn validate(&self) -> Result<(), ComponentError> {
        if self.width <= 0 {
            return Err(ComponentError::invalid_field(Self::NAME, "width", "must be positive"));
        }
        if self.height <= 0 {
            return Err(ComponentError::invalid_field(Self::NAME, "height", "must be positive"));
        }
        if self.sample_count <= 0 {
            return Err(ComponentError::invalid_field(
                Self::NAME,
                "sample_count",
                "must be positive",
            ));
        }
        if !(self.ambient_factor >= 0.0 && self.ambient_factor.is_finite()) {
            return Err(ComponentError::invalid_field(
                Self::NAME,
                "ambient_factor",
                "must be finite and not negative",
            ));
        }
        if !(self.exponential_factor >= 0.0 && self.exponential_factor.is_finite()) {
            return Err(ComponentError::invalid_field(
                Self::NAME,
                "exponential_factor",
                "must be finite and not negative",
            ));
        }
        let color = self.color.map(f64::from);
        check_finite(Self::NAME, "color", &color)
    }
}
