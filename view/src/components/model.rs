use crate::{components::check_finite, Component, ComponentError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawableType {
    Cube,
    Quad,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    Color([f32; 3]),
    /// Name of a texture asset, resolved by the renderer
    Texture(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub drawable: DrawableType,
    pub material: Material,
    pub visible: bool,
}

impl Model {
    pub fn new(drawable: DrawableType, material: Material) -> Self {
        Self {
            drawable,
            material,
            visible: true,
        }
    }
}

impl Component for Model {
    const NAME: &'static str = "model";

    fn validate(&self) -> Result<(), ComponentError> {
        match &self.material {
            Material::Color(color) => check_finite(Self::NAME, "material", &color.map(f64::from)),
            Material::Texture(name) if name.trim().is_empty() => Err(ComponentError::invalid_field(
                Self::NAME,
                "material",
                "texture name must not be empty",
            )),
            Material::Texture(_) => Ok(()),
        }
    }
}
