pub mod component;
pub mod component_kinds;
pub mod error;
