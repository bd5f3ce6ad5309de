pub mod helpers;

pub use helpers::*;
pub use test_registry::{Health, TestComponentsPlugin, TestRegistry};
