pub mod component;
pub mod delegation;
pub mod entity;
pub mod error;
pub mod observer;
pub mod view;
