use std::{any::Any, fmt::Debug};

use crate::world::component::{component_kinds::ComponentKind, error::ComponentError};

/// A kind of state that can be attached to an entity in the View.
///
/// Every kind carries a stable `NAME`, used for diagnostics and for registry
/// lookups, and may reject malformed payloads by overriding `validate()`.
pub trait Component: Any + Clone + Debug + PartialEq {
    const NAME: &'static str;

    fn kind() -> ComponentKind {
        ComponentKind::of::<Self>()
    }

    /// Checks the payload before it is stored or forwarded as an update request
    fn validate(&self) -> Result<(), ComponentError> {
        Ok(())
    }
}

/// Object-safe view of a [`Component`], used where values of different kinds
/// are stored side by side.
pub trait DynComponent: Debug {
    fn component_kind(&self) -> ComponentKind;
    fn component_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<C: Component> DynComponent for C {
    fn component_kind(&self) -> ComponentKind {
        <C as Component>::kind()
    }

    fn component_name(&self) -> &'static str {
        C::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl dyn DynComponent {
    pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
        self.as_any().downcast_ref::<C>()
    }

    pub fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.as_any_mut().downcast_mut::<C>()
    }

    pub(crate) fn unbox<C: Component>(self: Box<Self>) -> C {
        match self.into_any().downcast::<C>() {
            Ok(component) => *component,
            Err(_) => unreachable!("component stored under the kind of a different type"),
        }
    }
}
