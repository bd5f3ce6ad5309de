use std::fmt;

use thiserror::Error;

use crate::{
    types::EntityId,
    world::{component::error::ComponentError, observer::ObserverHandle},
};

/// Coarse classification of a [`ViewError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    NotAuthorized,
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::NotAuthorized => "NotAuthorized",
            ErrorKind::InvalidArgument => "InvalidArgument",
        };
        f.write_str(name)
    }
}

/// Errors returned by View, EntityTable and AuthorityTracker operations.
///
/// A failed operation never leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Entity {entity} does not exist in the view")]
    EntityNotFound { entity: EntityId },

    #[error("Entity {entity} already exists in the view")]
    EntityAlreadyExists { entity: EntityId },

    #[error("Entity {entity} has no {component} component")]
    ComponentNotFound {
        entity: EntityId,
        component: &'static str,
    },

    #[error("Entity {entity} already has a {component} component")]
    ComponentAlreadyExists {
        entity: EntityId,
        component: &'static str,
    },

    #[error("Component {component} is not registered with this View. Must call `add_component()` on the Registry before building the View")]
    ComponentNotRegistered { component: &'static str },

    #[error("The {component} component of entity {entity} is already delegated")]
    AlreadyDelegated {
        entity: EntityId,
        component: &'static str,
    },

    #[error("The {component} component of entity {entity} is not delegated")]
    NotDelegated {
        entity: EntityId,
        component: &'static str,
    },

    #[error("No authority to request an update of the {component} component of entity {entity}")]
    NotAuthorized {
        entity: EntityId,
        component: &'static str,
    },

    #[error("Invalid {component} payload for entity {entity}: {source}")]
    InvalidPayload {
        entity: EntityId,
        component: &'static str,
        source: ComponentError,
    },

    #[error("Entity {entity} is confirmed, not a pending reservation")]
    EntityNotPending { entity: EntityId },

    #[error("Observer {handle:?} is not registered")]
    ObserverNotFound { handle: ObserverHandle },
}

impl ViewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViewError::EntityNotFound { .. }
            | ViewError::ComponentNotFound { .. }
            | ViewError::ComponentNotRegistered { .. }
            | ViewError::NotDelegated { .. }
            | ViewError::ObserverNotFound { .. } => ErrorKind::NotFound,
            ViewError::EntityAlreadyExists { .. }
            | ViewError::ComponentAlreadyExists { .. }
            | ViewError::AlreadyDelegated { .. } => ErrorKind::AlreadyExists,
            ViewError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            ViewError::InvalidPayload { .. } | ViewError::EntityNotPending { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }

    /// The entity the failed operation referred to, if any
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            ViewError::EntityNotFound { entity }
            | ViewError::EntityAlreadyExists { entity }
            | ViewError::ComponentNotFound { entity, .. }
            | ViewError::ComponentAlreadyExists { entity, .. }
            | ViewError::AlreadyDelegated { entity, .. }
            | ViewError::NotDelegated { entity, .. }
            | ViewError::NotAuthorized { entity, .. }
            | ViewError::InvalidPayload { entity, .. }
            | ViewError::EntityNotPending { entity } => Some(*entity),
            ViewError::ObserverNotFound { handle } => Some(handle.entity()),
            ViewError::ComponentNotRegistered { .. } => None,
        }
    }

    /// The name of the component kind the failed operation referred to, if any
    pub fn component(&self) -> Option<&'static str> {
        match self {
            ViewError::ComponentNotFound { component, .. }
            | ViewError::ComponentAlreadyExists { component, .. }
            | ViewError::ComponentNotRegistered { component }
            | ViewError::AlreadyDelegated { component, .. }
            | ViewError::NotDelegated { component, .. }
            | ViewError::NotAuthorized { component, .. }
            | ViewError::InvalidPayload { component, .. } => Some(*component),
            ViewError::EntityNotFound { .. }
            | ViewError::EntityAlreadyExists { .. }
            | ViewError::EntityNotPending { .. }
            | ViewError::ObserverNotFound { .. } => None,
        }
    }
}
