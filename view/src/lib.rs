//! # Worker View
//! A process-local cache of entity/component state replicated from a
//! simulation backend, with per-component authority tracking and a bridge
//! that turns authorized local mutations into outbound update requests.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod components;
mod diagnostics;
mod registry;
mod roles;
mod types;
mod view_config;
mod world;

pub use components::{
    client::Client,
    light::{Light, LightType},
    model::{DrawableType, Material, Model},
    position::Position,
    DefaultComponentsPlugin,
};
pub use diagnostics::{DiagnosticsSink, LogDiagnostics};
pub use registry::{Registry, RegistryError, RegistryPlugin};
pub use roles::{RoleTable, CONTROLLER_ROLE, DRAWABLES_ROLE, SCENE_ROLE};
pub use types::EntityId;
pub use view_config::ViewConfig;
pub use world::{
    component::{
        component::{Component, DynComponent},
        component_kinds::{ComponentKind, ComponentKinds},
        error::ComponentError,
    },
    delegation::{
        authority_state::AuthorityState, authority_tracker::AuthorityTracker,
        update_request::UpdateRequestHandler,
    },
    entity::entity_table::EntityTable,
    error::{ErrorKind, ViewError},
    observer::{ComponentEvent, ObserverHandle},
    view::View,
};
