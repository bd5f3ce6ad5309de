use std::{any::Any, collections::HashMap, rc::Rc};

/// Role held by the object driving camera and input
pub const CONTROLLER_ROLE: &str = "controller";
/// Role held by the scene that renders the View's drawables and lights
pub const SCENE_ROLE: &str = "scene";
/// Role held by the shared drawables that models are rendered with
pub const DRAWABLES_ROLE: &str = "drawables";

/// RoleTable - named singleton references scoped to one View.
///
/// Each role name maps to at most one object. The objects are shared, not
/// owned: whoever sets a role keeps its own `Rc`.
pub struct RoleTable {
    roles: HashMap<String, Rc<dyn Any>>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    /// Binds `target` to the role, returning the previous holder
    pub fn set_role<T: Any>(&mut self, name: &str, target: Rc<T>) -> Option<Rc<dyn Any>> {
        self.roles.insert(name.to_string(), target)
    }

    /// The role's holder, if it is set and is a `T`
    pub fn role<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        let target = self.roles.get(name)?;
        target.clone().downcast::<T>().ok()
    }

    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    pub fn clear_role(&mut self, name: &str) -> Option<Rc<dyn Any>> {
        self.roles.remove(name)
    }

    pub fn role_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::new()
    }
}
