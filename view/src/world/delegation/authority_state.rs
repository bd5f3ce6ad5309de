/// Authority the local process holds over one (entity, component) pair
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthorityState {
    /// Updates may only arrive from the backend
    #[default]
    Undelegated,
    /// The local process may originate update requests
    Delegated,
}

impl AuthorityState {
    pub fn is_delegated(&self) -> bool {
        *self == AuthorityState::Delegated
    }
}

