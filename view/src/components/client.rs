use crate::Component;

/// Marks the entity driven by a connected client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Client;

impl Component for Client {
    const NAME: &'static str = "client";
}
