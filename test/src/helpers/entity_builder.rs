use worker_view::{Component, EntityId, View, ViewError};

use super::TestTransport;

type Step = Box<dyn FnOnce(&mut View, EntityId, &TestTransport) -> Result<(), ViewError>>;

/// Fluent builder for populating a View with a test entity
pub struct TestEntityBuilder {
    id: EntityId,
    steps: Vec<Step>,
}

impl TestEntityBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            id: EntityId::new(id),
            steps: Vec::new(),
        }
    }

    /// Add a confirmed component
    pub fn with<C: Component>(mut self, component: C) -> Self {
        self.steps.push(Box::new(
            move |view: &mut View, entity: EntityId, _: &TestTransport| view.add(entity, component),
        ));
        self
    }

    /// Add a confirmed component and delegate it to the transport
    pub fn delegated<C: Component>(mut self, component: C) -> Self {
        self.steps.push(Box::new(
            move |view: &mut View, entity: EntityId, transport: &TestTransport| {
                view.add(entity, component)?;
                view.delegate::<C, _>(entity, transport.handler::<C>())
            },
        ));
        self
    }

    /// Build the entity into the View
    pub fn build(self, view: &mut View, transport: &TestTransport) -> Result<EntityId, ViewError> {
        if !view.has_entity(self.id) {
            view.add_entity(self.id)?;
        }
        for step in self.steps {
            step(view, self.id, transport)?;
        }
        Ok(self.id)
    }
}

impl Default for TestEntityBuilder {
    fn default() -> Self {
        Self::new(1)
    }
}
