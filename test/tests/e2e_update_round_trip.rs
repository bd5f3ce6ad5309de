//! End-to-end update flow: a backend-confirmed component is delegated, a
//! local write goes out as an update request, and only the backend's
//! acknowledgment changes what the View stores.

use worker_view::{EntityId, ErrorKind, Position, View};
use worker_view_test::{
    assert_component_eq, assert_delegated, assert_error_kind, assert_not_delegated,
    RecordingDiagnostics, TestTransport,
};

fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn e2e_add_delegate_request_update_undelegate() {
    init_logger();

    let diagnostics = RecordingDiagnostics::new();
    let mut view = View::default().with_diagnostics(diagnostics.clone());
    let transport = TestTransport::new();
    let entity = EntityId::new(42);

    // Backend adds the entity's position
    view.add(entity, Position::new(0.0, 0.0, 0.0)).unwrap();
    assert_not_delegated!(view, Position, entity);

    // Backend grants authority
    view.delegate::<Position, _>(entity, transport.handler::<Position>())
        .unwrap();
    assert_delegated!(view, Position, entity);

    // Local write goes out exactly once, stored value unchanged
    view.request_update(entity, Position::new(1.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(
        transport.sent::<Position>(),
        vec![(entity, Position::new(1.0, 0.0, 0.0))]
    );
    assert_component_eq!(view, entity, Position::new(0.0, 0.0, 0.0));

    // Backend acknowledges with a regular update
    assert_eq!(transport.acknowledge_all(&mut view), Ok(1));
    assert_component_eq!(view, entity, Position::new(1.0, 0.0, 0.0));
    assert_eq!(transport.pending(), 0);

    // Backend revokes authority
    view.undelegate::<Position>(entity).unwrap();
    assert_not_delegated!(view, Position, entity);
    assert_eq!(transport.handler_count(), 0);

    assert_error_kind!(
        view.request_update(entity, Position::new(2.0, 0.0, 0.0)),
        ErrorKind::NotAuthorized
    );
    assert_component_eq!(view, entity, Position::new(1.0, 0.0, 0.0));
    assert_eq!(transport.pending(), 0);

    assert_eq!(diagnostics.operations(), vec!["request_update"]);
    assert_eq!(diagnostics.kinds(), vec![ErrorKind::NotAuthorized]);
}

#[test]
fn e2e_lost_request_leaves_view_unchanged() {
    init_logger();

    let mut view = View::default();
    let transport = TestTransport::new();
    let entity = EntityId::new(7);

    view.add(entity, Position::new(5.0, 5.0, 5.0)).unwrap();
    view.delegate::<Position, _>(entity, transport.handler::<Position>())
        .unwrap();

    view.request_update(entity, Position::new(6.0, 5.0, 5.0))
        .unwrap();
    view.request_update(entity, Position::new(7.0, 5.0, 5.0))
        .unwrap();
    assert_eq!(transport.drop_all(), 2);

    assert_component_eq!(view, entity, Position::new(5.0, 5.0, 5.0));
    assert_delegated!(view, Position, entity);
}

#[test]
fn e2e_requests_acknowledged_in_order() {
    init_logger();

    let mut view = View::default();
    let transport = TestTransport::new();
    let entity = EntityId::new(3);

    view.add(entity, Position::default()).unwrap();
    view.delegate::<Position, _>(entity, transport.handler::<Position>())
        .unwrap();

    for step in 1..=3 {
        view.request_update(entity, Position::new(f64::from(step), 0.0, 0.0))
            .unwrap();
    }

    let first = transport.next_request().unwrap();
    assert_eq!(first.entity, entity);
    assert_eq!(first.component, "position");
    assert_eq!(first.value::<Position>(), Some(&Position::new(1.0, 0.0, 0.0)));
    first.acknowledge(&mut view).unwrap();
    assert_component_eq!(view, entity, Position::new(1.0, 0.0, 0.0));

    assert_eq!(transport.acknowledge_all(&mut view), Ok(2));
    assert_component_eq!(view, entity, Position::new(3.0, 0.0, 0.0));
}

#[test]
fn e2e_request_in_flight_when_authority_revoked() {
    init_logger();

    let mut view = View::default();
    let transport = TestTransport::new();
    let entity = EntityId::new(11);

    view.add(entity, Position::default()).unwrap();
    view.delegate::<Position, _>(entity, transport.handler::<Position>())
        .unwrap();
    view.request_update(entity, Position::new(1.0, 1.0, 1.0))
        .unwrap();

    // Undelegating cannot recall a request already handed to the transport
    view.undelegate::<Position>(entity).unwrap();
    assert_eq!(transport.pending(), 1);

    // The backend still confirms it
    assert_eq!(transport.acknowledge_all(&mut view), Ok(1));
    assert_component_eq!(view, entity, Position::new(1.0, 1.0, 1.0));
    assert_not_delegated!(view, Position, entity);
}

#[test]
fn e2e_acknowledgment_after_removal_is_rejected() {
    init_logger();

    let diagnostics = RecordingDiagnostics::new();
    let mut view = View::default().with_diagnostics(diagnostics.clone());
    let transport = TestTransport::new();
    let entity = EntityId::new(12);

    view.add(entity, Position::default()).unwrap();
    view.delegate::<Position, _>(entity, transport.handler::<Position>())
        .unwrap();
    view.request_update(entity, Position::new(1.0, 0.0, 0.0))
        .unwrap();
    view.remove_entity(entity).unwrap();

    assert_error_kind!(transport.acknowledge_all(&mut view), ErrorKind::NotFound);
    assert!(!view.has_entity(entity), "A late update must not recreate the entity");
    assert_eq!(diagnostics.operations(), vec!["update"]);
}
