pub mod entity_builder;
pub mod test_transport;

pub use entity_builder::TestEntityBuilder;
pub use recording_diagnostics::{RecordingDiagnostics, Report};
pub use test_transport::{OutboundRequest, TestTransport};
