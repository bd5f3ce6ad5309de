pub mod authority_state;
pub mod authority_tracker;
pub mod update_request;
