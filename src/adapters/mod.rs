// Adapters layer: the front ends that feed the shared prediction handler.

pub mod batch;
pub mod dashboard;
pub mod form;
pub mod server;
