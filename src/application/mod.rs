// Application layer - Use cases and the ports they depend on
pub mod batch_processor;
pub mod dashboard_store;
pub mod documentation_service;
pub mod input_resolver;
