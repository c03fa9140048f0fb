// Adapters layer: concrete implementations for external systems.

pub mod rest_store;

pub use rest_store::RestStore;
