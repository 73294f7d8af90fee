//! Translation between the client search API and Google Places Nearby Search.
//!
//! The core of the relay: validates and converts client queries into provider
//! parameters, and maps provider places into client results. All translation
//! functions are pure (no I/O).

pub mod client_types;
pub mod normalize;
pub mod places_types;
pub mod query;
