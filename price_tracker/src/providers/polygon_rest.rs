//! Polygon.io REST aggregates (`/v2/aggs`) provider.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::PolygonProvider;
