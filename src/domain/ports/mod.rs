//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the remote JSON API and the response cache). Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

mod macros;
mod post_cache;
mod post_gateway;

pub(crate) use macros::define_port_error;
pub use post_cache::{PostCache, PostCacheError};
pub use post_gateway::{FixturePostGateway, PostGateway, PostGatewayError};

#[cfg(test)]
pub use post_cache::MockPostCache;
#[cfg(test)]
pub use post_gateway::MockPostGateway;
