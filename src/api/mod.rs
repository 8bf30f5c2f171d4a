//! HTTP surface
//!
//! A thin axum layer over the collection loaders, the favorites store,
//! and the catalog. Handlers translate loader snapshots and catalog
//! responses into JSON; collection and favorites logic lives below.

pub mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
