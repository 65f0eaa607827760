//! HTTP front end for the wiki.
//!
//! Requests go through a single dispatcher which matches the path against
//! [`routes::ROUTES`], validates the page title, and hands a [`Title`] to one
//! of the [`handlers`]. Handlers never see an unvalidated path segment.
//!
//! [`Title`]: flatwiki_engine::Title

pub mod context;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;

pub use context::{AppContext, StartupError};
pub use error::WikiError;
pub use logging::log_builder;
pub use routes::{Dispatch, ROUTES, Route, RouteError, RouteKind, resolve};
pub use server::{serve, wiki_router};
