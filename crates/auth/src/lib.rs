//! `stockroom-auth`: pure view-gating boundary.
//!
//! The session provider authenticates; this crate only answers which views an
//! actor's role may open. Decoupled from rendering and storage.

pub mod authorize;
pub mod principal;
pub mod roles;

pub use authorize::{
    AccessError, View, authorize_view, can_access, effective_view, navigable_views,
};
pub use principal::Actor;
pub use roles::Role;
