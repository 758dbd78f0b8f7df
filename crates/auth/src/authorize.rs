use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Actor, Role};

/// Top-level views of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Products,
}

impl View {
    pub const ALL: [View; 2] = [View::Dashboard, View::Products];

    /// Text key of the navigation entry.
    pub fn text_key(&self) -> &'static str {
        match self {
            View::Dashboard => "navigation.dashboard",
            View::Products => "navigation.products",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("forbidden: role '{role}' cannot open the {view:?} view")]
    Forbidden { role: Role, view: View },
}

/// Whether `role` may open `view`.
///
/// Aggregate metrics (the dashboard) are for managers only; every role may
/// open the product list.
pub fn can_access(role: Role, view: View) -> bool {
    match view {
        View::Dashboard => role == Role::Manager,
        View::Products => true,
    }
}

/// The view actually shown for a requested one: the request if allowed,
/// otherwise the product list.
pub fn effective_view(role: Role, requested: View) -> View {
    if can_access(role, requested) {
        requested
    } else {
        View::Products
    }
}

/// Views listed in the navigation bar for `role`, in display order.
pub fn navigable_views(role: Role) -> Vec<View> {
    View::ALL
        .into_iter()
        .filter(|view| can_access(role, *view))
        .collect()
}

/// Policy check at the view boundary.
///
/// - No IO
/// - No panics
pub fn authorize_view(actor: &Actor, view: View) -> Result<(), AccessError> {
    if can_access(actor.role, view) {
        Ok(())
    } else {
        tracing::debug!(role = %actor.role, ?view, "view access denied");
        Err(AccessError::Forbidden {
            role: actor.role,
            view,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_truth_table() {
        assert!(can_access(Role::Manager, View::Dashboard));
        assert!(can_access(Role::Manager, View::Products));
        assert!(!can_access(Role::StoreKeeper, View::Dashboard));
        assert!(can_access(Role::StoreKeeper, View::Products));
    }

    #[test]
    fn store_keepers_always_land_on_products() {
        for requested in View::ALL {
            assert_eq!(effective_view(Role::StoreKeeper, requested), View::Products);
        }
    }

    #[test]
    fn managers_get_what_they_ask_for() {
        for requested in View::ALL {
            assert_eq!(effective_view(Role::Manager, requested), requested);
        }
    }

    #[test]
    fn effective_view_is_always_accessible() {
        for role in Role::ALL {
            for requested in View::ALL {
                assert!(can_access(role, effective_view(role, requested)));
            }
        }
    }

    #[test]
    fn navigation_lists_only_accessible_views() {
        assert_eq!(navigable_views(Role::Manager), vec![View::Dashboard, View::Products]);
        assert_eq!(navigable_views(Role::StoreKeeper), vec![View::Products]);
    }

    #[test]
    fn authorize_view_reports_forbidden() {
        let keeper = Actor::new("Sam Keeper", Role::StoreKeeper);
        assert_eq!(
            authorize_view(&keeper, View::Dashboard),
            Err(AccessError::Forbidden {
                role: Role::StoreKeeper,
                view: View::Dashboard,
            })
        );
        assert!(authorize_view(&keeper, View::Products).is_ok());
    }
}
