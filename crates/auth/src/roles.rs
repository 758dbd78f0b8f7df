use serde::{Deserialize, Serialize};

/// Role of the signed-in actor, as supplied by the session provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Manager")]
    Manager,
    #[serde(rename = "Store Keeper")]
    StoreKeeper,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Manager, Role::StoreKeeper];

    /// Wire/display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::StoreKeeper => "Store Keeper",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_session_labels() {
        assert_eq!(serde_json::to_string(&Role::StoreKeeper).unwrap(), "\"Store Keeper\"");
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }
}
