// ── Opaque remote identifiers ──
//
// The remote issues every id; we never parse or construct them. Separate
// newtypes keep a workspace id from being passed where a source id goes.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

opaque_id!(
    /// Tenant scope for sources and destinations.
    WorkspaceId
);

opaque_id!(
    /// Connector type id, resolved from a human-readable definition name.
    DefinitionId
);

opaque_id!(
    /// Id of a configured source, destination, or connection.
    EntityId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = EntityId::from("8f1c");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"8f1c\""));
    }

    #[test]
    fn display_matches_inner_value() {
        assert_eq!(WorkspaceId::from("ws-1").to_string(), "ws-1");
    }
}
