//! Registry state

/// Observable registry state
///
/// A registry cycles between the two states for its whole lifetime; there is
/// no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// No connections registered
    Empty,

    /// At least one connection registered
    Populated,
}

impl RegistryState {
    /// State for a registry holding `len` connections
    pub fn for_len(len: usize) -> Self {
        if len == 0 {
            RegistryState::Empty
        } else {
            RegistryState::Populated
        }
    }

    /// Check if `pick()` and checked iteration are valid in this state
    pub fn accepts_queries(&self) -> bool {
        matches!(self, RegistryState::Populated)
    }
}

impl std::fmt::Display for RegistryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Populated => write!(f, "populated"),
        }
    }
}
