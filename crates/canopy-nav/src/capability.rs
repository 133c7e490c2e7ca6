//! Provider capabilities.
//!
//! An engine is composed from the subset of capabilities it supports
//! instead of inheriting them from a provider base class. Each operation
//! declares the capability it needs in its descriptor; the engine refuses
//! operations whose capability is absent.

/// One unit of provider functionality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Single-item access: get, set, clear, exists.
    Item,
    /// Child management: enumerate, create, remove, rename, copy.
    Container,
    /// Path navigation: move, path composition, container tests.
    Navigation,
    /// Drive lifecycle: mount and unmount.
    Drive,
    /// Item attribute access: get, set, clear properties.
    Property,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Container => write!(f, "container"),
            Self::Navigation => write!(f, "navigation"),
            Self::Drive => write!(f, "drive"),
            Self::Property => write!(f, "property"),
        }
    }
}

/// The set of capabilities an engine supports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: Vec<Capability>,
}

impl CapabilitySet {
    /// A set supporting every capability.
    pub fn all() -> Self {
        Self {
            capabilities: vec![
                Capability::Item,
                Capability::Container,
                Capability::Navigation,
                Capability::Drive,
                Capability::Property,
            ],
        }
    }

    /// A set supporting exactly the given capabilities.
    pub fn of(capabilities: &[Capability]) -> Self {
        let mut capabilities = capabilities.to_vec();
        capabilities.dedup();
        Self { capabilities }
    }

    /// `true` when the set contains `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_supports_everything() {
        let set = CapabilitySet::all();
        assert!(set.supports(Capability::Item));
        assert!(set.supports(Capability::Container));
        assert!(set.supports(Capability::Navigation));
        assert!(set.supports(Capability::Drive));
        assert!(set.supports(Capability::Property));
    }

    #[test]
    fn partial_set() {
        let set = CapabilitySet::of(&[Capability::Item, Capability::Drive]);
        assert!(set.supports(Capability::Item));
        assert!(!set.supports(Capability::Container));
        assert!(!set.supports(Capability::Navigation));
    }
}
