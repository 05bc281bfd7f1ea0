/// Human readable name for an entity, useful when logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// The entity's name
    pub name: String,
}

impl Info {
    /// Create a new `Info`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
