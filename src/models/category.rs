use serde::{Deserialize, Serialize};

/// A menu category (e.g. "Pizzas", "Burgers").
///
/// Identity is assigned by the remote store on creation; during seeding a
/// category is referenced by name, afterwards by its generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
