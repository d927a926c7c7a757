use serde::{Deserialize, Serialize};

/// A menu item from the reference dataset.
///
/// `image_url` points at the upstream source image; seeding re-hosts the
/// image in the store's file bucket and writes the hosted URL into the
/// created document. `category_name` and `customizations` reference other
/// dataset entries by name and are resolved to store identifiers during
/// seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub rating: f64,
    pub calories: u32,
    pub protein: u32,
    pub category_name: String,
    #[serde(default)]
    pub customizations: Vec<String>,
}
