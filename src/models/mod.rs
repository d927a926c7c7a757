mod category;
mod customization;
mod dataset;
mod menu_item;

pub use category::Category;
pub use customization::{Customization, CustomizationKind};
pub use dataset::Dataset;
pub use menu_item::MenuItem;
