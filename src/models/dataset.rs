//! The static reference dataset seeded into the remote store.
//!
//! This is the single source of truth for a seeding run: every run wipes
//! the store and recreates exactly this data. The dataset is built fresh
//! per call and never mutated.

use super::{Category, Customization, CustomizationKind, MenuItem};
use std::collections::HashSet;

/// The full reference dataset: categories, customizations, and menu items.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub customizations: Vec<Customization>,
    pub menu: Vec<MenuItem>,
}

impl Dataset {
    /// Returns the embedded reference dataset.
    pub fn reference() -> Self {
        use CustomizationKind::{Crust, Side, Size, Topping};

        let categories = vec![
            Category::new("Pizzas", "Stone-baked pizzas with fresh toppings"),
            Category::new("Burgers", "Flame-grilled beef and veggie burgers"),
            Category::new("Burritos", "Hand-rolled burritos with house salsa"),
            Category::new("Sandwiches", "Toasted sandwiches on fresh bread"),
            Category::new("Wraps", "Soft tortilla wraps, made to order"),
            Category::new("Bowls", "Grain and salad bowls with house dressings"),
        ];

        let customizations = vec![
            Customization::new("Extra Cheese", 1.50, Topping),
            Customization::new("Jalapenos", 0.75, Topping),
            Customization::new("Onions", 0.50, Topping),
            Customization::new("Olives", 0.75, Topping),
            Customization::new("Mushrooms", 1.00, Topping),
            Customization::new("Avocado", 1.75, Topping),
            Customization::new("Fries", 2.50, Side),
            Customization::new("Garlic Bread", 3.00, Side),
            Customization::new("Coleslaw", 2.00, Side),
            Customization::new("Potato Wedges", 2.75, Side),
            Customization::new("Large", 2.00, Size),
            Customization::new("Stuffed Crust", 2.50, Crust),
        ];

        let menu = vec![
            menu_item(
                "Classic Cheeseburger",
                "Beef patty, cheddar, lettuce, tomato and house sauce",
                "https://images.fastbite.dev/menu/classic-cheeseburger.png",
                8.99,
                4.5,
                550,
                25,
                "Burgers",
                &["Extra Cheese", "Onions", "Fries", "Large"],
            ),
            menu_item(
                "Pepperoni Pizza",
                "Tomato base, mozzarella and double pepperoni",
                "https://images.fastbite.dev/menu/pepperoni-pizza.png",
                12.99,
                4.7,
                760,
                30,
                "Pizzas",
                &["Extra Cheese", "Jalapenos", "Stuffed Crust", "Garlic Bread"],
            ),
            menu_item(
                "Bean Burrito",
                "Black beans, rice, pico de gallo and cheese",
                "https://images.fastbite.dev/menu/bean-burrito.png",
                7.49,
                4.2,
                480,
                18,
                "Burritos",
                &["Jalapenos", "Avocado", "Large"],
            ),
            menu_item(
                "BBQ Chicken Sandwich",
                "Pulled chicken in smoky BBQ sauce on a brioche bun",
                "https://images.fastbite.dev/menu/bbq-chicken-sandwich.png",
                9.49,
                4.4,
                610,
                32,
                "Sandwiches",
                &["Coleslaw", "Fries", "Onions"],
            ),
            menu_item(
                "Grilled Veggie Wrap",
                "Chargrilled peppers, courgette and hummus",
                "https://images.fastbite.dev/menu/grilled-veggie-wrap.png",
                6.99,
                4.1,
                390,
                12,
                "Wraps",
                &["Avocado", "Mushrooms", "Olives"],
            ),
            menu_item(
                "Buddha Bowl",
                "Quinoa, roasted chickpeas, greens and tahini dressing",
                "https://images.fastbite.dev/menu/buddha-bowl.png",
                10.49,
                4.6,
                520,
                20,
                "Bowls",
                &["Avocado", "Coleslaw"],
            ),
            menu_item(
                "Margherita Pizza",
                "Tomato, mozzarella and basil",
                "https://images.fastbite.dev/menu/margherita-pizza.png",
                11.49,
                4.5,
                680,
                26,
                "Pizzas",
                &["Extra Cheese", "Olives", "Stuffed Crust"],
            ),
            menu_item(
                "Double Bacon Burger",
                "Two beef patties, crispy bacon and burger sauce",
                "https://images.fastbite.dev/menu/double-bacon-burger.png",
                11.99,
                4.8,
                820,
                42,
                "Burgers",
                &["Extra Cheese", "Onions", "Potato Wedges", "Large"],
            ),
            menu_item(
                "Chicken Caesar Wrap",
                "Grilled chicken, romaine, parmesan and caesar dressing",
                "https://images.fastbite.dev/menu/chicken-caesar-wrap.png",
                8.49,
                4.3,
                450,
                28,
                "Wraps",
                &["Extra Cheese", "Large"],
            ),
            menu_item(
                "Steak Burrito Bowl",
                "Grilled steak, rice, beans and charred corn salsa",
                "https://images.fastbite.dev/menu/steak-burrito-bowl.png",
                12.49,
                4.7,
                650,
                38,
                "Bowls",
                &["Jalapenos", "Avocado", "Potato Wedges"],
            ),
        ];

        Self {
            categories,
            customizations,
            menu,
        }
    }

    /// Menu items whose category name does not appear in `categories`.
    pub fn unresolved_category_refs(&self) -> Vec<(&MenuItem, &str)> {
        let known: HashSet<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
        self.menu
            .iter()
            .filter(|item| !known.contains(item.category_name.as_str()))
            .map(|item| (item, item.category_name.as_str()))
            .collect()
    }

    /// Number of link documents a successful run will create: one per
    /// (menu item, customization name) pair whose name resolves.
    pub fn resolvable_link_count(&self) -> usize {
        let known: HashSet<&str> = self
            .customizations
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        self.menu
            .iter()
            .flat_map(|item| item.customizations.iter())
            .filter(|name| known.contains(name.as_str()))
            .count()
    }
}

#[allow(clippy::too_many_arguments)]
fn menu_item(
    name: &str,
    description: &str,
    image_url: &str,
    price: f64,
    rating: f64,
    calories: u32,
    protein: u32,
    category_name: &str,
    customizations: &[&str],
) -> MenuItem {
    MenuItem {
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        price,
        rating,
        calories,
        protein,
        category_name: category_name.to_string(),
        customizations: customizations.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dataset_counts() {
        let dataset = Dataset::reference();
        assert_eq!(dataset.categories.len(), 6);
        assert_eq!(dataset.customizations.len(), 12);
        assert_eq!(dataset.menu.len(), 10);
    }

    #[test]
    fn test_every_category_reference_resolves() {
        let dataset = Dataset::reference();
        assert!(dataset.unresolved_category_refs().is_empty());
    }

    #[test]
    fn test_every_customization_reference_resolves() {
        let dataset = Dataset::reference();
        let total: usize = dataset.menu.iter().map(|i| i.customizations.len()).sum();
        assert_eq!(dataset.resolvable_link_count(), total);
    }

    #[test]
    fn test_names_are_unique() {
        let dataset = Dataset::reference();
        let categories: HashSet<&str> =
            dataset.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(categories.len(), dataset.categories.len());

        let customizations: HashSet<&str> = dataset
            .customizations
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(customizations.len(), dataset.customizations.len());

        let menu: HashSet<&str> = dataset.menu.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(menu.len(), dataset.menu.len());
    }
}
