use std::num::NonZeroU32;

use larder_shared::{Recipe, Requirement};

/// Seasonings grow slower than the rest of the recipe when scaling up
const SEASONINGS: &[&str] = &[
    "salt",
    "pepper",
    "black pepper",
    "garlic powder",
    "onion powder",
    "paprika",
    "cumin",
    "oregano",
    "basil",
    "thyme",
    "rosemary",
    "sage",
    "cayenne",
    "chili powder",
    "vanilla extract",
];

/// Leavening scales linearly up to double, then at half rate
const LEAVENING_AGENTS: &[&str] = &["baking powder", "baking soda", "yeast", "cream of tartar"];

fn scale_quantity(requirement: &Requirement, factor: f64) -> f64 {
    let name = requirement.key();
    let quantity = requirement.quantity;

    if SEASONINGS.contains(&name.as_str()) {
        if factor > 1.0 {
            quantity * (1.0 + (factor - 1.0) * 0.8)
        } else {
            quantity * factor
        }
    } else if LEAVENING_AGENTS.contains(&name.as_str()) {
        if factor <= 2.0 {
            quantity * factor
        } else {
            quantity * (2.0 + (factor - 2.0) * 0.5)
        }
    } else {
        quantity * factor
    }
}

/// A copy of `recipe` with every requirement scaled to `servings`.
pub fn scale_recipe(recipe: &Recipe, servings: NonZeroU32) -> Recipe {
    let factor = f64::from(servings.get()) / f64::from(recipe.servings.max(1));

    let requirements = recipe
        .requirements
        .iter()
        .map(|r| Requirement {
            quantity: scale_quantity(r, factor),
            ..r.clone()
        })
        .collect();

    Recipe {
        name: format!("{} (scaled for {})", recipe.name, servings),
        requirements,
        servings: servings.get(),
        ..recipe.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bread() -> Recipe {
        let mut recipe = Recipe::new(
            "Bread",
            vec![
                Requirement::new("flour", 500.0, "g"),
                Requirement::new("salt", 10.0, "g"),
                Requirement::new("yeast", 7.0, "g"),
            ],
        );
        recipe.servings = 4;
        recipe
    }

    fn servings(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_scale_up_doubles_regular_ingredients() {
        let scaled = scale_recipe(&bread(), servings(8));

        assert_eq!(scaled.name, "Bread (scaled for 8)");
        assert_eq!(scaled.servings, 8);
        assert_eq!(scaled.requirements[0].quantity, 1000.0);
        // Seasoning: 10 * (1 + 1 * 0.8)
        assert!((scaled.requirements[1].quantity - 18.0).abs() < 1e-9);
        // Leavening is linear up to 2x
        assert_eq!(scaled.requirements[2].quantity, 14.0);
    }

    #[test]
    fn test_scale_up_beyond_double_slows_leavening() {
        let scaled = scale_recipe(&bread(), servings(16));

        assert_eq!(scaled.requirements[0].quantity, 2000.0);
        // 7 * (2 + 2 * 0.5)
        assert_eq!(scaled.requirements[2].quantity, 21.0);
    }

    #[test]
    fn test_scale_down_is_linear() {
        let scaled = scale_recipe(&bread(), servings(2));

        assert_eq!(scaled.requirements[0].quantity, 250.0);
        assert_eq!(scaled.requirements[1].quantity, 5.0);
        assert_eq!(scaled.requirements[2].quantity, 3.5);
    }

    #[test]
    fn test_scale_keeps_order_and_units() {
        let original = bread();
        let scaled = scale_recipe(&original, servings(6));

        let names: Vec<_> = scaled.requirements.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["flour", "salt", "yeast"]);
        assert!(scaled.requirements.iter().all(|r| r.unit == "g"));
        assert_eq!(scaled.instructions, original.instructions);
    }
}
