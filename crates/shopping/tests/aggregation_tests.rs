use larder_shared::{Ingredient, Recipe, Requirement, DEFAULT_CATEGORY};
use larder_shopping::{aggregate, aggregate_with, AggregateOptions, ShoppingItem};

fn recipe(name: &str, requirements: &[(&str, f64, &str)]) -> Recipe {
    Recipe::new(
        name,
        requirements
            .iter()
            .map(|(n, q, u)| Requirement::new(*n, *q, *u))
            .collect(),
    )
}

fn find<'a>(items: &'a [ShoppingItem], name: &str) -> &'a ShoppingItem {
    items
        .iter()
        .find(|i| i.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| panic!("{name} should be on the list"))
}

/// Full aggregation flow over three recipes with overlapping ingredients
#[test]
fn test_full_aggregation_flow() {
    let recipes = vec![
        recipe(
            "Chicken Tikka Masala",
            &[
                ("Chicken Breast", 2.0, "lbs"),
                ("Onions", 1.0, "whole"),
                ("Olive Oil", 2.0, "tbsp"),
            ],
        ),
        recipe(
            "Chicken Stir Fry",
            &[
                // Case-insensitive name, compatible unit
                ("chicken breast", 1.0, "lb"),
                // Volume can't merge into the count line
                ("Onions", 0.5, "cup"),
                ("Olive Oil", 1.0, "tablespoon"),
            ],
        ),
        recipe(
            "Rice Pudding",
            &[("Milk", 1.0, "cup"), ("Rice", 200.0, "g"), ("Butter", 30.0, "g")],
        ),
    ];
    let owned = vec![
        Ingredient::new("olive oil", 10.0, "ml").with_category("pantry"),
        Ingredient::new("almond milk", 100.0, "ml").with_category("dairy"),
        Ingredient::new("rice", 1.0, "kg").with_category("pantry"),
        Ingredient::new("chicken breast", 0.0, "g").with_category("meat"),
    ];

    let list = aggregate(&recipes, &owned).unwrap();

    let meat = list.category("meat").unwrap();
    let chicken = find(meat, "chicken breast");
    assert_eq!(chicken.unit, "lbs");
    assert!((chicken.quantity - 3.0).abs() < 1e-9);

    let onions: Vec<_> = list
        .category(DEFAULT_CATEGORY)
        .unwrap()
        .iter()
        .filter(|i| i.name == "Onions")
        .collect();
    assert_eq!(onions.len(), 2, "count and volume onions stay separate");

    // 2 tbsp short by 10 ml, then 1 tbsp short by 10 ml, merged into tbsp
    let pantry = list.category("pantry").unwrap();
    let oil = find(pantry, "olive oil");
    assert_eq!(oil.unit, "tbsp");
    let expected = (2.0 * 14.787 - 10.0) / 14.787 + (14.787 - 10.0) / 14.787;
    assert!((oil.quantity - expected).abs() < 1e-9);

    // Almond milk covers part of the cup; the line stays uncategorized
    // because milk itself isn't owned
    let milk = find(list.category(DEFAULT_CATEGORY).unwrap(), "milk");
    assert_eq!(milk.unit, "cup");
    assert!((milk.quantity - (1.0 - 100.0 / 236.588)).abs() < 1e-9);

    // Rice is covered
    assert!(pantry.iter().all(|i| i.name != "Rice"));
}

#[test]
fn test_every_missing_item_appears_in_exactly_one_category() {
    let recipes = vec![
        recipe("Pancakes", &[("flour", 200.0, "g"), ("egg", 2.0, ""), ("milk", 300.0, "ml")]),
        recipe("Crepes", &[("flour", 150.0, "g"), ("egg", 3.0, ""), ("sugar", 20.0, "g")]),
    ];
    let owned = vec![
        Ingredient::new("egg", 1.0, "").with_category("dairy"),
        Ingredient::new("flour", 100.0, "g").with_category("baking"),
    ];

    let list = aggregate(&recipes, &owned).unwrap();

    let mut seen = Vec::new();
    for (category, items) in list.iter() {
        for item in items {
            seen.push((item.name.to_lowercase(), category.to_string()));
        }
    }
    seen.sort();
    assert_eq!(
        seen,
        vec![
            ("egg".to_string(), "dairy".to_string()),
            ("flour".to_string(), "baking".to_string()),
            ("milk".to_string(), DEFAULT_CATEGORY.to_string()),
            ("sugar".to_string(), DEFAULT_CATEGORY.to_string()),
        ]
    );

    // Each recipe reads the full stock: (2 - 1) + (3 - 1) eggs, (200 - 100) + (150 - 100) g flour
    assert_eq!(find(list.category("dairy").unwrap(), "egg").quantity, 3.0);
    assert_eq!(find(list.category("baking").unwrap(), "flour").quantity, 150.0);
}

#[test]
fn test_all_owned_gives_empty_list() {
    let recipes = vec![recipe("Toast", &[("bread", 2.0, "slices")])];
    let owned = vec![Ingredient::new("Bread", 4.0, "slices")];

    let list = aggregate(&recipes, &owned).unwrap();

    assert!(list.is_empty());
    assert_eq!(list.summary().total_items, 0);
}

#[test]
fn test_guessed_categories_never_override_inventory() {
    let recipes = vec![recipe("Soup", &[("carrot", 4.0, ""), ("celery", 2.0, "")])];
    let owned = vec![Ingredient::new("carrot", 1.0, "").with_category("garden")];
    let options = AggregateOptions {
        guess_categories: true,
        ..Default::default()
    };

    let list = aggregate_with(&recipes, &owned, &options).unwrap();

    assert_eq!(find(list.category("garden").unwrap(), "carrot").quantity, 3.0);
    assert_eq!(find(list.category("vegetables").unwrap(), "celery").quantity, 2.0);
}

#[test]
fn test_shopping_list_serializes_by_category() {
    let recipes = vec![recipe("Tea", &[("tea", 2.0, "")])];

    let list = aggregate(&recipes, &[]).unwrap();
    let json = serde_json::to_value(&list).unwrap();

    assert_eq!(json[DEFAULT_CATEGORY][0]["name"], "tea");
    assert_eq!(json[DEFAULT_CATEGORY][0]["quantity"], 2.0);
}
