use time::Date;

use crate::ingredient::Ingredient;

impl Ingredient {
    /// Days from `today` until expiration; negative once expired
    pub fn days_until_expiry(&self, today: Date) -> Option<i64> {
        self.expiration_date
            .map(|date| (date - today).whole_days())
    }

    pub fn is_expired(&self, today: Date) -> bool {
        self.days_until_expiry(today).is_some_and(|days| days < 0)
    }
}

/// Ingredients expiring between `today` and `today + days` inclusive,
/// soonest first. Already expired items are excluded.
pub fn expiring_within(ingredients: &[Ingredient], today: Date, days: i64) -> Vec<&Ingredient> {
    let mut expiring: Vec<(i64, &Ingredient)> = ingredients
        .iter()
        .filter_map(|i| i.days_until_expiry(today).map(|d| (d, i)))
        .filter(|(d, _)| (0..=days).contains(d))
        .collect();

    expiring.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.key().cmp(&b.1.key())));
    expiring.into_iter().map(|(_, i)| i).collect()
}

/// Ingredients whose expiration date is before `today`
pub fn expired(ingredients: &[Ingredient], today: Date) -> Vec<&Ingredient> {
    ingredients.iter().filter(|i| i.is_expired(today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn pantry() -> Vec<Ingredient> {
        vec![
            Ingredient::new("milk", 1.0, "l").with_expiration(date!(2025 - 01 - 12)),
            Ingredient::new("yogurt", 500.0, "g").with_expiration(date!(2025 - 01 - 09)),
            Ingredient::new("cream", 200.0, "ml").with_expiration(date!(2025 - 01 - 10)),
            Ingredient::new("rice", 1.0, "kg"),
            Ingredient::new("cheese", 200.0, "g").with_expiration(date!(2025 - 02 - 01)),
        ]
    }

    #[test]
    fn test_days_until_expiry() {
        let today = date!(2025 - 01 - 10);
        let items = pantry();

        assert_eq!(items[0].days_until_expiry(today), Some(2));
        assert_eq!(items[1].days_until_expiry(today), Some(-1));
        assert_eq!(items[3].days_until_expiry(today), None);
        assert!(items[1].is_expired(today));
        assert!(!items[2].is_expired(today));
        assert!(!items[3].is_expired(today));
    }

    #[test]
    fn test_expiring_within_sorted_soonest_first() {
        let items = pantry();
        let names: Vec<_> = expiring_within(&items, date!(2025 - 01 - 10), 7)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();

        assert_eq!(names, vec!["cream", "milk"]);
    }

    #[test]
    fn test_expired() {
        let items = pantry();
        let names: Vec<_> = expired(&items, date!(2025 - 01 - 10))
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();

        assert_eq!(names, vec!["yogurt"]);
    }
}
