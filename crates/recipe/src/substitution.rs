use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use larder_shared::normalize_name;

/// Ingredients that can stand in one-for-one for another ingredient
static SUBSTITUTIONS: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        let mut map: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        map.insert(
            "milk",
            &["buttermilk", "almond milk", "coconut milk", "soy milk"],
        );
        map.insert("butter", &["margarine", "coconut oil"]);
        map.insert("egg", &["flax egg"]);
        map.insert(
            "all-purpose flour",
            &["whole wheat flour", "almond flour", "oat flour"],
        );
        map.insert("sugar", &["brown sugar"]);
        map.insert("yogurt", &["sour cream", "buttermilk", "cottage cheese"]);
        map
    });

/// Names acceptable in place of `name`, always including `name` itself.
///
/// Names are trimmed and lowercased; ingredients without an entry resolve
/// to just themselves.
pub fn substitutes_for(name: &str) -> BTreeSet<String> {
    let key = normalize_name(name);
    let mut names: BTreeSet<String> = SUBSTITUTIONS
        .get(key.as_str())
        .into_iter()
        .flat_map(|subs| subs.iter().map(|s| s.to_string()))
        .collect();
    names.insert(key);
    names
}
