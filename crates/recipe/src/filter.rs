use larder_shared::{Difficulty, Recipe};

/// Narrow the recipe collection before matching
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecipeFilter {
    /// Upper bound on prep + cook time, in minutes
    pub max_total_time: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.max_total_time
            .is_none_or(|max| recipe.total_time() <= max)
            && self.difficulty.is_none_or(|d| recipe.difficulty == d)
    }

    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        recipes.iter().filter(|r| self.matches(r)).collect()
    }
}
