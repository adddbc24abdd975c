pub mod error;
pub mod filter;
pub mod matching;
pub mod scaling;
pub mod substitution;

pub use error::{MatchError, MatchResult};
pub use filter::RecipeFilter;
pub use matching::{
    find_matches, match_indexed, match_recipe, InventoryIndex, MatchReport, MissingItem,
    UnitWarning,
};
pub use scaling::scale_recipe;
pub use substitution::substitutes_for;
