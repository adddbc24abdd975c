use thiserror::Error;

pub type MatchResult<T> = Result<T, MatchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid recipe '{0}': a recipe needs at least one ingredient")]
    InvalidRecipe(String),
}
