pub mod aggregation;
pub mod categorization;

pub use aggregation::{
    aggregate, aggregate_with, from_reports, AggregateOptions, ShoppingItem, ShoppingList,
    ShoppingSummary,
};
pub use categorization::{CategorizationService, Category};
