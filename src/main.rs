use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::config::Config;
use larder::export::{export_shopping_list, format_quantity, format_shopping_list, title_case};
use larder::storage::load_snapshot;
use larder_recipe::{find_matches, substitutes_for, RecipeFilter};
use larder_shared::unit::{are_compatible, compatible_units};
use larder_shared::{convert, expired, expiring_within, normalize_name, Difficulty};
use larder_shopping::{aggregate_with, AggregateOptions};
use time::OffsetDateTime;

/// larder - What can I cook with what I have?
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Match recipes against your kitchen inventory", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Directory holding ingredients.json and recipes.json (overrides config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two units of the same dimension
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        from: String,
        to: String,
    },
    /// Rank recipes by how much of them the inventory covers
    Match {
        /// Hide recipes below this match percentage (overrides config file)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        min_percent: Option<u8>,

        /// Only recipes with prep + cook time up to this many minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Only recipes of this difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        #[arg(long)]
        json: bool,
    },
    /// Build a shopping list for one or more recipes
    Shop {
        /// Recipe names
        #[arg(required = true)]
        recipes: Vec<String>,

        /// Write the list as text to this file (overrides config file)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Guess categories of items the inventory doesn't know
        #[arg(long)]
        guess_categories: bool,

        /// Cook a recipe for this many servings, as NAME=N (repeatable)
        #[arg(long = "servings", value_name = "NAME=N", value_parser = parse_servings)]
        servings: Vec<(String, NonZeroU32)>,

        #[arg(long)]
        json: bool,
    },
    /// List owned ingredients by name
    Inventory {
        #[arg(long)]
        json: bool,
    },
    /// Show counts over the inventory and recipe book
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// List ingredients expiring soon and those already expired
    Expiring {
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
    /// Show what can stand in for an ingredient
    Substitutes { name: String },
}

fn parse_servings(value: &str) -> Result<(String, NonZeroU32), String> {
    let (name, servings) = value
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=N, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing recipe name in '{value}'"));
    }
    let servings = servings
        .trim()
        .parse::<NonZeroU32>()
        .map_err(|e| format!("invalid servings in '{value}': {e}"))?;

    Ok((name.to_string(), servings))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.clone())?;
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Convert { amount, from, to } => convert_command(amount, &from, &to),
        Commands::Match {
            min_percent,
            max_time,
            difficulty,
            json,
        } => {
            let filter = RecipeFilter {
                max_total_time: max_time,
                difficulty,
            };
            match_command(config, min_percent, filter, json)
        }
        Commands::Shop {
            recipes,
            output,
            guess_categories,
            servings,
            json,
        } => {
            let options = servings.into_iter().fold(
                AggregateOptions {
                    guess_categories: guess_categories || config.shopping.guess_categories,
                    ..Default::default()
                },
                |options, (name, n)| options.with_servings(&name, n),
            );
            shop_command(config, recipes, output, options, json)
        }
        Commands::Inventory { json } => inventory_command(config, json),
        Commands::Stats { json } => stats_command(config, json),
        Commands::Expiring { days } => expiring_command(config, days),
        Commands::Substitutes { name } => substitutes_command(&name),
    }
}

#[tracing::instrument]
fn convert_command(amount: f64, from: &str, to: &str) -> Result<()> {
    if !are_compatible(from, to) {
        let targets: Vec<&str> = compatible_units(from)
            .into_iter()
            .filter(|unit| !unit.is_empty())
            .collect();
        if !targets.is_empty() {
            eprintln!("{} converts to: {}", from.trim(), targets.join(", "));
        }
    }

    let converted = convert(amount, from, to)?;
    println!(
        "{} {} = {} {}",
        format_quantity(amount),
        from.trim(),
        format_quantity(converted),
        to.trim()
    );

    Ok(())
}

#[tracing::instrument(skip(config))]
fn match_command(
    config: Config,
    min_percent: Option<u8>,
    filter: RecipeFilter,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(&config.data.dir)?;
    let min_percent = min_percent.unwrap_or(config.matching.min_match_percent);

    let candidates = filter.apply(&snapshot.recipes);
    tracing::info!(
        recipes = snapshot.recipes.len(),
        candidates = candidates.len(),
        min_percent,
        "Matching recipes"
    );

    let reports = find_matches(candidates, &snapshot.ingredients, min_percent)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No recipes match.");
        return Ok(());
    }

    for report in &reports {
        let mark = if report.can_make() { "*" } else { " " };
        println!("{mark} {:>3}%  {}", report.percentage, report.recipe.name);
        for item in &report.missing {
            println!(
                "        missing {} {} {}",
                format_quantity(item.shortfall),
                item.unit,
                item.name
            );
        }
        for warning in &report.warnings {
            println!("        warning: {warning}");
        }
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn shop_command(
    config: Config,
    names: Vec<String>,
    output: Option<PathBuf>,
    options: AggregateOptions,
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(&config.data.dir)?;

    let recipes = names
        .iter()
        .map(|name| snapshot.find_recipe(name))
        .collect::<Result<Vec<_>, _>>()?;

    for name in options.servings.keys() {
        if !recipes.iter().any(|r| normalize_name(&r.name) == *name) {
            tracing::warn!(recipe = %name, "Servings given for a recipe not on the list, ignoring");
        }
    }

    let list = aggregate_with(recipes, &snapshot.ingredients, &options)?;

    let summary = list.summary();
    tracing::info!(
        recipes = names.len(),
        items = summary.total_items,
        categories = summary.by_category.len(),
        "Shopping list built"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("{}", format_shopping_list(&list));
    }

    if let Some(path) = output.or(config.shopping.export_path) {
        export_shopping_list(&list, &path)?;
        eprintln!("Shopping list written to {}", path.display());
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn inventory_command(config: Config, json: bool) -> Result<()> {
    let snapshot = load_snapshot(&config.data.dir)?;
    let ingredients = snapshot.sorted_ingredients();

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredients)?);
        return Ok(());
    }

    if ingredients.is_empty() {
        println!("No ingredients in {}", config.data.dir.display());
        return Ok(());
    }

    println!("YOUR INGREDIENTS ({} total)", ingredients.len());
    for ingredient in ingredients {
        let expiry = ingredient
            .expiration_date
            .map(|date| format!(", expires {date}"))
            .unwrap_or_default();
        println!(
            "  {}: {} {} [{}{expiry}]",
            ingredient.name.trim(),
            format_quantity(ingredient.quantity),
            ingredient.unit,
            ingredient.category()
        );
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn stats_command(config: Config, json: bool) -> Result<()> {
    let summary = load_snapshot(&config.data.dir)?.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Data directory: {}", config.data.dir.display());
    println!("Total ingredients: {}", summary.total_ingredients);
    println!("Total recipes: {}", summary.total_recipes);
    if let Some(minutes) = summary.average_total_time {
        println!("Average recipe time: {minutes:.1} minutes");
    }
    for (category, count) in &summary.by_category {
        println!("  {}: {count}", title_case(category));
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
fn expiring_command(config: Config, days: i64) -> Result<()> {
    let snapshot = load_snapshot(&config.data.dir)?;
    let today = OffsetDateTime::now_utc().date();

    let expiring = expiring_within(&snapshot.ingredients, today, days);
    let expired = expired(&snapshot.ingredients, today);

    if expiring.is_empty() && expired.is_empty() {
        println!("Nothing expires in the next {days} days.");
        return Ok(());
    }

    for ingredient in expiring {
        let left = ingredient.days_until_expiry(today).unwrap_or_default();
        println!("  {} expires in {left} day(s)", ingredient.name);
    }
    for ingredient in expired {
        let ago = -ingredient.days_until_expiry(today).unwrap_or_default();
        println!("  {} expired {ago} day(s) ago", ingredient.name);
    }

    Ok(())
}

#[tracing::instrument]
fn substitutes_command(name: &str) -> Result<()> {
    let key = normalize_name(name);
    let substitutes: Vec<String> = substitutes_for(name)
        .into_iter()
        .filter(|s| *s != key)
        .collect();

    if substitutes.is_empty() {
        println!("No known substitutes for {}", name.trim());
    } else {
        println!("{}: {}", name.trim(), substitutes.join(", "));
    }

    Ok(())
}
