use anyhow::{Context, Result, bail};
use console::style;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use crate::basket::BasketTable;
use crate::config::Config;
use crate::engine::RecommendationEngine;
use crate::form;
use crate::llm::OllamaClient;
use crate::mining::{AssociationRule, RuleMetric, RuleMiner};
use crate::store::TransactionStore;

/// Run the recommender: interactive form when no cart items are given on
/// the command line, one-shot otherwise.
#[inline]
pub fn run_recommender(transactions: Option<&Path>, cart_items: &[String]) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let (table, rules) = initialize(&config, transactions)?;

    let client = OllamaClient::new(&config.ollama).context("Failed to create Ollama client")?;
    // Single probe; the chat call itself still retries.
    if let Err(error) = client.clone().with_retry_attempts(1).health_check() {
        warn!("Ollama health check failed: {error:#}");
        eprintln!(
            "{}",
            style("⚠ Could not reach the Ollama chat model; LLM suggestions will use the fallback list.")
                .yellow()
        );
    }
    let engine = RecommendationEngine::new(rules, client);

    if cart_items.is_empty() {
        return form::run(table.items(), &engine);
    }

    let cart = validate_cart(cart_items, &table)?;
    match form::submit(&cart, &engine) {
        Some(recommendation) => form::render(&recommendation),
        None => eprintln!(
            "{}",
            style("⚠ Please select at least one item in your cart.").yellow()
        ),
    }

    Ok(())
}

/// Print the mined association rules with their metrics.
#[inline]
pub fn show_rules(transactions: Option<&Path>) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let (_, rules) = initialize(&config, transactions)?;

    if rules.is_empty() {
        println!(
            "No rules cleared support {} with lift >= {}.",
            config.mining.min_support, config.mining.min_lift
        );
        return Ok(());
    }

    println!(
        "{:<40} {:>8} {:>12} {:>8}",
        "Rule", "Support", "Confidence", "Lift"
    );
    for rule in &rules {
        println!(
            "{:<40} {:>8.3} {:>12.3} {:>8.3}",
            format!(
                "{{{}}} => {{{}}}",
                rule.antecedent.iter().join(", "),
                rule.consequent.iter().join(", ")
            ),
            rule.support,
            rule.confidence,
            rule.lift
        );
    }

    Ok(())
}

/// Print the selectable item universe.
#[inline]
pub fn list_items(transactions: Option<&Path>) -> Result<()> {
    let store = load_store(transactions)?;
    let table = BasketTable::encode(&store);

    for item in table.items() {
        println!("{item}");
    }

    Ok(())
}

/// One-time startup: load transactions, encode the basket table, and mine
/// the rule set. Everything returned here is read-only afterwards.
fn initialize(
    config: &Config,
    transactions: Option<&Path>,
) -> Result<(BasketTable, Vec<AssociationRule>)> {
    let store = load_store(transactions)?;
    let table = BasketTable::encode(&store);
    info!(
        "Encoded {} transactions over {} distinct items",
        table.transaction_count(),
        table.item_count()
    );

    let rules = RuleMiner::new()
        .with_min_support(config.mining.min_support)
        .with_metric(RuleMetric::Lift)
        .with_min_threshold(config.mining.min_lift)
        .mine(&table);

    Ok((table, rules))
}

fn load_store(transactions: Option<&Path>) -> Result<TransactionStore> {
    match transactions {
        Some(path) => TransactionStore::from_json_file(path),
        None => Ok(TransactionStore::builtin()),
    }
}

fn validate_cart(cart_items: &[String], table: &BasketTable) -> Result<BTreeSet<String>> {
    let mut cart = BTreeSet::new();
    for item in cart_items {
        if table.item_index(item).is_none() {
            bail!(
                "Unknown item: {item}. Run `cart-recs items` to list the selectable items."
            );
        }
        cart.insert(item.clone());
    }
    Ok(cart)
}
