#[cfg(test)]
mod tests;

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, MultiSelect};
use std::collections::BTreeSet;

use crate::engine::{Recommendation, RecommendationEngine};
use crate::llm::ChatModel;

/// Seam between the form and the engine so the submission guard can be
/// tested without a chat backend.
pub trait Recommender {
    fn recommend(&self, cart: &BTreeSet<String>) -> Recommendation;
}

impl<C: ChatModel> Recommender for RecommendationEngine<C> {
    #[inline]
    fn recommend(&self, cart: &BTreeSet<String>) -> Recommendation {
        RecommendationEngine::recommend(self, cart)
    }
}

/// Run one submission. An empty cart returns `None` without invoking the
/// engine; the caller is expected to show a warning instead.
#[inline]
pub fn submit(cart: &BTreeSet<String>, engine: &impl Recommender) -> Option<Recommendation> {
    if cart.is_empty() {
        return None;
    }
    Some(engine.recommend(cart))
}

/// Interactive selection loop over the item universe.
///
/// Each round is a single synchronous request: select items, run the
/// engine, render the three result groups. The cart lives only for the
/// round; the universe and mined rules are read-only throughout.
#[inline]
pub fn run(universe: &[String], engine: &impl Recommender) -> Result<()> {
    eprintln!("{}", style("🛒 Smart Product Recommendations").bold().cyan());
    eprintln!();

    loop {
        let selection = MultiSelect::new()
            .with_prompt("Select items in your shopping cart (space to toggle, enter to submit)")
            .items(universe)
            .interact()?;

        let cart: BTreeSet<String> = selection
            .into_iter()
            .filter_map(|i| universe.get(i).cloned())
            .collect();

        match submit(&cart, engine) {
            Some(recommendation) => render(&recommendation),
            None => {
                eprintln!(
                    "{}",
                    style("⚠ Please select at least one item in your cart.").yellow()
                );
            }
        }

        eprintln!();
        if !Confirm::new()
            .with_prompt("Get more recommendations?")
            .default(true)
            .interact()?
        {
            break;
        }
        eprintln!();
    }

    Ok(())
}

/// Print the three labeled result groups.
#[inline]
pub fn render(recommendation: &Recommendation) {
    eprintln!();
    eprintln!("{}", style("Rule-Based Recommendations").bold().yellow());
    render_group(&recommendation.rule_based, "No strong associations found.");

    eprintln!();
    eprintln!("{}", style("LLM Suggestions").bold().yellow());
    render_group(&recommendation.llm, "No suggestions returned.");

    eprintln!();
    eprintln!("{}", style("Hybrid Final Recommendations").bold().green());
    render_group(&recommendation.hybrid, "No recommendations found.");
}

fn render_group(items: &[String], empty_message: &str) {
    if items.is_empty() {
        eprintln!("  {}", style(empty_message).dim());
        return;
    }
    for item in items {
        eprintln!("  • {}", style(item).cyan());
    }
}
