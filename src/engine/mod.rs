
use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::llm::{ChatModel, parse_suggestions};
use crate::mining::AssociationRule;

/// Substituted for the LLM suggestions when the chat call fails.
pub const FALLBACK_SUGGESTIONS: [&str; 3] = ["Power Bank", "USB Hub", "Bluetooth Speaker"];

/// One recommendation result: three groups of item names, produced per
/// request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Consequents of the association rules matching the cart, sorted.
    pub rule_based: Vec<String>,
    /// Items parsed from the chat model's reply, in reply order, or the
    /// fallback list if the call failed.
    pub llm: Vec<String>,
    /// Union of the two groups minus anything already in the cart.
    pub hybrid: Vec<String>,
}

/// Combines association-rule lookups with chat-model suggestions.
///
/// The mined rules are read-only after construction; carts are strictly
/// per-request.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<C> {
    rules: Vec<AssociationRule>,
    chat: C,
}

impl<C: ChatModel> RecommendationEngine<C> {
    #[inline]
    pub fn new(rules: Vec<AssociationRule>, chat: C) -> Self {
        Self { rules, chat }
    }

    #[inline]
    pub fn rules(&self) -> &[AssociationRule] {
        &self.rules
    }

    /// Produce recommendations for a non-empty cart.
    ///
    /// Callers must reject empty carts before invoking the engine; the form
    /// layer owns that check.
    #[inline]
    pub fn recommend(&self, cart: &BTreeSet<String>) -> Recommendation {
        debug_assert!(!cart.is_empty(), "caller must reject empty carts");

        let rule_based = self.rule_suggestions(cart);
        let llm = self.llm_suggestions(cart);

        let hybrid: Vec<String> = rule_based
            .iter()
            .chain(llm.iter())
            .filter(|item| !cart.contains(*item))
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        Recommendation {
            rule_based,
            llm,
            hybrid,
        }
    }

    /// Every rule whose antecedent intersects the cart contributes all of
    /// its consequent items.
    fn rule_suggestions(&self, cart: &BTreeSet<String>) -> Vec<String> {
        let mut suggestions = BTreeSet::new();
        for rule in &self.rules {
            if rule.antecedent.iter().any(|item| cart.contains(item)) {
                suggestions.extend(rule.consequent.iter().cloned());
            }
        }
        suggestions.into_iter().collect()
    }

    fn llm_suggestions(&self, cart: &BTreeSet<String>) -> Vec<String> {
        let prompt = build_prompt(cart);
        debug!("Chat prompt: {prompt}");

        match self.chat.complete(&prompt) {
            Ok(reply) => parse_suggestions(&reply),
            Err(error) => {
                warn!("Chat model call failed, using fallback suggestions: {error:#}");
                FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
            }
        }
    }
}

fn build_prompt(cart: &BTreeSet<String>) -> String {
    format!(
        "User is interested in {}. Recommend complementary products relevant to it.",
        cart.iter().join(", ")
    )
}
