use super::*;
use std::cell::Cell;

struct CountingRecommender {
    calls: Cell<usize>,
}

impl CountingRecommender {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl Recommender for CountingRecommender {
    fn recommend(&self, cart: &BTreeSet<String>) -> Recommendation {
        self.calls.set(self.calls.get() + 1);
        Recommendation {
            rule_based: vec!["Monitor".to_string()],
            llm: vec!["Power Bank".to_string()],
            hybrid: cart.iter().map(|i| format!("{i} Accessory")).collect(),
        }
    }
}

#[test]
fn empty_cart_does_not_invoke_engine() {
    let recommender = CountingRecommender::new();
    let cart = BTreeSet::new();

    let result = submit(&cart, &recommender);

    assert!(result.is_none());
    assert_eq!(recommender.calls.get(), 0);
}

#[test]
fn non_empty_cart_invokes_engine_once() {
    let recommender = CountingRecommender::new();
    let cart: BTreeSet<String> = ["Laptop".to_string()].into_iter().collect();

    let result = submit(&cart, &recommender);

    assert!(result.is_some());
    assert_eq!(recommender.calls.get(), 1);

    let recommendation = result.expect("recommendation present");
    assert_eq!(recommendation.rule_based, vec!["Monitor"]);
    assert_eq!(recommendation.hybrid, vec!["Laptop Accessory"]);
}

#[test]
fn engine_implements_recommender() {
    use crate::engine::RecommendationEngine;
    use crate::llm::ChatModel;

    struct SilentChat;
    impl ChatModel for SilentChat {
        fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(String::new())
        }
    }

    let engine = RecommendationEngine::new(Vec::new(), SilentChat);
    let cart: BTreeSet<String> = ["Laptop".to_string()].into_iter().collect();

    let recommendation = Recommender::recommend(&engine, &cart);
    assert!(recommendation.rule_based.is_empty());
}
