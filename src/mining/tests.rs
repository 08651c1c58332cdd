use super::*;
use crate::basket::BasketTable;
use crate::store::{Transaction, TransactionStore};

fn table_from(raw: &[&[&str]]) -> BasketTable {
    let store = TransactionStore::new(
        raw.iter()
            .map(|items| Transaction::new(items.iter().copied()))
            .collect(),
    );
    BasketTable::encode(&store)
}

fn grocery_table() -> BasketTable {
    table_from(&[
        &["Milk", "Bread", "Butter"],
        &["Milk", "Bread"],
        &["Milk", "Butter"],
        &["Bread", "Butter"],
    ])
}

fn find_rule<'a>(
    rules: &'a [AssociationRule],
    antecedent: &[&str],
    consequent: &[&str],
) -> Option<&'a AssociationRule> {
    let antecedent: std::collections::BTreeSet<String> =
        antecedent.iter().map(|s| s.to_string()).collect();
    let consequent: std::collections::BTreeSet<String> =
        consequent.iter().map(|s| s.to_string()).collect();
    rules
        .iter()
        .find(|r| r.antecedent == antecedent && r.consequent == consequent)
}

#[test]
fn rules_meet_support_floor() {
    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_metric(RuleMetric::Lift)
        .with_min_threshold(0.0)
        .mine(&grocery_table());

    assert!(!rules.is_empty());
    for rule in &rules {
        assert!(rule.support >= 0.5, "rule below support floor: {rule:?}");
    }
}

#[test]
fn confidence_calculation() {
    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_min_threshold(0.0)
        .mine(&grocery_table());

    // {Milk} => {Bread}: P({Milk, Bread}) / P({Milk}) = 0.5 / 0.75
    let rule = find_rule(&rules, &["Milk"], &["Bread"]).expect("rule {Milk} => {Bread}");
    assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-10);
    assert!((rule.support - 0.5).abs() < 1e-10);
}

#[test]
fn lift_calculation() {
    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_min_threshold(0.0)
        .mine(&grocery_table());

    // Lift({Milk} => {Bread}) = confidence / P({Bread}) = (2/3) / 0.75
    let rule = find_rule(&rules, &["Milk"], &["Bread"]).expect("rule {Milk} => {Bread}");
    assert!((rule.lift - (2.0 / 3.0) / 0.75).abs() < 1e-10);
}

#[test]
fn lift_threshold_filters_rules() {
    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_metric(RuleMetric::Lift)
        .with_min_threshold(1.0)
        .mine(&grocery_table());

    // Every pair in the grocery table is anti-correlated (lift 8/9), so the
    // default lift threshold of 1.0 leaves nothing.
    assert!(rules.is_empty());
}

#[test]
fn confidence_metric_selection() {
    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_metric(RuleMetric::Confidence)
        .with_min_threshold(0.6)
        .mine(&grocery_table());

    assert!(!rules.is_empty());
    for rule in &rules {
        assert!(rule.confidence >= 0.6);
    }
}

#[test]
fn rules_sorted_by_metric_descending() {
    let rules = RuleMiner::new()
        .with_min_support(0.2)
        .with_metric(RuleMetric::Confidence)
        .with_min_threshold(0.0)
        .mine(&grocery_table());

    for pair in rules.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn multi_item_antecedents() {
    let table = table_from(&[
        &["Milk", "Bread", "Butter"],
        &["Milk", "Bread", "Butter"],
        &["Milk", "Bread"],
        &["Butter"],
    ]);

    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_min_threshold(0.0)
        .mine(&table);

    // {Milk, Bread} => {Butter}: support 0.5, confidence 0.5 / 0.75
    let rule =
        find_rule(&rules, &["Milk", "Bread"], &["Butter"]).expect("two-item antecedent rule");
    assert!((rule.confidence - 2.0 / 3.0).abs() < 1e-10);
}

#[test]
fn builtin_dataset_laptop_mouse_rules() {
    let table = BasketTable::encode(&TransactionStore::builtin());
    let rules = RuleMiner::new().mine(&table);

    // {Laptop, Mouse} co-occur in 3 of 14 transactions, clearing the 0.2
    // floor; both directions are strongly lifted.
    let rule = find_rule(&rules, &["Laptop"], &["Mouse"]).expect("rule {Laptop} => {Mouse}");
    assert!((rule.support - 3.0 / 14.0).abs() < 1e-10);
    assert!((rule.confidence - 0.75).abs() < 1e-10);
    assert!(rule.lift > 1.0);

    let rule = find_rule(&rules, &["Mouse"], &["Laptop"]).expect("rule {Mouse} => {Laptop}");
    assert!((rule.confidence - 1.0).abs() < 1e-10);
}

#[test]
fn empty_table_yields_no_rules() {
    let store = TransactionStore::new(Vec::new());
    let table = BasketTable::encode(&store);
    assert!(RuleMiner::new().mine(&table).is_empty());
}

#[test]
fn single_item_transactions_yield_no_rules() {
    let table = table_from(&[&["Milk"], &["Bread"], &["Butter"], &["Eggs"]]);
    let rules = RuleMiner::new()
        .with_min_support(0.25)
        .with_min_threshold(0.0)
        .mine(&table);
    assert!(rules.is_empty());
}

#[test]
fn support_floor_prunes_items() {
    let table = table_from(&[
        &["Milk", "Bread"],
        &["Milk", "Bread"],
        &["Milk", "Bread"],
        &["Jam", "Honey"],
    ]);

    let rules = RuleMiner::new()
        .with_min_support(0.5)
        .with_min_threshold(0.0)
        .mine(&table);

    assert!(!rules.is_empty());
    for rule in &rules {
        assert!(!rule.antecedent.contains("Jam"));
        assert!(!rule.consequent.contains("Honey"));
    }
}
