//! Apriori frequent-itemset mining and association-rule generation over a
//! one-hot [`BasketTable`].

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::basket::BasketTable;

/// Metric used to filter generated rules, mirroring the common
/// market-basket tooling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMetric {
    Support,
    Confidence,
    Lift,
}

/// Association rule: antecedent => consequent.
///
/// `support` is the fraction of transactions containing the full itemset,
/// `confidence` is P(consequent | antecedent), and `lift` is the ratio of
/// observed to expected co-occurrence under independence.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    pub antecedent: BTreeSet<String>,
    pub consequent: BTreeSet<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    #[inline]
    pub fn metric_value(&self, metric: RuleMetric) -> f64 {
        match metric {
            RuleMetric::Support => self.support,
            RuleMetric::Confidence => self.confidence,
            RuleMetric::Lift => self.lift,
        }
    }
}

/// Apriori rule miner.
///
/// Finds all itemsets with support >= `min_support`, then generates every
/// antecedent/consequent split of each frequent itemset of size two or
/// more, keeping rules whose chosen metric clears `min_threshold`.
///
/// An empty result is not an error; it means no itemset cleared the
/// support floor, and callers treat it as "no recommendations".
#[derive(Debug, Clone)]
pub struct RuleMiner {
    min_support: f64,
    metric: RuleMetric,
    min_threshold: f64,
}

impl RuleMiner {
    /// Defaults match the demo dataset: support floor 0.2, lift >= 1.0.
    #[inline]
    pub fn new() -> Self {
        Self {
            min_support: 0.2,
            metric: RuleMetric::Lift,
            min_threshold: 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_metric(mut self, metric: RuleMetric) -> Self {
        self.metric = metric;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_min_threshold(mut self, min_threshold: f64) -> Self {
        self.min_threshold = min_threshold;
        self
    }

    /// Mine association rules from the basket table.
    ///
    /// Rules are returned sorted by descending metric value for stable
    /// display; callers must not rely on the order.
    #[inline]
    pub fn mine(&self, table: &BasketTable) -> Vec<AssociationRule> {
        if table.transaction_count() == 0 {
            return Vec::new();
        }

        let frequent = self.frequent_itemsets(table);
        debug!("Found {} frequent itemsets", frequent.len());

        let mut rules = self.generate_rules(table, &frequent);
        rules.sort_by(|a, b| {
            b.metric_value(self.metric)
                .partial_cmp(&a.metric_value(self.metric))
                .expect("metric values are finite")
        });

        info!(
            "Mined {} rules from {} transactions ({} frequent itemsets)",
            rules.len(),
            table.transaction_count(),
            frequent.len()
        );
        rules
    }

    /// Level-wise frequent itemset search. Itemsets are sorted column-index
    /// vectors; the map carries their supports for rule generation.
    fn frequent_itemsets(&self, table: &BasketTable) -> HashMap<Vec<usize>, f64> {
        let mut frequent = HashMap::new();

        let mut current: Vec<Vec<usize>> = (0..table.item_count())
            .filter(|&c| table.support(&[c]) >= self.min_support)
            .map(|c| vec![c])
            .collect();

        while !current.is_empty() {
            for itemset in &current {
                frequent.insert(itemset.clone(), table.support(itemset));
            }

            let candidates = Self::generate_candidates(&current);
            current = candidates
                .into_iter()
                .filter(|candidate| table.support(candidate) >= self.min_support)
                .collect();
        }

        frequent
    }

    /// Join step over sorted index vectors: two k-itemsets sharing their
    /// first k-1 elements combine into a (k+1)-candidate. Candidates with
    /// an infrequent k-subset are pruned before counting.
    fn generate_candidates(current: &[Vec<usize>]) -> Vec<Vec<usize>> {
        let known: BTreeSet<&[usize]> = current.iter().map(Vec::as_slice).collect();
        let mut candidates = Vec::new();

        for i in 0..current.len() {
            for j in (i + 1)..current.len() {
                let (a, b) = (&current[i], &current[j]);
                let k = a.len();
                if a[..k - 1] != b[..k - 1] {
                    continue;
                }

                let mut candidate = a.clone();
                let last = b[k - 1];
                if candidate[k - 1] > last {
                    continue; // the mirrored pair will produce it
                }
                candidate.push(last);

                if Self::has_infrequent_subset(&candidate, &known) {
                    continue;
                }
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }

        candidates
    }

    fn has_infrequent_subset(candidate: &[usize], known: &BTreeSet<&[usize]>) -> bool {
        (0..candidate.len()).any(|skip| {
            let subset: Vec<usize> = candidate
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &c)| c)
                .collect();
            !known.contains(subset.as_slice())
        })
    }

    fn generate_rules(
        &self,
        table: &BasketTable,
        frequent: &HashMap<Vec<usize>, f64>,
    ) -> Vec<AssociationRule> {
        let mut rules = Vec::new();

        for (itemset, &itemset_support) in frequent {
            if itemset.len() < 2 {
                continue;
            }

            // Every non-empty proper subset forms an antecedent.
            for mask in 1..(1usize << itemset.len()) - 1 {
                let (mut antecedent, mut consequent) = (Vec::new(), Vec::new());
                for (i, &column) in itemset.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        antecedent.push(column);
                    } else {
                        consequent.push(column);
                    }
                }

                // Subsets of a frequent itemset are frequent, so their
                // supports are already known.
                let antecedent_support = frequent
                    .get(&antecedent)
                    .copied()
                    .unwrap_or_else(|| table.support(&antecedent));
                let consequent_support = frequent
                    .get(&consequent)
                    .copied()
                    .unwrap_or_else(|| table.support(&consequent));

                let confidence = itemset_support / antecedent_support;
                let lift = confidence / consequent_support;

                let rule = AssociationRule {
                    antecedent: resolve_names(table, &antecedent),
                    consequent: resolve_names(table, &consequent),
                    support: itemset_support,
                    confidence,
                    lift,
                };

                if rule.metric_value(self.metric) >= self.min_threshold {
                    rules.push(rule);
                }
            }
        }

        rules
    }
}

impl Default for RuleMiner {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_names(table: &BasketTable, columns: &[usize]) -> BTreeSet<String> {
    columns
        .iter()
        .filter_map(|&c| table.items().get(c).cloned())
        .collect()
}
