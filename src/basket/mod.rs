
use std::collections::BTreeSet;

use crate::store::TransactionStore;

/// One-hot encoding of a transaction dataset.
///
/// Columns are the distinct item names observed across all transactions,
/// sorted alphabetically and fixed at encode time; they double as the
/// selectable item universe shown to the user. Rows are boolean presence
/// vectors, one per transaction, in input order.
#[derive(Debug, Clone)]
pub struct BasketTable {
    items: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl BasketTable {
    #[inline]
    pub fn encode(store: &TransactionStore) -> Self {
        let universe: BTreeSet<&str> = store
            .transactions()
            .iter()
            .flat_map(|t| t.items().iter().map(String::as_str))
            .collect();
        let items: Vec<String> = universe.into_iter().map(str::to_string).collect();

        let rows = store
            .transactions()
            .iter()
            .map(|t| items.iter().map(|item| t.contains(item)).collect())
            .collect();

        Self { items, rows }
    }

    /// The distinct item names, in column order.
    #[inline]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn transaction_count(&self) -> usize {
        self.rows.len()
    }

    /// Column index of an item name, if it is part of the universe.
    #[inline]
    pub fn item_index(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }

    /// Whether transaction `row` contains the item in column `column`.
    #[inline]
    pub fn cell(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(false)
    }

    /// Number of transactions containing every listed column.
    #[inline]
    pub fn support_count(&self, columns: &[usize]) -> usize {
        self.rows
            .iter()
            .filter(|row| columns.iter().all(|&c| row.get(c).copied().unwrap_or(false)))
            .count()
    }

    /// Fraction of transactions containing every listed column.
    #[inline]
    pub fn support(&self, columns: &[usize]) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.support_count(columns) as f64 / self.rows.len() as f64
    }
}
