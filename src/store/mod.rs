
use anyhow::{Context, Result, ensure};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// A single purchase: an unordered set of item names.
///
/// Duplicate names collapse on construction; transactions are immutable
/// once loaded into a [`TransactionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    items: BTreeSet<String>,
}

impl Transaction {
    #[inline]
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn items(&self) -> &BTreeSet<String> {
        &self.items
    }

    #[inline]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }
}

/// Read-only sequence of purchase transactions.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    #[inline]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// The simulated electronics dataset that ships with the tool.
    #[inline]
    pub fn builtin() -> Self {
        let raw: &[&[&str]] = &[
            &["Laptop", "Mouse", "Laptop Bag"],
            &["Laptop", "Mouse", "Keyboard"],
            &["Smartphone", "Earbuds", "Charger"],
            &["Smartphone", "Phone Case", "Screen Protector"],
            &["Tablet", "Tablet Cover", "Stylus"],
            &["Smartwatch", "Earbuds"],
            &["Laptop", "Keyboard", "Monitor"],
            &["Monitor", "HDMI Cable"],
            &["Smartphone", "Smartwatch"],
            &["Laptop", "Mouse", "Monitor"],
            &["Tablet", "Stylus"],
            &["Smartwatch", "Charger"],
            &["Phone Case", "Screen Protector"],
            &["Smartphone", "Earbuds"],
        ];

        Self {
            transactions: raw
                .iter()
                .map(|items| Transaction::new(items.iter().copied()))
                .collect(),
        }
    }

    /// Load transactions from a JSON file containing an array of arrays of
    /// item names, e.g. `[["Laptop", "Mouse"], ["Tablet", "Stylus"]]`.
    #[inline]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transaction file: {}", path.display()))?;

        let raw: Vec<Vec<String>> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse transaction file: {}", path.display()))?;

        ensure!(
            !raw.is_empty(),
            "Transaction file contains no transactions: {}",
            path.display()
        );

        Ok(Self {
            transactions: raw.into_iter().map(Transaction::new).collect(),
        })
    }

    #[inline]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
