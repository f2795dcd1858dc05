// src/stats/types.rs

use serde::{Deserialize, Serialize};

/// One answer option of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub count: usize,
    /// `round(100 * count / total)`, rounded per category on its own.
    pub percentage: u32,
}

/// Response distribution of a single multiple-choice column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDistribution {
    pub column_index: usize,
    pub question: String,
    /// First-seen order, top to bottom.
    pub categories: Vec<Category>,
}

impl ColumnDistribution {
    /// Non-empty responses in this column.
    pub fn total_responses(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }
}
