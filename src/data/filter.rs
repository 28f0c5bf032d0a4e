use super::model::{CellValue, ProductionRecord};

/// Month shown before the user picks one (September).
pub const DEFAULT_MONTH: u32 = 9;

// ---------------------------------------------------------------------------
// Filter criteria: item identifier + month
// ---------------------------------------------------------------------------

/// The two selections coming from the interaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// `None` means "every item".
    pub item_id: Option<CellValue>,
    /// 1-based calendar month.
    pub month: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            item_id: None,
            month: DEFAULT_MONTH,
        }
    }
}

impl FilterCriteria {
    pub fn for_month(month: u32) -> Self {
        Self {
            item_id: None,
            month,
        }
    }

    pub fn with_item(mut self, item_id: CellValue) -> Self {
        self.item_id = Some(item_id);
        self
    }

    /// A record matches on exact month equality and, when an item is
    /// selected, exact item equality.
    pub fn matches(&self, record: &ProductionRecord) -> bool {
        if record.month != i64::from(self.month) {
            return false;
        }
        match &self.item_id {
            Some(item) => record.item_id == *item,
            None => true,
        }
    }
}

/// Records passing `criteria`, in table order.
pub fn filter_records<'a>(
    records: &'a [ProductionRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ProductionRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
