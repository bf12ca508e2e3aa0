//! Stock figures shown beside the tables
//!
//! Only items typed as a conversion kit or a spare part count toward the
//! stock figures. An item with an empty name is left out of every count,
//! but its units still go into the totals.

use super::record::{Dataset, Item, CONVERSION_KIT, SPARE_PART};

/// Available units at or below this are low stock
pub const LOW_STOCK_LIMIT: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventorySummary {
    pub total_imported: i64,
    pub total_installed: i64,
    pub total_available: i64,
    /// Named kits and parts
    pub total_items: usize,
    pub kit_count: usize,
    pub part_count: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub return_count: usize,
    pub allocation_count: usize,
    /// Returns still `pending`, or with no status
    pub pending_returns: usize,
    /// Available as a share of imported, one decimal; 0 with nothing imported
    pub stock_availability: f64,
}

fn is_stock(item: &Item) -> bool {
    item.item_type == CONVERSION_KIT || item.item_type == SPARE_PART
}

impl InventorySummary {
    pub fn from_dataset(data: &Dataset) -> Self {
        let mut summary = Self {
            return_count: data.returns.len(),
            allocation_count: data.replacements.len(),
            pending_returns: data
                .returns
                .iter()
                .filter(|r| r.status.is_empty() || r.status == "pending")
                .count(),
            ..Default::default()
        };

        for item in data.items.iter().filter(|i| is_stock(i)) {
            summary.total_imported = summary.total_imported.saturating_add(item.units_imported);
            summary.total_installed = summary.total_installed.saturating_add(item.units_installed);
            summary.total_available = summary.total_available.saturating_add(item.units_available);

            if item.item_name.is_empty() {
                continue;
            }
            summary.total_items += 1;
            if item.item_type == CONVERSION_KIT {
                summary.kit_count += 1;
            } else {
                summary.part_count += 1;
            }
            match item.units_available {
                0 => summary.out_of_stock += 1,
                n if (1..=LOW_STOCK_LIMIT).contains(&n) => summary.low_stock += 1,
                _ => {}
            }
        }

        if summary.total_imported > 0 {
            let share = summary.total_available as f64 / summary.total_imported as f64 * 100.0;
            summary.stock_availability = (share * 10.0).round() / 10.0;
        }
        summary
    }
}
