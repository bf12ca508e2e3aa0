//! Inventory records and the in-memory dataset
//!
//! Records are plain values. The numeric `id` is the only identity a record
//! has; it is used to build submission targets and to find rows again after
//! a submission is echoed locally.

use serde::{Deserialize, Serialize};

pub const CONVERSION_KIT: &str = "conversion_kit";
pub const SPARE_PART: &str = "spare_part";

/// Inventory item (conversion kit component or spare part)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub serial: String,
    pub item_name: String,
    pub item_type: String,
    #[serde(default)]
    pub admin: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub units_imported: i64,
    #[serde(default)]
    pub units_installed: i64,
    #[serde(default)]
    pub units_available: i64,
}

impl Item {
    /// Stock state as shown in the table's status column
    pub fn stock_label(&self) -> &'static str {
        match self.units_available {
            n if n <= 0 => "out of stock",
            1..=5 => "low",
            _ => "ok",
        }
    }
}

fn default_status() -> String {
    "pending".to_string()
}

fn default_condition() -> i64 {
    5
}

/// Returned item awaiting or past processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub item_serial: String,
    #[serde(default)]
    pub personnel: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub processed_date: Option<String>,
    #[serde(default = "default_condition")]
    pub condition_rating: i64,
}

/// Spare part swap handed to a rider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub old_item_serial: String,
    #[serde(default)]
    pub new_item_serial: String,
    #[serde(default)]
    pub rider_name: String,
    #[serde(default)]
    pub rider_number: String,
    #[serde(default)]
    pub released_to: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub station: String,
}

/// Which record collection a table row points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFamily {
    Item,
    Return,
    Replacement,
}

impl RecordFamily {
    pub fn name(&self) -> &'static str {
        match self {
            RecordFamily::Item => "item",
            RecordFamily::Return => "return",
            RecordFamily::Replacement => "replacement",
        }
    }
}

/// Reference from a table row back to its record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordRef {
    pub family: RecordFamily,
    pub id: i64,
}

/// All records known to the view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub returns: Vec<ReturnRecord>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl Dataset {
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: i64) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn return_record(&self, id: i64) -> Option<&ReturnRecord> {
        self.returns.iter().find(|r| r.id == id)
    }

    pub fn return_record_mut(&mut self, id: i64) -> Option<&mut ReturnRecord> {
        self.returns.iter_mut().find(|r| r.id == id)
    }

    pub fn replacement(&self, id: i64) -> Option<&Replacement> {
        self.replacements.iter().find(|r| r.id == id)
    }

    pub fn replacement_mut(&mut self, id: i64) -> Option<&mut Replacement> {
        self.replacements.iter_mut().find(|r| r.id == id)
    }

    pub fn item_by_serial_mut(&mut self, serial: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.serial == serial)
    }

    /// One past the largest id in a family, or 1 when it is empty
    pub fn next_id(&self, family: RecordFamily) -> i64 {
        let largest = match family {
            RecordFamily::Item => self.items.iter().map(|i| i.id).max(),
            RecordFamily::Return => self.returns.iter().map(|r| r.id).max(),
            RecordFamily::Replacement => self.replacements.iter().map(|r| r.id).max(),
        };
        largest.map_or(1, |id| id.saturating_add(1))
    }

    /// Items of one type, in stored order
    pub fn items_of_type<'a>(&'a self, item_type: &'a str) -> impl Iterator<Item = &'a Item> {
        self.items.iter().filter(move |i| i.item_type == item_type)
    }

    /// Remove the referenced record, returning whether it existed
    pub fn remove(&mut self, record: RecordRef) -> bool {
        let before;
        let after;
        match record.family {
            RecordFamily::Item => {
                before = self.items.len();
                self.items.retain(|i| i.id != record.id);
                after = self.items.len();
            }
            RecordFamily::Return => {
                before = self.returns.len();
                self.returns.retain(|r| r.id != record.id);
                after = self.returns.len();
            }
            RecordFamily::Replacement => {
                before = self.replacements.len();
                self.replacements.retain(|r| r.id != record.id);
                after = self.replacements.len();
            }
        }
        before != after
    }
}
