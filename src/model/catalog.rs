//! The tables and navigation menu the view is built from

use super::dialog::DialogKind;
use super::dropdown::Dropdown;
use super::record::{Dataset, Item, RecordFamily, RecordRef, CONVERSION_KIT, SPARE_PART};
use super::table::{Row, Table};

pub const KITS: &str = "kits";
pub const SPARE_PARTS: &str = "spare_parts";
pub const RETURNS: &str = "returns";
pub const REPLACEMENTS: &str = "replacements";

pub const TABLE_IDS: [&str; 4] = [KITS, SPARE_PARTS, RETURNS, REPLACEMENTS];

/// Id of the query input that filters a table
pub fn search_input_id(table_id: &str) -> String {
    format!("{table_id}_search")
}

/// Delete link for a record
pub fn delete_path(record: RecordRef) -> String {
    let prefix = match record.family {
        RecordFamily::Item => "/delete_item/",
        RecordFamily::Return => "/delete_return/",
        RecordFamily::Replacement => "/delete_replacement/",
    };
    format!("{prefix}{}", record.id)
}

/// Creation dialog offered from a table
pub fn create_kind(table_id: &str) -> Option<DialogKind> {
    match table_id {
        KITS => Some(DialogKind::NewKit),
        SPARE_PARTS => Some(DialogKind::NewItem),
        RETURNS => Some(DialogKind::NewReturn),
        REPLACEMENTS => Some(DialogKind::NewReplacement),
        _ => None,
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn item_headers() -> Vec<String> {
    headers(&[
        "Serial",
        "Item",
        "Admin",
        "Created",
        "Imported",
        "Installed",
        "Available",
        "Stock",
    ])
}

fn item_row(item: &Item) -> Row {
    Row::new(
        RecordRef {
            family: RecordFamily::Item,
            id: item.id,
        },
        vec![
            item.serial.clone(),
            item.item_name.clone(),
            item.admin.clone(),
            item.created_at.clone().unwrap_or_default(),
            item.units_imported.to_string(),
            item.units_installed.to_string(),
            item.units_available.to_string(),
            item.stock_label().to_string(),
        ],
    )
}

/// Current rows of a table, built from the dataset
pub fn rows_for(table_id: &str, data: &Dataset) -> Option<Vec<Row>> {
    let rows = match table_id {
        KITS => data.items_of_type(CONVERSION_KIT).map(item_row).collect(),
        SPARE_PARTS => data.items_of_type(SPARE_PART).map(item_row).collect(),
        RETURNS => data
            .returns
            .iter()
            .map(|r| {
                Row::new(
                    RecordRef {
                        family: RecordFamily::Return,
                        id: r.id,
                    },
                    vec![
                        r.date.clone(),
                        r.item_serial.clone(),
                        r.personnel.clone(),
                        r.status.clone(),
                        r.notes.clone(),
                    ],
                )
            })
            .collect(),
        REPLACEMENTS => data
            .replacements
            .iter()
            .map(|r| {
                Row::new(
                    RecordRef {
                        family: RecordFamily::Replacement,
                        id: r.id,
                    },
                    vec![
                        r.date.clone(),
                        r.old_item_serial.clone(),
                        r.new_item_serial.clone(),
                        r.rider_name.clone(),
                        r.rider_number.clone(),
                        r.station.clone(),
                    ],
                )
            })
            .collect(),
        _ => return None,
    };
    Some(rows)
}

/// All tables, populated from the dataset
pub fn build_tables(data: &Dataset) -> Vec<Table> {
    let defs = [
        (KITS, "Conversion Kits", item_headers()),
        (SPARE_PARTS, "Spare Parts", item_headers()),
        (
            RETURNS,
            "Returns",
            headers(&["Date", "Item Serial", "Personnel", "Status", "Notes"]),
        ),
        (
            REPLACEMENTS,
            "Replacements",
            headers(&[
                "Date",
                "Old Serial",
                "New Serial",
                "Rider",
                "Rider No.",
                "Station",
            ]),
        ),
    ];
    defs.into_iter()
        .map(|(id, title, headers)| {
            let rows = rows_for(id, data).unwrap_or_default();
            Table::new(id, title, headers).with_rows(rows)
        })
        .collect()
}

/// Left-hand navigation menu
pub fn build_dropdowns() -> Vec<Dropdown> {
    vec![
        Dropdown::new("inventory", "Inventory")
            .entry("Conversion kits", KITS)
            .entry("Spare parts", SPARE_PARTS),
        Dropdown::new("records", "Records")
            .entry("Returns", RETURNS)
            .entry("Replacements", REPLACEMENTS),
    ]
}
