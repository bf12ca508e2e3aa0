//! Dataset snapshot loading
//!
//! A snapshot is a JSON or YAML document with `items`, `returns` and
//! `replacements` arrays. The format is chosen by file extension.

use crate::model::record::{Dataset, Item, Replacement, ReturnRecord, CONVERSION_KIT, SPARE_PART};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Load a dataset snapshot from disk
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let data: Dataset = match extension.as_str() {
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?,
        other => bail!("Unsupported snapshot format '{}'", other),
    };

    Ok(data)
}

fn item(
    id: i64,
    serial: &str,
    name: &str,
    item_type: &str,
    created_at: Option<&str>,
    units: (i64, i64, i64),
) -> Item {
    Item {
        id,
        serial: serial.to_string(),
        item_name: name.to_string(),
        item_type: item_type.to_string(),
        admin: if created_at.is_some() {
            "Inventory".to_string()
        } else {
            String::new()
        },
        created_at: created_at.map(str::to_string),
        units_imported: units.0,
        units_installed: units.1,
        units_available: units.2,
    }
}

fn replacement(
    id: i64,
    date: &str,
    old_serial: &str,
    new_serial: &str,
    rider: (&str, &str),
    station: &str,
) -> Replacement {
    Replacement {
        id,
        date: date.to_string(),
        old_item_serial: old_serial.to_string(),
        new_item_serial: new_serial.to_string(),
        rider_name: rider.0.to_string(),
        rider_number: rider.1.to_string(),
        released_to: String::new(),
        link: String::new(),
        station: station.to_string(),
    }
}

/// Built-in inventory used when no snapshot file is given
pub fn sample() -> Dataset {
    let kits = [
        ("15092501", "Electrical component box", (125, 2, 123)),
        ("15092502", "Shaft cups", (130, 1, 129)),
        ("15092503", "Motor", (125, 1, 124)),
        ("15092504", "Controller", (120, 1, 119)),
        ("15092505", "Gear", (125, 1, 124)),
        ("15092506", "Engine mount (front)", (0, 0, 0)),
        ("15092507", "Engine mount fittings (back)", (0, 0, 0)),
        ("15092508", "Engine mount fitting (sides)", (0, 0, 0)),
    ];
    let stocked_parts = [
        ("SP001", "Motor", (50, 12, 38)),
        ("SP002", "Battery", (75, 20, 55)),
        ("SP003", "Controller", (40, 8, 32)),
        ("SP004", "Throttle", (60, 15, 45)),
    ];
    let option_parts = [
        ("SP005", "Charger"),
        ("SP006", "Screen"),
        ("SP007", "Gear"),
        ("SP008", "PSU"),
        ("SP009", "Relays"),
        ("SP010", "Breakers"),
        ("SP011", "Wiper switch"),
        ("SP012", "Battery switch"),
        ("SP013", "Ignition and key"),
        ("SP014", "Connecting wires"),
        ("SP015", "Wire holder"),
    ];

    let mut items = Vec::new();
    for (serial, name, units) in kits {
        let id = items.len() as i64 + 1;
        items.push(item(id, serial, name, CONVERSION_KIT, Some("45915"), units));
    }
    for (serial, name, units) in stocked_parts {
        let id = items.len() as i64 + 1;
        items.push(item(id, serial, name, SPARE_PART, Some("2024-01-01"), units));
    }
    for (serial, name) in option_parts {
        let id = items.len() as i64 + 1;
        items.push(item(id, serial, name, SPARE_PART, None, (0, 0, 0)));
    }

    let replacements = vec![
        replacement(1, "2024-01-15", "APP 181 QY", "15092501", ("Adeleke Sikiru", "08012345678"), "Lagos Island"),
        replacement(2, "2024-01-16", "AGL 874 QD", "15092502", ("Ayomide Olorunlana", "08023456789"), "Victoria Island"),
        replacement(3, "2024-01-17", "KSF 199 QM", "15092503", ("Adekoya Ebenezer", "08034567890"), "Ikeja"),
        replacement(4, "2024-01-18", "SMK 743 QL", "15092504", ("Hilary Maanpar", "08045678901"), "Surulere"),
        replacement(5, "2024-01-19", "XYZ 456 AB", "15092505", ("Ibrahim Musa", "08056789012"), "Yaba"),
        replacement(6, "2024-01-20", "DEF 789 CD", "15092501", ("Chidi Okwu", "08067890123"), "Apapa"),
        replacement(7, "2024-01-22", "SP001-OLD", "SP001", ("Ahmed Bello", "08011111111"), "Ikeja"),
        replacement(8, "2024-01-23", "SP002-OLD", "SP002", ("Fatima Yusuf", "08022222222"), "Victoria Island"),
        replacement(9, "2024-01-24", "SP003-OLD", "SP003", ("Emeka Okafor", "08033333333"), "Surulere"),
    ];

    let returns = vec![
        ReturnRecord {
            id: 1,
            date: "2024-01-25".to_string(),
            item_serial: "15092501".to_string(),
            personnel: "John Doe".to_string(),
            status: "pending".to_string(),
            notes: "Kit returned for maintenance".to_string(),
            processed_date: None,
            condition_rating: 5,
        },
        ReturnRecord {
            id: 2,
            date: "2024-01-26".to_string(),
            item_serial: "SP001".to_string(),
            personnel: "Jane Smith".to_string(),
            status: "processed".to_string(),
            notes: "Motor replacement completed".to_string(),
            processed_date: None,
            condition_rating: 5,
        },
    ];

    Dataset {
        items,
        returns,
        replacements,
    }
}
