//! Submission targets and their local effect
//!
//! Every form and link in the view ends in one of these paths. After a
//! submission has been handed to the sink, [`apply`] makes the same change
//! to the in-memory dataset so the tables stay current.

use crate::error::{ViewError, ViewResult};
use crate::model::form::{clamped_difference, parse_int_lenient};
use crate::model::record::{
    Dataset, Item, RecordFamily, RecordRef, Replacement, ReturnRecord, CONVERSION_KIT,
};
use crate::services::outbox::OutboxEntry;
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// `/<endpoint>` or `/<endpoint>/<id>`
static ROUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([a-z_]+)(?:/(\d+))?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AddItem,
    AddConversionKit,
    AddAllocation,
    AddReplacement,
    AddReturn,
    UpdateItem(i64),
    UpdateReturnStatus(i64),
    UpdateReturn(i64),
    UpdateReplacement(i64),
    ProcessReturn(i64),
    DeleteItem(i64),
    DeleteReturn(i64),
    DeleteReplacement(i64),
}

impl Route {
    pub fn parse(path: &str) -> ViewResult<Route> {
        let unknown = || ViewError::UnknownRoute(path.to_string());
        let caps = ROUTE_REGEX.captures(path).ok_or_else(unknown)?;
        let id = match caps.get(2) {
            Some(m) => Some(m.as_str().parse::<i64>().map_err(|_| unknown())?),
            None => None,
        };
        let route = match (&caps[1], id) {
            ("add_item", None) => Route::AddItem,
            ("add_conversion_kit", None) => Route::AddConversionKit,
            ("add_allocation", None) => Route::AddAllocation,
            ("add_replacement", None) => Route::AddReplacement,
            ("add_return", None) => Route::AddReturn,
            ("update_item", Some(id)) => Route::UpdateItem(id),
            ("update_return_status", Some(id)) => Route::UpdateReturnStatus(id),
            ("update_return", Some(id)) => Route::UpdateReturn(id),
            ("update_replacement", Some(id)) => Route::UpdateReplacement(id),
            ("process_return", Some(id)) => Route::ProcessReturn(id),
            ("delete_item", Some(id)) => Route::DeleteItem(id),
            ("delete_return", Some(id)) => Route::DeleteReturn(id),
            ("delete_replacement", Some(id)) => Route::DeleteReplacement(id),
            _ => return Err(unknown()),
        };
        Ok(route)
    }

    fn endpoint(&self) -> (&'static str, Option<i64>) {
        match *self {
            Route::AddItem => ("add_item", None),
            Route::AddConversionKit => ("add_conversion_kit", None),
            Route::AddAllocation => ("add_allocation", None),
            Route::AddReplacement => ("add_replacement", None),
            Route::AddReturn => ("add_return", None),
            Route::UpdateItem(id) => ("update_item", Some(id)),
            Route::UpdateReturnStatus(id) => ("update_return_status", Some(id)),
            Route::UpdateReturn(id) => ("update_return", Some(id)),
            Route::UpdateReplacement(id) => ("update_replacement", Some(id)),
            Route::ProcessReturn(id) => ("process_return", Some(id)),
            Route::DeleteItem(id) => ("delete_item", Some(id)),
            Route::DeleteReturn(id) => ("delete_return", Some(id)),
            Route::DeleteReplacement(id) => ("delete_replacement", Some(id)),
        }
    }

    /// Record family the route reads or writes
    pub fn family(&self) -> RecordFamily {
        match self {
            Route::AddItem
            | Route::AddConversionKit
            | Route::UpdateItem(_)
            | Route::DeleteItem(_) => RecordFamily::Item,
            Route::AddReturn
            | Route::UpdateReturnStatus(_)
            | Route::UpdateReturn(_)
            | Route::ProcessReturn(_)
            | Route::DeleteReturn(_) => RecordFamily::Return,
            Route::AddAllocation
            | Route::AddReplacement
            | Route::UpdateReplacement(_)
            | Route::DeleteReplacement(_) => RecordFamily::Replacement,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.endpoint() {
            (endpoint, Some(id)) => write!(f, "/{}/{}", endpoint, id),
            (endpoint, None) => write!(f, "/{}", endpoint),
        }
    }
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> &'a str {
    fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Integer field that falls back to `default` when left blank
fn int_or(fields: &[(String, String)], name: &str, default: i64) -> i64 {
    match field(fields, name) {
        v if v.trim().is_empty() => default,
        v => parse_int_lenient(v),
    }
}

/// One unit leaves stock for an installation
fn allocate_unit(item: &mut Item) {
    if item.units_available > 0 {
        item.units_available -= 1;
        item.units_installed = item.units_installed.saturating_add(1);
    }
}

/// A returned unit goes back into stock
fn restock_unit(item: &mut Item) {
    item.units_available = item.units_available.saturating_add(1);
    item.units_installed = item.units_installed.saturating_sub(1).max(0);
}

/// Apply a submitted route to the dataset
///
/// `today` stamps new items and processed returns.
pub fn apply(
    data: &mut Dataset,
    route: Route,
    fields: &[(String, String)],
    today: NaiveDate,
) -> ViewResult<()> {
    let family = route.family();
    let missing = |id: i64| ViewError::UnknownRecord {
        kind: family.name(),
        id,
    };
    let get = |name: &str| field(fields, name).to_string();
    let stamp = today.format("%Y-%m-%d").to_string();

    match route {
        Route::AddItem | Route::AddConversionKit => {
            let serial = get("serial");
            if data.items.iter().any(|i| i.serial == serial) {
                return Err(ViewError::DuplicateSerial(serial));
            }
            let imported = int_or(fields, "units_imported", 0);
            let item = if route == Route::AddConversionKit {
                Item {
                    id: data.next_id(family),
                    serial,
                    item_name: get("item_name"),
                    item_type: CONVERSION_KIT.to_string(),
                    admin: get("admin"),
                    created_at: Some(stamp),
                    units_imported: imported,
                    units_installed: 0,
                    // Blank available means the whole import is in stock
                    units_available: int_or(fields, "units_available", imported),
                }
            } else {
                Item {
                    id: data.next_id(family),
                    serial,
                    item_name: get("item_name"),
                    item_type: get("item_type"),
                    admin: get("admin"),
                    created_at: Some(stamp),
                    units_imported: imported,
                    units_installed: int_or(fields, "units_installed", 0),
                    units_available: int_or(fields, "units_available", 0),
                }
            };
            data.items.push(item);
        }
        Route::AddAllocation | Route::AddReplacement => {
            let replacement = Replacement {
                id: data.next_id(family),
                date: get("date"),
                old_item_serial: get("old_item_serial"),
                new_item_serial: get("new_item_serial"),
                rider_name: get("rider_name"),
                rider_number: get("rider_number"),
                released_to: get("released_to"),
                link: get("link"),
                station: get("station"),
            };
            if route == Route::AddAllocation {
                if let Some(item) = data.item_by_serial_mut(&replacement.new_item_serial) {
                    allocate_unit(item);
                }
            }
            data.replacements.push(replacement);
        }
        Route::AddReturn => {
            let status = non_empty(field(fields, "status")).unwrap_or_else(|| "pending".into());
            let record = ReturnRecord {
                id: data.next_id(family),
                date: get("date"),
                item_serial: get("item_serial"),
                personnel: get("personnel"),
                status,
                notes: get("notes"),
                processed_date: None,
                condition_rating: int_or(fields, "condition_rating", 5),
            };
            data.returns.push(record);
        }
        Route::UpdateItem(id) => {
            let item = data.item_mut(id).ok_or_else(|| missing(id))?;
            let imported = parse_int_lenient(field(fields, "units_imported"));
            let installed = parse_int_lenient(field(fields, "units_installed"));
            let mut available = parse_int_lenient(field(fields, "units_available"));
            // available + installed may not exceed imported
            if installed.saturating_add(available) > imported {
                available = clamped_difference(
                    field(fields, "units_imported"),
                    field(fields, "units_installed"),
                );
            }
            item.serial = get("serial");
            item.item_name = get("item_name");
            item.item_type = get("item_type");
            item.admin = get("admin");
            item.created_at = non_empty(field(fields, "created_at"));
            item.units_imported = imported;
            item.units_installed = installed;
            item.units_available = available;
        }
        Route::UpdateReturnStatus(id) => {
            let ret = data.return_record_mut(id).ok_or_else(|| missing(id))?;
            ret.status = get("status");
            ret.notes = get("notes");
        }
        Route::UpdateReturn(id) => {
            let ret = data.return_record_mut(id).ok_or_else(|| missing(id))?;
            ret.date = get("date");
            ret.item_serial = get("item_serial");
            ret.personnel = get("personnel");
            ret.status = get("status");
            ret.notes = get("notes");
        }
        Route::UpdateReplacement(id) => {
            let rep = data.replacement_mut(id).ok_or_else(|| missing(id))?;
            rep.date = get("date");
            rep.old_item_serial = get("old_item_serial");
            rep.new_item_serial = get("new_item_serial");
            rep.rider_name = get("rider_name");
            rep.rider_number = get("rider_number");
            rep.station = get("station");
        }
        Route::ProcessReturn(id) => {
            let ret = data.return_record_mut(id).ok_or_else(|| missing(id))?;
            ret.status = "processed".to_string();
            ret.processed_date = Some(stamp);
            let serial = ret.item_serial.clone();
            if let Some(item) = data.item_by_serial_mut(&serial) {
                restock_unit(item);
            }
        }
        Route::DeleteItem(id) | Route::DeleteReturn(id) | Route::DeleteReplacement(id) => {
            if !data.remove(RecordRef { family, id }) {
                return Err(missing(id));
            }
        }
    }
    Ok(())
}

/// Re-apply earlier submissions in order, each dated by its own timestamp
///
/// Entries that no longer apply are skipped. Returns how many applied.
pub fn replay(data: &mut Dataset, entries: &[OutboxEntry]) -> usize {
    let mut applied = 0;
    for entry in entries {
        let action = &entry.submission.action;
        let result = Route::parse(action).and_then(|route| {
            apply(
                data,
                route,
                &entry.submission.fields,
                entry.timestamp.date_naive(),
            )
        });
        match result {
            Ok(()) => applied += 1,
            Err(e) => warn!(action = %action, error = %e, "skipped outbox entry"),
        }
    }
    applied
}
