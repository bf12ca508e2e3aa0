//! Record dialogs
//!
//! Edit and creation dialogs share one population routine driven by a
//! field-mapping table: each [`DialogSpec`] lists the form fields, their
//! defaults, and where the form submits to.

use super::form::{DerivedField, FieldKind, FieldMark, Form, FormField};
use super::record::{Item, Replacement, ReturnRecord, CONVERSION_KIT, SPARE_PART};
use crate::error::{ViewError, ViewResult};
use std::collections::HashMap;

pub const ITEM_TYPES: &[&str] = &[CONVERSION_KIT, SPARE_PART];
pub const RETURN_STATUSES: &[&str] = &["pending", "processed", "rejected"];

/// Dialog family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    Item,
    ReturnStatus,
    Return,
    Replacement,
    NewItem,
    NewKit,
    NewAllocation,
    NewReplacement,
    NewReturn,
}

impl DialogKind {
    pub fn all() -> [DialogKind; 9] {
        [
            DialogKind::Item,
            DialogKind::ReturnStatus,
            DialogKind::Return,
            DialogKind::Replacement,
            DialogKind::NewItem,
            DialogKind::NewKit,
            DialogKind::NewAllocation,
            DialogKind::NewReplacement,
            DialogKind::NewReturn,
        ]
    }

    pub fn spec(&self) -> &'static DialogSpec {
        match self {
            DialogKind::Item => &ITEM_DIALOG,
            DialogKind::ReturnStatus => &RETURN_STATUS_DIALOG,
            DialogKind::Return => &RETURN_DIALOG,
            DialogKind::Replacement => &REPLACEMENT_DIALOG,
            DialogKind::NewItem => &NEW_ITEM_DIALOG,
            DialogKind::NewKit => &NEW_KIT_DIALOG,
            DialogKind::NewAllocation => &NEW_ALLOCATION_DIALOG,
            DialogKind::NewReplacement => &NEW_REPLACEMENT_DIALOG,
            DialogKind::NewReturn => &NEW_RETURN_DIALOG,
        }
    }

    /// Submission target; edit dialogs need the record id
    pub fn action_path(&self, id: Option<i64>) -> ViewResult<String> {
        match (self.spec().target, id) {
            (DialogTarget::Create(path), _) => Ok(path.to_string()),
            (DialogTarget::Record(prefix), Some(id)) => Ok(format!("{}{}", prefix, id)),
            (DialogTarget::Record(prefix), None) => Err(ViewError::UnknownRoute(prefix.to_string())),
        }
    }
}

/// Where a dialog's form posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    /// Prefix completed by the record id
    Record(&'static str),
    /// Fixed creation path
    Create(&'static str),
}

/// What a field gets when no usable value was passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Empty,
    Text(&'static str),
    Zero,
}

impl FieldDefault {
    fn value(&self) -> String {
        match self {
            FieldDefault::Empty => String::new(),
            FieldDefault::Text(s) => s.to_string(),
            FieldDefault::Zero => "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
    pub required: bool,
    /// Layout may leave this field out; population skips it when absent
    pub optional: bool,
}

impl FieldSpec {
    const fn new(id: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            id,
            label,
            kind,
            default: FieldDefault::Empty,
            required: false,
            optional: false,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    const fn default_to(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }
}

#[derive(Debug)]
pub struct DialogSpec {
    pub kind: DialogKind,
    pub title: &'static str,
    pub modal_id: &'static str,
    pub form_id: &'static str,
    pub target: DialogTarget,
    pub fields: &'static [FieldSpec],
    pub derived: Option<DerivedField>,
}

pub static ITEM_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::Item,
    title: "Edit Item",
    modal_id: "edit_item_modal",
    form_id: "update_item_form",
    target: DialogTarget::Record("/update_item/"),
    fields: &[
        FieldSpec::new("serial", "Serial", FieldKind::Text).required(),
        FieldSpec::new("item_name", "Item name", FieldKind::Text).required(),
        FieldSpec::new("item_type", "Type", FieldKind::Choice(ITEM_TYPES))
            .required()
            .default_to(FieldDefault::Text(CONVERSION_KIT)),
        FieldSpec::new("admin", "Admin", FieldKind::Text),
        FieldSpec::new("created_at", "Created", FieldKind::Date).optional(),
        FieldSpec::new("units_imported", "Units imported", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
        FieldSpec::new("units_installed", "Units installed", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
        FieldSpec::new("units_available", "Units available", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
    ],
    derived: Some(DerivedField {
        minuend: "units_imported",
        subtrahend: "units_installed",
        target: "units_available",
    }),
};

pub static RETURN_STATUS_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::ReturnStatus,
    title: "Update Return Status",
    modal_id: "return_status_modal",
    form_id: "return_status_form",
    target: DialogTarget::Record("/update_return_status/"),
    fields: &[
        FieldSpec::new("status", "Status", FieldKind::Choice(RETURN_STATUSES)).required(),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
    ],
    derived: None,
};

pub static RETURN_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::Return,
    title: "Edit Return",
    modal_id: "edit_return_modal",
    form_id: "edit_return_form",
    target: DialogTarget::Record("/update_return/"),
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("item_serial", "Item serial", FieldKind::Text).required(),
        FieldSpec::new("personnel", "Personnel", FieldKind::Text).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(RETURN_STATUSES))
            .default_to(FieldDefault::Text("pending")),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
    ],
    derived: None,
};

pub static REPLACEMENT_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::Replacement,
    title: "Edit Replacement",
    modal_id: "edit_replacement_modal",
    form_id: "edit_replacement_form",
    target: DialogTarget::Record("/update_replacement/"),
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("old_item_serial", "Old serial", FieldKind::Text).required(),
        FieldSpec::new("new_item_serial", "New serial", FieldKind::Text).required(),
        FieldSpec::new("rider_name", "Rider name", FieldKind::Text).required(),
        FieldSpec::new("rider_number", "Rider number", FieldKind::Text),
        FieldSpec::new("station", "Station", FieldKind::Text),
    ],
    derived: None,
};

pub static NEW_ITEM_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::NewItem,
    title: "Add Item",
    modal_id: "add_item_modal",
    form_id: "add_item_form",
    target: DialogTarget::Create("/add_item"),
    fields: &[
        FieldSpec::new("serial", "Serial", FieldKind::Text).required(),
        FieldSpec::new("item_name", "Item name", FieldKind::Text).required(),
        FieldSpec::new("item_type", "Type", FieldKind::Choice(ITEM_TYPES))
            .required()
            .default_to(FieldDefault::Text(SPARE_PART)),
        FieldSpec::new("admin", "Admin", FieldKind::Text),
        FieldSpec::new("units_imported", "Units imported", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
        FieldSpec::new("units_installed", "Units installed", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
        FieldSpec::new("units_available", "Units available", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
    ],
    derived: Some(DerivedField {
        minuend: "units_imported",
        subtrahend: "units_installed",
        target: "units_available",
    }),
};

pub static NEW_KIT_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::NewKit,
    title: "Add Conversion Kit",
    modal_id: "add_kit_modal",
    form_id: "add_conversion_kit_form",
    target: DialogTarget::Create("/add_conversion_kit"),
    fields: &[
        FieldSpec::new("serial", "Serial", FieldKind::Text).required(),
        FieldSpec::new("item_name", "Item name", FieldKind::Text).required(),
        FieldSpec::new("admin", "Admin", FieldKind::Text).required(),
        FieldSpec::new("units_imported", "Units imported", FieldKind::Integer)
            .default_to(FieldDefault::Zero),
        // Left blank, the whole import counts as available
        FieldSpec::new("units_available", "Units available", FieldKind::Integer),
    ],
    derived: None,
};

pub static NEW_ALLOCATION_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::NewAllocation,
    title: "Allocate Kit",
    modal_id: "add_allocation_modal",
    form_id: "add_allocation_form",
    target: DialogTarget::Create("/add_allocation"),
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("old_item_serial", "Old serial", FieldKind::Text),
        FieldSpec::new("new_item_serial", "New serial", FieldKind::Text).required(),
        FieldSpec::new("rider_name", "Rider name", FieldKind::Text).required(),
        FieldSpec::new("rider_number", "Rider number", FieldKind::Text),
        FieldSpec::new("station", "Station", FieldKind::Text),
    ],
    derived: None,
};

pub static NEW_REPLACEMENT_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::NewReplacement,
    title: "Add Replacement",
    modal_id: "add_replacement_modal",
    form_id: "add_replacement_form",
    target: DialogTarget::Create("/add_replacement"),
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("old_item_serial", "Old serial", FieldKind::Text).required(),
        FieldSpec::new("new_item_serial", "New serial", FieldKind::Text).required(),
        FieldSpec::new("rider_name", "Rider name", FieldKind::Text).required(),
        FieldSpec::new("rider_number", "Rider number", FieldKind::Text),
        FieldSpec::new("released_to", "Released to", FieldKind::Text),
        FieldSpec::new("link", "Link", FieldKind::Text),
        FieldSpec::new("station", "Station", FieldKind::Text),
    ],
    derived: None,
};

pub static NEW_RETURN_DIALOG: DialogSpec = DialogSpec {
    kind: DialogKind::NewReturn,
    title: "Add Return",
    modal_id: "add_return_modal",
    form_id: "add_return_form",
    target: DialogTarget::Create("/add_return"),
    fields: &[
        FieldSpec::new("date", "Date", FieldKind::Date).required(),
        FieldSpec::new("item_serial", "Item serial", FieldKind::Text).required(),
        FieldSpec::new("personnel", "Personnel", FieldKind::Text).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(RETURN_STATUSES))
            .default_to(FieldDefault::Text("pending")),
        FieldSpec::new("notes", "Notes", FieldKind::Text),
        FieldSpec::new("condition_rating", "Condition (1-5)", FieldKind::Integer)
            .default_to(FieldDefault::Text("5")),
    ],
    derived: None,
};

/// Values handed to a dialog when it opens
///
/// `None` means "not provided". `None` and the empty string both take the
/// field's default; every other value, `"0"` included, is written as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogArgs {
    values: HashMap<&'static str, Option<String>>,
}

impl DialogArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &'static str, value: Option<String>) -> Self {
        self.values.insert(field, value);
        self
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_deref())
    }

    pub fn for_item(item: &Item) -> Self {
        Self::new()
            .with("serial", Some(item.serial.clone()))
            .with("item_name", Some(item.item_name.clone()))
            .with("item_type", Some(item.item_type.clone()))
            .with("admin", Some(item.admin.clone()))
            .with("created_at", item.created_at.clone())
            .with("units_imported", Some(item.units_imported.to_string()))
            .with("units_installed", Some(item.units_installed.to_string()))
            .with("units_available", Some(item.units_available.to_string()))
    }

    pub fn for_return_status(record: &ReturnRecord) -> Self {
        Self::new()
            .with("status", Some(record.status.clone()))
            .with("notes", Some(record.notes.clone()))
    }

    pub fn for_return(record: &ReturnRecord) -> Self {
        Self::new()
            .with("date", Some(record.date.clone()))
            .with("item_serial", Some(record.item_serial.clone()))
            .with("personnel", Some(record.personnel.clone()))
            .with("status", Some(record.status.clone()))
            .with("notes", Some(record.notes.clone()))
    }

    pub fn for_replacement(record: &Replacement) -> Self {
        Self::new()
            .with("date", Some(record.date.clone()))
            .with("old_item_serial", Some(record.old_item_serial.clone()))
            .with("new_item_serial", Some(record.new_item_serial.clone()))
            .with("rider_name", Some(record.rider_name.clone()))
            .with("rider_number", Some(record.rider_number.clone()))
            .with("station", Some(record.station.clone()))
    }
}

/// Resolve one argument against its default
pub fn resolve(default: FieldDefault, arg: Option<&str>) -> String {
    match arg {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.value(),
    }
}

/// Build the empty form for a dialog
///
/// Optional fields are included only when `include_optional` is set.
pub fn build_form(spec: &DialogSpec, include_optional: bool) -> Form {
    let fields = spec
        .fields
        .iter()
        .filter(|f| include_optional || !f.optional)
        .map(|f| FormField {
            id: f.id,
            label: f.label,
            kind: f.kind,
            required: f.required,
            value: f.default.value(),
            mark: FieldMark::Neutral,
        })
        .collect();
    let mut form = Form::new(spec.form_id, fields);
    if let Some(derived) = spec.derived {
        form.arm_derived(derived);
    }
    form
}

/// Fill a dialog's form and point it at its submission target
///
/// `id` is the edited record; creation dialogs take `None`. Required fields
/// must be present in the form; optional ones are written only if the
/// layout carries them.
pub fn populate(
    form: &mut Form,
    spec: &DialogSpec,
    id: Option<i64>,
    args: &DialogArgs,
) -> ViewResult<()> {
    let action = spec.kind.action_path(id)?;
    for field in spec.fields {
        let value = resolve(field.default, args.get(field.id));
        if field.optional {
            if let Some(target) = form.field_mut(field.id) {
                target.value = value;
            }
        } else {
            form.set_value(field.id, value)?;
        }
    }
    form.action = action;
    form.focus = 0;
    form.clear_marks();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_paths() {
        let path = |kind: DialogKind, id| kind.action_path(id).unwrap();
        assert_eq!(path(DialogKind::Item, Some(12)), "/update_item/12");
        assert_eq!(
            path(DialogKind::ReturnStatus, Some(3)),
            "/update_return_status/3"
        );
        assert_eq!(path(DialogKind::Return, Some(4)), "/update_return/4");
        assert_eq!(
            path(DialogKind::Replacement, Some(5)),
            "/update_replacement/5"
        );
        assert_eq!(path(DialogKind::NewKit, None), "/add_conversion_kit");
        assert_eq!(path(DialogKind::NewReturn, Some(9)), "/add_return");
        assert_eq!(
            DialogKind::Item.action_path(None),
            Err(ViewError::UnknownRoute("/update_item/".into()))
        );
    }

    #[test]
    fn test_creation_kinds() {
        let created: Vec<DialogKind> = DialogKind::all()
            .into_iter()
            .filter(|k| k.action_path(None).is_ok())
            .collect();
        assert_eq!(created.len(), 5);
        for kind in DialogKind::all() {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn test_populate_new_return_defaults() {
        let spec = DialogKind::NewReturn.spec();
        let mut form = build_form(spec, true);
        let args = DialogArgs::new().with("date", Some("2024-02-01".into()));
        populate(&mut form, spec, None, &args).unwrap();
        assert_eq!(form.action, "/add_return");
        assert_eq!(form.value("date"), Some("2024-02-01"));
        assert_eq!(form.value("status"), Some("pending"));
        assert_eq!(form.value("condition_rating"), Some("5"));
        assert_eq!(form.value("personnel"), Some(""));
    }

    #[test]
    fn test_new_kit_available_starts_blank() {
        let spec = DialogKind::NewKit.spec();
        let mut form = build_form(spec, true);
        populate(&mut form, spec, None, &DialogArgs::new()).unwrap();
        assert_eq!(form.value("units_imported"), Some("0"));
        assert_eq!(form.value("units_available"), Some(""));
        assert!(!form.validate());
        assert_eq!(form.field("admin").unwrap().mark, FieldMark::Error);
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(resolve(FieldDefault::Text("pending"), None), "pending");
        assert_eq!(resolve(FieldDefault::Text("pending"), Some("")), "pending");
        assert_eq!(resolve(FieldDefault::Zero, None), "0");
        assert_eq!(resolve(FieldDefault::Empty, Some("0")), "0");
        assert_eq!(resolve(FieldDefault::Empty, Some("SP001")), "SP001");
    }

    #[test]
    fn test_populate_item_with_literal_values() {
        let spec = DialogKind::Item.spec();
        let mut form = build_form(spec, true);
        let args = DialogArgs::new()
            .with("serial", Some("SP002".into()))
            .with("item_name", Some("Battery".into()))
            .with("item_type", Some(SPARE_PART.into()))
            .with("admin", Some("Inventory".into()))
            .with("created_at", Some("2024-01-01".into()))
            .with("units_imported", Some("75".into()))
            .with("units_installed", Some("20".into()))
            .with("units_available", Some("55".into()));

        populate(&mut form, spec, Some(9), &args).unwrap();

        assert_eq!(form.action, "/update_item/9");
        assert_eq!(form.value("serial"), Some("SP002"));
        assert_eq!(form.value("item_type"), Some(SPARE_PART));
        assert_eq!(form.value("created_at"), Some("2024-01-01"));
        assert_eq!(form.value("units_available"), Some("55"));
    }

    #[test]
    fn test_populate_item_applies_defaults() {
        let spec = DialogKind::Item.spec();
        let mut form = build_form(spec, true);
        let args = DialogArgs::new()
            .with("serial", None)
            .with("item_type", Some(String::new()));

        populate(&mut form, spec, Some(1), &args).unwrap();

        assert_eq!(form.value("serial"), Some(""));
        assert_eq!(form.value("item_type"), Some(CONVERSION_KIT));
        assert_eq!(form.value("created_at"), Some(""));
        assert_eq!(form.value("units_imported"), Some("0"));
        assert_eq!(form.value("units_installed"), Some("0"));
        assert_eq!(form.value("units_available"), Some("0"));
    }

    #[test]
    fn test_populate_skips_absent_optional_field() {
        let spec = DialogKind::Item.spec();
        let mut form = build_form(spec, false);
        assert!(form.field("created_at").is_none());
        let args = DialogArgs::new().with("created_at", Some("2024-01-01".into()));
        assert!(populate(&mut form, spec, Some(1), &args).is_ok());
        assert!(form.field("created_at").is_none());
    }

    #[test]
    fn test_populate_fails_on_missing_required_field() {
        let spec = DialogKind::Return.spec();
        let mut form = Form::new(spec.form_id, Vec::new());
        let err = populate(&mut form, spec, Some(1), &DialogArgs::new()).unwrap_err();
        assert!(matches!(err, ViewError::UnknownField { .. }));
    }

    #[test]
    fn test_return_status_defaults_to_pending() {
        let spec = DialogKind::Return.spec();
        let mut form = build_form(spec, true);
        populate(&mut form, spec, Some(2), &DialogArgs::new()).unwrap();
        assert_eq!(form.value("status"), Some("pending"));
        assert_eq!(form.action, "/update_return/2");
    }

    #[test]
    fn test_zero_text_value_is_kept() {
        let spec = DialogKind::Replacement.spec();
        let mut form = build_form(spec, true);
        let args = DialogArgs::new().with("rider_number", Some("0".into()));
        populate(&mut form, spec, Some(8), &args).unwrap();
        assert_eq!(form.value("rider_number"), Some("0"));
        assert_eq!(form.value("station"), Some(""));
    }

    #[test]
    fn test_item_form_arms_derived_field() {
        let form = build_form(DialogKind::Item.spec(), false);
        assert!(form.derived().is_some());
        let other = build_form(DialogKind::Replacement.spec(), true);
        assert!(other.derived().is_none());
    }

    #[test]
    fn test_populate_clears_previous_marks() {
        let spec = DialogKind::ReturnStatus.spec();
        let mut form = build_form(spec, true);
        assert!(!form.validate());
        let args = DialogArgs::new().with("status", Some("processed".into()));
        populate(&mut form, spec, Some(3), &args).unwrap();
        assert!(form.fields.iter().all(|f| f.mark == FieldMark::Neutral));
    }
}
