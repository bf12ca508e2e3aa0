//! Edit forms: field values, required-field validation and derived fields

use crate::error::{ViewError, ViewResult};

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Integer,
    /// Fixed option list, cycled rather than typed
    Choice(&'static [&'static str]),
}

/// Visual state of a field's border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMark {
    #[default]
    Neutral,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    pub mark: FieldMark,
}

/// `target = max(0, minuend - subtrahend)`, recomputed when either source changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedField {
    pub minuend: &'static str,
    pub subtrahend: &'static str,
    pub target: &'static str,
}

/// A hidden-until-opened form with a submission target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub id: &'static str,
    pub action: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    derived: Option<DerivedField>,
}

impl Form {
    pub fn new(id: &'static str, fields: Vec<FormField>) -> Self {
        Self {
            id,
            action: String::new(),
            fields,
            focus: 0,
            derived: None,
        }
    }

    /// Wire a derived field; ignored unless all three fields are present
    pub fn arm_derived(&mut self, derived: DerivedField) -> bool {
        let present = [derived.minuend, derived.subtrahend, derived.target]
            .iter()
            .all(|id| self.field(id).is_some());
        if present {
            self.derived = Some(derived);
        }
        present
    }

    pub fn derived(&self) -> Option<DerivedField> {
        self.derived
    }

    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.field(id).map(|f| f.value.as_str())
    }

    /// Write a field that must exist
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> ViewResult<()> {
        let form = self.id;
        let field = self.field_mut(id).ok_or_else(|| ViewError::UnknownField {
            form: form.to_string(),
            field: id.to_string(),
        })?;
        field.value = value.into();
        Ok(())
    }

    /// Check required fields, marking empty ones and clearing the rest
    ///
    /// Returns `false` if any required field is blank after trimming. The
    /// caller decides whether to go ahead with the submission.
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for field in self.fields.iter_mut().filter(|f| f.required) {
            if field.value.trim().is_empty() {
                field.mark = FieldMark::Error;
                valid = false;
            } else {
                field.mark = FieldMark::Neutral;
            }
        }
        valid
    }

    pub fn clear_marks(&mut self) {
        for field in &mut self.fields {
            field.mark = FieldMark::Neutral;
        }
    }

    /// Recompute the derived field if one is armed
    pub fn recalculate(&mut self) {
        let Some(derived) = self.derived else {
            return;
        };
        let minuend = self.value(derived.minuend).unwrap_or_default();
        let subtrahend = self.value(derived.subtrahend).unwrap_or_default();
        let result = clamped_difference(minuend, subtrahend);
        if let Some(target) = self.field_mut(derived.target) {
            target.value = result.to_string();
        }
    }

    /// Field name/value pairs in declaration order
    pub fn payload(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.id.to_string(), f.value.clone()))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }

    /// Type a character into the focused field
    pub fn input(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        match field.kind {
            FieldKind::Choice(_) => return,
            FieldKind::Integer if !(c.is_ascii_digit() || c == '-') => return,
            _ => field.value.push(c),
        }
        self.after_edit();
    }

    pub fn backspace(&mut self) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        if matches!(field.kind, FieldKind::Choice(_)) {
            return;
        }
        field.value.pop();
        self.after_edit();
    }

    /// Step a choice field through its options
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Choice(options) = field.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let next = match options.iter().position(|o| *o == field.value) {
            Some(i) if forward => (i + 1) % options.len(),
            Some(i) => i.checked_sub(1).unwrap_or(options.len() - 1),
            None => 0,
        };
        field.value = options[next].to_string();
    }

    fn after_edit(&mut self) {
        let Some(derived) = self.derived else {
            return;
        };
        let edited = self.fields.get(self.focus).map(|f| f.id);
        if edited == Some(derived.minuend) || edited == Some(derived.subtrahend) {
            self.recalculate();
        }
    }
}

/// Leading-integer parse: optional whitespace, optional sign, then digits.
/// No digits gives `0`; a digit run too long for `i64` saturates.
pub fn parse_int_lenient(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return 0;
    }
    match digits.parse::<i64>() {
        Ok(magnitude) if negative => -magnitude,
        Ok(magnitude) => magnitude,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// `max(0, minuend - subtrahend)` over leniently parsed inputs
pub fn clamped_difference(minuend: &str, subtrahend: &str) -> i64 {
    let a = parse_int_lenient(minuend);
    let b = parse_int_lenient(subtrahend);
    a.saturating_sub(b).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &'static str, kind: FieldKind, required: bool, value: &str) -> FormField {
        FormField {
            id,
            label: id,
            kind,
            required,
            value: value.to_string(),
            mark: FieldMark::Neutral,
        }
    }

    fn units_form() -> Form {
        let mut form = Form::new(
            "units",
            vec![
                field("units_imported", FieldKind::Integer, false, "0"),
                field("units_installed", FieldKind::Integer, false, "0"),
                field("units_available", FieldKind::Integer, false, "0"),
            ],
        );
        assert!(form.arm_derived(DerivedField {
            minuend: "units_imported",
            subtrahend: "units_installed",
            target: "units_available",
        }));
        form
    }

    #[test]
    fn test_parse_int_lenient() {
        assert_eq!(parse_int_lenient("42"), 42);
        assert_eq!(parse_int_lenient("  7"), 7);
        assert_eq!(parse_int_lenient("12abc"), 12);
        assert_eq!(parse_int_lenient("-5"), -5);
        assert_eq!(parse_int_lenient("abc"), 0);
        assert_eq!(parse_int_lenient(""), 0);
        assert_eq!(parse_int_lenient("-"), 0);
    }

    #[test]
    fn test_parse_int_lenient_saturates_long_digit_runs() {
        assert_eq!(parse_int_lenient("9223372036854775807"), i64::MAX);
        assert_eq!(parse_int_lenient("123456789012345678901234"), i64::MAX);
        assert_eq!(parse_int_lenient("-9223372036854775808"), i64::MIN);
        assert_eq!(parse_int_lenient("-99999999999999999999x"), i64::MIN);
        assert_eq!(clamped_difference("99999999999999999999", "1"), i64::MAX - 1);
    }

    #[test]
    fn test_clamped_difference() {
        assert_eq!(clamped_difference("10", "3"), 7);
        assert_eq!(clamped_difference("3", "10"), 0);
        assert_eq!(clamped_difference("abc", "3"), 0);
        assert_eq!(clamped_difference("10", "x"), 10);
    }

    #[test]
    fn test_validate_marks_blank_required_fields() {
        let mut form = Form::new(
            "f",
            vec![
                field("serial", FieldKind::Text, true, "   "),
                field("name", FieldKind::Text, true, "Motor"),
                field("notes", FieldKind::Text, false, ""),
            ],
        );
        form.fields[1].mark = FieldMark::Error;

        assert!(!form.validate());
        assert_eq!(form.fields[0].mark, FieldMark::Error);
        assert_eq!(form.fields[1].mark, FieldMark::Neutral);
        assert_eq!(form.fields[2].mark, FieldMark::Neutral);
    }

    #[test]
    fn test_validate_resets_marks_when_complete() {
        let mut form = Form::new("f", vec![field("serial", FieldKind::Text, true, "")]);
        assert!(!form.validate());
        form.set_value("serial", "SP001").unwrap();
        assert!(form.validate());
        assert_eq!(form.fields[0].mark, FieldMark::Neutral);
    }

    #[test]
    fn test_typing_recalculates_available() {
        let mut form = units_form();
        form.focus = 0;
        form.backspace();
        form.input('1');
        form.input('0');
        form.focus_next();
        form.backspace();
        form.input('3');
        assert_eq!(form.value("units_available"), Some("7"));

        form.focus = 1;
        form.input('0'); // installed = 30
        assert_eq!(form.value("units_available"), Some("0"));
    }

    #[test]
    fn test_editing_target_does_not_recalculate() {
        let mut form = units_form();
        form.focus = 2;
        form.input('9');
        assert_eq!(form.value("units_available"), Some("09"));
    }

    #[test]
    fn test_derived_not_armed_without_sources() {
        let mut form = Form::new(
            "f",
            vec![field("units_imported", FieldKind::Integer, false, "4")],
        );
        let armed = form.arm_derived(DerivedField {
            minuend: "units_imported",
            subtrahend: "units_installed",
            target: "units_available",
        });
        assert!(!armed);
        assert!(form.derived().is_none());
    }

    #[test]
    fn test_integer_field_rejects_letters() {
        let mut form = units_form();
        form.focus = 0;
        form.input('x');
        assert_eq!(form.value("units_imported"), Some("0"));
    }

    #[test]
    fn test_cycle_choice_wraps() {
        const OPTIONS: &[&str] = &["pending", "processed"];
        let mut form = Form::new(
            "f",
            vec![field("status", FieldKind::Choice(OPTIONS), true, "processed")],
        );
        form.cycle_choice(true);
        assert_eq!(form.value("status"), Some("pending"));
        form.cycle_choice(false);
        assert_eq!(form.value("status"), Some("processed"));
        form.input('x');
        assert_eq!(form.value("status"), Some("processed"));
    }

    #[test]
    fn test_set_value_unknown_field() {
        let mut form = Form::new("f", vec![]);
        let err = form.set_value("missing", "x").unwrap_err();
        assert_eq!(
            err,
            ViewError::UnknownField {
                form: "f".to_string(),
                field: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_focus_wraps_both_ways() {
        let mut form = units_form();
        form.focus_prev();
        assert_eq!(form.focus, 2);
        form.focus_next();
        assert_eq!(form.focus, 0);
    }
}
