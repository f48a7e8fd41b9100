use std::collections::BTreeMap;

const DEFAULT_SELECT_PLACEHOLDER: &str = "Select an option";

/// One entry of a select dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The control a field renders as. Only `Select` carries options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Select(Vec<SelectOption>),
    Checkbox,
    Date,
}

impl FieldKind {
    /// Value of the `type` attribute for kinds rendered as a plain `<input>`.
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Select(_) => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Date => "date",
        }
    }
}

/// Character class a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restriction {
    /// Digits only.
    Numeric,
    /// Anything but digits.
    Alphabetic,
}

impl Restriction {
    fn accepts(self, value: &str) -> bool {
        match self {
            Restriction::Numeric => value.chars().all(|c| c.is_ascii_digit()),
            Restriction::Alphabetic => !value.chars().any(|c| c.is_ascii_digit()),
        }
    }
}

/// Declarative description of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub kind: FieldKind,
    pub required: bool,
    pub col_span: usize,
    pub restriction: Option<Restriction>,
}

impl FieldConfig {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
        kind: FieldKind,
    ) -> Self {
        FieldConfig {
            name: name.into(),
            label: label.into(),
            placeholder: placeholder.into(),
            kind,
            required: false,
            col_span: 1,
            restriction: None,
        }
    }

    pub fn text(
        name: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::new(name, label, placeholder, FieldKind::Text)
    }

    pub fn select(
        name: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(name, label, placeholder, FieldKind::Select(options))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Widen the field; a span of 0 is treated as 1.
    pub fn col_span(mut self, span: usize) -> Self {
        self.col_span = span.max(1);
        self
    }

    pub fn numeric_only(mut self) -> Self {
        self.restriction = Some(Restriction::Numeric);
        self
    }

    pub fn alphabetic_only(mut self) -> Self {
        self.restriction = Some(Restriction::Alphabetic);
        self
    }
}

/// Current value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(f64),
}

/// Value snapshot for every field of a form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    values: BTreeMap<String, FieldValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with every named field set to an empty string.
    pub fn with_empty<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut data = Self::new();
        for name in names {
            data.set(name, FieldValue::Text(String::new()));
        }
        data
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Text shown in an input or select bound to `name`.
    pub fn text(&self, name: &str) -> String {
        match self.values.get(name) {
            Some(FieldValue::Text(s)) => s.clone(),
            Some(FieldValue::Number(n)) => n.to_string(),
            Some(FieldValue::Bool(_)) | None => String::new(),
        }
    }

    /// Checked state of a checkbox bound to `name`.
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FieldValue::Bool(true)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    messages: BTreeMap<String, String>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single message.
    pub fn single(name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.set(name, message);
        errors
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.messages.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(name.into(), message.into());
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn has(&self, name: &str) -> bool {
        self.messages.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A change coming from a rendered control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeInput {
    Text(String),
    Checked(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Accepted,
    Rejected,
}

/// Merge a control change into `data` unless the field's restriction rejects it.
///
/// Names with no matching config are merged unfiltered.
pub fn apply_change(
    fields: &[FieldConfig],
    data: &mut FormData,
    name: &str,
    input: ChangeInput,
) -> ChangeOutcome {
    let field = fields.iter().find(|f| f.name == name);
    let value = match input {
        ChangeInput::Checked(checked) => FieldValue::Bool(checked),
        ChangeInput::Text(text) => {
            if let Some(restriction) = field.and_then(|f| f.restriction) {
                if !restriction.accepts(&text) {
                    return ChangeOutcome::Rejected;
                }
            }
            FieldValue::Text(text)
        }
    };
    data.set(name, value);
    ChangeOutcome::Accepted
}

/// Whether a keydown with this `key` should be cancelled before it edits the field.
///
/// Only single-character keys are considered; named keys such as
/// `Backspace` or `ArrowLeft` always pass.
pub fn blocks_key(field: &FieldConfig, key: &str) -> bool {
    let mut chars = key.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return false;
    };
    match field.restriction {
        Some(Restriction::Numeric) => !ch.is_ascii_digit(),
        Some(Restriction::Alphabetic) => ch.is_ascii_digit(),
        None => false,
    }
}

/// One `<option>` of a rendered select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub label: String,
    pub value: String,
    pub placeholder: bool,
}

/// Options rendered for a select field: the disabled placeholder first, then the configured ones.
pub fn select_options(field: &FieldConfig) -> Vec<OptionEntry> {
    let placeholder = if field.placeholder.is_empty() {
        DEFAULT_SELECT_PLACEHOLDER.to_string()
    } else {
        field.placeholder.clone()
    };
    let mut entries = vec![OptionEntry {
        label: placeholder,
        value: String::new(),
        placeholder: true,
    }];
    if let FieldKind::Select(options) = &field.kind {
        entries.extend(options.iter().map(|opt| OptionEntry {
            label: opt.label.clone(),
            value: opt.value.clone(),
            placeholder: false,
        }));
    }
    entries
}

pub fn grid_class(cols: usize) -> String {
    format!("grid grid-cols-1 sm:grid-cols-{} gap-4", cols.max(1))
}

pub fn span_class(span: usize) -> String {
    format!("sm:col-span-{} col-span-1", span.max(1))
}

/// Classes for an input or select, switched to the error style when the field has a message.
pub fn control_class(has_error: bool) -> &'static str {
    if has_error {
        "w-full bg-white border border-red-500 rounded-lg px-4 py-2 focus:outline-none focus:ring-2 focus:ring-red-500 shadow-sm placeholder-gray-400 transition"
    } else {
        "w-full bg-white border border-gray-300 rounded-lg px-4 py-2 focus:outline-none focus:ring-2 focus:ring-purple-500 shadow-sm placeholder-gray-400 transition"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<FieldConfig> {
        vec![
            FieldConfig::text("name", "Name", "Your name").alphabetic_only(),
            FieldConfig::text("phone", "Phone", "Digits").numeric_only(),
            FieldConfig::text("note", "Note", ""),
            FieldConfig::new("agree", "Agree", "I agree", FieldKind::Checkbox),
        ]
    }

    #[test]
    fn test_alphabetic_field_rejects_digits() {
        let fields = schema();
        let mut data = FormData::new();
        data.set("name", FieldValue::Text("Ada".to_string()));

        for attempt in ["Ada1", "4", "a9b", "Lovelace 2"] {
            let input = ChangeInput::Text(attempt.into());
            let outcome = apply_change(&fields, &mut data, "name", input);
            assert_eq!(outcome, ChangeOutcome::Rejected);
            assert_eq!(data.text("name"), "Ada");
        }

        let input = ChangeInput::Text("Ada L.".into());
        let outcome = apply_change(&fields, &mut data, "name", input);
        assert_eq!(outcome, ChangeOutcome::Accepted);
        assert_eq!(data.text("name"), "Ada L.");
    }

    #[test]
    fn test_numeric_field_rejects_non_digits() {
        let fields = schema();
        let mut data = FormData::new();
        data.set("phone", FieldValue::Text("555".to_string()));

        for attempt in ["555a", "-1", "1.5", " 12", "١٢"] {
            let input = ChangeInput::Text(attempt.into());
            let outcome = apply_change(&fields, &mut data, "phone", input);
            assert_eq!(outcome, ChangeOutcome::Rejected);
            assert_eq!(data.text("phone"), "555");
        }

        assert_eq!(
            apply_change(&fields, &mut data, "phone", ChangeInput::Text("5551234".into())),
            ChangeOutcome::Accepted
        );
        assert_eq!(data.text("phone"), "5551234");
        // clearing the field is always allowed
        assert_eq!(
            apply_change(&fields, &mut data, "phone", ChangeInput::Text(String::new())),
            ChangeOutcome::Accepted
        );
        assert_eq!(data.text("phone"), "");
    }

    #[test]
    fn test_checkbox_and_unrestricted_changes() {
        let fields = schema();
        let mut data = FormData::new();
        assert!(!data.checked("agree"));

        apply_change(&fields, &mut data, "agree", ChangeInput::Checked(true));
        assert_eq!(data.get("agree"), Some(&FieldValue::Bool(true)));
        assert!(data.checked("agree"));

        apply_change(&fields, &mut data, "note", ChangeInput::Text("r2d2".into()));
        assert_eq!(data.text("note"), "r2d2");

        // unknown names are stored as-is
        apply_change(&fields, &mut data, "extra", ChangeInput::Text("x1".into()));
        assert_eq!(data.text("extra"), "x1");
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_blocks_key() {
        let fields = schema();
        let (name, phone, note) = (&fields[0], &fields[1], &fields[2]);

        assert!(blocks_key(phone, "a"));
        assert!(blocks_key(phone, "-"));
        assert!(!blocks_key(phone, "7"));
        assert!(!blocks_key(phone, "Backspace"));
        assert!(!blocks_key(phone, "ArrowLeft"));

        assert!(blocks_key(name, "3"));
        assert!(!blocks_key(name, "x"));
        assert!(!blocks_key(name, "Tab"));

        assert!(!blocks_key(note, "3"));
        assert!(!blocks_key(note, "x"));
    }

    #[test]
    fn test_select_options() {
        let empty = FieldConfig::select("country", "Country", "", Vec::new());
        let entries = select_options(&empty);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].placeholder);
        assert_eq!(entries[0].label, "Select an option");
        assert_eq!(entries[0].value, "");

        let filled = FieldConfig::select(
            "country",
            "Country",
            "Pick a country",
            vec![
                SelectOption::new("India", "in"),
                SelectOption::new("Peru", "pe"),
            ],
        );
        let labels: Vec<_> = select_options(&filled).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["Pick a country", "India", "Peru"]);

        // non-select fields have nothing beyond the placeholder
        assert_eq!(select_options(&FieldConfig::text("a", "A", "a")).len(), 1);
    }

    #[test]
    fn test_form_data_reads() {
        let mut data = FormData::with_empty(["a", "b"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.text("a"), "");
        assert_eq!(data.text("missing"), "");
        data.set("n", FieldValue::Number(42.0));
        assert_eq!(data.text("n"), "42");
        data.set("flag", FieldValue::Bool(true));
        assert_eq!(data.text("flag"), "");
    }

    #[test]
    fn test_error_map() {
        let mut errors = ErrorMap::single("email", "Email taken");
        assert_eq!(errors.get("email"), Some("Email taken"));
        assert!(errors.has("email"));
        assert_eq!(errors.get("username"), None);
        errors.clear();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_layout_classes() {
        assert_eq!(grid_class(3), "grid grid-cols-1 sm:grid-cols-3 gap-4");
        assert_eq!(span_class(0), "sm:col-span-1 col-span-1");
        assert_eq!(FieldConfig::text("a", "A", "").col_span(0).col_span, 1);
        assert!(control_class(true).contains("border-red-500"));
        assert!(!control_class(false).contains("red"));
    }
}
