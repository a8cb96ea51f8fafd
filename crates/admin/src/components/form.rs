//! Entity form component.
//!
//! A form is a list of [`FormField`]s built from the resource's
//! [`FieldSpec`]s, so labels, required markers and client-side patterns
//! always match what the server validates.

use storedash_core::{Constraint, FieldSpec, HexColor, ValidationErrors};

/// Option of a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }
}

/// How a field is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    Text,
    Url,
    Number,
    /// Text input with a swatch. Carries the value only when it is a valid
    /// hex color, as it ends up in a `style` attribute.
    Color(Option<String>),
    Select(Vec<SelectOption>),
    Checkbox,
    /// Textarea, one entry per line.
    Lines,
}

/// One rendered form field.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub value: String,
    pub checked: bool,
    /// Description shown under checkboxes.
    pub hint: Option<&'static str>,
    pub error: Option<String>,
    pub required: bool,
    pub pattern: Option<&'static str>,
}

impl FormField {
    fn from_spec(spec: &FieldSpec, widget: Widget, value: impl Into<String>) -> Self {
        Self {
            name: spec.name,
            label: spec.label,
            widget,
            value: value.into(),
            checked: false,
            hint: None,
            error: None,
            required: spec.constraint.is_required(),
            pattern: spec.constraint.pattern(),
        }
    }

    #[must_use]
    pub fn text(spec: &FieldSpec, value: &str) -> Self {
        Self::from_spec(spec, Widget::Text, value)
    }

    #[must_use]
    pub fn url(spec: &FieldSpec, value: &str) -> Self {
        Self::from_spec(spec, Widget::Url, value)
    }

    #[must_use]
    pub fn number(spec: &FieldSpec, value: &str) -> Self {
        Self::from_spec(spec, Widget::Number, value)
    }

    #[must_use]
    pub fn color(spec: &FieldSpec, value: &str) -> Self {
        let swatch = HexColor::parse(value).ok().map(|color| color.as_str().to_owned());
        Self::from_spec(spec, Widget::Color(swatch), value)
    }

    /// A select with `value` preselected. An unknown or empty `value`
    /// leaves every option unselected.
    #[must_use]
    pub fn select(spec: &FieldSpec, value: &str, options: &[SelectOption]) -> Self {
        let options = options
            .iter()
            .map(|option| SelectOption {
                selected: option.value == value,
                ..option.clone()
            })
            .collect();
        Self::from_spec(spec, Widget::Select(options), value)
    }

    #[must_use]
    pub fn checkbox(spec: &FieldSpec, checked: bool) -> Self {
        let mut field = Self::from_spec(spec, Widget::Checkbox, "");
        field.checked = checked;
        field.required = false;
        if matches!(spec.constraint, Constraint::Flag) {
            field.hint = Some(spec.message);
        }
        field
    }

    #[must_use]
    pub fn lines(spec: &FieldSpec, values: &[String]) -> Self {
        Self::from_spec(spec, Widget::Lines, values.join("\n"))
    }

    /// Select options, empty for other widgets.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        match &self.widget {
            Widget::Select(options) => options,
            _ => &[],
        }
    }
}

/// Attach validation messages to their fields.
pub fn apply_errors(fields: &mut [FormField], errors: &ValidationErrors) {
    for field in fields {
        field.error = errors.for_field(field.name).map(str::to_owned);
    }
}

/// Raw `application/x-www-form-urlencoded` pairs of a submitted form.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormData {
    /// Last value submitted for `name`, or empty.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Checkbox state: browsers only submit checked boxes.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.0
            .iter()
            .any(|(key, value)| key == name && !matches!(value.as_str(), "false" | "off"))
    }

    /// Non-blank lines of a textarea, trimmed.
    #[must_use]
    pub fn lines(&self, name: &str) -> Vec<String> {
        self.text(name)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FieldSpec = FieldSpec::new(
        "name",
        "Name",
        Constraint::MinLength(1),
        "Name must be at least 1 character long",
    );
    const BILLBOARD: FieldSpec = FieldSpec::new(
        "billboardId",
        "Billboard",
        Constraint::Reference,
        "Billboard is required",
    );
    const FEATURED: FieldSpec = FieldSpec::new(
        "isFeatured",
        "Featured",
        Constraint::Flag,
        "This product will appear on the home page",
    );

    const COLOR: FieldSpec = FieldSpec::new(
        "value",
        "Value",
        Constraint::HexColor,
        "String must be a valid hex code",
    );

    #[test]
    fn test_color_swatch_only_for_valid_hex() {
        let field = FormField::color(&COLOR, "#1e3a8a");
        assert_eq!(field.widget, Widget::Color(Some("#1e3a8a".to_string())));

        let field = FormField::color(&COLOR, "red;background-image:url(//x)");
        assert_eq!(field.widget, Widget::Color(None));
        assert_eq!(field.value, "red;background-image:url(//x)");
    }

    #[test]
    fn test_select_marks_current_value() {
        let options = [SelectOption::new("a", "Alpha"), SelectOption::new("b", "Beta")];
        let field = FormField::select(&BILLBOARD, "b", &options);
        let selected: Vec<_> = field
            .options()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(selected, ["Beta"]);
        assert!(field.required);
    }

    #[test]
    fn test_select_with_no_options_renders_empty() {
        let field = FormField::select(&BILLBOARD, "", &[]);
        assert!(field.options().is_empty());
        assert_eq!(field.value, "");
    }

    #[test]
    fn test_checkbox_uses_message_as_hint() {
        let field = FormField::checkbox(&FEATURED, true);
        assert!(field.checked);
        assert!(!field.required);
        assert_eq!(field.hint, Some("This product will appear on the home page"));
    }

    #[test]
    fn test_apply_errors_clears_and_sets() {
        let mut fields = vec![FormField::text(&NAME, ""), FormField::select(&BILLBOARD, "", &[])];
        fields[0].error = Some("Name is required".to_string());
        let errors = ValidationErrors::single("billboardId", "Billboard is required");
        apply_errors(&mut fields, &errors);

        assert!(fields[0].error.is_none());
        assert_eq!(fields[1].error.as_deref(), Some("Billboard is required"));
    }

    #[test]
    fn test_form_data_helpers() {
        let data = FormData::from(vec![
            ("name".to_string(), " Tee ".to_string()),
            ("isFeatured".to_string(), "on".to_string()),
            (
                "images".to_string(),
                "https://a.test/1.png\r\n\r\n  https://a.test/2.png  ".to_string(),
            ),
        ]);

        assert_eq!(data.text("name"), " Tee ");
        assert_eq!(data.text("missing"), "");
        assert!(data.flag("isFeatured"));
        assert!(!data.flag("isArchived"));
        assert_eq!(
            data.lines("images"),
            ["https://a.test/1.png", "https://a.test/2.png"]
        );
    }
}
