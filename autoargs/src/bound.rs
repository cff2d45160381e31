//! Resolved field values handed to a target type's constructor.
//!
//! After a successful parse every schema field is bound to exactly one
//! [`Value`], either parsed from the input or taken from the field's default.
//! [`FieldValues`] is the read-only surface a [`FlagObject`] implementation
//! uses inside `from_values` to populate its fields.
//!
//! The typed accessors panic on a missing name or a kind mismatch: both mean
//! the `from_values` implementation disagrees with `declared_fields`, which
//! is a programming error in the target type, not bad user input.
//!
//! [`FlagObject`]: crate::FlagObject

use indexmap::IndexMap;

use crate::value::{FlagEnum, Value};

/// The bound values for one parse call.
#[derive(Debug, Clone)]
pub struct FieldValues {
    values: IndexMap<&'static str, Value>,
    extra: Option<Vec<String>>,
    raw: Option<Vec<String>>,
}

impl FieldValues {
    pub(crate) fn new(
        values: IndexMap<&'static str, Value>,
        extra: Option<Vec<String>>,
        raw: Option<Vec<String>>,
    ) -> Self {
        Self { values, extra, raw }
    }

    /// Look up a field's bound value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The bound integer for a scalar int field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or not bound as an integer.
    #[must_use]
    #[track_caller]
    pub fn int(&self, name: &str) -> i64 {
        match self.field(name) {
            Value::Int(n) => *n,
            other => mismatch(name, "int", other),
        }
    }

    /// The bound float for a scalar float field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or not bound as a float.
    #[must_use]
    #[track_caller]
    pub fn float(&self, name: &str) -> f64 {
        match self.field(name) {
            Value::Float(f) => *f,
            other => mismatch(name, "float", other),
        }
    }

    /// The bound string for a scalar string field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or not bound as a string.
    #[must_use]
    #[track_caller]
    pub fn string(&self, name: &str) -> String {
        match self.field(name) {
            Value::Str(s) => s.clone(),
            other => mismatch(name, "string", other),
        }
    }

    /// The bound switch state for a boolean field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or not bound as a bool.
    #[must_use]
    #[track_caller]
    pub fn flag(&self, name: &str) -> bool {
        match self.field(name) {
            Value::Bool(b) => *b,
            other => mismatch(name, "bool", other),
        }
    }

    /// The bound member for a choice field, resolved into its enum type.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing, not bound as a choice, or bound to a
    /// name that is not one of `E`'s members.
    #[must_use]
    #[track_caller]
    pub fn choice<E: FlagEnum>(&self, name: &str) -> E {
        match self.field(name) {
            Value::Choice(choice) => choice.decode::<E>().unwrap_or_else(|| {
                panic!(
                    "field '{name}' is bound to '{}', which is not a member of the target enum",
                    choice.selected()
                )
            }),
            other => mismatch(name, "choice", other),
        }
    }

    /// The converter result for a converter field, or `None` when the flag
    /// was omitted.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing.
    #[must_use]
    #[track_caller]
    pub fn converted(&self, name: &str) -> Option<&Value> {
        match self.field(name) {
            Value::None => None,
            other => Some(other),
        }
    }

    /// The JSON payload of a converter field whose converter produces
    /// [`Value::Json`], or `None` when the flag was omitted.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or bound to a non-JSON value.
    #[must_use]
    #[track_caller]
    pub fn json(&self, name: &str) -> Option<serde_json::Value> {
        match self.field(name) {
            Value::None => None,
            Value::Json(payload) => Some(payload.clone()),
            other => mismatch(name, "json", other),
        }
    }

    /// The bound elements of a list field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing or not bound as a list.
    #[must_use]
    #[track_caller]
    pub fn list(&self, name: &str) -> &[Value] {
        match self.field(name) {
            Value::List(items) => items,
            other => mismatch(name, "list", other),
        }
    }

    /// The elements of a string or choice list field, as strings.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing, not a list, or holds non-string
    /// elements.
    #[must_use]
    #[track_caller]
    pub fn strings(&self, name: &str) -> Vec<String> {
        self.list(name)
            .iter()
            .map(|item| match item {
                Value::Str(s) => s.clone(),
                other => mismatch(name, "string element", other),
            })
            .collect()
    }

    /// The elements of an integer list field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing, not a list, or holds non-integer
    /// elements.
    #[must_use]
    #[track_caller]
    pub fn ints(&self, name: &str) -> Vec<i64> {
        self.list(name)
            .iter()
            .map(|item| match item {
                Value::Int(n) => *n,
                other => mismatch(name, "int element", other),
            })
            .collect()
    }

    /// The elements of a float list field.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing, not a list, or holds non-float
    /// elements.
    #[must_use]
    #[track_caller]
    pub fn floats(&self, name: &str) -> Vec<f64> {
        self.list(name)
            .iter()
            .map(|item| match item {
                Value::Float(f) => *f,
                other => mismatch(name, "float element", other),
            })
            .collect()
    }

    /// The elements of a choice list field, resolved into their enum type.
    ///
    /// # Panics
    ///
    /// Panics if the field is missing, not a list, or holds names outside
    /// `E`'s members.
    #[must_use]
    #[track_caller]
    pub fn choices<E: FlagEnum>(&self, name: &str) -> Vec<E> {
        self.list(name)
            .iter()
            .map(|item| match item {
                Value::Str(s) => E::from_name(s).unwrap_or_else(|| {
                    panic!("field '{name}' holds '{s}', which is not a member of the target enum")
                }),
                other => mismatch(name, "choice element", other),
            })
            .collect()
    }

    /// Input tokens that were not recognized as any configured flag, in
    /// original order. Empty unless the type declares the extra-capture
    /// marker.
    #[must_use]
    pub fn extra_tokens(&self) -> &[String] {
        self.extra.as_deref().unwrap_or_default()
    }

    /// The full, unmodified input token sequence. Empty unless the type
    /// declares the raw-capture marker.
    #[must_use]
    pub fn raw_tokens(&self) -> &[String] {
        self.raw.as_deref().unwrap_or_default()
    }

    #[track_caller]
    fn field(&self, name: &str) -> &Value {
        self.values
            .get(name)
            .unwrap_or_else(|| panic!("field '{name}' is not part of the derived schema"))
    }
}

#[track_caller]
fn mismatch(name: &str, expected: &str, found: &Value) -> ! {
    panic!(
        "field '{name}' is bound as {}, not {expected}",
        found.kind_name()
    )
}
