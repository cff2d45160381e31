//! Schema derivation: classify a type's declared field defaults into an
//! ordered table of flag descriptors.
//!
//! The deriver is the Rust counterpart of walking a class hierarchy's
//! attributes: a target type hands over an ordered list of
//! [`FieldDefault`]s (its own fields first, then any base type's, supplied by
//! explicit composition), and each entry is classified into a [`FlagKind`]
//! from the shape of its default [`Value`].

use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::value::{Converter, Value};

/// Field name that opts a type into capturing unrecognized tokens.
pub const EXTRA_FIELD: &str = "_extra";

/// Field name that opts a type into capturing the raw input tokens.
pub const RAW_FIELD: &str = "_raw";

/// One declared field: its name and default value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefault {
    name: &'static str,
    default: Value,
}

impl FieldDefault {
    /// Declare a field with the given default.
    pub fn new(name: &'static str, default: impl Into<Value>) -> Self {
        Self {
            name,
            default: default.into(),
        }
    }

    /// Declare the extra-capture marker field.
    #[must_use]
    pub fn extra() -> Self {
        Self::new(EXTRA_FIELD, Value::None)
    }

    /// Declare the raw-capture marker field.
    #[must_use]
    pub fn raw() -> Self {
        Self::new(RAW_FIELD, Value::None)
    }

    /// The declared field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared default value.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.default
    }
}

/// The coercion applied to a scalar flag's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Coerce with the integer parser.
    Int,
    /// Coerce with the float parser.
    Float,
    /// Take the token verbatim.
    Str,
}

/// The kind of a list flag's elements. Lists never nest.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Scalar elements coerced per [`ScalarKind`].
    Scalar(ScalarKind),
    /// Elements restricted to a fixed member list.
    Choice(&'static [&'static str]),
    /// Elements produced by a user-supplied converter.
    Convert(Converter),
}

/// Equality is structural, except that `Convert` elements compare by
/// function address.
impl PartialEq for ElementKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Choice(a), Self::Choice(b)) => a == b,
            (Self::Convert(a), Self::Convert(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Cardinality constraint on a list flag's token count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The flag may be omitted or given any number of tokens.
    ZeroOrMore,
    /// The flag is mandatory and takes at least one token.
    OneOrMore,
    /// The flag is mandatory and takes exactly `n` tokens.
    Exactly(usize),
}

/// Classification of one field into a flag.
#[derive(Debug, Clone)]
pub enum FlagKind {
    /// Single-token flag with native coercion.
    Scalar(ScalarKind),
    /// Presence switch; the flag surface depends on the default (see
    /// [`FieldSpec::long`]).
    Bool,
    /// Single-token flag accepting only the listed member names.
    Choice(&'static [&'static str]),
    /// Single-token flag passed through a converter; omitted flags bind
    /// [`Value::None`].
    Convert(Converter),
    /// Multi-token flag collecting trailing tokens per its arity.
    List {
        /// How each token is coerced.
        element: ElementKind,
        /// How many tokens the flag collects.
        arity: Arity,
    },
}

/// Equality is structural, except that `Convert` flags compare by function
/// address.
impl PartialEq for FlagKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Bool, Self::Bool) => true,
            (Self::Choice(a), Self::Choice(b)) => a == b,
            (Self::Convert(a), Self::Convert(b)) => std::ptr::fn_addr_eq(*a, *b),
            (
                Self::List {
                    element: left_element,
                    arity: left_arity,
                },
                Self::List {
                    element: right_element,
                    arity: right_arity,
                },
            ) => left_element == right_element && left_arity == right_arity,
            _ => false,
        }
    }
}

/// One classified field: name, flag kind, and resolved default.
///
/// For list fields the default holds the configured default sequence, with
/// any trailing arity specifier already consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: &'static str,
    kind: FlagKind,
    default: Value,
}

impl FieldSpec {
    /// The field name (and engine-side argument id).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's flag classification.
    #[must_use]
    pub fn kind(&self) -> &FlagKind {
        &self.kind
    }

    /// The field's default value.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.default
    }

    /// The long flag name, without the leading `--`.
    ///
    /// Derived from the field name with `_` replaced by `-`. A boolean field
    /// defaulting to `true` instead exposes the negating switch `no-<name>`,
    /// built from the bare field name rather than the transformed flag
    /// string.
    #[must_use]
    pub fn long(&self) -> String {
        let stem = self.name.replace('_', "-");
        match (&self.kind, &self.default) {
            (FlagKind::Bool, Value::Bool(true)) => format!("no-{stem}"),
            _ => stem,
        }
    }

    /// The full flag token, including the leading `--`.
    #[must_use]
    pub fn flag(&self) -> String {
        format!("--{}", self.long())
    }
}

/// The complete, ordered flag schema for a target type.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: IndexMap<&'static str, FieldSpec>,
    supports_extra: bool,
    wants_raw: bool,
}

impl ObjectSchema {
    /// Derive a schema from an ordered declared-field table.
    ///
    /// Entries are visited in order and merged by name; the first occurrence
    /// of a name wins, so a type composing a base type's fields after its own
    /// overrides the base declarations. Marker fields (`_extra`, `_raw`) set
    /// the corresponding capability, other underscore-prefixed names and
    /// fields defaulting to [`Value::None`] are skipped, and everything else
    /// is classified by the shape of its default.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NoFields`] when the table produces neither
    /// flags nor capture markers, [`SchemaError::InvalidList`] for an empty
    /// or malformed list default, and [`SchemaError::UnsupportedField`] for a
    /// default whose kind has no flag mapping.
    pub fn derive(declared: &[FieldDefault]) -> Result<Self, SchemaError> {
        let mut fields: IndexMap<&'static str, FieldSpec> = IndexMap::new();
        let mut supports_extra = false;
        let mut wants_raw = false;

        for field in declared {
            match field.name {
                EXTRA_FIELD => {
                    supports_extra = true;
                    continue;
                }
                RAW_FIELD => {
                    wants_raw = true;
                    continue;
                }
                name if name.starts_with('_') => continue,
                _ => {}
            }
            if matches!(field.default, Value::None) {
                continue;
            }
            if fields.contains_key(field.name) {
                tracing::debug!(
                    field = field.name,
                    "duplicate field declaration ignored; first occurrence wins"
                );
                continue;
            }
            let (kind, default) = classify(field.name, &field.default)?;
            fields.insert(
                field.name,
                FieldSpec {
                    name: field.name,
                    kind,
                    default,
                },
            );
        }

        if fields.is_empty() && !supports_extra && !wants_raw {
            return Err(SchemaError::NoFields);
        }
        tracing::debug!(
            flags = fields.len(),
            supports_extra,
            wants_raw,
            "derived object schema"
        );
        Ok(Self {
            fields,
            supports_extra,
            wants_raw,
        })
    }

    /// Iterate the classified fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Number of flag-bearing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema has no flag-bearing fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether unrecognized tokens are collected instead of failing the
    /// parse.
    #[must_use]
    pub fn supports_extra(&self) -> bool {
        self.supports_extra
    }

    /// Whether the raw input token sequence is retained.
    #[must_use]
    pub fn wants_raw(&self) -> bool {
        self.wants_raw
    }
}

/// Classify one field default into a flag kind plus its stored default.
fn classify(name: &'static str, default: &Value) -> Result<(FlagKind, Value), SchemaError> {
    match default {
        Value::Int(_) => Ok((FlagKind::Scalar(ScalarKind::Int), default.clone())),
        Value::Float(_) => Ok((FlagKind::Scalar(ScalarKind::Float), default.clone())),
        Value::Str(_) => Ok((FlagKind::Scalar(ScalarKind::Str), default.clone())),
        Value::Bool(_) => Ok((FlagKind::Bool, default.clone())),
        Value::Choice(choice) => Ok((FlagKind::Choice(choice.members()), default.clone())),
        Value::Convert(convert) => Ok((FlagKind::Convert(*convert), Value::None)),
        Value::List(items) => classify_list(name, items),
        other => Err(SchemaError::UnsupportedField {
            field: name,
            kind: other.kind_name(),
        }),
    }
}

/// Classify a list default: split off a trailing arity specifier, derive the
/// element kind from the first template element, and keep the remaining
/// template as the default sequence.
fn classify_list(name: &'static str, items: &[Value]) -> Result<(FlagKind, Value), SchemaError> {
    if items.is_empty() {
        return Err(SchemaError::InvalidList {
            field: name,
            reason: "list default must not be empty".to_owned(),
        });
    }
    let mut template = items.to_vec();
    let arity = match template.last() {
        Some(Value::List(spec)) => {
            let arity = parse_arity(name, spec)?;
            template.pop();
            arity
        }
        _ => Arity::ZeroOrMore,
    };
    let element = match template.first() {
        Some(Value::Int(_)) => ElementKind::Scalar(ScalarKind::Int),
        Some(Value::Float(_)) => ElementKind::Scalar(ScalarKind::Float),
        Some(Value::Str(_)) => ElementKind::Scalar(ScalarKind::Str),
        Some(Value::Choice(choice)) => ElementKind::Choice(choice.members()),
        Some(Value::Convert(convert)) => ElementKind::Convert(*convert),
        Some(other) => {
            return Err(SchemaError::InvalidList {
                field: name,
                reason: format!("{} elements cannot be list elements", other.kind_name()),
            });
        }
        None => {
            return Err(SchemaError::InvalidList {
                field: name,
                reason: "list default needs an element template before its arity".to_owned(),
            });
        }
    };
    Ok((FlagKind::List { element, arity }, Value::List(template)))
}

/// Interpret a trailing arity specifier: `"*"`, `"+"`, or a positive count.
fn parse_arity(name: &'static str, spec: &[Value]) -> Result<Arity, SchemaError> {
    match spec.first() {
        Some(Value::Str(s)) if s == "*" => Ok(Arity::ZeroOrMore),
        Some(Value::Str(s)) if s == "+" => Ok(Arity::OneOrMore),
        Some(Value::Int(n)) => match usize::try_from(*n) {
            Ok(count) if count >= 1 => Ok(Arity::Exactly(count)),
            _ => Err(SchemaError::InvalidList {
                field: name,
                reason: format!("exact arity must be a positive count, got {n}"),
            }),
        },
        _ => Err(SchemaError::InvalidList {
            field: name,
            reason: "arity specifier must be \"*\", \"+\", or a positive count".to_owned(),
        }),
    }
}
