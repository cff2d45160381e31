//! Dynamic values used both as declared field defaults and as parsed results.
//!
//! A field's default [`Value`] drives its flag classification (see
//! [`ObjectSchema::derive`](crate::ObjectSchema::derive)), preserving the
//! "schema from defaults" ergonomics without any runtime reflection. After a
//! parse, the same type carries the resolved value for each field.

/// A user-supplied conversion from a raw token to a [`Value`].
///
/// Used by `Convert` fields: the raw flag token is passed through the
/// converter, and its error message surfaces to the user as an invalid-value
/// diagnostic for that flag.
pub type Converter = fn(&str) -> Result<Value, String>;

/// A dynamically typed field default or parsed result.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Value {
    /// No value. As a default it hides the field from the CLI surface; as a
    /// parsed result it marks an omitted converter flag.
    None,
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// A boolean switch.
    Bool(bool),
    /// An enumerated value restricted to a fixed member list.
    Choice(ChoiceValue),
    /// Structured data produced by a [`Converter`]. Not a declarable default.
    Json(serde_json::Value),
    /// A conversion function; declares a `Convert` field.
    Convert(Converter),
    /// An ordered sequence; declares a `List` field, optionally ending in an
    /// arity specifier (see [`Value::zero_or_more`] and friends).
    List(Vec<Value>),
}

impl Value {
    /// Build a choice default from a [`FlagEnum`] member.
    #[must_use]
    pub fn choice<E: FlagEnum>(default: E) -> Self {
        Self::Choice(ChoiceValue::of(default))
    }

    /// Trailing arity specifier: the list flag collects zero or more tokens.
    #[must_use]
    pub fn zero_or_more() -> Self {
        Self::List(vec![Self::Str("*".to_owned())])
    }

    /// Trailing arity specifier: the list flag collects one or more tokens
    /// and becomes mandatory.
    #[must_use]
    pub fn one_or_more() -> Self {
        Self::List(vec![Self::Str("+".to_owned())])
    }

    /// Trailing arity specifier: the list flag collects exactly `n` tokens
    /// and becomes mandatory.
    #[must_use]
    pub fn exactly(n: i64) -> Self {
        Self::List(vec![Self::Int(n)])
    }

    /// Human-readable name of this value's kind, used in diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
            Self::Choice(_) => "choice",
            Self::Json(_) => "json",
            Self::Convert(_) => "converter",
            Self::List(_) => "list",
        }
    }

    /// Render a scalar or choice default as the token string handed to the
    /// engine. Other kinds carry no default token.
    pub(crate) fn render(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Choice(c) => c.selected().to_owned(),
            Self::None | Self::Json(_) | Self::Convert(_) | Self::List(_) => {
                unreachable!("no token rendering for {} values", self.kind_name())
            }
        }
    }
}

/// Equality is structural, except that `Convert` values compare by function
/// address.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Choice(a), Self::Choice(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Convert(a), Self::Convert(b)) => std::ptr::fn_addr_eq(*a, *b),
            (Self::List(a), Self::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Converter> for Value {
    fn from(value: Converter) -> Self {
        Self::Convert(value)
    }
}

/// Trait implemented by enums usable as flag choices.
///
/// The flag accepts exactly the names in [`FlagEnum::MEMBERS`],
/// case-sensitively, and rejects anything else with a diagnostic listing the
/// valid choices.
pub trait FlagEnum: Sized {
    /// The accepted member names, in declaration order.
    const MEMBERS: &'static [&'static str];

    /// Resolve a member from its exact name.
    fn from_name(name: &str) -> Option<Self>;

    /// The name of this member, as it appears in [`FlagEnum::MEMBERS`].
    fn name(&self) -> &'static str;
}

/// An enumerated value: a fixed member list plus the selected member name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceValue {
    members: &'static [&'static str],
    selected: String,
}

impl ChoiceValue {
    /// Build a choice from a [`FlagEnum`] member, selecting that member.
    #[must_use]
    pub fn of<E: FlagEnum>(selected: E) -> Self {
        Self {
            members: E::MEMBERS,
            selected: selected.name().to_owned(),
        }
    }

    pub(crate) fn new(members: &'static [&'static str], selected: String) -> Self {
        Self { members, selected }
    }

    /// The accepted member names.
    #[must_use]
    pub fn members(&self) -> &'static [&'static str] {
        self.members
    }

    /// The selected member name.
    #[must_use]
    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Resolve the selected member back into its enum type.
    #[must_use]
    pub fn decode<E: FlagEnum>(&self) -> Option<E> {
        E::from_name(&self.selected)
    }
}
