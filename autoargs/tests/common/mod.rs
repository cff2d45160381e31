//! Shared fixture types for integration tests.
//!
//! The types model a small machine-provisioning CLI: an enum-typed operating
//! system field, string/int/float scalars, a boolean pair covering both
//! default polarities, a list, a JSON converter, and a composing type that
//! inherits the base table.

#![allow(dead_code, reason = "each integration test crate uses a subset")]

use autoargs::{FieldDefault, FieldValues, FlagEnum, FlagObject, Value};

/// Operating system choices for the fixture types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Mac,
    Linux,
    Windows,
}

impl FlagEnum for Os {
    const MEMBERS: &'static [&'static str] = &["Mac", "Linux", "Windows"];

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Mac" => Some(Self::Mac),
            "Linux" => Some(Self::Linux),
            "Windows" => Some(Self::Windows),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Mac => "Mac",
            Self::Linux => "Linux",
            Self::Windows => "Windows",
        }
    }
}

/// Converter used by the `metadata` field.
pub fn parse_json(token: &str) -> Result<Value, String> {
    serde_json::from_str(token)
        .map(Value::Json)
        .map_err(|err| err.to_string())
}

/// Base fixture with one field of every flag kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Computer {
    pub os: Os,
    pub version: String,
    pub count: i64,
    pub cpu: f64,
    pub ram: f64,
    pub disk: bool,
    pub gpu: bool,
    pub volumes: Vec<String>,
    pub metadata: Option<serde_json::Value>,
    pub user_tag: String,
}

impl FlagObject for Computer {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![
            FieldDefault::new("os", Value::choice(Os::Mac)),
            FieldDefault::new("version", "1.0"),
            FieldDefault::new("count", 1i64),
            FieldDefault::new("cpu", 3.75),
            FieldDefault::new("ram", 16.0),
            FieldDefault::new("disk", true),
            FieldDefault::new("gpu", false),
            FieldDefault::new(
                "volumes",
                Value::List(vec![Value::Str(String::new())]),
            ),
            FieldDefault::new("metadata", Value::Convert(parse_json)),
            FieldDefault::new("user_tag", ""),
        ]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            os: values.choice("os"),
            version: values.string("version"),
            count: values.int("count"),
            cpu: values.float("cpu"),
            ram: values.float("ram"),
            disk: values.flag("disk"),
            gpu: values.flag("gpu"),
            volumes: values.strings("volumes"),
            metadata: values.json("metadata"),
            user_tag: values.string("user_tag"),
        }
    }
}

/// Composing fixture: its own fields first, then the base table.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualMachine {
    pub name: String,
    pub networks: Vec<String>,
    pub base: Computer,
}

impl FlagObject for VirtualMachine {
    fn declared_fields() -> Vec<FieldDefault> {
        let mut fields = vec![
            FieldDefault::new("name", ""),
            FieldDefault::new(
                "networks",
                Value::List(vec![Value::Str(String::new()), Value::one_or_more()]),
            ),
        ];
        fields.extend(Computer::declared_fields());
        fields
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            name: values.string("name"),
            networks: values.strings("networks"),
            base: Computer::from_values(values),
        }
    }
}

/// Fixture declaring the extra-capture marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub count: i64,
    pub extra: Vec<String>,
}

impl FlagObject for Job {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![FieldDefault::new("count", 1i64), FieldDefault::extra()]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            count: values.int("count"),
            extra: values.extra_tokens().to_vec(),
        }
    }
}

/// Fixture declaring the raw-capture marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub count: i64,
    pub raw: Vec<String>,
}

impl FlagObject for Recorded {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![FieldDefault::new("count", 1i64), FieldDefault::raw()]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            count: values.int("count"),
            raw: values.raw_tokens().to_vec(),
        }
    }
}
