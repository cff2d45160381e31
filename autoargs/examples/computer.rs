//! Example CLI deriving its flag surface from a machine-description type.
//!
//! Try:
//!
//! ```text
//! cargo run --example computer -- --os Linux --count 2 --no-disk \
//!     --volumes /data /scratch --metadata '{"owner":"ops"}'
//! ```

use autoargs::{FieldDefault, FieldValues, FlagEnum, FlagObject, ObjectParser, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Os {
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

fn parse_json(token: &str) -> Result<Value, String> {
    serde_json::from_str(token)
        .map(Value::Json)
        .map_err(|err| err.to_string())
}

#[derive(Debug)]
struct Computer {
    os: Os,
    version: String,
    count: i64,
    cpu: f64,
    ram: f64,
    disk: bool,
    volumes: Vec<String>,
    metadata: Option<serde_json::Value>,
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
            FieldDefault::new("volumes", Value::List(vec![Value::Str(String::new())])),
            FieldDefault::new("metadata", Value::Convert(parse_json)),
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
            volumes: values.strings("volumes"),
            metadata: values.json("metadata"),
        }
    }
}

fn main() {
    let parser = match ObjectParser::<Computer>::new() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let Some(computer) = parser.parse_or_exit(std::env::args().skip(1)) else {
        return;
    };
    println!("{computer:#?}");
}
