//! Configures the clap engine from a derived schema and maps engine errors
//! onto the parse-time error taxonomy.
//!
//! The engine is deliberately thin: every behavioural decision (coercion,
//! required/optional, arity, choices) is read off the [`ObjectSchema`], so a
//! field's classification fully determines its flag.

use clap::builder::PossibleValuesParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, Command, value_parser};

use crate::error::ParseError;
use crate::schema::{Arity, ElementKind, FieldSpec, FlagKind, ObjectSchema, ScalarKind};

/// Build the engine command for a derived schema.
///
/// The command parses bare token sequences (`no_binary_name`) and exposes no
/// automatic help flag, mirroring a generated rather than authored CLI
/// surface.
pub(crate) fn command(schema: &ObjectSchema) -> Command {
    let mut cmd = Command::new("autoargs")
        .no_binary_name(true)
        .disable_help_flag(true);
    for spec in schema.fields() {
        cmd = cmd.arg(flag_arg(spec));
    }
    cmd
}

/// Register one flag, shaped entirely by the field's classification.
fn flag_arg(spec: &FieldSpec) -> Arg {
    let arg = Arg::new(spec.name()).long(spec.long());
    match spec.kind() {
        FlagKind::Scalar(kind) => scalar_arg(arg, *kind).default_value(spec.default().render()),
        FlagKind::Bool => arg.action(ArgAction::SetTrue),
        FlagKind::Choice(members) => arg
            .value_parser(PossibleValuesParser::new(members.iter().copied()))
            .default_value(spec.default().render()),
        FlagKind::Convert(convert) => arg.value_parser(*convert),
        FlagKind::List { element, arity } => list_arg(arg, element, *arity),
    }
}

fn scalar_arg(arg: Arg, kind: ScalarKind) -> Arg {
    match kind {
        ScalarKind::Int => arg
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true),
        ScalarKind::Float => arg
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
        ScalarKind::Str => arg.value_parser(value_parser!(String)),
    }
}

fn list_arg(arg: Arg, element: &ElementKind, arity: Arity) -> Arg {
    let arg = match element {
        ElementKind::Scalar(kind) => scalar_arg(arg, *kind),
        ElementKind::Choice(members) => {
            arg.value_parser(PossibleValuesParser::new(members.iter().copied()))
        }
        ElementKind::Convert(convert) => arg.value_parser(*convert),
    };
    // ZeroOrMore is the only arity under which the flag may be omitted.
    match arity {
        Arity::ZeroOrMore => arg.num_args(0..),
        Arity::OneOrMore => arg.num_args(1..).required(true),
        Arity::Exactly(n) => arg.num_args(n).required(true),
    }
}

/// Translate an engine failure into the parse-time taxonomy.
///
/// Coercion and choice validation become [`ParseError::InvalidValue`],
/// omissions and short counts become [`ParseError::MissingRequired`], unknown
/// tokens become [`ParseError::Unrecognized`], and anything else is carried
/// through as an engine error.
pub(crate) fn map_error(err: clap::Error) -> ParseError {
    match err.kind() {
        ErrorKind::UnknownArgument => ParseError::Unrecognized {
            token: arg_context(&err).unwrap_or_else(|| err.to_string()),
        },
        ErrorKind::InvalidValue => ParseError::InvalidValue {
            flag: arg_context(&err).unwrap_or_default(),
            reason: invalid_value_reason(&err),
        },
        ErrorKind::ValueValidation => ParseError::InvalidValue {
            flag: arg_context(&err).unwrap_or_default(),
            reason: validation_reason(&err),
        },
        ErrorKind::MissingRequiredArgument
        | ErrorKind::TooFewValues
        | ErrorKind::WrongNumberOfValues => ParseError::MissingRequired {
            flag: arg_context(&err).unwrap_or_else(|| err.to_string()),
        },
        _ => ParseError::Engine(Box::new(err)),
    }
}

/// The flag (or first flag) the error is about, stripped of its value
/// placeholder rendering.
fn arg_context(err: &clap::Error) -> Option<String> {
    let rendered = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(s)) => s.clone(),
        Some(ContextValue::Strings(list)) => list.first()?.clone(),
        _ => return None,
    };
    rendered.split_whitespace().next().map(ToOwned::to_owned)
}

fn invalid_value_reason(err: &clap::Error) -> String {
    let token = match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(s)) => s.clone(),
        _ => String::new(),
    };
    match err.get(ContextKind::ValidValue) {
        Some(ContextValue::Strings(choices)) if !choices.is_empty() => {
            format!("'{token}' is not one of [{}]", choices.join(", "))
        }
        _ => format!("could not parse '{token}'"),
    }
}

fn validation_reason(err: &clap::Error) -> String {
    let token = match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(s)) => s.clone(),
        _ => String::new(),
    };
    std::error::Error::source(err).map_or_else(
        || format!("could not parse '{token}'"),
        |source| format!("could not parse '{token}': {source}"),
    )
}

/// Number of value tokens a flag consumes after its own token, used by the
/// known-arguments pre-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Consumes {
    /// A presence switch takes no value.
    Nothing,
    /// Single-value flags take the next token.
    One,
    /// List flags greedily take trailing tokens up to their arity.
    Trailing(Arity),
}

impl Consumes {
    pub(crate) fn of(kind: &FlagKind) -> Self {
        match kind {
            FlagKind::Bool => Self::Nothing,
            FlagKind::Scalar(_) | FlagKind::Choice(_) | FlagKind::Convert(_) => Self::One,
            FlagKind::List { arity, .. } => Self::Trailing(*arity),
        }
    }
}
