//! The parser/binder: executes the configured engine against a token
//! sequence and projects the result onto a fresh target-type instance.

use std::collections::HashMap;
use std::marker::PhantomData;

use clap::parser::{ArgMatches, ValueSource};
use indexmap::IndexMap;

use crate::FlagObject;
use crate::bound::FieldValues;
use crate::engine::{self, Consumes};
use crate::error::{ParseError, SchemaError};
use crate::schema::{Arity, ElementKind, FlagKind, ObjectSchema, ScalarKind};
use crate::value::{ChoiceValue, Value};

/// Parses instances of `T` from command-line token sequences.
///
/// The schema is derived once at construction; each [`parse`] call is
/// independent and a parser may be reused for any number of token sequences.
///
/// [`parse`]: ObjectParser::parse
#[derive(Debug, Clone)]
pub struct ObjectParser<T: FlagObject> {
    schema: ObjectSchema,
    command: clap::Command,
    _marker: PhantomData<fn() -> T>,
}

impl<T: FlagObject> ObjectParser<T> {
    /// Derive `T`'s schema and configure the engine for it.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when `T`'s declared field table cannot be
    /// turned into a flag schema; this indicates a malformed target type,
    /// not bad input.
    pub fn new() -> Result<Self, SchemaError> {
        let schema = ObjectSchema::derive(&T::declared_fields())?;
        let command = engine::command(&schema);
        Ok(Self {
            schema,
            command,
            _marker: PhantomData,
        })
    }

    /// The derived schema.
    #[must_use]
    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }

    /// Parse an instance of `T` from the given tokens.
    ///
    /// Types declaring the extra-capture marker are parsed in
    /// known-arguments mode: unrecognized tokens are collected, in original
    /// order, instead of failing the parse. All other types are parsed
    /// strictly.
    ///
    /// The returned option is whatever `T`'s post-parse hook yields; the
    /// default hook returns the bound instance unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the offending flag or token. No
    /// partially bound object is ever produced.
    pub fn parse<I, S>(&self, tokens: I) -> Result<Option<T>, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let (recognized, extra) = if self.schema.supports_extra() {
            let (recognized, extra) = split_known(&self.schema, &raw);
            tracing::debug!(
                recognized = recognized.len(),
                extra = extra.len(),
                "parsing in known-arguments mode"
            );
            (recognized, extra)
        } else {
            (raw.clone(), Vec::new())
        };
        let matches = self
            .command
            .clone()
            .try_get_matches_from(&recognized)
            .map_err(engine::map_error)?;
        let bound = self.bind(&matches, extra, raw);
        Ok(T::from_values(&bound).post_parse())
    }

    /// Parse from the process's invocation arguments, excluding the program
    /// name.
    ///
    /// This is the explicit fallback to the ambient token source; prefer
    /// [`parse`](ObjectParser::parse) with caller-supplied tokens where the
    /// source matters.
    ///
    /// # Errors
    ///
    /// As for [`parse`](ObjectParser::parse).
    pub fn parse_from_env(&self) -> Result<Option<T>, ParseError> {
        self.parse(std::env::args().skip(1))
    }

    /// Parse the given tokens, printing a diagnostic and terminating the
    /// process with status 2 on failure, in the manner of conventional flag
    /// libraries.
    #[must_use]
    pub fn parse_or_exit<I, S>(&self, tokens: I) -> Option<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse(tokens).unwrap_or_else(|err| {
            eprintln!("error: {err}");
            std::process::exit(2);
        })
    }

    /// Resolve every schema field to its parsed value or default.
    fn bind(&self, matches: &ArgMatches, extra: Vec<String>, raw: Vec<String>) -> FieldValues {
        let mut values: IndexMap<&'static str, Value> =
            IndexMap::with_capacity(self.schema.len());
        for spec in self.schema.fields() {
            let name = spec.name();
            let value = match spec.kind() {
                FlagKind::Scalar(ScalarKind::Int) => matches
                    .get_one::<i64>(name)
                    .copied()
                    .map_or_else(|| spec.default().clone(), Value::Int),
                FlagKind::Scalar(ScalarKind::Float) => matches
                    .get_one::<f64>(name)
                    .copied()
                    .map_or_else(|| spec.default().clone(), Value::Float),
                FlagKind::Scalar(ScalarKind::Str) => matches
                    .get_one::<String>(name)
                    .cloned()
                    .map_or_else(|| spec.default().clone(), Value::Str),
                FlagKind::Bool => {
                    let pressed = matches.get_flag(name);
                    // A true-default field registers the negating switch, so
                    // presence flips the field to false.
                    let value = match spec.default() {
                        Value::Bool(true) => !pressed,
                        _ => pressed,
                    };
                    Value::Bool(value)
                }
                FlagKind::Choice(members) => matches.get_one::<String>(name).map_or_else(
                    || spec.default().clone(),
                    |selected| Value::Choice(ChoiceValue::new(*members, selected.clone())),
                ),
                FlagKind::Convert(_) => matches
                    .get_one::<Value>(name)
                    .cloned()
                    .unwrap_or(Value::None),
                FlagKind::List { element, .. } => {
                    if matches.value_source(name) == Some(ValueSource::CommandLine) {
                        Value::List(collect_list(matches, name, element))
                    } else {
                        spec.default().clone()
                    }
                }
            };
            values.insert(name, value);
        }
        FieldValues::new(
            values,
            self.schema.supports_extra().then_some(extra),
            self.schema.wants_raw().then_some(raw),
        )
    }
}

/// Gather a list flag's parsed tokens per its element kind. Choice elements
/// are stored as their member names.
fn collect_list(matches: &ArgMatches, name: &str, element: &ElementKind) -> Vec<Value> {
    match element {
        ElementKind::Scalar(ScalarKind::Int) => matches
            .get_many::<i64>(name)
            .map(|items| items.map(|n| Value::Int(*n)).collect())
            .unwrap_or_default(),
        ElementKind::Scalar(ScalarKind::Float) => matches
            .get_many::<f64>(name)
            .map(|items| items.map(|f| Value::Float(*f)).collect())
            .unwrap_or_default(),
        ElementKind::Scalar(ScalarKind::Str) | ElementKind::Choice(_) => matches
            .get_many::<String>(name)
            .map(|items| items.map(|s| Value::Str(s.clone())).collect())
            .unwrap_or_default(),
        ElementKind::Convert(_) => matches
            .get_many::<Value>(name)
            .map(|items| items.cloned().collect())
            .unwrap_or_default(),
    }
}

/// Split the input into tokens the engine recognizes and everything else.
///
/// A recognized flag keeps the value tokens its kind consumes: nothing for
/// switches, the next token for single-value flags, and trailing tokens up to
/// the arity for lists. Value collection stops at the next `--`-prefixed
/// token, so plain values and negative numbers are consumed but flag-shaped
/// tokens are not.
fn split_known(schema: &ObjectSchema, tokens: &[String]) -> (Vec<String>, Vec<String>) {
    let table: HashMap<String, Consumes> = schema
        .fields()
        .map(|spec| (spec.flag(), Consumes::of(spec.kind())))
        .collect();

    let mut recognized = Vec::new();
    let mut extra = Vec::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let head = token.split_once('=').map_or(token.as_str(), |(head, _)| head);
        let consumes = if token.starts_with("--") {
            table.get(head).copied()
        } else {
            None
        };
        let Some(consumes) = consumes else {
            extra.push(token.clone());
            continue;
        };
        recognized.push(token.clone());
        if token.contains('=') {
            continue;
        }
        match consumes {
            Consumes::Nothing => {}
            Consumes::One => {
                if iter.peek().is_some_and(|next| !next.starts_with("--")) {
                    if let Some(value) = iter.next() {
                        recognized.push(value.clone());
                    }
                }
            }
            Consumes::Trailing(arity) => {
                let limit = match arity {
                    Arity::Exactly(n) => Some(n),
                    Arity::ZeroOrMore | Arity::OneOrMore => None,
                };
                let mut taken = 0usize;
                while limit.is_none_or(|n| taken < n)
                    && iter.peek().is_some_and(|next| !next.starts_with("--"))
                {
                    if let Some(value) = iter.next() {
                        recognized.push(value.clone());
                        taken += 1;
                    }
                }
            }
        }
    }
    (recognized, extra)
}
