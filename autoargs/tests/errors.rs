//! Error surfacing: the parse-time taxonomy for bad input and schema-time
//! failures for malformed target types.

#![expect(
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "tests panic to surface parse failures"
)]

mod common;

use anyhow::Result;
use autoargs::{
    FieldDefault, FieldValues, FlagObject, ObjectParser, ParseError, SchemaError, Value,
};
use common::{Computer, VirtualMachine};
use rstest::rstest;

#[rstest]
#[case::positional(&["some", "more"], "some")]
#[case::unknown_flag(&["--nope"], "--nope")]
fn strict_mode_rejects_unrecognized_tokens(
    #[case] tokens: &[&str],
    #[case] offending: &str,
) -> Result<()> {
    let parser = ObjectParser::<Computer>::new()?;
    let err = parser
        .parse(tokens.iter().copied())
        .expect_err("strict parse fails");
    let ParseError::Unrecognized { token } = &err else {
        panic!("expected an unrecognized-argument error, got {err}");
    };
    assert_eq!(token, offending);
    Ok(())
}

#[rstest]
fn unparseable_scalars_name_the_flag() -> Result<()> {
    let parser = ObjectParser::<Computer>::new()?;
    let err = parser
        .parse(["--count", "twelve"])
        .expect_err("coercion fails");
    let ParseError::InvalidValue { flag, reason } = &err else {
        panic!("expected an invalid-value error, got {err}");
    };
    assert_eq!(flag, "--count");
    assert!(reason.contains("twelve"));
    Ok(())
}

#[rstest]
fn invalid_choices_list_the_valid_members() -> Result<()> {
    let parser = ObjectParser::<Computer>::new()?;
    let err = parser.parse(["--os", "BeOS"]).expect_err("choice fails");
    let ParseError::InvalidValue { flag, reason } = &err else {
        panic!("expected an invalid-value error, got {err}");
    };
    assert_eq!(flag, "--os");
    assert!(reason.contains("BeOS"));
    assert!(reason.contains("Mac"));
    Ok(())
}

#[rstest]
fn converter_failures_surface_as_invalid_values() -> Result<()> {
    let parser = ObjectParser::<Computer>::new()?;
    let err = parser
        .parse(["--metadata", "{not json"])
        .expect_err("converter fails");
    assert!(matches!(err, ParseError::InvalidValue { .. }));
    Ok(())
}

#[rstest]
fn mandatory_lists_cannot_be_omitted() -> Result<()> {
    let parser = ObjectParser::<VirtualMachine>::new()?;
    let err = parser.parse(["--name", "xyz"]).expect_err("networks required");
    let ParseError::MissingRequired { flag } = &err else {
        panic!("expected a missing-required error, got {err}");
    };
    assert!(flag.contains("--networks"));
    Ok(())
}

#[derive(Debug)]
struct Pair {
    points: Vec<i64>,
}

impl FlagObject for Pair {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![FieldDefault::new(
            "points",
            Value::List(vec![Value::Int(0), Value::exactly(2)]),
        )]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            points: values.ints("points"),
        }
    }
}

#[rstest]
fn exact_arity_accepts_exactly_that_many_tokens() -> Result<()> {
    let parser = ObjectParser::<Pair>::new()?;
    let pair = parser
        .parse(["--points", "3", "4"])?
        .expect("default hook keeps the instance");
    assert_eq!(pair.points, vec![3, 4]);
    Ok(())
}

#[rstest]
#[case::omitted(&[] as &[&str])]
#[case::too_few(&["--points", "3"])]
fn exact_arity_shortfalls_are_missing_requirements(#[case] tokens: &[&str]) -> Result<()> {
    let parser = ObjectParser::<Pair>::new()?;
    let err = parser
        .parse(tokens.iter().copied())
        .expect_err("arity unsatisfied");
    assert!(matches!(err, ParseError::MissingRequired { .. }));
    Ok(())
}

#[derive(Debug)]
struct Empty;

impl FlagObject for Empty {
    fn declared_fields() -> Vec<FieldDefault> {
        Vec::new()
    }

    fn from_values(_values: &FieldValues) -> Self {
        Self
    }
}

#[rstest]
fn schema_failures_abort_parser_construction() {
    let err = ObjectParser::<Empty>::new().expect_err("no fields");
    assert!(matches!(err, SchemaError::NoFields));
}
