//! Capture capabilities (extra and raw token sequences) and the post-parse
//! hook.

#![expect(
    clippy::expect_used,
    reason = "tests panic to surface parse failures"
)]

mod common;

use anyhow::Result;
use autoargs::{
    FieldDefault, FieldValues, FlagObject, ObjectParser, ParseError, parse_object,
};
use common::{Computer, Job, Recorded};
use rstest::rstest;

#[rstest]
fn extra_capture_collects_unrecognized_tokens_in_order() -> Result<()> {
    let job: Job = parse_object(["stray", "--count", "2", "more", "args"])?
        .expect("default hook keeps the instance");
    assert_eq!(job.count, 2);
    assert_eq!(job.extra, vec!["stray", "more", "args"]);
    Ok(())
}

#[rstest]
fn the_same_input_fails_without_extra_capture() -> Result<()> {
    let parser = ObjectParser::<Computer>::new()?;
    let err = parser
        .parse(["stray", "--count", "2", "more", "args"])
        .expect_err("strict parse fails");
    assert!(matches!(err, ParseError::Unrecognized { .. }));
    Ok(())
}

#[rstest]
fn raw_capture_retains_the_exact_input_sequence() -> Result<()> {
    let recorded: Recorded =
        parse_object(["--count", "5"])?.expect("default hook keeps the instance");
    assert_eq!(recorded.count, 5);
    assert_eq!(recorded.raw, vec!["--count", "5"]);
    Ok(())
}

struct Audited {
    count: i64,
    extra: Vec<String>,
    raw: Vec<String>,
}

impl FlagObject for Audited {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![
            FieldDefault::new("count", 1i64),
            FieldDefault::extra(),
            FieldDefault::raw(),
        ]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            count: values.int("count"),
            extra: values.extra_tokens().to_vec(),
            raw: values.raw_tokens().to_vec(),
        }
    }
}

#[rstest]
fn raw_capture_is_independent_of_extra_capture() -> Result<()> {
    let tokens = ["stray", "--count", "2", "more"];
    let audited: Audited = parse_object(tokens)?.expect("default hook keeps the instance");
    assert_eq!(audited.count, 2);
    assert_eq!(audited.extra, vec!["stray", "more"]);
    assert_eq!(audited.raw, tokens.to_vec());
    Ok(())
}

struct Pool {
    workers: i64,
    total_slots: i64,
}

impl FlagObject for Pool {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![
            FieldDefault::new("workers", 2i64),
            FieldDefault::new("total_slots", 0i64),
        ]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            workers: values.int("workers"),
            total_slots: values.int("total_slots"),
        }
    }

    fn post_parse(mut self) -> Option<Self> {
        self.total_slots = self.workers * 4;
        Some(self)
    }
}

#[rstest]
fn post_parse_replaces_the_bound_instance() -> Result<()> {
    let pool: Pool =
        parse_object(["--workers", "3"])?.expect("hook returns an instance");
    assert_eq!(pool.workers, 3);
    assert_eq!(pool.total_slots, 12);
    Ok(())
}

struct Gated {
    enabled: bool,
}

impl FlagObject for Gated {
    fn declared_fields() -> Vec<FieldDefault> {
        vec![FieldDefault::new("enabled", false)]
    }

    fn from_values(values: &FieldValues) -> Self {
        Self {
            enabled: values.flag("enabled"),
        }
    }

    fn post_parse(self) -> Option<Self> {
        self.enabled.then_some(self)
    }
}

#[rstest]
fn post_parse_may_withhold_the_result() -> Result<()> {
    let absent: Option<Gated> = parse_object([] as [&str; 0])?;
    assert!(absent.is_none());
    let present: Option<Gated> = parse_object(["--enabled"])?;
    assert!(present.is_some());
    Ok(())
}
