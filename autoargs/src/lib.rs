//! Derive a command-line flag parser from the field layout of a plain
//! data-holder type.
//!
//! A target type describes itself once, as an ordered table of field names
//! and default values. The shape of each default determines the field's flag:
//! scalars become typed single-value flags, booleans become presence switches
//! (with a `--no-` override when the default is `true`), enum values become
//! choice-restricted flags, conversion functions become converter flags, and
//! sequences become multi-token list flags with an arity. Parsing a token
//! sequence then yields a fully populated instance of the type, with every
//! field set to either its default or a parsed value.
//!
//! Flag names are the field names with `_` replaced by `-`, prefixed with
//! `--`.
//!
//! ```
//! use autoargs::{FieldDefault, FieldValues, FlagObject, ObjectParser};
//!
//! struct Job {
//!     count: i64,
//!     tag: String,
//! }
//!
//! impl FlagObject for Job {
//!     fn declared_fields() -> Vec<FieldDefault> {
//!         vec![
//!             FieldDefault::new("count", 1i64),
//!             FieldDefault::new("tag", ""),
//!         ]
//!     }
//!
//!     fn from_values(values: &FieldValues) -> Self {
//!         Self {
//!             count: values.int("count"),
//!             tag: values.string("tag"),
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), autoargs::Error> {
//! let parser = ObjectParser::<Job>::new()?;
//! let job = parser.parse(["--count", "2"])?.expect("default hook binds the instance");
//! assert_eq!(job.count, 2);
//! assert_eq!(job.tag, "");
//! # Ok(())
//! # }
//! ```
//!
//! Two field names are reserved as capability markers rather than flags:
//! [`EXTRA_FIELD`] opts the type into collecting unrecognized tokens instead
//! of failing on them, and [`RAW_FIELD`] retains the unmodified input token
//! sequence. Both are surfaced through [`FieldValues`] during construction.

mod binder;
mod bound;
mod engine;
mod error;
mod schema;
mod value;

pub use binder::ObjectParser;
pub use bound::FieldValues;
pub use error::{Error, ParseError, SchemaError};
pub use schema::{
    Arity, EXTRA_FIELD, ElementKind, FieldDefault, FieldSpec, FlagKind, ObjectSchema, RAW_FIELD,
    ScalarKind,
};
pub use value::{ChoiceValue, Converter, FlagEnum, Value};

/// Trait implemented by types that want a CLI surface derived from their
/// field layout.
pub trait FlagObject: Sized {
    /// The type's declared fields, in order, with their default values.
    ///
    /// A type composing another's fields appends the other's table after its
    /// own; when a name appears more than once the first occurrence wins, so
    /// the composing type overrides the base declarations.
    fn declared_fields() -> Vec<FieldDefault>;

    /// Construct an instance from the bound values of a successful parse.
    ///
    /// Every name in [`declared_fields`](FlagObject::declared_fields) that
    /// became a flag is bound; capture sequences are available through
    /// [`FieldValues::extra_tokens`] and [`FieldValues::raw_tokens`] when the
    /// corresponding markers are declared.
    fn from_values(values: &FieldValues) -> Self;

    /// Post-construction hook, invoked on the bound instance before it is
    /// returned.
    ///
    /// The parse result is whatever this returns: the default keeps the
    /// instance as-is, an override may derive further state or substitute a
    /// different value, and returning `None` makes the parse yield `None`.
    fn post_parse(self) -> Option<Self> {
        Some(self)
    }
}

/// Parse an instance of `T` from the given tokens in one shot.
///
/// Equivalent to constructing an [`ObjectParser`] and calling
/// [`parse`](ObjectParser::parse); offered for single-use callers.
///
/// # Errors
///
/// Returns [`Error::Schema`] for a malformed target type and
/// [`Error::Parse`] for bad input.
pub fn parse_object<T, I, S>(tokens: I) -> Result<Option<T>, Error>
where
    T: FlagObject,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let parser = ObjectParser::<T>::new()?;
    Ok(parser.parse(tokens)?)
}

/// Parse an instance of `T` from the process's invocation arguments,
/// excluding the program name.
///
/// # Errors
///
/// As for [`parse_object`].
pub fn parse_object_from_env<T: FlagObject>() -> Result<Option<T>, Error> {
    let parser = ObjectParser::<T>::new()?;
    Ok(parser.parse_from_env()?)
}
