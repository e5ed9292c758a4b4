//! Conversion of single tokens into the values of bound fields.
//!
//! A [`Scalar`] knows how to turn one token into itself. A [`Value`] is what a
//! field can be bound as: it declares how many tokens it accepts and how a
//! token is stored into it. Scalars and `Option` of scalars take one value,
//! the standard collections of scalars take many, and `bool` and `()` take
//! none.

use crate::error::Error;
use std::{
    borrow::Cow,
    collections::{BTreeSet, HashSet, VecDeque},
    ffi::OsString,
    hash::Hash,
    path::PathBuf,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    None,
    /// A flag that takes one value; repeating it overwrites the previous one.
    Single,
    Multiple,
}

/// Converts a single token into `Self`.
///
/// Implement this for custom types to make them bindable, alone or inside a
/// collection. [`from_str`] covers the common case of a [`FromStr`] type.
pub trait Scalar: Sized {
    /// Name used in the default metavariable, such as `[integer]`.
    const NAME: &'static str = "argument";
    fn convert(token: &str) -> Result<Self, Error>;
}

pub trait Value {
    const CARDINALITY: Cardinality;
    fn metavar() -> Cow<'static, str>;
    fn absorb(&mut self, token: &str) -> Result<(), Error>;
}

/// Parses `token` with [`FromStr`], reporting `name` as the type on failure.
pub fn from_str<T: FromStr>(token: &str, name: &'static str) -> Result<T, Error> {
    token
        .parse()
        .map_err(|_| Error::FailedToParse(Cow::Owned(token.to_owned()), name))
}

macro_rules! scalar {
    ($name: literal, $($type: ty),*) => {
        $(
            impl Scalar for $type {
                const NAME: &'static str = $name;

                #[inline]
                fn convert(token: &str) -> Result<Self, Error> {
                    from_str(token, $name)
                }
            }
        )*
    };
}

scalar!("integer", u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
scalar!("number", f32, f64);
scalar!("character", char);

impl Scalar for String {
    const NAME: &'static str = "string";

    #[inline]
    fn convert(token: &str) -> Result<Self, Error> {
        Ok(token.to_owned())
    }
}

impl Scalar for PathBuf {
    const NAME: &'static str = "path";

    #[inline]
    fn convert(token: &str) -> Result<Self, Error> {
        Ok(PathBuf::from(token))
    }
}

impl Scalar for OsString {
    const NAME: &'static str = "string";

    #[inline]
    fn convert(token: &str) -> Result<Self, Error> {
        Ok(OsString::from(token))
    }
}

fn single<T: Scalar>() -> Cow<'static, str> {
    Cow::Owned(format!("[{}]", T::NAME))
}

fn many<T: Scalar>() -> Cow<'static, str> {
    Cow::Owned(format!("[{}...]", T::NAME))
}

impl<T: Scalar> Value for T {
    const CARDINALITY: Cardinality = Cardinality::Single;

    fn metavar() -> Cow<'static, str> {
        single::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        *self = T::convert(token)?;
        Ok(())
    }
}

impl<T: Scalar> Value for Option<T> {
    const CARDINALITY: Cardinality = Cardinality::Single;

    fn metavar() -> Cow<'static, str> {
        single::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        *self = Some(T::convert(token)?);
        Ok(())
    }
}

impl<T: Scalar> Value for Vec<T> {
    const CARDINALITY: Cardinality = Cardinality::Multiple;

    fn metavar() -> Cow<'static, str> {
        many::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        self.push(T::convert(token)?);
        Ok(())
    }
}

impl<T: Scalar> Value for VecDeque<T> {
    const CARDINALITY: Cardinality = Cardinality::Multiple;

    fn metavar() -> Cow<'static, str> {
        many::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        self.push_back(T::convert(token)?);
        Ok(())
    }
}

impl<T: Scalar + Ord> Value for BTreeSet<T> {
    const CARDINALITY: Cardinality = Cardinality::Multiple;

    fn metavar() -> Cow<'static, str> {
        many::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        self.insert(T::convert(token)?);
        Ok(())
    }
}

impl<T: Scalar + Eq + Hash> Value for HashSet<T> {
    const CARDINALITY: Cardinality = Cardinality::Multiple;

    fn metavar() -> Cow<'static, str> {
        many::<T>()
    }

    fn absorb(&mut self, token: &str) -> Result<(), Error> {
        self.insert(T::convert(token)?);
        Ok(())
    }
}

impl Value for bool {
    const CARDINALITY: Cardinality = Cardinality::None;

    fn metavar() -> Cow<'static, str> {
        Cow::Borrowed("[bool]")
    }

    fn absorb(&mut self, _: &str) -> Result<(), Error> {
        *self = true;
        Ok(())
    }
}

impl Value for () {
    const CARDINALITY: Cardinality = Cardinality::None;

    fn metavar() -> Cow<'static, str> {
        Cow::Borrowed("")
    }

    fn absorb(&mut self, _: &str) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_canonical_text() {
        assert_eq!(usize::convert("5"), Ok(5));
        assert_eq!(i32::convert("-12"), Ok(-12));
        assert_eq!(f64::convert("2.5"), Ok(2.5));
        assert_eq!(String::convert(""), Ok(String::new()));
        assert_eq!(
            usize::convert("five"),
            Err(Error::FailedToParse("five".into(), "integer"))
        );
    }

    #[test]
    fn collections_append() -> Result<(), Error> {
        let mut values = vec![1u8];
        values.absorb("2")?;
        values.absorb("3")?;
        assert_eq!(values, [1, 2, 3]);
        assert_eq!(<Vec<u8> as Value>::metavar(), "[integer...]");
        Ok(())
    }

    #[test]
    fn cardinalities() {
        assert_eq!(<bool as Value>::CARDINALITY, Cardinality::None);
        assert_eq!(<String as Value>::CARDINALITY, Cardinality::Single);
        assert_eq!(<Option<u8> as Value>::CARDINALITY, Cardinality::Single);
        assert_eq!(<HashSet<String> as Value>::CARDINALITY, Cardinality::Multiple);
    }
}
