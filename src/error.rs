use core::fmt;
use std::{borrow::Cow, error, mem::replace};

pub type Suggestions = Vec<(Cow<'static, str>, usize)>;

#[derive(Clone, PartialEq)]
pub enum Error {
    UnknownFlag(Cow<'static, str>, &'static str, Suggestions),
    UnknownCommand(Cow<'static, str>, Suggestions),
    UnexpectedValue(Cow<'static, str>, Cow<'static, str>),
    ExcessValue(Cow<'static, str>, Cow<'static, str>),
    UnexpectedArgument(Cow<'static, str>),
    InvalidCluster(Cow<'static, str>),
    MissingRequired(Vec<Cow<'static, str>>),
    FailedToParse(Cow<'static, str>, &'static str),
    CountOverflow(usize),
    DuplicatePositional(&'static str),
    DuplicateFlag(Cow<'static, str>, &'static str),
    InvalidFlag(Cow<'static, str>),
    Format(fmt::Error),
    Other(Cow<'static, str>),
}

impl error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownFlag(flag, command, suggestions) => {
                write!(f, "Unknown flag '{flag}' for command '{command}'.")?;
                write_suggestions(f, suggestions)?;
            }
            Error::UnknownCommand(argument, suggestions) => {
                write!(f, "Unknown command or argument '{argument}'.")?;
                write_suggestions(f, suggestions)?;
            }
            Error::UnexpectedValue(flag, value) => {
                write!(f, "Flag '{flag}' does not expect a value but received '{value}'.")?
            }
            Error::ExcessValue(flag, value) => {
                write!(f, "Flag '{flag}' expects only one value but received '{value}'.")?
            }
            Error::UnexpectedArgument(argument) => write!(f, "Unexpected argument '{argument}'.")?,
            Error::InvalidCluster(flag) => write!(f, "Flag '{flag}' takes a value and cannot be clustered. A clustered flag has a single letter and takes no value.")?,
            Error::MissingRequired(flags) => {
                write!(f, "Missing required argument")?;
                write_join(f, " '", "'", ", ", flags)?;
                write!(f, ".")?;
            }
            Error::FailedToParse(value, type_name) => {
                write!(f, "Failed to parse value '{value}' as type '{type_name}'.")?
            }
            Error::CountOverflow(count) => {
                write!(f, "Occurrence count '{count}' does not fit in the bound field.")?
            }
            Error::DuplicatePositional(command) => write!(f, "Duplicate positional capture for command '{command}'. A command may capture positional arguments in at most one field.")?,
            Error::DuplicateFlag(flag, command) => {
                write!(f, "Duplicate flag '{flag}' for command '{command}'.")?
            }
            Error::InvalidFlag(flag) => write!(f, "Invalid flag '{flag}'. A valid flag starts with '-' and has at least one more character.")?,

            Error::Format(error) => error.fmt(f)?,
            Error::Other(error) => error.fmt(f)?,
        }
        Ok(())
    }
}

impl From<fmt::Error> for Error {
    fn from(error: fmt::Error) -> Self {
        Error::Format(error)
    }
}

impl From<&'static str> for Error {
    fn from(value: &'static str) -> Self {
        Error::from(Cow::Borrowed(value))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::from(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Error {
    fn from(value: Cow<'static, str>) -> Self {
        Error::Other(value)
    }
}

fn write_suggestions(formatter: &mut fmt::Formatter, suggestions: &Suggestions) -> fmt::Result {
    let suggestions = suggestions
        .iter()
        .map(|(suggestion, _)| format!("'{suggestion}'"));
    write_join(formatter, " Similar matches: ", ".", ", ", suggestions)
}

fn write_join(
    formatter: &mut fmt::Formatter,
    prefix: impl fmt::Display,
    suffix: impl fmt::Display,
    separator: impl fmt::Display,
    items: impl IntoIterator<Item = impl fmt::Display>,
) -> fmt::Result {
    let mut has = false;
    for item in items {
        if replace(&mut has, true) {
            write!(formatter, "{separator}")?;
        } else {
            write!(formatter, "{prefix}")?;
        }
        write!(formatter, "{item}")?;
    }
    if has {
        write!(formatter, "{suffix}")?;
    }
    Ok(())
}
