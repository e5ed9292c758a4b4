//! Declarative command-line binding.
//!
//! A command is a plain `Default` struct implementing [`Command`]. Its
//! [`Command::describe`] binds fields to flags once, and parsing fills those
//! fields in place from the argument stream before calling [`Command::run`].
//!
//! ```
//! use latch::{modifier::*, Command, Context, Error, Parser};
//!
//! #[derive(Default)]
//! struct Copier {
//!     count: usize,
//!     verbose: usize,
//!     files: Vec<String>,
//! }
//!
//! impl Command for Copier {
//!     const NAME: &'static str = "copy";
//!     const HELP: &'static str = "Copies files.";
//!
//!     fn describe(context: &mut Context<Self>) {
//!         context
//!             .bind(|copy: &mut Self| &mut copy.count)
//!             .flags(["--count", "-C"])
//!             .with(help("Number of copies"));
//!         context
//!             .bind(|copy: &mut Self| &mut copy.verbose)
//!             .flag("-v")
//!             .with(count());
//!         context.bind(|copy: &mut Self| &mut copy.files);
//!     }
//! }
//!
//! let copy = Parser::new().parse_with::<Copier>(["-vv", "--count=2", "a", "b"])?;
//! assert_eq!(copy.count, 2);
//! assert_eq!(copy.verbose, 2);
//! assert_eq!(copy.files, ["a", "b"]);
//! # Ok::<(), Error>(())
//! ```

mod argument;
mod context;
mod error;
mod help;
pub mod modifier;
mod parse;
mod spell;
pub mod style;
mod subcommand;
pub mod value;

pub use crate::{
    argument::{Argument, Field, Trigger},
    context::{Binding, Context},
    error::{Error, Suggestions},
    parse::{Command, Parser, Tokens},
    subcommand::{Subcommand, Subcommands},
    value::{Cardinality, Scalar, Value},
};
use std::{borrow::Cow, env};

pub fn parse<C: Command>(arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>) -> bool {
    Parser::new().parse::<C>(arguments)
}

pub fn parse_with<C: Command>(
    arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
) -> Result<C, Error> {
    Parser::new().parse_with::<C>(arguments)
}

pub fn parse_into<C: Command>(
    command: &mut C,
    arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
) -> Result<(), Error> {
    Parser::new().parse_into(command, arguments)
}

pub fn parse_env<C: Command>() -> bool {
    parse::<C>(env::args().skip(1))
}
