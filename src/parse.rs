use crate::{
    context::Context,
    error::Error,
    spell,
    style::{self, Style},
    subcommand::Subcommands,
    value::Cardinality,
};
use std::{borrow::Cow, collections::VecDeque, io, rc::Rc};
use tracing::{debug, trace};

pub type Tokens = VecDeque<Cow<'static, str>>;

/// A command whose fields are filled in from the command line.
///
/// `P` is the auxiliary argument handed to [`Command::run`]: `()` for a root
/// command, the owning group for a subcommand registered with
/// [`Subcommands::add`].
pub trait Command<P = ()>: Default + 'static {
    const NAME: &'static str;
    const HELP: &'static str = "";
    const OPTIONS: &'static str = "[options...]";

    fn describe(_: &mut Context<Self>) {}

    /// Registers the subcommands of the command. Called at most once per
    /// command type.
    fn subcommands(_: &mut Subcommands<Self>) {}

    /// Runs once every token has been consumed and post-processed, unless a
    /// subcommand took over or an eager callback stopped the parse.
    fn run(&mut self, _: &mut P) -> Result<(), Error> {
        Ok(())
    }
}

pub struct Parser {
    style: Rc<dyn Style>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// A parser that decorates help output when standard output is a terminal.
    pub fn new() -> Self {
        if termion::is_tty(&io::stdout()) {
            Self::with(style::Pretty)
        } else {
            Self::with(style::Plain)
        }
    }

    pub fn with(style: impl Style + 'static) -> Self {
        Self {
            style: Rc::new(style),
        }
    }

    pub fn style(mut self, style: impl Style + 'static) -> Self {
        self.style = Rc::new(style);
        self
    }

    /// Parses `arguments` into a new `C` and runs it. Failures are printed as
    /// `Error: <message>` on standard error and reported as `false`.
    pub fn parse<C: Command>(
        &self,
        arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
    ) -> bool {
        match self.parse_with::<C>(arguments) {
            Ok(_) => true,
            Err(error) => {
                debug!(command = C::NAME, %error, "parse failed");
                eprintln!("Error: {error}");
                false
            }
        }
    }

    pub fn parse_with<C: Command>(
        &self,
        arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
    ) -> Result<C, Error> {
        let mut command = C::default();
        self.parse_into(&mut command, arguments)?;
        Ok(command)
    }

    /// Parses `arguments` into an existing `command` and runs it. Fields that
    /// were written before a failure keep their new values.
    pub fn parse_into<C: Command>(
        &self,
        command: &mut C,
        arguments: impl IntoIterator<Item = impl Into<Cow<'static, str>>>,
    ) -> Result<(), Error> {
        let tokens = arguments.into_iter().map(Into::into).collect();
        self.dispatch(command, tokens, &mut ())
    }

    pub fn usage<C: Command<P>, P: 'static>(&self) -> Result<String, Error> {
        Context::<C>::build::<P>(self.style.clone())?.usage(&*self.style)
    }

    pub(crate) fn dispatch<C: Command<P>, P: 'static>(
        &self,
        command: &mut C,
        mut tokens: Tokens,
        parent: &mut P,
    ) -> Result<(), Error> {
        let mut context = Context::<C>::build::<P>(self.style.clone())?;
        let mut capture = false;
        let mut last: Option<(usize, String)> = None;

        while let Some(token) = tokens.pop_front() {
            trace!(command = C::NAME, token = %token, capture, "token");
            if let Some(subcommand) = context.subcommand(&token) {
                debug!(command = C::NAME, subcommand = %token, "delegating to subcommand");
                return subcommand.run(self, tokens, command);
            }

            if token.starts_with('-') {
                capture = false;
                let (core, value) = split(&token);
                let index = context.index(core)?;
                last = Some((index, core.to_owned()));
                match context.cardinality(index) {
                    Cardinality::None => {
                        if context.write(index, command, "")? {
                            stop(C::NAME, core);
                            return Ok(());
                        }
                        for letter in value.chars() {
                            let flag = format!("-{letter}");
                            let index = context.index(&flag)?;
                            if context.cardinality(index) != Cardinality::None {
                                return Err(Error::InvalidCluster(Cow::Owned(flag)));
                            }
                            if context.write(index, command, "")? {
                                stop(C::NAME, &flag);
                                return Ok(());
                            }
                        }
                    }
                    _ if !value.is_empty() => {
                        if context.write(index, command, value)? {
                            stop(C::NAME, core);
                            return Ok(());
                        }
                    }
                    _ => capture = true,
                }
            } else if let (true, Some((index, flag))) = (capture, &last) {
                if context.write(*index, command, &token)? {
                    stop(C::NAME, flag);
                    return Ok(());
                }
                capture = context.cardinality(*index) == Cardinality::Multiple;
            } else if let Some(index) = context.position() {
                if context.write(index, command, &token)? {
                    stop(C::NAME, &token);
                    return Ok(());
                }
            } else {
                return Err(match last {
                    None => {
                        let suggestions = spell::suggest(&token, context.subcommands().names());
                        Error::UnknownCommand(token, suggestions)
                    }
                    Some((index, flag)) => match context.cardinality(index) {
                        Cardinality::None => Error::UnexpectedValue(Cow::Owned(flag), token),
                        Cardinality::Single => Error::ExcessValue(Cow::Owned(flag), token),
                        Cardinality::Multiple => Error::UnexpectedArgument(token),
                    },
                });
            }
        }

        context.finish(command)?;
        debug!(command = C::NAME, "running");
        command.run(parent)
    }
}

fn stop(command: &'static str, flag: &str) {
    debug!(command, flag, "eager callback stopped the parse");
}

/// Splits a flag token into its core and attached value: `--count=5` gives
/// `("--count", "5")` and `-C5` gives `("-C", "5")`.
pub(crate) fn split(token: &str) -> (&str, &str) {
    if token.starts_with("--") {
        match token.split_once('=') {
            Some(pair) => pair,
            None => (token, ""),
        }
    } else {
        match token.char_indices().nth(2) {
            Some((index, _)) => token.split_at(index),
            None => (token, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_long_flags_at_the_first_equal_sign() {
        assert_eq!(split("--count=5"), ("--count", "5"));
        assert_eq!(split("--name=a=b"), ("--name", "a=b"));
        assert_eq!(split("--name="), ("--name", ""));
        assert_eq!(split("--count"), ("--count", ""));
    }

    #[test]
    fn splits_short_flags_after_one_letter() {
        assert_eq!(split("-C5"), ("-C", "5"));
        assert_eq!(split("-vvf"), ("-v", "vf"));
        assert_eq!(split("-C"), ("-C", ""));
        assert_eq!(split("-"), ("-", ""));
        assert_eq!(split("-éx"), ("-é", "x"));
    }
}
