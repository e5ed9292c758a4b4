use crate::{
    argument::{Argument, Field},
    error::Error,
    help,
    modifier::Modifier,
    parse::Command,
    spell,
    style::Style,
    subcommand::{self, Subcommand, Subcommands},
    value::{Cardinality, Value},
};
use std::{
    borrow::Cow,
    collections::{hash_map::Entry, HashMap},
    io::{self, Write},
    rc::Rc,
    sync::Arc,
};
use tracing::debug;

/// The registration table of one command, built fresh for every dispatch.
pub struct Context<C> {
    name: &'static str,
    help: &'static str,
    options: &'static str,
    arguments: Vec<Argument<C>>,
    lookup: HashMap<Cow<'static, str>, usize>,
    positional: Option<usize>,
    subcommands: Arc<Subcommands<C>>,
    style: Rc<dyn Style>,
}

pub struct Binding<'a, C, T> {
    argument: &'a mut Argument<C>,
    field: Field<C, T>,
}

impl<'a, C: 'static, T> Binding<'a, C, T> {
    /// Adds an accepted spelling, such as `--count` or `-C`. An argument
    /// without any spelling captures positional tokens.
    pub fn flag(self, flag: &'static str) -> Self {
        self.argument.flags.push(Cow::Borrowed(flag));
        self
    }

    pub fn flags(self, flags: impl IntoIterator<Item = &'static str>) -> Self {
        flags.into_iter().fold(self, Binding::flag)
    }

    pub fn with(self, modifier: impl Modifier<C, T>) -> Self {
        modifier.apply(&self.field, self.argument);
        self
    }
}

impl<C: 'static> Context<C> {
    pub(crate) fn build<P: 'static>(style: Rc<dyn Style>) -> Result<Self, Error>
    where
        C: Command<P>,
    {
        let mut context = Context {
            name: <C as Command<P>>::NAME,
            help: <C as Command<P>>::HELP,
            options: <C as Command<P>>::OPTIONS,
            arguments: Vec::new(),
            lookup: HashMap::new(),
            positional: None,
            subcommands: subcommand::table::<C, P>(),
            style,
        };
        context
            .flag()
            .flags(["-h", "--help"])
            .with(crate::modifier::help("Show help"))
            .with(crate::modifier::eager_callback(
                |_: &mut C, context: &Context<C>, _: &Argument<C>| context.show_help(),
            ));
        <C as Command<P>>::describe(&mut context);
        context.seal()?;
        Ok(context)
    }

    pub fn bind<T: Value + 'static>(
        &mut self,
        field: impl Fn(&mut C) -> &mut T + 'static,
    ) -> Binding<'_, C, T> {
        let field = Field::new(field);
        let target = field.clone();
        self.arguments.push(Argument::new(
            T::CARDINALITY,
            T::metavar(),
            move |command: &mut C, token: &str| target.get(command).absorb(token),
        ));
        let index = self.arguments.len() - 1;
        Binding {
            argument: &mut self.arguments[index],
            field,
        }
    }

    /// Registers a flag without a backing field, for flags that only drive
    /// callbacks or actions.
    pub fn flag(&mut self) -> Binding<'_, C, ()> {
        self.bind::<()>(|_: &mut C| Box::leak(Box::new(())))
    }

    fn seal(&mut self) -> Result<(), Error> {
        for (index, argument) in self.arguments.iter().enumerate() {
            if argument.flags.is_empty() {
                if self.positional.replace(index).is_some() {
                    return Err(Error::DuplicatePositional(self.name));
                }
                continue;
            }
            for flag in argument.flags.iter() {
                let short = !flag.starts_with("--");
                let length = flag.chars().count();
                if !flag.starts_with('-') || length < 2 || (short && length > 2) {
                    return Err(Error::InvalidFlag(flag.clone()));
                }
                match self.lookup.entry(flag.clone()) {
                    Entry::Occupied(entry) => {
                        return Err(Error::DuplicateFlag(entry.key().clone(), self.name))
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(index);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn options_metavar(&self) -> &'static str {
        self.options
    }

    pub fn arguments(&self) -> &[Argument<C>] {
        &self.arguments
    }

    pub fn argument(&self, flag: &str) -> Option<&Argument<C>> {
        self.lookup.get(flag).map(|&index| &self.arguments[index])
    }

    pub fn positional(&self) -> Option<&Argument<C>> {
        self.positional.map(|index| &self.arguments[index])
    }

    pub fn subcommands(&self) -> &Subcommands<C> {
        &self.subcommands
    }

    /// The subcommand named `token`, unless `token` is this command's own name.
    pub(crate) fn subcommand(&self, token: &str) -> Option<&Subcommand<C>> {
        if token == self.name {
            None
        } else {
            self.subcommands.get(token)
        }
    }

    pub(crate) fn index(&self, flag: &str) -> Result<usize, Error> {
        match self.lookup.get(flag) {
            Some(&index) => Ok(index),
            None => Err(Error::UnknownFlag(
                Cow::Owned(flag.to_owned()),
                self.name,
                spell::suggest(flag, self.lookup.keys()),
            )),
        }
    }

    pub(crate) fn position(&self) -> Option<usize> {
        self.positional
    }

    pub(crate) fn cardinality(&self, index: usize) -> Cardinality {
        self.arguments[index].cardinality
    }

    /// Stores `token` into the argument at `index` and fires its eager
    /// callbacks. Returns whether any eager callback ran.
    pub(crate) fn write(&mut self, index: usize, command: &mut C, token: &str) -> Result<bool, Error> {
        self.arguments[index].store(command, token)?;
        let argument = &self.arguments[index];
        for eager in argument.eager() {
            eager(command, &*self, argument)?;
        }
        Ok(!argument.eager().is_empty())
    }

    pub(crate) fn finish(&self, command: &mut C) -> Result<(), Error> {
        debug!(command = self.name, "post-processing");
        for argument in self.arguments.iter() {
            for callback in argument.callbacks() {
                callback(command, self, argument)?;
            }
        }
        Ok(())
    }

    pub fn usage(&self, style: &dyn Style) -> Result<String, Error> {
        Ok(help::render(self, style)?)
    }

    pub fn show_help(&self) -> Result<(), Error> {
        let usage = self.usage(&*self.style)?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(usage.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|error| Error::Other(Cow::Owned(error.to_string())))
    }
}
