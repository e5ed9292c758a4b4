use crate::{context::Context, error::Error, value::Cardinality};
use std::{borrow::Cow, rc::Rc};

pub(crate) type Callback<C> = Box<dyn Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error>>;
type Write<C> = Box<dyn Fn(&mut C, &str) -> Result<(), Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Always,
    Occurred,
}

pub struct Field<C, T: ?Sized>(Rc<dyn Fn(&mut C) -> &mut T>);

pub struct Argument<C> {
    pub(crate) cardinality: Cardinality,
    pub(crate) flags: Vec<Cow<'static, str>>,
    pub(crate) count: usize,
    pub(crate) required: bool,
    pub(crate) help: Cow<'static, str>,
    pub(crate) metavar: Cow<'static, str>,
    write: Write<C>,
    callbacks: Vec<(Trigger, Callback<C>)>,
    eager: Vec<Callback<C>>,
}

impl<C, T: ?Sized> Field<C, T> {
    pub fn new(get: impl Fn(&mut C) -> &mut T + 'static) -> Self {
        Self(Rc::new(get))
    }

    #[inline]
    pub fn get<'a>(&self, command: &'a mut C) -> &'a mut T {
        (self.0)(command)
    }
}

impl<C, T: ?Sized> Clone for Field<C, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> Argument<C> {
    pub(crate) fn new(
        cardinality: Cardinality,
        metavar: Cow<'static, str>,
        write: impl Fn(&mut C, &str) -> Result<(), Error> + 'static,
    ) -> Self {
        Self {
            cardinality,
            flags: Vec::new(),
            count: 0,
            required: false,
            help: Cow::Borrowed(""),
            metavar,
            write: Box::new(write),
            callbacks: Vec::new(),
            eager: Vec::new(),
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn flags(&self) -> &[Cow<'static, str>] {
        &self.flags
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_positional(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn metavar(&self) -> &str {
        &self.metavar
    }

    pub fn set_cardinality(&mut self, cardinality: Cardinality) {
        self.cardinality = cardinality;
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn set_help(&mut self, help: impl Into<Cow<'static, str>>) {
        self.help = help.into();
    }

    pub fn set_metavar(&mut self, metavar: impl Into<Cow<'static, str>>) {
        self.metavar = metavar.into();
    }

    /// Replaces how a token is stored. The occurrence count is still incremented.
    pub fn set_write(&mut self, write: impl Fn(&mut C, &str) -> Result<(), Error> + 'static) {
        self.write = Box::new(write);
    }

    pub fn add_callback(
        &mut self,
        trigger: Trigger,
        callback: impl Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
    ) {
        self.callbacks.push((trigger, Box::new(callback)));
    }

    pub fn add_eager_callback(
        &mut self,
        callback: impl Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
    ) {
        self.eager.push(Box::new(callback));
    }

    /// The flags joined by `, ` followed by the metavariable when the argument
    /// takes a value, e.g. `--count, -C [integer]`.
    pub fn display_flags(&self) -> String {
        let mut display = self.flags.join(", ");
        if self.flags.is_empty() {
            display.push_str(&self.metavar);
        } else if self.cardinality != Cardinality::None && !self.metavar.is_empty() {
            display.push(' ');
            display.push_str(&self.metavar);
        }
        display
    }

    pub(crate) fn store(&mut self, command: &mut C, token: &str) -> Result<(), Error> {
        (self.write)(command, token)?;
        self.count += 1;
        Ok(())
    }

    pub(crate) fn eager(&self) -> &[Callback<C>] {
        &self.eager
    }

    pub(crate) fn callbacks(&self) -> impl Iterator<Item = &Callback<C>> {
        self.callbacks
            .iter()
            .filter(|(trigger, _)| *trigger == Trigger::Always || self.count > 0)
            .map(|(_, callback)| callback)
    }
}
