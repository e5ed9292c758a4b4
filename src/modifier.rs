//! Registration-time decorators for bound fields.
//!
//! A modifier receives the bound field and the argument under construction and
//! adjusts the argument. Modifiers given to one binding apply in order, so a
//! later modifier may replace what an earlier one installed.

use crate::{
    argument::{Argument, Field, Trigger},
    context::Context,
    error::Error,
    value::Cardinality,
};
use std::borrow::Cow;

pub trait Modifier<C, T> {
    fn apply(self, field: &Field<C, T>, argument: &mut Argument<C>);
}

pub struct Required;
pub struct Count;
pub struct Set<T>(T);
pub struct Help(Cow<'static, str>);
pub struct Metavar(Cow<'static, str>);
pub struct Action<F>(F);

pub struct Hook<F> {
    callback: F,
    timing: Timing,
}

#[derive(Clone, Copy)]
enum Timing {
    Always,
    Occurred,
    Eager,
}

pub const fn required() -> Required {
    Required
}

/// Turns the argument into a flag that stores its number of occurrences.
pub const fn count() -> Count {
    Count
}

/// Turns the argument into a flag that stores `value` each time it occurs.
pub fn set<T>(value: T) -> Set<T> {
    Set(value)
}

pub fn help(help: impl Into<Cow<'static, str>>) -> Help {
    Help(help.into())
}

pub fn metavar(metavar: impl Into<Cow<'static, str>>) -> Metavar {
    Metavar(metavar.into())
}

/// Runs `callback` after all tokens are consumed, whether or not the argument
/// occurred.
pub fn callback<C, F>(callback: F) -> Hook<F>
where
    F: Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
{
    Hook {
        callback,
        timing: Timing::Always,
    }
}

/// Runs `callback` after all tokens are consumed, only if the argument
/// occurred.
pub fn lazy_callback<C, F>(callback: F) -> Hook<F>
where
    F: Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
{
    Hook {
        callback,
        timing: Timing::Occurred,
    }
}

/// Runs `callback` every time a value is written. Once it has run, the parse
/// stops: remaining tokens, post-processing and the command's run behavior are
/// skipped.
pub fn eager_callback<C, F>(callback: F) -> Hook<F>
where
    F: Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
{
    Hook {
        callback,
        timing: Timing::Eager,
    }
}

pub fn action<F: Fn() + 'static>(action: F) -> Action<F> {
    Action(action)
}

pub fn show(text: impl Into<Cow<'static, str>>) -> Action<impl Fn()> {
    let text = text.into();
    action(move || println!("{text}"))
}

impl<C: 'static, T> Modifier<C, T> for Required {
    fn apply(self, _: &Field<C, T>, argument: &mut Argument<C>) {
        argument.set_required(true);
        argument.add_callback(
            Trigger::Always,
            |_: &mut C, _: &Context<C>, argument: &Argument<C>| {
                if argument.is_required() && argument.count() == 0 {
                    let name = if argument.is_positional() {
                        vec![argument.metavar.clone()]
                    } else {
                        argument.flags.clone()
                    };
                    Err(Error::MissingRequired(name))
                } else {
                    Ok(())
                }
            },
        );
    }
}

impl<C: 'static, T: TryFrom<usize> + 'static> Modifier<C, T> for Count {
    fn apply(self, field: &Field<C, T>, argument: &mut Argument<C>) {
        let field = field.clone();
        argument.set_cardinality(Cardinality::None);
        argument.set_write(|_: &mut C, _: &str| Ok(()));
        argument.add_callback(
            Trigger::Always,
            move |command: &mut C, _: &Context<C>, argument: &Argument<C>| {
                let count = argument.count();
                *field.get(command) = T::try_from(count).map_err(|_| Error::CountOverflow(count))?;
                Ok(())
            },
        );
    }
}

impl<C: 'static, T: Clone + 'static> Modifier<C, T> for Set<T> {
    fn apply(self, field: &Field<C, T>, argument: &mut Argument<C>) {
        let (field, value) = (field.clone(), self.0);
        argument.set_cardinality(Cardinality::None);
        argument.set_write(move |command: &mut C, _: &str| {
            *field.get(command) = value.clone();
            Ok(())
        });
    }
}

impl<C, T> Modifier<C, T> for Help {
    fn apply(self, _: &Field<C, T>, argument: &mut Argument<C>) {
        argument.set_help(self.0);
    }
}

impl<C, T> Modifier<C, T> for Metavar {
    fn apply(self, _: &Field<C, T>, argument: &mut Argument<C>) {
        argument.set_metavar(self.0);
    }
}

impl<C: 'static, T, F> Modifier<C, T> for Hook<F>
where
    F: Fn(&mut C, &Context<C>, &Argument<C>) -> Result<(), Error> + 'static,
{
    fn apply(self, _: &Field<C, T>, argument: &mut Argument<C>) {
        match self.timing {
            Timing::Always => argument.add_callback(Trigger::Always, self.callback),
            Timing::Occurred => argument.add_callback(Trigger::Occurred, self.callback),
            Timing::Eager => argument.add_eager_callback(self.callback),
        }
    }
}

impl<C: 'static, T, F: Fn() + 'static> Modifier<C, T> for Action<F> {
    fn apply(self, _: &Field<C, T>, argument: &mut Argument<C>) {
        let action = self.0;
        argument.add_eager_callback(move |_: &mut C, _: &Context<C>, _: &Argument<C>| {
            action();
            Ok(())
        });
    }
}
