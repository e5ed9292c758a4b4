use crate::{
    error::Error,
    parse::{Command, Parser, Tokens},
};
use std::{
    any::{Any, TypeId},
    collections::{btree_map, BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::debug;

type Run<C> = fn(&Parser, Tokens, &mut C) -> Result<(), Error>;
type Registry = Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

pub struct Subcommand<C> {
    help: &'static str,
    run: Run<C>,
}

pub struct Subcommands<C> {
    map: BTreeMap<&'static str, Subcommand<C>>,
}

impl<C> Subcommand<C> {
    pub fn help(&self) -> &'static str {
        self.help
    }

    pub(crate) fn run(&self, parser: &Parser, tokens: Tokens, parent: &mut C) -> Result<(), Error> {
        (self.run)(parser, tokens, parent)
    }
}

impl<C: 'static> Subcommands<C> {
    pub(crate) fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Registers `S` under its name. A later registration with the same name
    /// replaces the earlier one.
    pub fn add<S: Command<C>>(&mut self) -> &mut Self {
        self.map.insert(
            S::NAME,
            Subcommand {
                help: S::HELP,
                run: delegate::<S, C>,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Subcommand<C>> {
        self.map.get(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.map.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, Subcommand<C>> {
        self.map.iter()
    }
}

fn delegate<S: Command<P>, P: 'static>(
    parser: &Parser,
    tokens: Tokens,
    parent: &mut P,
) -> Result<(), Error> {
    let mut command = S::default();
    parser.dispatch(&mut command, tokens, parent)
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::default)
}

/// The subcommand table of `C` as a `Command<P>`, built on first use and shared
/// afterwards. The registry lock is released while `C::subcommands` runs, so
/// registration may itself build other tables.
pub(crate) fn table<C: Command<P>, P: 'static>() -> Arc<Subcommands<C>> {
    let key = TypeId::of::<(C, P)>();
    let cached = lock().get(&key).cloned();
    if let Some(table) = cached.and_then(|table| table.downcast().ok()) {
        return table;
    }

    let mut table = Subcommands::new();
    C::subcommands(&mut table);
    debug!(command = C::NAME, count = table.len(), "built subcommand table");
    let table = Arc::new(table);
    let entry = lock()
        .entry(key)
        .or_insert_with(|| table.clone() as Arc<dyn Any + Send + Sync>)
        .clone();
    entry.downcast().unwrap_or(table)
}

fn lock() -> MutexGuard<'static, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
    registry().lock().unwrap_or_else(PoisonError::into_inner)
}
