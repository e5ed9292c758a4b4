use latch::{modifier::*, Argument, Command, Context, Error, Subcommands};
use std::{collections::BTreeMap, process::ExitCode};
use tracing::info;

#[derive(Default)]
struct Database {
    path: Option<String>,
    entries: BTreeMap<String, Vec<String>>,
}

impl Command for Database {
    const NAME: &'static str = "database";
    const HELP: &'static str = "Manage an in-memory key-value database.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|database: &mut Self| &mut database.path)
            .flags(["--path", "-p"])
            .with(metavar("[file]"))
            .with(help("Where the database would be stored"))
            .with(lazy_callback(
                |database: &mut Self, _: &Context<Self>, _: &Argument<Self>| {
                    info!(path = ?database.path, "using database");
                    Ok(())
                },
            ));
    }

    fn subcommands(subcommands: &mut Subcommands<Self>) {
        subcommands.add::<Insert>().add::<Remove>();
    }

    fn run(&mut self, _: &mut ()) -> Result<(), Error> {
        Err(Error::from("Expected a command. Use '--help' to list them."))
    }
}

#[derive(Default)]
struct Insert {
    key: String,
    values: Vec<String>,
}

impl Command<Database> for Insert {
    const NAME: &'static str = "insert";
    const HELP: &'static str = "Insert values under a key.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|insert: &mut Self| &mut insert.key)
            .flags(["--key", "-k"])
            .with(required())
            .with(help("Key to insert under"));
        context
            .bind(|insert: &mut Self| &mut insert.values)
            .with(metavar("[values...]"));
    }

    fn run(&mut self, database: &mut Database) -> Result<(), Error> {
        let entry = database.entries.entry(self.key.clone()).or_default();
        entry.extend(self.values.drain(..));
        println!("{} = {:?}", self.key, entry);
        Ok(())
    }
}

#[derive(Default)]
struct Remove {
    keys: Vec<String>,
    force: bool,
}

impl Command<Database> for Remove {
    const NAME: &'static str = "remove";
    const HELP: &'static str = "Remove keys and their values.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|remove: &mut Self| &mut remove.force)
            .flags(["--force", "-f"])
            .with(help("Do not fail on missing keys"));
        context
            .bind(|remove: &mut Self| &mut remove.keys)
            .with(metavar("[keys...]"));
    }

    fn run(&mut self, database: &mut Database) -> Result<(), Error> {
        for key in self.keys.iter() {
            if database.entries.remove(key).is_none() && !self.force {
                return Err(Error::from(format!("Unknown key '{key}'.")));
            }
            println!("removed {key}");
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if latch::parse_env::<Database>() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
