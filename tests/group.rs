use latch::{modifier::*, style::Plain, Command, Context, Error, Parser, Subcommands};
use std::{error, result};

type Result = result::Result<(), Box<dyn error::Error>>;

fn parser() -> Parser {
    Parser::with(Plain)
}

#[derive(Default, Debug)]
struct Cli {
    name: String,
    verbose: bool,
    ran: bool,
}

impl Command for Cli {
    const NAME: &'static str = "cli";
    const HELP: &'static str = "A group of commands.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|cli: &mut Self| &mut cli.verbose)
            .flags(["--verbose", "-v"]);
    }

    fn subcommands(subcommands: &mut Subcommands<Self>) {
        subcommands.add::<Init>().add::<Delete>().add::<Custom>();
    }

    fn run(&mut self, _: &mut ()) -> result::Result<(), Error> {
        self.ran = true;
        Ok(())
    }
}

#[derive(Default)]
struct Init;

impl Command<Cli> for Init {
    const NAME: &'static str = "init";
    const HELP: &'static str = "Initialize a repository.";

    fn run(&mut self, cli: &mut Cli) -> result::Result<(), Error> {
        cli.name = "init".into();
        Ok(())
    }
}

#[derive(Default)]
struct Delete {
    targets: Vec<String>,
    force: bool,
}

impl Command<Cli> for Delete {
    const NAME: &'static str = "delete";
    const HELP: &'static str = "Delete targets.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|delete: &mut Self| &mut delete.force)
            .flags(["--force", "-f"]);
        context.bind(|delete: &mut Self| &mut delete.targets);
    }

    fn run(&mut self, cli: &mut Cli) -> result::Result<(), Error> {
        cli.name = format!("delete {}{}", self.targets.join(","), if self.force { "!" } else { "" });
        Ok(())
    }
}

#[derive(Default)]
struct Custom {
    times: usize,
}

impl Command<Cli> for Custom {
    const NAME: &'static str = "run";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|custom: &mut Self| &mut custom.times)
            .flag("--times")
            .with(required());
    }

    fn run(&mut self, cli: &mut Cli) -> result::Result<(), Error> {
        cli.name = "run".repeat(self.times);
        Ok(())
    }
}

/// A command that lists itself among its own subcommands.
#[derive(Default, Debug)]
struct Recursive {
    values: Vec<String>,
}

impl Command for Recursive {
    const NAME: &'static str = "recursive";

    fn describe(context: &mut Context<Self>) {
        context.bind(|recursive: &mut Self| &mut recursive.values);
    }

    fn subcommands(subcommands: &mut Subcommands<Self>) {
        subcommands.add::<Self>();
    }
}

impl Command<Recursive> for Recursive {
    const NAME: &'static str = "recursive";
}

#[test]
fn subcommand_runs_with_its_group() -> Result {
    let mut cli = Cli::default();
    parser().parse_into(&mut cli, ["init"])?;
    assert_eq!(cli.name, "init");
    assert!(!cli.ran);
    Ok(())
}

#[test]
fn subcommand_with_custom_name() -> Result {
    let cli = parser().parse_with::<Cli>(["run", "--times", "2"])?;
    assert_eq!(cli.name, "runrun");
    Ok(())
}

#[test]
fn subcommand_takes_every_remaining_token() -> Result {
    let cli = parser().parse_with::<Cli>(["-v", "delete", "a", "-f", "b"])?;
    assert!(cli.verbose);
    assert_eq!(cli.name, "delete a,b!");
    Ok(())
}

#[test]
fn group_without_subcommand_runs_itself() -> Result {
    let cli = parser().parse_with::<Cli>(["--verbose"])?;
    assert!(cli.ran);
    assert_eq!(cli.name, "");
    Ok(())
}

#[test]
fn subcommand_errors_propagate() {
    let cli = parser().parse_with::<Cli>(["run"]).map(|cli| cli.name);
    assert_eq!(cli, Err(Error::MissingRequired(vec!["--times".into()])));
}

#[test]
fn unknown_subcommand_is_reported_with_suggestions() {
    let cli = parser().parse_with::<Cli>(["delette"]).map(|cli| cli.name);
    assert_eq!(
        cli,
        Err(Error::UnknownCommand("delette".into(), vec![("delete".into(), 1)]))
    );
}

#[test]
fn own_name_is_not_a_subcommand() -> Result {
    let recursive = parser().parse_with::<Recursive>(["recursive", "other"])?;
    assert_eq!(recursive.values, ["recursive", "other"]);
    Ok(())
}

#[test]
fn subcommand_table_is_shared() {
    let subcommands = parser().usage::<Cli, ()>().map(|usage| usage.contains("Commands:"));
    assert_eq!(subcommands, Ok(true));
    assert_eq!(parser().usage::<Cli, ()>(), parser().usage::<Cli, ()>());
}

#[derive(Default, Debug)]
struct Nested {
    leaf: bool,
}

impl Command for Nested {
    const NAME: &'static str = "nested";

    fn subcommands(subcommands: &mut Subcommands<Self>) {
        if parser().usage::<Cli, ()>().is_ok() {
            subcommands.add::<Leaf>();
        }
    }
}

#[derive(Default)]
struct Leaf;

impl Command<Nested> for Leaf {
    const NAME: &'static str = "leaf";

    fn run(&mut self, nested: &mut Nested) -> result::Result<(), Error> {
        nested.leaf = true;
        Ok(())
    }
}

#[test]
fn subcommand_registration_may_build_other_tables() -> Result {
    let nested = parser().parse_with::<Nested>(["leaf"])?;
    assert!(nested.leaf);
    Ok(())
}
