use crate::{
    argument::Argument,
    context::Context,
    style::{styled, Format, Item, Style},
};
use orn::Or2;
use std::fmt::{self, Write};

const INDENT: &str = "  ";

struct Helper<'a> {
    buffer: &'a mut String,
    style: &'a dyn Style,
    width: usize,
}

impl Helper<'_> {
    fn head<C: 'static>(&mut self, context: &Context<C>) -> Result<(), fmt::Error> {
        let commands = if context.subcommands().is_empty() {
            Or2::T1("")
        } else {
            Or2::T0(" [command]")
        };
        let positional = match context.positional() {
            Some(argument) => Or2::T0((' ', argument.metavar())),
            None => Or2::T1(""),
        };
        writeln!(
            self.buffer,
            "{} {} {}{}{}",
            styled(self.style, Item::Head, "Usage:"),
            styled(self.style, Item::Name, context.name()),
            context.options_metavar(),
            styled(self.style, Item::Command, &commands),
            styled(self.style, Item::Flag, &positional),
        )?;
        writeln!(self.buffer)
    }

    fn description(&mut self, description: &str) -> Result<(), fmt::Error> {
        if description.is_empty() {
            return Ok(());
        }
        for line in wrap(description, self.style.width().saturating_sub(INDENT.len())) {
            writeln!(
                self.buffer,
                "{INDENT}{}",
                styled(self.style, Item::Description, &line)
            )?;
        }
        writeln!(self.buffer)
    }

    fn section(&mut self, title: &str) -> Result<(), fmt::Error> {
        writeln!(self.buffer, "{}", styled(self.style, Item::Section, title))?;
        writeln!(self.buffer)
    }

    fn row(&mut self, item: Item, label: &str, help: &str) -> Result<(), fmt::Error> {
        let width = self.width;
        let padding = width.saturating_sub(label.width());
        write!(self.buffer, " {:padding$}{}", "", styled(self.style, item, label))?;
        let lines = wrap(help, self.style.width().saturating_sub(width + 2));
        for (index, line) in lines.iter().enumerate().filter(|(_, line)| !line.is_empty()) {
            if index > 0 {
                write!(self.buffer, "\n {:width$}", "")?;
            }
            write!(self.buffer, " {}", styled(self.style, Item::Help, line))?;
        }
        writeln!(self.buffer)
    }
}

pub(crate) fn render<C: 'static>(context: &Context<C>, style: &dyn Style) -> Result<String, fmt::Error> {
    let flags: Vec<String> = context.arguments().iter().map(Argument::display_flags).collect();
    let width = flags
        .iter()
        .map(|flag| flag.width())
        .chain(context.subcommands().names().map(str::width))
        .max()
        .unwrap_or(0);

    let mut buffer = String::new();
    let mut helper = Helper {
        buffer: &mut buffer,
        style,
        width,
    };
    helper.head(context)?;
    helper.description(context.help())?;
    helper.section("Options:")?;
    for (argument, flags) in context.arguments().iter().zip(flags.iter()) {
        helper.row(Item::Flag, flags, argument.help())?;
    }
    if !context.subcommands().is_empty() {
        writeln!(helper.buffer)?;
        helper.section("Commands:")?;
        for (name, subcommand) in context.subcommands().iter() {
            helper.row(Item::Command, name, subcommand.help())?;
        }
    }
    Ok(buffer)
}

/// Greedily packs the words of `text` into lines of at most `width` columns.
/// A word longer than `width` gets a line of its own. Always yields at least
/// one line.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    lines.push(line);
    lines
}
