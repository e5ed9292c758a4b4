use checkito::*;
use latch::{modifier::*, style::Plain, Command, Context, Error, Parser};
use std::{error, result};

type Result = result::Result<(), Box<dyn error::Error>>;
const COUNT: usize = 1000;

#[derive(Default, Debug)]
struct Values {
    count: usize,
    offset: isize,
    name: String,
    verbose: usize,
    switches: [bool; 3],
    rest: Vec<String>,
}

impl Command for Values {
    const NAME: &'static str = "values";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|values: &mut Self| &mut values.count)
            .flags(["--count", "-C"]);
        context
            .bind(|values: &mut Self| &mut values.offset)
            .flag("--offset");
        context
            .bind(|values: &mut Self| &mut values.name)
            .flags(["--name", "-N"]);
        context
            .bind(|values: &mut Self| &mut values.verbose)
            .flag("-v")
            .with(count());
        context
            .bind(|values: &mut Self| &mut values.switches[0])
            .flag("-a");
        context
            .bind(|values: &mut Self| &mut values.switches[1])
            .flag("-b");
        context
            .bind(|values: &mut Self| &mut values.switches[2])
            .flag("-c");
        context.bind(|values: &mut Self| &mut values.rest);
    }
}

fn values(arguments: Vec<String>) -> result::Result<Values, Error> {
    Parser::with(Plain).parse_with::<Values>(arguments)
}

#[test]
fn attached_long_value_is_taken_verbatim() -> Result {
    String::generator().check(COUNT, |name| {
        let name = name.clone();
        values(vec![format!("--name={name}")]).map(|values| values.name) == Ok(name)
    })?;
    Ok(())
}

#[test]
fn separate_value_is_taken_verbatim() -> Result {
    regex!("[a-zA-Z0-9_][a-zA-Z0-9_ =.]{0,16}").check(COUNT, |name| {
        let name = name.clone();
        let long = values(vec!["--name".into(), name.clone()]).map(|values| values.name);
        let short = values(vec!["-N".into(), name.clone()]).map(|values| values.name);
        long == Ok(name.clone()) && short == Ok(name)
    })?;
    Ok(())
}

#[test]
fn every_value_form_is_equivalent() -> Result {
    usize::generator().check(COUNT, |count| {
        let count = count.clone();
        [
            vec![format!("--count={count}")],
            vec!["--count".into(), format!("{count}")],
            vec![format!("-C{count}")],
            vec!["-C".into(), format!("{count}")],
        ]
        .into_iter()
        .all(|arguments| values(arguments).map(|values| values.count) == Ok(count))
    })?;
    Ok(())
}

#[test]
fn negative_values_parse_when_attached() -> Result {
    (isize::MIN..0).check(COUNT, |offset| {
        let offset = offset.clone();
        values(vec![format!("--offset={offset}")]).map(|values| values.offset) == Ok(offset)
    })?;
    Ok(())
}

#[test]
fn negative_values_fail_for_unsigned_fields() -> Result {
    (isize::MIN..0).check(COUNT, |count| {
        let value = format!("{count}");
        let error = values(vec![format!("--count={value}")]).map(|values| values.count);
        prove!(error == Err(Error::FailedToParse(value.into(), "integer")))
    })?;
    Ok(())
}

#[test]
fn clustered_counts_match_separate_counts() -> Result {
    (1usize..128).check(COUNT, |count| {
        let count = count.clone();
        let clustered = values(vec![format!("-{}", "v".repeat(count))]);
        let separate = values(vec!["-v".to_owned(); count]);
        clustered.map(|values| values.verbose) == Ok(count)
            && separate.map(|values| values.verbose) == Ok(count)
    })?;
    Ok(())
}

#[test]
fn clustered_switches_are_order_independent() -> Result {
    regex!("-[abc]{1,8}").check(COUNT, |cluster| {
        let cluster = cluster.clone();
        let expected = ['a', 'b', 'c'].map(|letter| cluster[1..].contains(letter));
        values(vec![cluster]).map(|values| values.switches) == Ok(expected)
    })?;
    Ok(())
}

#[test]
fn positional_tokens_keep_their_order() -> Result {
    regex!("[a-z]{1,8}( [a-z]{1,8}){0,8}").check(COUNT, |words| {
        let words: Vec<String> = words.split(' ').map(str::to_owned).collect();
        let mut arguments = words.clone();
        arguments.insert(arguments.len() / 2, "-C1".into());
        let parsed = values(arguments);
        parsed.map(|values| (values.count, values.rest)) == Ok((1, words))
    })?;
    Ok(())
}
