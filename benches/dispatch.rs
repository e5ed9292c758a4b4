use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use latch::{modifier::*, style::Plain, Command, Context, Parser, Subcommands};

#[derive(Default)]
struct Build {
    jobs: usize,
    verbose: usize,
    release: bool,
    features: Vec<String>,
    targets: Vec<String>,
}

impl Command for Build {
    const NAME: &'static str = "build";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|build: &mut Self| &mut build.jobs)
            .flags(["--jobs", "-j"]);
        context
            .bind(|build: &mut Self| &mut build.verbose)
            .flag("-v")
            .with(count());
        context
            .bind(|build: &mut Self| &mut build.release)
            .flags(["--release", "-r"]);
        context
            .bind(|build: &mut Self| &mut build.features)
            .flags(["--features", "-F"]);
        context.bind(|build: &mut Self| &mut build.targets);
    }
}

#[derive(Default)]
struct Cargo;

impl Command for Cargo {
    const NAME: &'static str = "cargo";

    fn subcommands(subcommands: &mut Subcommands<Self>) {
        subcommands.add::<Build>();
    }
}

impl Command<Cargo> for Build {
    const NAME: &'static str = "build";

    fn describe(context: &mut Context<Self>) {
        <Self as Command>::describe(context)
    }
}

fn arguments(size: usize) -> Vec<String> {
    let mut arguments = vec!["-vvv".to_owned(), "--jobs=8".to_owned(), "-r".to_owned()];
    arguments.push("--features".to_owned());
    arguments.extend((0..size).map(|index| format!("feature-{index}")));
    arguments.push("-j".to_owned());
    arguments.push("4".to_owned());
    arguments.extend((0..size).map(|index| format!("target-{index}")));
    arguments
}

fn bench_dispatch(c: &mut Criterion) {
    let parser = Parser::with(Plain);
    let mut group = c.benchmark_group("dispatch");

    for size in [1usize, 16, 256] {
        let tokens = arguments(size);
        group.bench_with_input(BenchmarkId::new("flat", size), &tokens, |b, tokens| {
            b.iter(|| parser.parse_with::<Build>(black_box(tokens.clone())))
        });

        let mut nested = vec!["build".to_owned()];
        nested.extend(tokens.iter().cloned());
        group.bench_with_input(BenchmarkId::new("subcommand", size), &nested, |b, tokens| {
            b.iter(|| parser.parse_with::<Cargo>(black_box(tokens.clone())))
        });
    }
    group.finish();
}

fn bench_usage(c: &mut Criterion) {
    let parser = Parser::with(Plain);
    c.bench_function("usage", |b| b.iter(|| parser.usage::<Build, ()>()));
}

criterion_group!(benches, bench_dispatch, bench_usage);
criterion_main!(benches);
