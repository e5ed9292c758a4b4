use latch::{modifier::*, Command, Context, Error};
use std::process::ExitCode;

#[derive(Default)]
struct Hello {
    name: String,
    times: usize,
    shout: bool,
}

impl Command for Hello {
    const NAME: &'static str = "hello";
    const HELP: &'static str = "Greet someone, possibly more than once.";

    fn describe(context: &mut Context<Self>) {
        context
            .bind(|hello: &mut Self| &mut hello.name)
            .flags(["--name", "-n"])
            .with(required())
            .with(help("Who to greet"));
        context
            .bind(|hello: &mut Self| &mut hello.times)
            .flags(["--times", "-t"])
            .with(help("How many greetings to print"));
        context
            .bind(|hello: &mut Self| &mut hello.shout)
            .flags(["--shout", "-s"])
            .with(help("Greet in capitals"));
        context
            .flag()
            .flag("--version")
            .with(show(env!("CARGO_PKG_VERSION")))
            .with(help("Print the version"));
    }

    fn run(&mut self, _: &mut ()) -> Result<(), Error> {
        let greeting = format!("Hello, {}!", self.name);
        let greeting = if self.shout {
            greeting.to_uppercase()
        } else {
            greeting
        };
        for _ in 0..self.times.max(1) {
            println!("{greeting}");
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if latch::parse_env::<Hello>() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
