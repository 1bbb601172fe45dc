use clap::Parser;
use marketpulse::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
