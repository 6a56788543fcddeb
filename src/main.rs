use clap::Parser;
use latency_wars::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
