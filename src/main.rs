use anyhow::Result;

use lane_balancer::cli::Command;
use lane_balancer::{handle_balance, handle_completions, handle_rating, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Balance { file, options, json } => handle_balance(file, options, *json),
        Command::Rating { name, options } => handle_rating(name, options),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
