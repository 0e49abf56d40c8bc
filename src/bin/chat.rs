//! Gemini Agent - terminal chat loop.
//!
//! Reads lines from stdin and prints the agent's replies until `quit`,
//! `exit`, `q`, ctrl-c, or end of input.

use std::io::Write;
use std::path::Path;

use gemini_agent::{agent::Runner, config, Config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CLI_SESSION_ID: &str = "cli";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_agent=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config::load_env_file(Path::new(".env"))?;
    let config = Config::from_env()?;
    let runner = Runner::new(&config);

    println!(
        "Agent ready ({}). Type 'quit' or 'exit' to leave.\n",
        runner.agent().model
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        // Ctrl-c at the prompt or mid-turn ends the session like `quit`.
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => break,
        };

        let line = match line {
            Some(line) => line,
            None => break,
        };
        let input = line.trim();

        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        tokio::select! {
            result = runner.run(CLI_SESSION_ID, input) => match result {
                Ok(response) => println!("\nAgent: {}\n", response),
                Err(e) => eprintln!("\nError: {}\n", e),
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!("\nBye!");
    Ok(())
}
