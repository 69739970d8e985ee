//! Courier CLI - drive the prime pipeline from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use courier::prelude::*;

#[derive(Parser)]
#[command(name = "courier")]
#[command(author, version, about = "Courier - actor-style message pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the prime pipeline over one or more text inputs
    Run {
        /// Inputs to validate (each is drained to idle before the next)
        #[arg(default_value = "22")]
        inputs: Vec<String>,

        /// Dump the event trace as JSON instead of rendered lines
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { inputs, json } => run(inputs, json).await,
    }
}

async fn run(inputs: Vec<String>, json: bool) -> Result<()> {
    let mut runtime = Runtime::new();
    let validator = runtime.register("validator", || Box::new(Validator::new()))?;
    runtime.register("prime_checker", || Box::new(PrimeChecker::new()))?;
    runtime.register("logger", || Box::new(Logger::new()))?;
    runtime.start();

    run_in_local(runtime, |rt| async move {
        for input in inputs {
            println!();
            println!("Sending: '{}'", input);
            rt.send_message(Message::text(input.as_str()), &validator)
                .await?;
            let events = rt.stop_when_idle().await;

            if json {
                println!("{}", trace_to_json(&events)?);
            } else {
                render(&events);
            }
        }
        Ok(())
    })
    .await
}

/// Render the drain's trace the way the agents wrote it: one ruled
/// section per handled message.
fn render(events: &[RuntimeEvent]) {
    for event in events {
        if let RuntimeEvent::Delivered {
            label,
            trace: Some(trace),
            ..
        } = event
        {
            println!("{}", "-".repeat(80).dimmed());
            println!("{}:", label.bold());
            println!("{}", trace);
        }
    }
}
