//! Interactive subscriber CLI.
//!
//! One toggle control: pressing Enter starts the subscription when
//! disconnected and stops it when connected; `q` quits. Received events are
//! printed as they arrive and kept oldest-first, new events at the end.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing_subscriber::EnvFilter;

use pulse_gateway::config::PulseConfig;
use pulse_gateway::domain::TickEvent;
use pulse_gateway::error::PulseError;
use pulse_gateway::subscriber::{EventLog, EventSink, SseClient};

/// Sink that renders events to the terminal while accumulating them.
#[derive(Debug, Default)]
struct ConsoleSink {
    log: EventLog,
}

impl EventSink for ConsoleSink {
    fn on_open(&self) {
        self.log.on_open();
        println!("Status: Connected");
    }

    fn on_data(&self, event: TickEvent) {
        println!("Time: {}", event.time);
        self.log.on_data(event);
    }

    fn on_error(&self, error: &PulseError) {
        let was_connected = self.log.is_connected();
        self.log.on_error(error);
        if was_connected && !self.log.is_connected() {
            println!("Status: Disconnected ({error})");
        } else if !was_connected {
            println!("Connection failed: {error}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = PulseConfig::fixed();
    let sink = Arc::new(ConsoleSink::default());
    let mut client = SseClient::new(config.endpoint.clone(), Arc::clone(&sink) as Arc<dyn EventSink>);

    println!("SSE subscriber — endpoint: {}", config.endpoint);
    println!("Press Enter to start/stop catching events, q to quit.");

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());
    while let Some(line) = lines.next().await {
        let line = line?;
        match line.trim() {
            "q" | "quit" => break,
            "" => {
                if client.is_live() {
                    client.stop();
                    println!(
                        "Status: Disconnected ({} events caught)",
                        sink.log.len()
                    );
                } else {
                    println!("Starting...");
                    client.start();
                }
            }
            other => println!("Unknown input {other:?} — Enter toggles, q quits."),
        }
    }

    // Dropping the client tears down any live transport; the accumulated
    // display is printed one last time.
    let events = sink.log.snapshot();
    println!("Caught {} events:", events.len());
    for event in events {
        println!("  Time: {}", event.time);
    }

    Ok(())
}
