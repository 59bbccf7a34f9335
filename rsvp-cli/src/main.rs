mod client;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rsvp_core::Dietary;

use crate::client::{Client, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "RSVP to the event and see who is coming")]
struct Cli {
    /// rsvp-server base URL
    #[arg(long, env = "RSVP_SERVER", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show submitted RSVPs, newest first
    List,
    /// Submit an RSVP
    Submit {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Contact number
        #[arg(long)]
        phone: Option<String>,

        /// Number of attendees, including you
        #[arg(short, long, default_value_t = 1)]
        attendees: i64,

        /// none, vegetarian, vegan, gluten-free, dairy-free or nut-free
        #[arg(short, long, value_parser = commands::submit::parse_dietary)]
        dietary: Option<Dietary>,

        /// Special requests
        #[arg(short, long)]
        requests: Option<String>,
    },
    /// Show the event details
    Event,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new(&cli.server)?;

    match cli.command {
        Commands::List => commands::list::run(&client).await,
        Commands::Submit {
            name,
            email,
            phone,
            attendees,
            dietary,
            requests,
        } => {
            let input = rsvp_core::NewRsvp {
                name: Some(name),
                email: Some(email),
                phone,
                attendees: Some(attendees),
                dietary,
                requests,
            };
            commands::submit::run(&client, input).await
        }
        Commands::Event => commands::event::run(&client).await,
    }
}
