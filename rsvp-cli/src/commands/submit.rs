use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::{Dietary, NewRsvp};

use crate::client::Client;

pub async fn run(client: &Client, input: NewRsvp) -> Result<()> {
    let created = client.submit_rsvp(&input).await?;

    println!("{} {}", "✓".green(), created.message);
    println!(
        "  {} for {} ({} attending)",
        created.rsvp.name.bold(),
        created.rsvp.email,
        created.rsvp.attendees
    );
    if let Some(id) = created.id {
        println!("  {}", format!("id: {id}").dimmed());
    }

    Ok(())
}

/// clap value parser for `--dietary`.
pub fn parse_dietary(s: &str) -> Result<Dietary, String> {
    Dietary::from_name(&s.to_lowercase()).ok_or_else(|| {
        let options: Vec<_> = Dietary::ALL.iter().map(|d| d.as_str()).collect();
        format!("unknown dietary option '{s}' (expected one of: {})", options.join(", "))
    })
}
