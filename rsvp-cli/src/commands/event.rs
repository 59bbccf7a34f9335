use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;

pub async fn run(client: &Client) -> Result<()> {
    let event = client.event().await?;

    println!("{}", event.title.bold());
    println!("{}", event.description);
    println!();
    println!("{} {} at {}", "When:".dimmed(), event.date, event.time);
    println!("{} {}", "Where:".dimmed(), event.address);
    println!("       {}", event.map_link.underline());

    if !event.menu.is_empty() {
        println!();
        println!("{}", "Menu highlights".bold());
        for item in &event.menu {
            println!("  - {item}");
        }
    }

    println!();
    println!("{}", "Dietary options for `rsvp submit --dietary`".dimmed());
    for option in &event.dietary_options {
        println!("  {:<12} {}", option.value, option.label.dimmed());
    }

    Ok(())
}
