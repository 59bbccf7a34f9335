use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::Rsvp;

use crate::client::Client;

pub async fn run(client: &Client) -> Result<()> {
    let mut rsvps = client.list_rsvps().await?;
    sort_newest_first(&mut rsvps);

    if rsvps.is_empty() {
        println!("{}", "No RSVPs submitted yet.".dimmed());
        return Ok(());
    }

    println!(
        "{} {}",
        "Submitted RSVPs".bold(),
        format!(
            "({} responses, {} attendees)",
            rsvps.len(),
            total_attendees(&rsvps)
        )
        .dimmed()
    );

    for rsvp in &rsvps {
        println!();
        println!("{}", rsvp.name.bold());
        println!(
            "  {} - Submitted on {}",
            rsvp.email,
            submitted_on(rsvp).dimmed()
        );
        for (label, value) in details(rsvp) {
            println!("  {} {}", format!("{label}:").dimmed(), value);
        }
    }

    Ok(())
}

/// Newest first. The server already sorts; this keeps the listing correct
/// against any server that does not.
fn sort_newest_first(rsvps: &mut [Rsvp]) {
    rsvps.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

fn total_attendees(rsvps: &[Rsvp]) -> u64 {
    rsvps.iter().map(|r| u64::from(r.attendees)).sum()
}

/// Local calendar date of submission, e.g. "Apr 1, 2025".
fn submitted_on(rsvp: &Rsvp) -> String {
    rsvp.submitted_at
        .with_timezone(&chrono::Local)
        .format("%b %-d, %Y")
        .to_string()
}

fn details(rsvp: &Rsvp) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Phone", rsvp.phone.clone().unwrap_or_default()),
        ("Attendees", rsvp.attendees.to_string()),
        ("Dietary Preferences", rsvp.dietary.label().to_string()),
    ];
    if let Some(requests) = &rsvp.requests {
        lines.push(("Requests", requests.clone()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rsvp_core::Dietary;

    fn make_rsvp(name: &str, hour: u32) -> Rsvp {
        Rsvp {
            id: None,
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: None,
            attendees: 2,
            dietary: Dietary::DairyFree,
            requests: None,
            submitted_at: Utc.with_ymd_and_hms(2025, 4, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut rsvps = vec![make_rsvp("A", 9), make_rsvp("C", 11), make_rsvp("B", 10)];
        sort_newest_first(&mut rsvps);
        let names: Vec<_> = rsvps.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn test_total_attendees_does_not_overflow() {
        let mut big = make_rsvp("A", 9);
        big.attendees = u32::MAX;
        let rsvps = vec![big.clone(), big, make_rsvp("B", 10)];

        assert_eq!(total_attendees(&rsvps), 2 * u64::from(u32::MAX) + 2);
        assert_eq!(total_attendees(&[]), 0);
    }

    #[test]
    fn test_details_show_labels_and_skip_missing_requests() {
        let rsvp = make_rsvp("A", 9);
        let lines = details(&rsvp);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], ("Dietary Preferences", "Dairy-Free".to_string()));

        let mut rsvp = make_rsvp("A", 9);
        rsvp.requests = Some("Quiet table".into());
        assert_eq!(details(&rsvp).last().unwrap().1, "Quiet table");
    }
}
