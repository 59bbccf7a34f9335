//! RSVP service: validation, timestamping and newest-first listing on top of
//! whichever storage adapter is configured.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use parking_lot::Mutex;

use crate::error::RsvpResult;
use crate::rsvp::{NewRsvp, Rsvp};
use crate::store::RsvpStore;

/// Source of acceptance timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub struct RsvpService {
    store: Arc<dyn RsvpStore>,
    clock: Arc<dyn Clock>,
    last_stamp: Mutex<Option<DateTime<Utc>>>,
}

impl RsvpService {
    pub fn new(store: Arc<dyn RsvpStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn RsvpStore>, clock: Arc<dyn Clock>) -> Self {
        RsvpService {
            store,
            clock,
            last_stamp: Mutex::new(None),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Every RSVP, newest first.
    ///
    /// The file backend keeps insertion order only, so the sort always runs
    /// here regardless of what the adapter returns. Records sharing a
    /// millisecond come out latest-appended first.
    pub async fn list_rsvps(&self) -> RsvpResult<Vec<Rsvp>> {
        let mut rsvps = self.store.list_all().await?;
        rsvps.reverse();
        rsvps.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(rsvps)
    }

    /// Validate, stamp and store one RSVP. Nothing is stored if validation fails.
    pub async fn submit_rsvp(&self, input: NewRsvp) -> RsvpResult<Rsvp> {
        let rsvp = input.validate_then_stamp(|| self.next_stamp())?;
        let stored = self.store.append(rsvp).await?;

        tracing::info!(
            attendees = stored.attendees,
            dietary = %stored.dietary,
            backend = self.store.backend_name(),
            "RSVP accepted"
        );
        Ok(stored)
    }

    /// Current time at millisecond precision. Never earlier than the previous
    /// stamp handed out by this service, so a wall clock stepping back cannot
    /// reorder submissions. Several stamps may share a millisecond.
    fn next_stamp(&self) -> DateTime<Utc> {
        let mut last = self.last_stamp.lock();
        let now = self.clock.now().trunc_subsecs(3);

        let stamp = last.map_or(now, |prev| prev.max(now));
        *last = Some(stamp);
        stamp
    }
}
