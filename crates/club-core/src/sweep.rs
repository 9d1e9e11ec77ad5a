//! Closing time: everyone still inside is asked to leave.

use crate::event::{Event, EventKind};
use crate::state::ClubState;

impl ClubState {
    /// Ends the day, forcing out every client still inside in name order.
    ///
    /// Seated clients are billed up to closing time. Nobody is seated from
    /// the queue; waiting clients simply leave.
    pub fn close_day(&mut self) -> Vec<Event> {
        let close = self.config.close();
        let clients = std::mem::take(&mut self.clients);
        self.queue.clear();

        let mut log = Vec::with_capacity(clients.len());
        for (client, state) in clients {
            if let Some(session) = state.session {
                self.end_session(session, close, true);
            }
            log.push(Event::new(close, EventKind::ForcedLeave { client }));
        }

        tracing::debug!(forced_out = log.len(), %close, "day closed");
        log
    }
}
