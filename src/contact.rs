// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use crate::types::listing::Listing;

/// How long the "message sent" acknowledgment stays up before the dialog
/// closes on its own.
pub const AUTO_CLOSE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactState {
    Closed,
    Open(Listing),
    Acknowledged(Listing),
}

/// Identifies one acknowledgment, so that a stale auto-close cannot close a
/// dialog that was reopened in the meantime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

/// The contact dialog state machine.
pub struct ContactFlow {
    state: ContactState,
    generation: u64,
}

impl ContactFlow {
    pub fn new() -> Self {
        Self {
            state: ContactState::Closed,
            generation: 0,
        }
    }

    pub fn state(&self) -> ContactState {
        self.state
    }

    pub fn selected(&self) -> Option<Listing> {
        match self.state {
            ContactState::Closed => None,
            ContactState::Open(listing) | ContactState::Acknowledged(listing) => Some(listing),
        }
    }

    pub fn is_acknowledged(&self) -> bool {
        matches!(self.state, ContactState::Acknowledged(_))
    }

    /// Open the dialog for a listing. Any previous acknowledgment is dropped.
    pub fn select(&mut self, listing: Listing) {
        log::debug!("Contact dialog opened for {:?} {}", listing.kind(), listing.id());
        self.generation += 1;
        self.state = ContactState::Open(listing);
    }

    /// Send the (simulated) message. Returns the ticket the caller must hand
    /// to [`ContactFlow::expire`] once [`AUTO_CLOSE_DELAY`] has elapsed.
    pub fn send(&mut self) -> Option<Ticket> {
        match self.state {
            ContactState::Open(listing) => {
                self.generation += 1;
                self.state = ContactState::Acknowledged(listing);
                Some(Ticket(self.generation))
            }
            _ => None,
        }
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.state = ContactState::Closed;
    }

    /// Auto-close. Returns whether the ticket was still current.
    pub fn expire(&mut self, ticket: Ticket) -> bool {
        if self.is_acknowledged() && ticket.0 == self.generation {
            log::debug!("Contact acknowledgment expired");
            self.close();
            true
        } else {
            false
        }
    }
}
