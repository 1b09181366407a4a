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

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use chrono::Utc;

use crate::chat::session::ChatSession;
use crate::chat::session::REPLY_DELAY;
use crate::contact::AUTO_CLOSE_DELAY;
use crate::contact::ContactFlow;
use crate::error::Fallible;
use crate::error::fail;
use crate::i18n::prefs::PreferenceStore;
use crate::i18n::strings::Strings;
use crate::i18n::strings::Translations;
use crate::lesson::COPIED_DELAY;
use crate::lesson::LessonState;
use crate::timer::Timer;
use crate::types::listing::Listing;

/// Identifies one visit to one page.
pub type VisitId = u64;

/// Visits kept at once. The oldest is evicted first.
const MAX_VISITS: usize = 64;

/// The in-memory state of one page visit. Dropping it cancels its timers.
pub struct Visit {
    page: String,
    pub contact: ContactFlow,
    contact_timer: Timer,
    pub chat: ChatSession,
    chat_timer: Timer,
    pub lesson: LessonState,
    share_timer: Timer,
}

impl Visit {
    fn new(page: &str, strings: &Strings) -> Self {
        Self {
            page: page.to_string(),
            contact: ContactFlow::new(),
            contact_timer: Timer::default(),
            chat: ChatSession::new(strings),
            chat_timer: Timer::default(),
            lesson: LessonState::new(),
            share_timer: Timer::default(),
        }
    }

    /// Whether a timer will still change what the page shows.
    pub fn is_pending(&self) -> bool {
        self.chat.is_pending() || self.contact.is_acknowledged() || self.lesson.copied()
    }
}

#[derive(Default)]
pub struct MutableState {
    last_visit: VisitId,
    visits: BTreeMap<VisitId, Visit>,
}

impl MutableState {
    /// A token naming a visit to the same page continues it. Anything else
    /// starts a fresh visit, and a visit the token named on another page is
    /// discarded.
    pub fn enter(
        &mut self,
        token: Option<VisitId>,
        page: &str,
        strings: &Strings,
    ) -> (VisitId, &mut Visit) {
        let continued =
            token.filter(|token| self.visits.get(token).is_some_and(|visit| visit.page == page));
        let id = match continued {
            Some(id) => id,
            None => {
                if let Some(token) = token {
                    if self.visits.remove(&token).is_some() {
                        log::debug!("Visit {token} left for {page}");
                    }
                }
                while self.visits.len() >= MAX_VISITS {
                    self.visits.pop_first();
                }
                self.last_visit += 1;
                log::debug!("Visit {} started on {page}", self.last_visit);
                self.last_visit
            }
        };
        let visit = self
            .visits
            .entry(id)
            .or_insert_with(|| Visit::new(page, strings));
        (id, visit)
    }

    pub fn visit(&mut self, id: VisitId) -> Fallible<&mut Visit> {
        match self.visits.get_mut(&id) {
            Some(visit) => Ok(visit),
            None => fail(format!("unknown visit: {id}.")),
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub translations: Arc<Translations>,
    pub preferences: PreferenceStore,
    pub mutable: Arc<Mutex<MutableState>>,
}

impl ServerState {
    pub fn new(translations: Translations, preferences: PreferenceStore) -> Self {
        Self {
            translations: Arc::new(translations),
            preferences,
            mutable: Arc::new(Mutex::new(MutableState::default())),
        }
    }

    /// Lock the mutable state. A panic in another handler does not make the
    /// state unusable.
    pub fn acquire(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The string tables for the current language.
    pub fn strings(&self) -> Strings<'_> {
        self.translations.strings(self.preferences.get().language)
    }

    pub fn with_visit<T>(&self, id: VisitId, f: impl FnOnce(&mut Visit) -> T) -> Fallible<T> {
        let mut mutable = self.acquire();
        Ok(f(mutable.visit(id)?))
    }

    pub fn select_listing(&self, id: VisitId, listing: Listing) -> Fallible<()> {
        self.with_visit(id, |visit| {
            visit.contact_timer.cancel();
            visit.contact.select(listing);
        })
    }

    pub fn close_contact(&self, id: VisitId) -> Fallible<()> {
        self.with_visit(id, |visit| {
            visit.contact_timer.cancel();
            visit.contact.close();
        })
    }

    /// Send the contact message and schedule the dialog to close itself.
    pub fn send_contact(&self, id: VisitId) -> Fallible<()> {
        let state = self.clone();
        self.with_visit(id, |visit| {
            if let Some(ticket) = visit.contact.send() {
                visit.contact_timer.schedule(AUTO_CLOSE_DELAY, async move {
                    state.expire(id, |visit| {
                        visit.contact.expire(ticket);
                    });
                });
            }
        })
    }

    /// Submit a chat message and schedule the reply. Returns whether the
    /// message was accepted.
    pub fn submit_chat(&self, id: VisitId, text: &str) -> Fallible<bool> {
        let state = self.clone();
        self.with_visit(id, |visit| {
            if !visit.chat.submit(text) {
                log::debug!("Chat message rejected");
                return false;
            }
            visit.chat_timer.schedule(REPLY_DELAY, async move {
                state.resolve_chat(id);
            });
            true
        })
    }

    fn resolve_chat(&self, id: VisitId) {
        let strings = self.strings();
        let mut rng = rand::thread_rng();
        self.expire(id, |visit| visit.chat.resolve(&strings, &mut rng));
    }

    /// Apply a timer's effect. The visit may have been evicted meanwhile.
    fn expire(&self, id: VisitId, f: impl FnOnce(&mut Visit)) {
        if let Err(e) = self.with_visit(id, f) {
            log::debug!("Timer fired after its visit ended: {e}");
        }
    }

    pub fn share_lesson(&self, id: VisitId) -> Fallible<()> {
        let state = self.clone();
        self.with_visit(id, |visit| {
            let generation = visit.lesson.mark_copied();
            visit.share_timer.schedule(COPIED_DELAY, async move {
                state.expire(id, |visit| visit.lesson.expire_copied(generation));
            });
        })
    }

    pub fn comment_on_lesson(&self, id: VisitId, name: &str, text: &str) -> Fallible<()> {
        let guest = self.strings().text("lesson.guest", "Guest");
        self.with_visit(id, |visit| {
            visit.lesson.comment(name, text, &guest, Utc::now());
        })
    }

    pub fn toggle_language(&self) {
        self.preferences.toggle_language();
        let strings = self.strings();
        for visit in self.acquire().visits.values_mut() {
            visit.chat.relocalize(&strings);
        }
    }

    pub fn toggle_theme(&self) {
        self.preferences.toggle_theme();
    }
}
