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

use rand::Rng;
use rand::seq::SliceRandom;

use crate::chat::engine::default_prompts;
use crate::chat::engine::respond;
use crate::chat::engine::tips;
use crate::i18n::strings::Strings;

/// The simulated typing delay before the bot replies.
pub const REPLY_DELAY: Duration = Duration::from_millis(900);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

/// One visitor's conversation with the assistant.
pub struct ChatSession {
    messages: Vec<Message>,
    focus: Option<&'static str>,
    prompts: Vec<String>,
    /// The message awaiting a reply. While set, submissions are rejected.
    pending: Option<String>,
    tip: String,
}

fn initial_tip(strings: &Strings) -> String {
    let first = tips(strings).into_iter().next().unwrap_or_default();
    strings.text("chatbot.insight", &first)
}

fn welcome(strings: &Strings) -> Message {
    Message {
        speaker: Speaker::Bot,
        text: strings.text("chatbot.welcome", "Hi! How can I help?"),
    }
}

impl ChatSession {
    pub fn new(strings: &Strings) -> Self {
        Self {
            messages: vec![welcome(strings)],
            focus: None,
            prompts: default_prompts(strings),
            pending: None,
            tip: initial_tip(strings),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn focus(&self) -> Option<&'static str> {
        self.focus
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn tip(&self) -> &str {
        &self.tip
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Queue a message. Blank input, or input arriving while a reply is
    /// pending, is rejected and leaves the transcript untouched.
    pub fn submit(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.is_pending() {
            return false;
        }
        self.messages.push(Message {
            speaker: Speaker::User,
            text: text.to_string(),
        });
        self.pending = Some(text.to_string());
        true
    }

    /// Produce the reply to the pending message and pick a new tip. Does
    /// nothing if no message is pending.
    pub fn resolve<R: Rng + ?Sized>(&mut self, strings: &Strings, rng: &mut R) {
        let Some(message) = self.pending.take() else {
            return;
        };
        let reply = respond(strings, &message);
        self.messages.push(Message {
            speaker: Speaker::Bot,
            text: reply.text,
        });
        self.focus = reply.focus;
        self.prompts = reply.prompts;
        if let Some(tip) = tips(strings).choose(rng) {
            self.tip = tip.clone();
        }
    }

    /// Re-read language-dependent state after the language changes. The
    /// welcome message is only replaced if the user has not spoken yet.
    pub fn relocalize(&mut self, strings: &Strings) {
        self.prompts = default_prompts(strings);
        self.tip = initial_tip(strings);
        let user_has_spoken = self
            .messages
            .iter()
            .any(|message| message.speaker == Speaker::User);
        if !user_has_spoken {
            self.messages = vec![welcome(strings)];
        }
    }
}
