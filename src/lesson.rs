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

//! The free lesson page: reactions, bookmarking, sharing and comments.

use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// How long the "link copied" acknowledgment stays visible.
pub const COPIED_DELAY: Duration = Duration::from_millis(1500);

const INITIAL_LIKES: u32 = 120;
const INITIAL_DISLIKES: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub name: String,
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

pub struct LessonState {
    likes: u32,
    dislikes: u32,
    liked: bool,
    disliked: bool,
    saved: bool,
    copied: bool,
    share_generation: u64,
    /// Newest first.
    comments: Vec<Comment>,
}

impl LessonState {
    pub fn new() -> Self {
        Self {
            likes: INITIAL_LIKES,
            dislikes: INITIAL_DISLIKES,
            liked: false,
            disliked: false,
            saved: false,
            copied: false,
            share_generation: 0,
            comments: Vec::new(),
        }
    }

    pub fn likes(&self) -> u32 {
        self.likes
    }

    pub fn dislikes(&self) -> u32 {
        self.dislikes
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    pub fn disliked(&self) -> bool {
        self.disliked
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Toggle the like. Liking withdraws a dislike.
    pub fn like(&mut self) {
        if self.liked {
            self.liked = false;
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.liked = true;
            self.likes += 1;
            if self.disliked {
                self.disliked = false;
                self.dislikes = self.dislikes.saturating_sub(1);
            }
        }
    }

    /// Toggle the dislike. Disliking withdraws a like.
    pub fn dislike(&mut self) {
        if self.disliked {
            self.disliked = false;
            self.dislikes = self.dislikes.saturating_sub(1);
        } else {
            self.disliked = true;
            self.dislikes += 1;
            if self.liked {
                self.liked = false;
                self.likes = self.likes.saturating_sub(1);
            }
        }
    }

    pub fn toggle_save(&mut self) {
        self.saved = !self.saved;
    }

    /// Record that the link was copied. Returns the generation to pass to
    /// [`LessonState::expire_copied`] after [`COPIED_DELAY`].
    pub fn mark_copied(&mut self) -> u64 {
        self.copied = true;
        self.share_generation += 1;
        self.share_generation
    }

    pub fn expire_copied(&mut self, generation: u64) {
        if generation == self.share_generation {
            self.copied = false;
        }
    }

    /// Post a comment. Blank comments are ignored and a blank name becomes
    /// `guest`. Returns whether the comment was posted.
    pub fn comment(&mut self, name: &str, text: &str, guest: &str, now: DateTime<Utc>) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let name = match name.trim() {
            "" => guest,
            name => name,
        };
        self.comments.insert(
            0,
            Comment {
                name: name.to_string(),
                text: text.to_string(),
                posted_at: now,
            },
        );
        true
    }
}
