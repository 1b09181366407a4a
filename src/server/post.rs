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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::data::find_listing;
use crate::error::Fallible;
use crate::error::fail;
use crate::server::state::ServerState;
use crate::server::state::VisitId;
use crate::types::listing::ListingKind;

/// Only local paths are accepted as redirect targets. Anything else goes
/// back to the home page.
fn redirect_target(back: Option<&str>) -> &str {
    match back {
        Some(back) if back.starts_with('/') && !back.starts_with("//") && !back.contains('\\') => {
            back
        }
        _ => "/",
    }
}

fn parse_kind(kind: &str) -> Fallible<ListingKind> {
    match kind {
        "tutor" => Ok(ListingKind::Tutor),
        "student" => Ok(ListingKind::Student),
        _ => fail(format!("unknown listing kind: {kind}")),
    }
}

fn require_visit(visit: Option<VisitId>) -> Fallible<VisitId> {
    match visit {
        Some(visit) => Ok(visit),
        None => fail("form is missing its visit."),
    }
}

fn finish(result: Fallible<()>, back: Option<&str>) -> Redirect {
    if let Err(e) = result {
        log::error!("{e}");
    }
    Redirect::to(redirect_target(back))
}

#[derive(Debug, Deserialize)]
enum ContactAction {
    Select,
    Send,
    Close,
}

#[derive(Deserialize)]
pub struct ContactForm {
    action: ContactAction,
    kind: Option<String>,
    id: Option<i64>,
    visit: Option<VisitId>,
    back: Option<String>,
}

pub async fn contact_handler(
    State(state): State<ServerState>,
    Form(form): Form<ContactForm>,
) -> Redirect {
    let result = contact_action(&state, &form);
    finish(result, form.back.as_deref())
}

fn contact_action(state: &ServerState, form: &ContactForm) -> Fallible<()> {
    let visit = require_visit(form.visit)?;
    match form.action {
        ContactAction::Select => {
            let (Some(kind), Some(id)) = (form.kind.as_deref(), form.id) else {
                return fail("select requires a kind and an id.");
            };
            let kind = parse_kind(kind)?;
            match find_listing(kind, id) {
                Some(listing) => state.select_listing(visit, listing),
                None => fail(format!("no {kind:?} with id {id}.")),
            }
        }
        ContactAction::Send => state.send_contact(visit),
        ContactAction::Close => state.close_contact(visit),
    }
}

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    message: String,
    visit: Option<VisitId>,
    back: Option<String>,
}

pub async fn chat_handler(
    State(state): State<ServerState>,
    Form(form): Form<ChatForm>,
) -> Redirect {
    let result = require_visit(form.visit)
        .and_then(|visit| state.submit_chat(visit, &form.message))
        .map(|_| ());
    finish(result, form.back.as_deref())
}

#[derive(Debug, Deserialize)]
enum PreferenceAction {
    Language,
    Theme,
}

#[derive(Deserialize)]
pub struct PreferenceForm {
    action: PreferenceAction,
    back: Option<String>,
}

pub async fn preferences_handler(
    State(state): State<ServerState>,
    Form(form): Form<PreferenceForm>,
) -> Redirect {
    match form.action {
        PreferenceAction::Language => state.toggle_language(),
        PreferenceAction::Theme => state.toggle_theme(),
    }
    Redirect::to(redirect_target(form.back.as_deref()))
}

#[derive(Debug, Deserialize)]
enum LessonAction {
    Like,
    Dislike,
    Save,
    Share,
    Comment,
}

#[derive(Deserialize)]
pub struct LessonForm {
    action: LessonAction,
    #[serde(default)]
    name: String,
    #[serde(default)]
    text: String,
    visit: Option<VisitId>,
    back: Option<String>,
}

pub async fn lesson_action_handler(
    State(state): State<ServerState>,
    Form(form): Form<LessonForm>,
) -> Redirect {
    let result = lesson_action(&state, &form);
    finish(result, form.back.as_deref())
}

fn lesson_action(state: &ServerState, form: &LessonForm) -> Fallible<()> {
    let visit = require_visit(form.visit)?;
    match form.action {
        LessonAction::Like => state.with_visit(visit, |visit| visit.lesson.like()),
        LessonAction::Dislike => state.with_visit(visit, |visit| visit.lesson.dislike()),
        LessonAction::Save => state.with_visit(visit, |visit| visit.lesson.toggle_save()),
        LessonAction::Share => state.share_lesson(visit),
        LessonAction::Comment => state.comment_on_lesson(visit, &form.name, &form.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_target_accepts_local_paths() {
        assert_eq!(redirect_target(Some("/tutors?subject=it")), "/tutors?subject=it");
        assert_eq!(redirect_target(Some("/")), "/");
    }

    #[test]
    fn test_redirect_target_rejects_other_targets() {
        assert_eq!(redirect_target(None), "/");
        assert_eq!(redirect_target(Some("")), "/");
        assert_eq!(redirect_target(Some("https://example.com/")), "/");
        assert_eq!(redirect_target(Some("//example.com/")), "/");
        assert_eq!(redirect_target(Some("/\\example.com")), "/");
    }

    #[test]
    fn test_require_visit() -> Fallible<()> {
        assert_eq!(require_visit(Some(3))?, 3);
        assert!(require_visit(None).is_err());
        Ok(())
    }

    #[test]
    fn test_parse_kind() -> Fallible<()> {
        assert_eq!(parse_kind("tutor")?, ListingKind::Tutor);
        assert_eq!(parse_kind("student")?, ListingKind::Student);
        assert!(parse_kind("mentor").is_err());
        Ok(())
    }
}
