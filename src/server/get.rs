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

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::Html;
use maud::Markup;
use maud::html;
use serde::Deserialize;

use crate::data::STUDENTS;
use crate::data::TUTORS;
use crate::filter::FilterState;
use crate::filter::SubjectFilter;
use crate::filter::filter_students;
use crate::filter::filter_tutors;
use crate::i18n::strings::Strings;
use crate::server::state::ServerState;
use crate::server::state::Visit;
use crate::server::state::VisitId;
use crate::server::template::Page;
use crate::server::template::page_template;
use crate::server::view;
use crate::server::view::Origin;

/// Filter parameters as they arrive in the query string. Every field is
/// optional and malformed values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    subject: Option<String>,
    min: Option<String>,
    max: Option<String>,
    experience: Option<String>,
    adjust: Option<String>,
}

fn parse_price(value: &Option<String>) -> Option<u32> {
    value.as_deref().and_then(|value| value.trim().parse().ok())
}

impl FilterQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState::from_params(
            self.subject.as_deref(),
            parse_price(&self.min),
            parse_price(&self.max),
            self.experience.as_deref(),
            self.adjust.as_deref(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentQuery {
    subject: Option<String>,
}

/// The visit token of a GET. A page reached without one starts a new visit.
#[derive(Debug, Default, Deserialize)]
pub struct VisitQuery {
    v: Option<String>,
}

impl VisitQuery {
    fn token(&self) -> Option<VisitId> {
        self.v.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// The current path and query, with the visit token set to `visit`.
fn visit_url(uri: &Uri, visit: VisitId) -> String {
    let token = format!("v={visit}");
    let mut pairs: Vec<&str> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty() && *pair != "v" && !pair.starts_with("v="))
        .collect();
    pairs.push(&token);
    format!("{}?{}", uri.path(), pairs.join("&"))
}

/// Lock the state, resolve the visit, render the body and wrap it in the
/// page template.
fn render(
    state: &ServerState,
    uri: &Uri,
    query: &VisitQuery,
    body: impl FnOnce(&Strings, &Visit, Origin<'_>) -> Markup,
) -> (StatusCode, Html<String>) {
    let strings = state.strings();
    let mut mutable = state.acquire();
    let (id, visit) = mutable.enter(query.token(), uri.path(), &strings);
    let back = visit_url(uri, id);
    let origin = Origin {
        back: &back,
        visit: id,
    };
    let body = html! {
        (body(&strings, visit, origin))
        (view::contact_modal(&strings, visit.contact.state(), origin))
    };
    let refresh = visit.is_pending();
    let page = Page {
        strings,
        preferences: state.preferences.get(),
        back,
        visit: id,
        refresh,
    };
    let html = page_template(&page, body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn home_handler(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
    Query(token): Query<VisitQuery>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let filter = query.filter_state();
    let tutors = filter_tutors(&TUTORS, &filter);
    render(&state, &uri, &token, |strings, visit, origin| {
        html! {
            (view::hero(strings, origin.visit))
            div.layout {
                div.main {
                    (view::filters(strings, &filter, "/", origin.visit))
                    (view::tutor_grid(strings, &tutors, origin))
                }
                (view::chat_panel(strings, &visit.chat, origin))
            }
        }
    })
}

pub async fn tutors_handler(
    State(state): State<ServerState>,
    Query(query): Query<FilterQuery>,
    Query(token): Query<VisitQuery>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let filter = query.filter_state();
    let tutors = filter_tutors(&TUTORS, &filter);
    render(&state, &uri, &token, |strings, visit, origin| {
        html! {
            div.layout {
                div.main {
                    (view::filters(strings, &filter, "/tutors", origin.visit))
                    (view::tutor_grid(strings, &tutors, origin))
                }
                (view::chat_panel(strings, &visit.chat, origin))
            }
        }
    })
}

pub async fn students_handler(
    State(state): State<ServerState>,
    Query(query): Query<StudentQuery>,
    Query(token): Query<VisitQuery>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    let subject = query
        .subject
        .as_deref()
        .and_then(SubjectFilter::parse)
        .unwrap_or(SubjectFilter::All);
    let students = filter_students(&STUDENTS, subject);
    render(&state, &uri, &token, |strings, _, origin| {
        html! {
            (view::student_tabs(strings, subject, origin.visit))
            (view::student_grid(strings, &students, origin))
        }
    })
}

pub async fn lesson_handler(
    State(state): State<ServerState>,
    Query(token): Query<VisitQuery>,
    uri: Uri,
) -> (StatusCode, Html<String>) {
    render(&state, &uri, &token, |strings, visit, origin| {
        view::lesson(strings, &visit.lesson, origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ExperienceBracket;
    use crate::filter::PriceRange;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(FilterQuery::default().filter_state(), FilterState::default());
    }

    #[test]
    fn test_malformed_prices_are_ignored() {
        let query = FilterQuery {
            min: Some("".to_string()),
            max: Some("lots".to_string()),
            ..FilterQuery::default()
        };
        assert_eq!(query.filter_state().price, PriceRange::default());
    }

    #[test]
    fn test_query_with_moved_max() {
        let query = FilterQuery {
            subject: Some("it".to_string()),
            min: Some("60".to_string()),
            max: Some("40".to_string()),
            experience: Some("4-6".to_string()),
            adjust: Some("max".to_string()),
        };
        let state = query.filter_state();
        assert_eq!(state.subject.key(), "it");
        assert_eq!((state.price.min(), state.price.max()), (40, 40));
        assert_eq!(state.experience, ExperienceBracket::FourToSix);
    }

    #[test]
    fn test_visit_url_keeps_query() {
        let uri: Uri = "/tutors?subject=law".parse().unwrap();
        assert_eq!(visit_url(&uri, 4), "/tutors?subject=law&v=4");
        let uri: Uri = "/".parse().unwrap();
        assert_eq!(visit_url(&uri, 1), "/?v=1");
    }

    #[test]
    fn test_visit_url_replaces_token() {
        let uri: Uri = "/students?v=2&subject=chef&v=3".parse().unwrap();
        assert_eq!(visit_url(&uri, 9), "/students?subject=chef&v=9");
    }

    #[test]
    fn test_malformed_token_is_ignored() {
        let query = VisitQuery {
            v: Some("abc".to_string()),
        };
        assert_eq!(query.token(), None);
        assert_eq!(VisitQuery::default().token(), None);
        let query = VisitQuery {
            v: Some("12".to_string()),
        };
        assert_eq!(query.token(), Some(12));
    }
}
