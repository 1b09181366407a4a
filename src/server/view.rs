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

//! Markup for the page components.

use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::chat::session::ChatSession;
use crate::chat::session::Speaker;
use crate::contact::ContactState;
use crate::data::card_gradient;
use crate::data::initials;
use crate::filter::EXPERIENCE_BRACKETS;
use crate::filter::ExperienceBracket;
use crate::filter::FilterState;
use crate::filter::PRICE_CEILING;
use crate::filter::PRICE_FLOOR;
use crate::filter::SubjectFilter;
use crate::i18n::strings::Strings;
use crate::lesson::LessonState;
use crate::markdown::markdown_to_html;
use crate::server::state::VisitId;
use crate::types::listing::Listing;
use crate::types::listing::ListingKind;
use crate::types::listing::Student;
use crate::types::listing::Tutor;
use crate::types::subject::SUBJECTS;

const LESSON: &str = include_str!("../lesson.md");

/// Where a form redirects to, and the visit it acts on.
#[derive(Clone, Copy)]
pub struct Origin<'a> {
    pub back: &'a str,
    pub visit: VisitId,
}

fn origin_fields(origin: Origin<'_>) -> Markup {
    html! {
        input type="hidden" name="back" value=(origin.back);
        input type="hidden" name="visit" value=(origin.visit);
    }
}

fn kind_key(kind: ListingKind) -> &'static str {
    match kind {
        ListingKind::Tutor => "tutor",
        ListingKind::Student => "student",
    }
}

fn bracket_label(strings: &Strings, bracket: ExperienceBracket) -> String {
    match bracket {
        ExperienceBracket::All => strings.text("filters.any", "All"),
        ExperienceBracket::OneToThree => strings.text("filters.exp13", "1-3 years"),
        ExperienceBracket::FourToSix => strings.text("filters.exp46", "4-6 years"),
        ExperienceBracket::SevenToTen => strings.text("filters.exp710", "7-10 years"),
    }
}

fn avatar(id: i64, name: &str) -> Markup {
    html! {
        div.avatar style=(card_gradient(id)) {
            (initials(name))
        }
    }
}

fn contact_button(strings: &Strings, listing: Listing, origin: Origin<'_>) -> Markup {
    html! {
        form action="/contact" method="post" {
            (origin_fields(origin))
            input type="hidden" name="kind" value=(kind_key(listing.kind()));
            input type="hidden" name="id" value=(listing.id());
            button.contact type="submit" name="action" value="Select" {
                (strings.text("card.contact", "Contact"))
            }
        }
    }
}

/// Links out of the page carry the visit token, so the visit is discarded.
pub fn hero(strings: &Strings, visit: VisitId) -> Markup {
    html! {
        section.hero {
            span.badge { (strings.text("hero.badge", "")) }
            h1 { (strings.text("hero.title", "Find the right tutor")) }
            p.tagline { (strings.text("hero.tagline", "")) }
            p.subtitle { (strings.text("hero.subtitle", "")) }
            div.actions {
                a.button href={ "/tutors?v=" (visit) } { (strings.text("hero.join_tutor", "Join as a tutor")) }
                a.button.secondary href={ "/students?v=" (visit) } { (strings.text("hero.join_student", "Join as a student")) }
            }
            div.trending {
                h2 { (strings.text("hero.trending", "Trending subjects")) }
                ul {
                    @for subject in SUBJECTS {
                        li {
                            a href={ "/tutors?" (FilterState::default().with_subject(SubjectFilter::Only(subject)).to_query()) "&v=" (visit) } {
                                (strings.subject_label(subject))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The filter form. Submitting it reloads `action` with the new query
/// within the same visit.
pub fn filters(strings: &Strings, filter: &FilterState, action: &str, visit: VisitId) -> Markup {
    html! {
        form #filters .filters action=(action) method="get" {
            h2 { (strings.text("filters.title", "Filters")) }
            p.lead { (strings.text("filters.lead", "")) }
            label {
                (strings.text("filters.subject", "Subject"))
                select name="subject" {
                    option value="all" selected[filter.subject == SubjectFilter::All] {
                        (strings.text("filters.any", "All"))
                    }
                    @for subject in SUBJECTS {
                        option value=(subject.key()) selected[filter.subject == SubjectFilter::Only(subject)] {
                            (strings.subject_label(subject))
                        }
                    }
                }
            }
            fieldset.price {
                legend {
                    (strings.text("filters.price_prefix", "Price range"))
                    ": ₾" (filter.price.min()) " - ₾" (filter.price.max())
                }
                label {
                    (strings.text("filters.min", "Minimum"))
                    input type="range" name="min" min=(PRICE_FLOOR) max=(PRICE_CEILING)
                        value=(filter.price.min());
                }
                label {
                    (strings.text("filters.max", "Maximum"))
                    input type="range" name="max" min=(PRICE_FLOOR) max=(PRICE_CEILING)
                        value=(filter.price.max());
                }
                input type="hidden" name="adjust" value="min";
            }
            label {
                (strings.text("filters.experience", "Experience"))
                select name="experience" {
                    @for bracket in EXPERIENCE_BRACKETS {
                        option value=(bracket.key()) selected[filter.experience == bracket] {
                            (bracket_label(strings, bracket))
                        }
                    }
                }
            }
            input type="hidden" name="v" value=(visit);
            button.apply type="submit" { (strings.text("filters.apply", "Apply")) }
        }
    }
}

fn tutor_card(strings: &Strings, tutor: &'static Tutor, origin: Origin<'_>) -> Markup {
    html! {
        article.card.tutor {
            (avatar(tutor.id, tutor.name))
            h3 { (tutor.name) }
            p.subject { (strings.subject_label(tutor.subject())) }
            dl {
                dt { (strings.text("card.experience", "Experience")) }
                dd { (tutor.experience) " " (strings.text("card.years", "years")) }
                dt { (strings.text("card.price", "Price")) }
                dd { "₾" (tutor.price) " " (strings.text("card.per_hour", "/ hour")) }
            }
            (contact_button(strings, Listing::Tutor(tutor), origin))
        }
    }
}

pub fn tutor_grid(strings: &Strings, tutors: &[&'static Tutor], origin: Origin<'_>) -> Markup {
    let count = tutors.len().to_string();
    html! {
        section #tutors .listings {
            h2 { (strings.text("tutors.heading", "Tutors")) }
            p.count { (strings.format("tutors.count", "{count} tutors", &[("count", &count)])) }
            @if tutors.is_empty() {
                p.empty { (strings.text("tutors.empty", "No results found.")) }
            } @else {
                div.grid {
                    @for tutor in tutors {
                        (tutor_card(strings, *tutor, origin))
                    }
                }
            }
        }
    }
}

fn student_card(strings: &Strings, student: &'static Student, origin: Origin<'_>) -> Markup {
    html! {
        article.card.student {
            (avatar(student.id, student.name))
            h3 { (student.name) }
            p.subject { (strings.subject_label(student.subject())) }
            p.goal { (strings.student_goal(student.subject())) }
            (contact_button(strings, Listing::Student(student), origin))
        }
    }
}

pub fn student_grid(strings: &Strings, students: &[&'static Student], origin: Origin<'_>) -> Markup {
    html! {
        section #students .listings {
            h2 { (strings.text("students.heading", "Students")) }
            @if students.is_empty() {
                p.empty { (strings.text("students.empty", "No results found.")) }
            } @else {
                div.grid {
                    @for student in students {
                        (student_card(strings, *student, origin))
                    }
                }
            }
        }
    }
}

/// Subject tabs for the student listing.
pub fn student_tabs(strings: &Strings, selected: SubjectFilter, visit: VisitId) -> Markup {
    html! {
        nav.tabs {
            a.active[selected == SubjectFilter::All] href={ "/students?subject=all&v=" (visit) } {
                (strings.text("filters.any", "All"))
            }
            @for subject in SUBJECTS {
                a.active[selected == SubjectFilter::Only(subject)]
                    href={ "/students?subject=" (subject.key()) "&v=" (visit) } {
                    (strings.subject_label(subject))
                }
            }
        }
    }
}

fn listing_details(strings: &Strings, listing: Listing) -> Markup {
    html! {
        dl {
            dt { (strings.text("modal.subject", "Subject")) }
            dd { (strings.subject_label(listing.subject())) }
            @match listing {
                Listing::Tutor(tutor) => {
                    dt { (strings.text("modal.experience", "Experience")) }
                    dd { (tutor.experience) " " (strings.text("card.years", "years")) }
                    dt { (strings.text("modal.price", "Price")) }
                    dd { "₾" (tutor.price) " " (strings.text("card.per_hour", "/ hour")) }
                },
                Listing::Student(student) => {
                    dt { (strings.text("modal.goal", "Goal")) }
                    dd { (strings.student_goal(student.subject())) }
                },
            }
            dt { (strings.text("modal.phone", "Phone")) }
            dd { (listing.phone()) }
        }
    }
}

/// The contact dialog, or nothing when it is closed.
pub fn contact_modal(strings: &Strings, state: ContactState, origin: Origin<'_>) -> Markup {
    let (listing, acknowledged) = match state {
        ContactState::Closed => return html! {},
        ContactState::Open(listing) => (listing, false),
        ContactState::Acknowledged(listing) => (listing, true),
    };
    let phone: String = listing.phone().chars().filter(|c| !c.is_whitespace()).collect();
    html! {
        div.modal-backdrop {
            div #contact .modal role="dialog" {
                form action="/contact" method="post" {
                    (origin_fields(origin))
                    (avatar(listing.id(), listing.name()))
                    h2 { (listing.name()) }
                    (listing_details(strings, listing))
                    @if acknowledged {
                        div.success {
                            h3 { (strings.text("modal.success_title", "Message sent!")) }
                            p { (strings.format("modal.success_text", "{name} will contact you soon.", &[("name", listing.name())])) }
                        }
                    } @else {
                        div.actions {
                            a.button href={ "tel:" (phone) } { (strings.text("modal.call", "Call")) }
                            button #send type="submit" name="action" value="Send" {
                                (strings.text("modal.send", "Message"))
                            }
                        }
                    }
                    button #close type="submit" name="action" value="Close" {
                        (strings.text("modal.close", "Close"))
                    }
                }
            }
        }
    }
}

fn chat_form(origin: Origin<'_>, content: Markup) -> Markup {
    html! {
        form action="/chat" method="post" {
            (origin_fields(origin))
            (content)
        }
    }
}

pub fn chat_panel(strings: &Strings, chat: &ChatSession, origin: Origin<'_>) -> Markup {
    let pending = chat.is_pending();
    html! {
        aside #chat .chatbot {
            header {
                h2 { (strings.text("chatbot.title", "Assistant")) }
                p.subtitle { (strings.text("chatbot.subtitle", "")) }
                span.status {
                    (strings.text("chatbot.status", "")) " · " (strings.text("chatbot.online", ""))
                }
            }
            @if let Some(tag) = chat.focus() {
                p.focus {
                    (strings.text("chatbot.context_label", "Focus")) ": "
                    (strings.text(&format!("chatbot.context.{tag}"), tag))
                }
            }
            ol.messages {
                @for message in chat.messages() {
                    @let class = match message.speaker {
                        Speaker::User => "user",
                        Speaker::Bot => "bot",
                    };
                    li class=(class) { (message.text) }
                }
                @if pending {
                    li.bot.typing { (strings.text("chatbot.typing", "typing")) "…" }
                }
            }
            div.prompts {
                h3 { (strings.text("chatbot.quick_title", "Popular prompts")) }
                (chat_form(origin, html! {
                    @for prompt in chat.prompts() {
                        button.prompt type="submit" name="message" value=(prompt) disabled[pending] {
                            (prompt)
                        }
                    }
                }))
            }
            (chat_form(origin, html! {
                input type="text" name="message" autocomplete="off"
                    placeholder=(strings.text("chatbot.placeholder", ""));
                button type="submit" disabled[pending] { (strings.text("chatbot.send", "Send")) }
            }))
            p.tip {
                strong { (strings.text("chatbot.insight_label", "Tip")) ": " }
                (chat.tip())
            }
            p.hint { (strings.text("chatbot.fallback", "")) }
        }
    }
}

fn lesson_button(name: &str, label: String, active: bool) -> Markup {
    html! {
        button #(name) .active[active] type="submit" name="action" value=(name) {
            (label)
        }
    }
}

pub fn lesson(strings: &Strings, lesson: &LessonState, origin: Origin<'_>) -> Markup {
    let save_label = if lesson.saved() {
        strings.text("lesson.saved", "Saved")
    } else {
        strings.text("lesson.save", "Save")
    };
    html! {
        article.lesson {
            h1 { (strings.text("lesson.title", "Free lesson")) }
            p.subtitle { (strings.text("lesson.subtitle", "")) }
            div.rich-text {
                (PreEscaped(markdown_to_html(LESSON)))
            }
            form.reactions action="/lesson" method="post" {
                (origin_fields(origin))
                (lesson_button("Like", format!("👍 {} {}", strings.text("lesson.like", "Like"), lesson.likes()), lesson.liked()))
                (lesson_button("Dislike", format!("👎 {} {}", strings.text("lesson.dislike", "Dislike"), lesson.dislikes()), lesson.disliked()))
                (lesson_button("Save", save_label, lesson.saved()))
                (lesson_button("Share", strings.text("lesson.share", "Share"), false))
                @if lesson.copied() {
                    span.copied { (strings.text("lesson.copied", "Link copied!")) }
                }
            }
            section.comments {
                h2 { (strings.text("lesson.comments", "Comments")) " (" (lesson.comments().len()) ")" }
                form action="/lesson" method="post" {
                    (origin_fields(origin))
                    input type="text" name="name" placeholder=(strings.text("lesson.name", "Your name"));
                    textarea name="text" placeholder=(strings.text("lesson.comment", "")) {}
                    button type="submit" name="action" value="Comment" {
                        (strings.text("lesson.post", "Post"))
                    }
                }
                ul {
                    @for comment in lesson.comments() {
                        li {
                            strong { (comment.name) }
                            " "
                            time datetime=(comment.posted_at.to_rfc3339()) {
                                (comment.posted_at.format("%Y-%m-%d %H:%M").to_string())
                            }
                            p { (comment.text) }
                        }
                    }
                }
            }
        }
    }
}
