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

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::i18n::prefs::Preferences;
use crate::i18n::strings::Strings;
use crate::server::state::VisitId;
use crate::types::language::Theme;

/// Seconds between reloads while a chat reply or an acknowledgment is pending.
const REFRESH_SECONDS: u32 = 1;

const NAV: [(&str, &str, &str); 4] = [
    ("/", "nav.home", "Home"),
    ("/tutors", "nav.tutors", "Tutors"),
    ("/students", "nav.students", "Students"),
    ("/lesson", "nav.lesson", "Free lesson"),
];

/// Page-level context shared by every template.
pub struct Page<'a> {
    pub strings: Strings<'a>,
    pub preferences: Preferences,
    /// The current path and query with the visit token, used as the
    /// redirect target of forms.
    pub back: String,
    pub visit: VisitId,
    pub refresh: bool,
}

pub fn page_template(page: &Page<'_>, body: Markup) -> Markup {
    let strings = page.strings;
    let brand = strings.text("brand", "EduConnect Georgia");
    let body_class = match page.preferences.theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    html! {
        (DOCTYPE)
        html lang=(strings.language().code()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if page.refresh {
                    meta http-equiv="refresh" content={ (REFRESH_SECONDS) "; url=" (page.back) };
                }
                title { (brand) }
                link rel="stylesheet" href="/style.css";
            }
            body class=(body_class) {
                header.navbar {
                    a.brand href={ "/?v=" (page.visit) } { (brand) }
                    nav {
                        @for (path, key, default) in NAV {
                            a href={ (path) "?v=" (page.visit) } { (strings.text(key, default)) }
                        }
                    }
                    div.toggles {
                        form action="/preferences" method="post" {
                            input type="hidden" name="back" value=(page.back);
                            button id="language" type="submit" name="action" value="Language" {
                                (strings.text("language_switch", "KA / EN"))
                            }
                            button id="theme" type="submit" name="action" value="Theme"
                                title=(strings.text("change_appearance", "Toggle theme")) {
                                @match page.preferences.theme {
                                    Theme::Light => "☾",
                                    Theme::Dark => "☀",
                                }
                            }
                        }
                    }
                }
                main {
                    (body)
                }
                footer {
                    (strings.text("footer", ""))
                }
                script src="/script.js" {};
            }
        }
    }
}
