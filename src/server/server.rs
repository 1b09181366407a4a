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

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::error::fail;
use crate::i18n::prefs::PreferenceStore;
use crate::i18n::strings::Translations;
use crate::server::get::home_handler;
use crate::server::get::lesson_handler;
use crate::server::get::students_handler;
use crate::server::get::tutors_handler;
use crate::server::post::chat_handler;
use crate::server::post::contact_handler;
use crate::server::post::lesson_action_handler;
use crate::server::post::preferences_handler;
use crate::server::state::ServerState;

pub async fn start_server(directory: PathBuf, port: u16, open_browser: bool) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }

    log::debug!("Loading string tables...");
    let translations = Translations::load()?;
    let preferences = PreferenceStore::load(&directory);
    let mut changes = preferences.subscribe();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let current = *changes.borrow_and_update();
            log::debug!(
                "Preferences changed: language={} theme={}",
                current.language,
                current.theme.as_str()
            );
        }
    });

    let state = ServerState::new(translations, preferences);
    let app = Router::new();
    let app = app.route("/", get(home_handler));
    let app = app.route("/tutors", get(tutors_handler));
    let app = app.route("/students", get(students_handler));
    let app = app.route("/lesson", get(lesson_handler));
    let app = app.route("/lesson", post(lesson_action_handler));
    let app = app.route("/contact", post(contact_handler));
    let app = app.route("/chat", post(chat_handler));
    let app = app.route("/preferences", post(preferences_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("0.0.0.0:{port}");

    if open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://localhost:{port}/");
        let target = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&target).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    println!("Serving on http://localhost:{port}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Cannot listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    log::debug!("Shutting down.");
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
