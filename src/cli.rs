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

use clap::Parser;

use crate::cmd::ask::ask;
use crate::cmd::list::ListFormat;
use crate::cmd::list::TutorOptions;
use crate::cmd::list::print_students;
use crate::cmd::list::print_tutors;
use crate::error::Fallible;
use crate::filter::ExperienceBracket;
use crate::server::server::start_server;
use crate::types::language::Language;
use crate::types::subject::Subject;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the marketplace in the browser.
    Serve {
        /// Path to the data directory. Defaults to the current directory.
        directory: Option<String>,
        /// The port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
    },
    /// List tutors matching the given filters.
    Tutors {
        #[arg(long)]
        subject: Option<Subject>,
        /// Lowest hourly price.
        #[arg(long)]
        min: Option<u32>,
        /// Highest hourly price.
        #[arg(long)]
        max: Option<u32>,
        /// Years of experience.
        #[arg(long)]
        experience: Option<ExperienceBracket>,
        /// Language of the labels.
        #[arg(long, value_enum, default_value_t = Language::Ka)]
        lang: Language,
        /// Output format.
        #[arg(long, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// List students, optionally by subject.
    Students {
        #[arg(long)]
        subject: Option<Subject>,
        #[arg(long, value_enum, default_value_t = Language::Ka)]
        lang: Language,
    },
    /// Ask the assistant a single question.
    Ask {
        message: String,
        #[arg(long, value_enum, default_value_t = Language::Ka)]
        lang: Language,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            port,
            no_open,
        } => {
            let directory: PathBuf = match directory {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir()?,
            };
            start_server(directory, port, !no_open).await
        }
        Command::Tutors {
            subject,
            min,
            max,
            experience,
            lang,
            format,
        } => {
            let options = TutorOptions {
                subject,
                min,
                max,
                experience,
            };
            print_tutors(&options, lang, format)
        }
        Command::Students { subject, lang } => print_students(subject, lang),
        Command::Ask { message, lang } => ask(&message, lang),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutor_filters_are_typed() {
        let cli = Command::try_parse_from([
            "educonnect",
            "tutors",
            "--subject",
            "it",
            "--experience",
            "1-3",
            "--lang",
            "en",
        ])
        .unwrap();
        assert!(matches!(
            cli,
            Command::Tutors {
                subject: Some(Subject::It),
                experience: Some(ExperienceBracket::OneToThree),
                lang: Language::En,
                ..
            }
        ));
    }

    #[test]
    fn test_defaults() {
        let cli = Command::try_parse_from(["educonnect", "students"]).unwrap();
        assert!(matches!(
            cli,
            Command::Students {
                subject: None,
                lang: Language::Ka,
            }
        ));
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        for args in [
            ["educonnect", "tutors", "--subject", "astrology"],
            ["educonnect", "tutors", "--experience", "2-5"],
            ["educonnect", "tutors", "--lang", "fr"],
            ["educonnect", "students", "--subject", "astrology"],
        ] {
            assert!(Command::try_parse_from(args).is_err());
        }
    }
}
