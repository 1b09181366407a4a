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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::data::STUDENTS;
use crate::data::TUTORS;
use crate::error::Fallible;
use crate::filter::Bound;
use crate::filter::ExperienceBracket;
use crate::filter::FilterState;
use crate::filter::PRICE_CEILING;
use crate::filter::PRICE_FLOOR;
use crate::filter::PriceRange;
use crate::filter::SubjectFilter;
use crate::filter::filter_students;
use crate::filter::filter_tutors;
use crate::i18n::strings::Strings;
use crate::i18n::strings::Translations;
use crate::types::language::Language;
use crate::types::listing::Tutor;
use crate::types::subject::Subject;

#[derive(ValueEnum, Clone, Copy)]
pub enum ListFormat {
    /// One line per listing.
    Text,
    /// JSON output.
    Json,
}

impl Display for ListFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFormat::Text => write!(f, "text"),
            ListFormat::Json => write!(f, "json"),
        }
    }
}

/// Tutor filters as given on the command line.
#[derive(Default)]
pub struct TutorOptions {
    pub subject: Option<Subject>,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub experience: Option<ExperienceBracket>,
}

impl TutorOptions {
    fn filter_state(&self) -> FilterState {
        FilterState {
            subject: subject_filter(self.subject),
            price: PriceRange::from_sliders(
                self.min.unwrap_or(PRICE_FLOOR),
                self.max.unwrap_or(PRICE_CEILING),
                Bound::Min,
            ),
            experience: self.experience.unwrap_or(ExperienceBracket::All),
        }
    }
}

fn subject_filter(subject: Option<Subject>) -> SubjectFilter {
    subject.map_or(SubjectFilter::All, SubjectFilter::Only)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TutorExport {
    id: i64,
    name: &'static str,
    subject: &'static str,
    subject_label: String,
    price: u32,
    experience_years: u32,
    phone: &'static str,
}

impl TutorExport {
    fn new(strings: &Strings, tutor: &'static Tutor) -> Self {
        Self {
            id: tutor.id,
            name: tutor.name,
            subject: tutor.subject().key(),
            subject_label: strings.subject_label(tutor.subject()),
            price: tutor.price,
            experience_years: tutor.experience,
            phone: tutor.phone,
        }
    }
}

fn render_tutors(
    strings: &Strings,
    options: &TutorOptions,
    format: ListFormat,
) -> Fallible<String> {
    let filter = options.filter_state();
    let tutors = filter_tutors(&TUTORS, &filter);
    match format {
        ListFormat::Text => {
            let mut lines: Vec<String> = tutors
                .iter()
                .map(|tutor| {
                    format!(
                        "{:>2}  {}  {}  ₾{}  {} {}  {}",
                        tutor.id,
                        tutor.name,
                        strings.subject_label(tutor.subject()),
                        tutor.price,
                        tutor.experience,
                        strings.text("card.years", "years"),
                        tutor.phone
                    )
                })
                .collect();
            if tutors.is_empty() {
                lines.push(strings.text("tutors.empty", "No results found."));
            }
            let count = tutors.len().to_string();
            lines.push(strings.format("tutors.count", "{count} tutors", &[("count", &count)]));
            Ok(lines.join("\n"))
        }
        ListFormat::Json => {
            let export: Vec<TutorExport> = tutors
                .into_iter()
                .map(|tutor| TutorExport::new(strings, tutor))
                .collect();
            Ok(serde_json::to_string_pretty(&export)?)
        }
    }
}

fn render_students(strings: &Strings, subject: Option<Subject>) -> String {
    let students = filter_students(&STUDENTS, subject_filter(subject));
    if students.is_empty() {
        return strings.text("students.empty", "No results found.");
    }
    let lines: Vec<String> = students
        .iter()
        .map(|student| {
            format!(
                "{:>2}  {}  {}  {}\n    {}",
                student.id,
                student.name,
                strings.subject_label(student.subject()),
                student.phone,
                strings.student_goal(student.subject())
            )
        })
        .collect();
    lines.join("\n")
}

pub fn print_tutors(
    options: &TutorOptions,
    language: Language,
    format: ListFormat,
) -> Fallible<()> {
    let translations = Translations::load()?;
    let output = render_tutors(&translations.strings(language), options, format)?;
    println!("{output}");
    Ok(())
}

pub fn print_students(subject: Option<Subject>, language: Language) -> Fallible<()> {
    let translations = Translations::load()?;
    let output = render_students(&translations.strings(language), subject);
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_tutors_as_json() -> Fallible<()> {
        let translations = Translations::load()?;
        let options = TutorOptions {
            subject: Some(Subject::It),
            ..TutorOptions::default()
        };
        let strings = translations.strings(Language::En);
        let output = render_tutors(&strings, &options, ListFormat::Json)?;
        let value: Value = serde_json::from_str(&output)?;
        let tutors = value.as_array().unwrap();
        assert_eq!(tutors.len(), 2);
        assert_eq!(tutors[0]["id"], 6);
        assert_eq!(tutors[0]["subject"], "it");
        assert_eq!(tutors[0]["subjectLabel"], "IT");
        assert_eq!(tutors[0]["experienceYears"], 4);
        assert_eq!(tutors[1]["id"], 14);
        Ok(())
    }

    #[test]
    fn test_tutors_as_text() -> Fallible<()> {
        let translations = Translations::load()?;
        let options = TutorOptions {
            max: Some(30),
            ..TutorOptions::default()
        };
        let strings = translations.strings(Language::En);
        let output = render_tutors(&strings, &options, ListFormat::Text)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with(" 3  სალომე ბერიძე"));
        assert_eq!(lines[4], "4 tutors");
        Ok(())
    }

    #[test]
    fn test_no_tutors() -> Fallible<()> {
        let translations = Translations::load()?;
        let options = TutorOptions {
            subject: Some(Subject::It),
            min: Some(70),
            ..TutorOptions::default()
        };
        let strings = translations.strings(Language::En);
        let output = render_tutors(&strings, &options, ListFormat::Text)?;
        assert_eq!(output, "No results found. Try different filters.\n0 tutors");
        Ok(())
    }

    #[test]
    fn test_experience_bracket() -> Fallible<()> {
        let translations = Translations::load()?;
        let options = TutorOptions {
            experience: Some(ExperienceBracket::OneToThree),
            ..TutorOptions::default()
        };
        let strings = translations.strings(Language::En);
        let output = render_tutors(&strings, &options, ListFormat::Text)?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(" 8  "));
        assert!(lines[1].starts_with("10  "));
        assert!(lines[2].starts_with("12  "));
        assert_eq!(lines[3], "3 tutors");
        Ok(())
    }

    #[test]
    fn test_students_by_subject() -> Fallible<()> {
        let translations = Translations::load()?;
        let output = render_students(&translations.strings(Language::En), Some(Subject::Law));
        assert!(output.starts_with(" 2  ანა ბერიძე  Law"));
        assert_eq!(output.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn test_list_format_display() {
        assert_eq!(ListFormat::Text.to_string(), "text");
        assert_eq!(ListFormat::Json.to_string(), "json");
    }
}
