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

use clap::ValueEnum;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

use crate::types::listing::Student;
use crate::types::listing::Tutor;
use crate::types::subject::Subject;

/// The lowest price a slider can select.
pub const PRICE_FLOOR: u32 = 20;

/// The highest price a slider can select.
pub const PRICE_CEILING: u32 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectFilter {
    All,
    Only(Subject),
}

impl SubjectFilter {
    /// Parse a query value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            Some(SubjectFilter::All)
        } else {
            Subject::try_from(value).ok().map(SubjectFilter::Only)
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SubjectFilter::All => "all",
            SubjectFilter::Only(subject) => subject.key(),
        }
    }

    pub fn matches(self, subject: Subject) -> bool {
        match self {
            SubjectFilter::All => true,
            SubjectFilter::Only(wanted) => wanted == subject,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExperienceBracket {
    All,
    #[value(name = "1-3")]
    OneToThree,
    #[value(name = "4-6")]
    FourToSix,
    #[value(name = "7-10")]
    SevenToTen,
}

pub const EXPERIENCE_BRACKETS: [ExperienceBracket; 4] = [
    ExperienceBracket::All,
    ExperienceBracket::OneToThree,
    ExperienceBracket::FourToSix,
    ExperienceBracket::SevenToTen,
];

impl ExperienceBracket {
    pub fn parse(value: &str) -> Option<Self> {
        EXPERIENCE_BRACKETS
            .iter()
            .find(|bracket| bracket.key() == value)
            .copied()
    }

    pub fn key(self) -> &'static str {
        match self {
            ExperienceBracket::All => "all",
            ExperienceBracket::OneToThree => "1-3",
            ExperienceBracket::FourToSix => "4-6",
            ExperienceBracket::SevenToTen => "7-10",
        }
    }

    /// Inclusive bounds in years, or `None` for the catch-all bracket.
    pub fn bounds(self) -> Option<(u32, u32)> {
        match self {
            ExperienceBracket::All => None,
            ExperienceBracket::OneToThree => Some((1, 3)),
            ExperienceBracket::FourToSix => Some((4, 6)),
            ExperienceBracket::SevenToTen => Some((7, 10)),
        }
    }

    pub fn matches(self, years: u32) -> bool {
        match self.bounds() {
            None => true,
            Some((low, high)) => low <= years && years <= high,
        }
    }
}

/// Which price slider the user moved last.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl Bound {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "min" => Some(Bound::Min),
            "max" => Some(Bound::Max),
            _ => None,
        }
    }
}

/// A price range that always satisfies `PRICE_FLOOR <= min <= max <= PRICE_CEILING`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_FLOOR,
            max: PRICE_CEILING,
        }
    }
}

impl PriceRange {
    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Move the lower slider. Pushes the upper bound up if they would cross.
    pub fn set_min(&mut self, value: u32) {
        let value = value.clamp(PRICE_FLOOR, PRICE_CEILING);
        self.min = value;
        self.max = self.max.max(value);
    }

    /// Move the upper slider. Pulls the lower bound down if they would cross.
    pub fn set_max(&mut self, value: u32) {
        let value = value.clamp(PRICE_FLOOR, PRICE_CEILING);
        self.max = value;
        self.min = self.min.min(value);
    }

    /// Rebuild a range from both slider values, treating `moved` as the one
    /// the user dragged last.
    pub fn from_sliders(min: u32, max: u32, moved: Bound) -> Self {
        let mut range = Self::default();
        match moved {
            Bound::Min => {
                range.set_max(max);
                range.set_min(min);
            }
            Bound::Max => {
                range.set_min(min);
                range.set_max(max);
            }
        }
        range
    }

    pub fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterState {
    pub subject: SubjectFilter,
    pub price: PriceRange,
    pub experience: ExperienceBracket,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            subject: SubjectFilter::All,
            price: PriceRange::default(),
            experience: ExperienceBracket::All,
        }
    }
}

impl FilterState {
    /// Build a filter state from loosely-typed parameters. Anything missing
    /// or unrecognized keeps its default.
    pub fn from_params(
        subject: Option<&str>,
        min: Option<u32>,
        max: Option<u32>,
        experience: Option<&str>,
        adjust: Option<&str>,
    ) -> Self {
        let subject = subject
            .and_then(SubjectFilter::parse)
            .unwrap_or(SubjectFilter::All);
        let experience = experience
            .and_then(ExperienceBracket::parse)
            .unwrap_or(ExperienceBracket::All);
        let moved = adjust.and_then(Bound::parse).unwrap_or(Bound::Min);
        let price = PriceRange::from_sliders(
            min.unwrap_or(PRICE_FLOOR),
            max.unwrap_or(PRICE_CEILING),
            moved,
        );
        Self {
            subject,
            price,
            experience,
        }
    }

    /// A copy of this state with a different subject.
    pub fn with_subject(self, subject: SubjectFilter) -> Self {
        Self { subject, ..self }
    }

    /// Render the state as a URL query string.
    pub fn to_query(&self) -> String {
        let pairs = [
            ("subject", self.subject.key().to_string()),
            ("min", self.price.min().to_string()),
            ("max", self.price.max().to_string()),
            ("experience", self.experience.key().to_string()),
        ];
        pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", utf8_percent_encode(value, NON_ALPHANUMERIC)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// The tutors matching every criterion of the filter, in dataset order.
pub fn filter_tutors<'a>(tutors: &'a [Tutor], filter: &FilterState) -> Vec<&'a Tutor> {
    tutors
        .iter()
        .filter(|tutor| filter.subject.matches(tutor.subject()))
        .filter(|tutor| filter.price.contains(tutor.price))
        .filter(|tutor| filter.experience.matches(tutor.experience))
        .collect()
}

/// Students have no price or experience, so only the subject applies.
pub fn filter_students(students: &[Student], subject: SubjectFilter) -> Vec<&Student> {
    students
        .iter()
        .filter(|student| subject.matches(student.subject()))
        .collect()
}
