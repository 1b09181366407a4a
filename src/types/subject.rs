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

use crate::error::ErrorReport;
use crate::error::fail;

/// One of the eight tutoring categories.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Medicine,
    Law,
    Engineering,
    Education,
    Accounting,
    It,
    Electricity,
    Chef,
}

/// All subjects, in the order used to derive a listing's subject from its ID.
pub const SUBJECTS: [Subject; 8] = [
    Subject::Medicine,
    Subject::Law,
    Subject::Engineering,
    Subject::Education,
    Subject::Accounting,
    Subject::It,
    Subject::Electricity,
    Subject::Chef,
];

impl Subject {
    pub fn key(self) -> &'static str {
        match self {
            Subject::Medicine => "medicine",
            Subject::Law => "law",
            Subject::Engineering => "engineering",
            Subject::Education => "education",
            Subject::Accounting => "accounting",
            Subject::It => "it",
            Subject::Electricity => "electricity",
            Subject::Chef => "chef",
        }
    }

    /// The label shown when no translation table has one.
    pub fn default_label(self) -> &'static str {
        match self {
            Subject::Medicine => "Medicine",
            Subject::Law => "Law",
            Subject::Engineering => "Engineering",
            Subject::Education => "Education",
            Subject::Accounting => "Accounting",
            Subject::It => "IT",
            Subject::Electricity => "Electricity",
            Subject::Chef => "Chef",
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl TryFrom<&str> for Subject {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match SUBJECTS.iter().find(|subject| subject.key() == value) {
            Some(subject) => Ok(*subject),
            None => fail(format!("Invalid subject: {value}")),
        }
    }
}

/// Derive the subject of a listing from its ID.
///
/// Total over all integers: the absolute value is taken, and zero wraps
/// around to the last subject.
pub fn subject_for(id: i64) -> Subject {
    let len = SUBJECTS.len() as u64;
    let index = (id.unsigned_abs() % len + len - 1) % len;
    SUBJECTS[index as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_for_first_cycle() {
        for (i, subject) in SUBJECTS.iter().enumerate() {
            assert_eq!(subject_for(i as i64 + 1), *subject);
        }
    }

    #[test]
    fn test_subject_for_wraps() {
        assert_eq!(subject_for(9), Subject::Medicine);
        assert_eq!(subject_for(14), Subject::It);
        assert_eq!(subject_for(16), Subject::Chef);
    }

    #[test]
    fn test_subject_for_negative_ids() {
        assert_eq!(subject_for(-1), Subject::Medicine);
        assert_eq!(subject_for(-6), subject_for(6));
    }

    #[test]
    fn test_subject_for_is_total() {
        for id in [0, i64::MIN, i64::MAX, -17, 1_000_003] {
            let subject = subject_for(id);
            assert!(SUBJECTS.contains(&subject));
            assert_eq!(subject, subject_for(id));
        }
        assert_eq!(subject_for(0), Subject::Chef);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(Subject::try_from("it").unwrap(), Subject::It);
        assert_eq!(Subject::try_from("chef").unwrap(), Subject::Chef);
        assert!(Subject::try_from("IT").is_err());
        assert!(Subject::try_from("all").is_err());
    }
}
