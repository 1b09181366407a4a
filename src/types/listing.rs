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

use crate::types::subject::Subject;
use crate::types::subject::subject_for;

#[derive(Debug, PartialEq, Eq)]
pub struct Tutor {
    pub id: i64,
    pub name: &'static str,
    /// Hourly rate in lari.
    pub price: u32,
    pub experience: u32,
    pub phone: &'static str,
}

impl Tutor {
    pub fn subject(&self) -> Subject {
        subject_for(self.id)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: &'static str,
    /// The learning goal, as the student wrote it.
    pub goal: &'static str,
    pub phone: &'static str,
}

impl Student {
    pub fn subject(&self) -> Subject {
        subject_for(self.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListingKind {
    Tutor,
    Student,
}

/// A reference to either kind of listing in the static dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listing {
    Tutor(&'static Tutor),
    Student(&'static Student),
}

impl Listing {
    pub fn kind(&self) -> ListingKind {
        match self {
            Listing::Tutor(_) => ListingKind::Tutor,
            Listing::Student(_) => ListingKind::Student,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Listing::Tutor(tutor) => tutor.id,
            Listing::Student(student) => student.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Listing::Tutor(tutor) => tutor.name,
            Listing::Student(student) => student.name,
        }
    }

    pub fn phone(&self) -> &'static str {
        match self {
            Listing::Tutor(tutor) => tutor.phone,
            Listing::Student(student) => student.phone,
        }
    }

    pub fn subject(&self) -> Subject {
        subject_for(self.id())
    }
}
