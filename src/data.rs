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

//! The static mock dataset.

use crate::types::listing::Listing;
use crate::types::listing::ListingKind;
use crate::types::listing::Student;
use crate::types::listing::Tutor;

const fn tutor(id: i64, name: &'static str, price: u32, experience: u32, phone: &'static str) -> Tutor {
    Tutor {
        id,
        name,
        price,
        experience,
        phone,
    }
}

const fn student(id: i64, name: &'static str, goal: &'static str, phone: &'static str) -> Student {
    Student {
        id,
        name,
        goal,
        phone,
    }
}

pub static TUTORS: [Tutor; 18] = [
    tutor(1, "ნინო გელაშვილი", 35, 8, "+995 599 123 456"),
    tutor(2, "გიორგი მამედოვი", 55, 7, "+995 592 234 567"),
    tutor(3, "სალომე ბერიძე", 30, 5, "+995 598 345 678"),
    tutor(4, "ლუკა ჩხაიძე", 40, 9, "+995 551 456 789"),
    tutor(5, "მარიამი კვარაცხელია", 45, 6, "+995 595 567 890"),
    tutor(6, "ანა მელაძე", 28, 4, "+995 599 678 901"),
    tutor(7, "დავით ნადარაია", 65, 10, "+995 592 789 012"),
    tutor(8, "თეკლა ჯაფარიძე", 32, 3, "+995 598 890 123"),
    tutor(9, "ლაშა ხარაძე", 42, 7, "+995 551 901 234"),
    tutor(10, "თამარ კაპანაძე", 27, 2, "+995 595 012 345"),
    tutor(11, "ნიკა გოგიძე", 58, 9, "+995 599 123 789"),
    tutor(12, "ელენე ბერიძე", 25, 3, "+995 592 234 890"),
    tutor(13, "თორნიკე მიქაძე", 38, 5, "+995 598 345 901"),
    tutor(14, "ლილე კვარაცხელია", 33, 4, "+995 551 456 012"),
    tutor(15, "ალექსანდრე ჩხაიძე", 50, 8, "+995 595 567 123"),
    tutor(16, "ანასტასია გელაშვილი", 48, 6, "+995 599 678 234"),
    tutor(17, "ირაკლი ხარაძე", 52, 7, "+995 592 789 345"),
    tutor(18, "ეკატერინე მიქაძე", 36, 4, "+995 598 890 456"),
];

pub static STUDENTS: [Student; 8] = [
    student(
        1,
        "ლუკა მელაძე",
        "მინდა გავიუმჯობესო მათემატიკაში და მოვემზადო ერთიანი ეროვნული გამოცდისთვის",
        "+995 599 111 222",
    ),
    student(
        2,
        "ანა ბერიძე",
        "საჭიროა ინგლისურის შესწავლა IELTS გამოცდისთვის",
        "+995 592 222 333",
    ),
    student(
        3,
        "ნიკა ხარაძე",
        "მინდა ვისწავლო Python პროგრამირება დასაწყისიდან",
        "+995 598 333 444",
    ),
    student(
        4,
        "მარიამი გელაშვილი",
        "საჭიროა დახმარება ფიზიკის საშინაო დავალებებში",
        "+995 551 444 555",
    ),
    student(
        5,
        "დავით კვარაცხელია",
        "მინდა გავიუმჯობესო ქიმიაში და მოვემზადო უნივერსიტეტისთვის",
        "+995 595 555 666",
    ),
    student(
        6,
        "თამარ მამედოვი",
        "საჭიროა დახმარება ბიოლოგიის სასკოლო პროგრამაში",
        "+995 599 666 777",
    ),
    student(
        7,
        "ნათია სიგუა",
        "ვემზადები სამართლის უნარ-ჩვევების შესასწავლად",
        "+995 599 777 888",
    ),
    student(
        8,
        "დემნა წიკლაური",
        "მინდა დავხვეწო კულინარიული ტექნიკები და უსაფრთხოების სტანდარტები",
        "+995 592 123 456",
    ),
];

/// Card header colours, as CSS gradient stops.
const CARD_GRADIENTS: [(&str, &str); 18] = [
    ("#3b82f6", "#2563eb"),
    ("#a855f7", "#9333ea"),
    ("#ec4899", "#db2777"),
    ("#6366f1", "#4f46e5"),
    ("#06b6d4", "#0891b2"),
    ("#14b8a6", "#0d9488"),
    ("#10b981", "#059669"),
    ("#8b5cf6", "#7c3aed"),
    ("#f43f5e", "#e11d48"),
    ("#f59e0b", "#d97706"),
    ("#f97316", "#ea580c"),
    ("#84cc16", "#65a30d"),
    ("#0ea5e9", "#0284c7"),
    ("#d946ef", "#c026d3"),
    ("#ef4444", "#dc2626"),
    ("#22c55e", "#16a34a"),
    ("#eab308", "#ca8a04"),
    ("#60a5fa", "#a855f7"),
];

pub fn find_tutor(id: i64) -> Option<&'static Tutor> {
    TUTORS.iter().find(|tutor| tutor.id == id)
}

pub fn find_student(id: i64) -> Option<&'static Student> {
    STUDENTS.iter().find(|student| student.id == id)
}

pub fn find_listing(kind: ListingKind, id: i64) -> Option<Listing> {
    match kind {
        ListingKind::Tutor => find_tutor(id).map(Listing::Tutor),
        ListingKind::Student => find_student(id).map(Listing::Student),
    }
}

/// The CSS background for a listing's card header.
pub fn card_gradient(id: i64) -> String {
    let index = id.unsigned_abs() as usize % CARD_GRADIENTS.len();
    let (from, to) = CARD_GRADIENTS[index];
    format!("background: linear-gradient(to right, {from}, {to});")
}

/// The uppercased first letter of each word of a name.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_dataset_shape() {
        assert_eq!(TUTORS.len(), 18);
        assert_eq!(STUDENTS.len(), 8);
        for tutor in TUTORS.iter() {
            assert!((20..=80).contains(&tutor.price));
            assert!((1..=10).contains(&tutor.experience));
            assert!(tutor.id > 0);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<i64> = TUTORS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), TUTORS.len());
        let ids: HashSet<i64> = STUDENTS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), STUDENTS.len());
    }

    #[test]
    fn test_find_listing() {
        let listing = find_listing(ListingKind::Tutor, 7).unwrap();
        assert_eq!(listing.name(), "დავით ნადარაია");
        assert_eq!(listing.kind(), ListingKind::Tutor);
        assert!(find_listing(ListingKind::Student, 9).is_none());
        assert!(find_listing(ListingKind::Tutor, 0).is_none());
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("nino gelashvili"), "NG");
        assert_eq!(initials("ნინო გელაშვილი").chars().count(), 2);
        assert_eq!(initials("salome  beridze"), "SB");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_card_gradient() {
        assert_eq!(card_gradient(0), card_gradient(18));
        assert_ne!(card_gradient(1), card_gradient(2));
    }
}
