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

use toml::Table;
use toml::Value;

use crate::error::Fallible;
use crate::types::language::Language;
use crate::types::subject::Subject;

/// The string tables for both languages.
pub struct Translations {
    ka: Table,
    en: Table,
}

impl Translations {
    /// Load the tables embedded in the binary.
    pub fn load() -> Fallible<Self> {
        Self::parse(include_str!("ka.toml"), include_str!("en.toml"))
    }

    pub fn parse(ka: &str, en: &str) -> Fallible<Self> {
        let ka: Table = toml::from_str(ka)?;
        let en: Table = toml::from_str(en)?;
        Ok(Self { ka, en })
    }

    /// A view of the tables for one language. English is the fallback.
    pub fn strings(&self, language: Language) -> Strings<'_> {
        let primary = match language {
            Language::Ka => &self.ka,
            Language::En => &self.en,
        };
        Strings {
            language,
            primary,
            fallback: &self.en,
        }
    }
}

/// Looks up a dotted key, e.g. `chatbot.answers.pricing`.
fn find<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut value = table.get(parts.next()?)?;
    for part in parts {
        value = value.as_table()?.get(part)?;
    }
    Some(value)
}

fn as_string_list(value: &Value) -> Option<Vec<String>> {
    let list = value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()?;
    if list.is_empty() { None } else { Some(list) }
}

fn as_pair_list(value: &Value) -> Option<Vec<(String, String)>> {
    value
        .as_array()?
        .iter()
        .map(|item| match item.as_array()?.as_slice() {
            [key, response] => Some((key.as_str()?.to_string(), response.as_str()?.to_string())),
            _ => None,
        })
        .collect()
}

/// Total lookups into one language's table. Every accessor returns
/// something: the active language's entry, else the English entry, else the
/// caller's default.
#[derive(Clone, Copy)]
pub struct Strings<'a> {
    language: Language,
    primary: &'a Table,
    fallback: &'a Table,
}

impl<'a> Strings<'a> {
    pub fn language(&self) -> Language {
        self.language
    }

    fn lookup<T>(&self, key: &str, extract: impl Fn(&'a Value) -> Option<T>) -> Option<T> {
        if let Some(found) = find(self.primary, key).and_then(&extract) {
            return Some(found);
        }
        let found = find(self.fallback, key).and_then(&extract);
        if found.is_none() {
            log::warn!("Missing translation: {}.{key}", self.language);
        }
        found
    }

    pub fn text(&self, key: &str, default: &str) -> String {
        self.lookup(key, |value| value.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    /// Like [`Strings::text`], substituting `{name}` placeholders.
    pub fn format(&self, key: &str, default: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.text(key, default);
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// A non-empty list of strings, if either table has one.
    pub fn try_list(&self, key: &str) -> Option<Vec<String>> {
        self.lookup(key, as_string_list)
    }

    pub fn list(&self, key: &str, default: &[&str]) -> Vec<String> {
        self.try_list(key)
            .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
    }

    /// An ordered list of `[key, value]` pairs.
    pub fn pairs(&self, key: &str) -> Vec<(String, String)> {
        self.lookup(key, as_pair_list).unwrap_or_default()
    }

    /// The label of a subject. Never empty: falls back to English, then to
    /// the built-in name.
    pub fn subject_label(&self, subject: Subject) -> String {
        self.text(&format!("subjects.{}", subject.key()), subject.default_label())
    }

    /// The generic learning goal shown on a student's card.
    pub fn student_goal(&self, subject: Subject) -> String {
        self.text(&format!("goals.{}", subject.key()), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::subject::SUBJECTS;

    fn collect_keys(prefix: &str, table: &Table, keys: &mut Vec<String>) {
        for (name, value) in table {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            match value {
                Value::Table(inner) => collect_keys(&key, inner, keys),
                _ => keys.push(key),
            }
        }
    }

    #[test]
    fn test_embedded_tables_parse() -> Fallible<()> {
        Translations::load()?;
        Ok(())
    }

    #[test]
    fn test_tables_have_the_same_keys() -> Fallible<()> {
        let translations = Translations::load()?;
        let mut ka = Vec::new();
        let mut en = Vec::new();
        collect_keys("", &translations.ka, &mut ka);
        collect_keys("", &translations.en, &mut en);
        ka.sort();
        en.sort();
        assert_eq!(ka, en);
        Ok(())
    }

    #[test]
    fn test_subject_labels() -> Fallible<()> {
        let translations = Translations::load()?;
        let ka = translations.strings(Language::Ka);
        let en = translations.strings(Language::En);
        assert_eq!(ka.subject_label(Subject::Medicine), "მედიცინა");
        assert_eq!(en.subject_label(Subject::Medicine), "Medicine");
        for subject in SUBJECTS {
            assert!(!ka.subject_label(subject).is_empty());
            assert_eq!(en.subject_label(subject), subject.default_label());
        }
        Ok(())
    }

    #[test]
    fn test_missing_key_falls_back_to_english() -> Fallible<()> {
        let translations = Translations::parse(
            "[nav]\nhome = \"მთავარი\"\n",
            "[nav]\nhome = \"Home\"\ntutors = \"Tutors\"\n",
        )?;
        let ka = translations.strings(Language::Ka);
        assert_eq!(ka.text("nav.home", "?"), "მთავარი");
        assert_eq!(ka.text("nav.tutors", "?"), "Tutors");
        assert_eq!(ka.text("nav.nowhere", "Default"), "Default");
        assert_eq!(ka.text("nav.home.deeper", "Default"), "Default");
        assert_eq!(ka.subject_label(Subject::Chef), "Chef");
        Ok(())
    }

    #[test]
    fn test_wrong_type_falls_back() -> Fallible<()> {
        let translations = Translations::parse("prompts = []\ntitle = 3\n", "")?;
        let ka = translations.strings(Language::Ka);
        assert_eq!(ka.list("prompts", &["a", "b"]), vec!["a", "b"]);
        assert!(ka.try_list("prompts").is_none());
        assert_eq!(ka.text("title", "Title"), "Title");
        assert!(ka.pairs("title").is_empty());
        Ok(())
    }

    #[test]
    fn test_format() -> Fallible<()> {
        let translations = Translations::load()?;
        let en = translations.strings(Language::En);
        assert_eq!(
            en.format("modal.success_text", "", &[("name", "Nino")]),
            "Nino will contact you soon."
        );
        assert_eq!(en.format("tutors.count", "", &[("count", "3")]), "3 tutors");
        Ok(())
    }

    #[test]
    fn test_pairs_keep_insertion_order() -> Fallible<()> {
        let translations = Translations::load()?;
        let pairs = translations.strings(Language::Ka).pairs("chatbot.keyword_replies");
        assert_eq!(pairs.len(), 20);
        assert_eq!(pairs[0].0, "გამარჯობა");
        assert_eq!(pairs[19].0, "გმადლობთ");
        Ok(())
    }

    #[test]
    fn test_student_goals() -> Fallible<()> {
        let translations = Translations::load()?;
        let en = translations.strings(Language::En);
        assert_eq!(
            en.student_goal(Subject::It),
            "I am starting in IT and need practical tasks plus career guidance."
        );
        Ok(())
    }
}
