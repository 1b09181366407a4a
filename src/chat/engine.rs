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

//! Rule-based replies. Rules are tried top to bottom and the first match
//! wins: topics, then the flat keyword table, then the fallback.

use std::ops::Range;

use crate::i18n::strings::Strings;

/// A topic with its own answer and follow-up prompts.
pub struct Topic {
    pub tag: &'static str,
    /// Matched as substrings of the normalized message, in either language.
    pub keywords: &'static [&'static str],
    /// The answer used when neither string table has one.
    default_answer: &'static str,
    /// Which quick prompts to suggest when the table has no follow-ups.
    default_follow_ups: Range<usize>,
}

pub const TOPICS: [Topic; 4] = [
    Topic {
        tag: "pricing",
        keywords: &["price", "cost", "budget", "₾", "ფასი", "ღირებულ"],
        default_answer: "Tutors usually charge ₾20-₾80. Adjust the dual sliders in the Filters block to stay inside your ideal range.",
        default_follow_ups: 0..2,
    },
    Topic {
        tag: "premium",
        keywords: &["premium", "vip", "upgrade", "exclusive", "პრემიუმ", "გამოწერა"],
        default_answer: "Premium subscribers jump the line, unlock dedicated callbacks, and receive curated study drops every week.",
        default_follow_ups: 1..3,
    },
    Topic {
        tag: "matching",
        keywords: &["match", "recommend", "suggest", "find", "მიპოვ", "matchmaking"],
        default_answer: "We weigh goals, pace, experience range, and availability to score every tutor before showing them.",
        default_follow_ups: 0..3,
    },
    Topic {
        tag: "availability",
        keywords: &["available", "slot", "schedule", "time", "calendar", "როდის"],
        default_answer: "Open slots are listed on each tutor's card. For rush requests, tap Contact and call directly.",
        default_follow_ups: 0..2,
    },
];

const DEFAULT_QUICK_PROMPTS: [&str; 4] = [
    "Find me a math tutor under ₾40",
    "Which mentors reply fastest?",
    "How does premium mode work?",
    "Can I see weekend availability?",
];

const DEFAULT_TIPS: [&str; 3] = [
    "Combine price, experience, and subject filters for laser-focused matches.",
    "Premium chats unlock instant callbacks and saved preferences.",
    "Share timelines or exam names and tutors can prepare before the first call.",
];

const DEFAULT_RESPONSE: &str = "Please use the filters above to find tutors. I can also help with subjects, prices, experience, or just say hello!";

const DEFAULT_FALLBACK_HINT: &str =
    "Try asking about pricing, premium benefits, or tutor availability.";

pub fn quick_prompts(strings: &Strings) -> Vec<String> {
    strings.list("chatbot.prompts", &DEFAULT_QUICK_PROMPTS)
}

pub fn tips(strings: &Strings) -> Vec<String> {
    strings.list("chatbot.tips", &DEFAULT_TIPS)
}

/// The prompts suggested when no topic is in focus.
pub fn default_prompts(strings: &Strings) -> Vec<String> {
    slice(&quick_prompts(strings), 0..3)
}

fn slice(list: &[String], range: Range<usize>) -> Vec<String> {
    let end = range.end.min(list.len());
    let start = range.start.min(end);
    list[start..end].to_vec()
}

/// The engine's decision for one message.
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The topic now in focus, if any.
    pub focus: Option<&'static str>,
    /// The prompts to suggest next.
    pub prompts: Vec<String>,
}

fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

fn match_topic(message: &str) -> Option<&'static Topic> {
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|keyword| message.contains(keyword)))
}

/// Decide the reply to a single message. Depends on nothing but the message
/// and the active language's tables.
pub fn respond(strings: &Strings, message: &str) -> Reply {
    let message = normalize(message);

    if let Some(topic) = match_topic(&message) {
        let answer = strings.text(&format!("chatbot.answers.{}", topic.tag), topic.default_answer);
        let prompts = strings
            .try_list(&format!("chatbot.follow_ups.{}", topic.tag))
            .unwrap_or_else(|| slice(&quick_prompts(strings), topic.default_follow_ups.clone()));
        log::debug!("Chat topic matched: {}", topic.tag);
        return Reply {
            text: answer,
            focus: Some(topic.tag),
            prompts,
        };
    }

    for (keyword, response) in strings.pairs("chatbot.keyword_replies") {
        if message.contains(&keyword.to_lowercase()) {
            log::debug!("Chat keyword matched: {keyword}");
            return Reply {
                text: response,
                focus: None,
                prompts: default_prompts(strings),
            };
        }
    }

    let default_response = strings.text("chatbot.default_response", DEFAULT_RESPONSE);
    let hint = strings.text("chatbot.fallback", DEFAULT_FALLBACK_HINT);
    Reply {
        text: format!("{default_response} {hint}"),
        focus: None,
        prompts: default_prompts(strings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::i18n::strings::Translations;
    use crate::types::language::Language;

    #[test]
    fn test_pricing_in_both_languages() -> Fallible<()> {
        let translations = Translations::load()?;
        for language in [Language::Ka, Language::En] {
            let strings = translations.strings(language);
            let expected = strings.text("chatbot.answers.pricing", "");
            for message in ["რა არის ფასი?", "What's the PRICE?", "  price  "] {
                let reply = respond(&strings, message);
                assert_eq!(reply.focus, Some("pricing"));
                assert_eq!(reply.text, expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_topic_order_decides_ties() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::En);
        // "find" is a matching keyword, but "₾" puts pricing first.
        let reply = respond(&strings, "Find me a math tutor under ₾40");
        assert_eq!(reply.focus, Some("pricing"));
        let reply = respond(&strings, "Can you find me someone?");
        assert_eq!(reply.focus, Some("matching"));
        Ok(())
    }

    #[test]
    fn test_topic_sets_follow_ups() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::En);
        let reply = respond(&strings, "Is there a VIP tier?");
        assert_eq!(reply.focus, Some("premium"));
        assert_eq!(
            reply.prompts,
            strings.list("chatbot.follow_ups.premium", &[])
        );
        Ok(())
    }

    #[test]
    fn test_follow_ups_default_to_quick_prompt_slices() -> Fallible<()> {
        let translations = Translations::parse(
            "prompts = []\n[chatbot]\nprompts = [\"a\", \"b\", \"c\", \"d\"]\n",
            "",
        )?;
        let strings = translations.strings(Language::Ka);
        assert_eq!(respond(&strings, "upgrade").prompts, vec!["b", "c"]);
        assert_eq!(respond(&strings, "slot").prompts, vec!["a", "b"]);
        assert_eq!(respond(&strings, "recommend").prompts, vec!["a", "b", "c"]);
        Ok(())
    }

    #[test]
    fn test_keyword_table() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::Ka);
        let reply = respond(&strings, "გამარჯობა!");
        assert_eq!(reply.focus, None);
        assert_eq!(
            reply.text,
            "გამარჯობა! როგორ შემიძლია დაგეხმაროთ მასწავლებლის პოვნაში?"
        );
        assert_eq!(reply.prompts, default_prompts(&strings));
        Ok(())
    }

    #[test]
    fn test_keyword_table_first_match_wins() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::Ka);
        // Both "როგორ" and "გამოცდილება" appear; "როგორ" comes first.
        let reply = respond(&strings, "როგორ ავირჩიო გამოცდილება?");
        assert!(reply.text.starts_with("გამოიყენეთ ფილტრები"));
        Ok(())
    }

    #[test]
    fn test_keyword_keys_are_compared_lowercased() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::Ka);
        let reply = respond(&strings, "IT");
        assert!(reply.text.starts_with("IT მიმართულებაში"));
        Ok(())
    }

    #[test]
    fn test_fallback() -> Fallible<()> {
        let translations = Translations::load()?;
        let strings = translations.strings(Language::En);
        let reply = respond(&strings, "qwerty");
        assert_eq!(reply.focus, None);
        assert_eq!(
            reply.text,
            format!(
                "{} {}",
                strings.text("chatbot.default_response", DEFAULT_RESPONSE),
                strings.text("chatbot.fallback", "")
            )
        );
        assert_eq!(reply.prompts.len(), 3);
        Ok(())
    }

    #[test]
    fn test_fallback_without_tables() -> Fallible<()> {
        let translations = Translations::parse("", "")?;
        let strings = translations.strings(Language::En);
        let reply = respond(&strings, "qwerty");
        assert_eq!(reply.text, format!("{DEFAULT_RESPONSE} {DEFAULT_FALLBACK_HINT}"));
        assert_eq!(reply.prompts, DEFAULT_QUICK_PROMPTS[..3].to_vec());
        Ok(())
    }

    #[test]
    fn test_topic_answers_without_tables() -> Fallible<()> {
        let translations = Translations::parse("", "")?;
        let strings = translations.strings(Language::Ka);
        for topic in &TOPICS {
            let reply = respond(&strings, topic.keywords[0]);
            assert_eq!(reply.focus, Some(topic.tag));
            assert_eq!(reply.text, topic.default_answer);
            assert!(!reply.text.is_empty());
        }
        Ok(())
    }
}
