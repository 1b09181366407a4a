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

use crate::chat::engine::respond;
use crate::error::Fallible;
use crate::error::fail;
use crate::i18n::strings::Strings;
use crate::i18n::strings::Translations;
use crate::types::language::Language;

fn answer(strings: &Strings, message: &str) -> Fallible<String> {
    if message.trim().is_empty() {
        return fail("message is empty.");
    }
    let reply = respond(strings, message);
    let mut lines = vec![reply.text];
    if let Some(tag) = reply.focus {
        lines.push(format!(
            "[{}: {}]",
            strings.text("chatbot.context_label", "Focus"),
            strings.text(&format!("chatbot.context.{tag}"), tag)
        ));
    }
    lines.push(String::new());
    lines.push(strings.text("chatbot.quick_title", "Popular prompts"));
    for prompt in reply.prompts {
        lines.push(format!("- {prompt}"));
    }
    Ok(lines.join("\n"))
}

pub fn ask(message: &str, language: Language) -> Fallible<()> {
    let translations = Translations::load()?;
    println!("{}", answer(&translations.strings(language), message)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_answer() -> Fallible<()> {
        let translations = Translations::load()?;
        let output = answer(&translations.strings(Language::En), "Is there a VIP plan?")?;
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("Premium subscribers"));
        assert_eq!(lines[1], "[Focus: Premium]");
        assert_eq!(lines[3], "Popular prompts");
        assert_eq!(lines[4], "- How does premium mode work?");
        Ok(())
    }

    #[test]
    fn test_fallback_has_no_focus() -> Fallible<()> {
        let translations = Translations::load()?;
        let output = answer(&translations.strings(Language::En), "qwerty")?;
        assert!(!output.contains("[Focus"));
        assert!(output.contains("- Find me a math tutor under ₾40"));
        Ok(())
    }

    #[test]
    fn test_empty_message() -> Fallible<()> {
        let translations = Translations::load()?;
        let result = answer(&translations.strings(Language::Ka), "   ");
        assert_eq!(result.err().unwrap().to_string(), "error: message is empty.");
        Ok(())
    }
}
