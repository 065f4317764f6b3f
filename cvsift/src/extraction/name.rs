//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::collections::HashSet;

/// Finds the name of the candidate in a document.
#[cfg_attr(test, mockall::automock)]
pub trait NameRecognizer: Send + Sync {
    /// The first person mention in [text], if any.
    fn recognize(&self, text: &str) -> Option<String>;
}

/// Words that start a résumé but never belong to a name.
pub const HEADER_WORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective", "contact",
    "personal", "details", "information", "email", "phone", "mobile", "address", "experience",
    "education", "skills", "projects", "references", "name", "engineer", "developer", "manager",
    "analyst", "designer", "scientist", "specialist", "executive", "accountant", "consultant",
    "intern", "senior", "junior", "lead",
];

/// Takes the first run of two to four capitalized words in the leading lines.
///
/// Header words and skills break a run.
#[derive(Debug, Clone)]
pub struct CapitalizedNameRecognizer {
    scan_lines: usize,
    excluded: HashSet<String>,
}

impl CapitalizedNameRecognizer {
    pub fn new<I, S>(scan_lines: usize, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excluded: HashSet<String> = HEADER_WORDS.iter().map(|word| word.to_string()).collect();
        for skill in skills {
            excluded.extend(skill.as_ref().split_whitespace().map(str::to_lowercase));
        }
        Self { scan_lines, excluded }
    }

    fn is_name_word(&self, word: &str) -> bool {
        word.chars().all(char::is_alphabetic)
            && word.chars().next().is_some_and(char::is_uppercase)
            && word.chars().count() > 1
            && !self.excluded.contains(&word.to_lowercase())
    }

    fn name_in_line(&self, line: &str) -> Option<String> {
        let mut run: Vec<&str> = Vec::new();
        for token in line.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphabetic());
            let ends_phrase = token.ends_with([',', '.', ':', ';', '|', '/']);
            if self.is_name_word(word) {
                run.push(word);
            } else if (2..=4).contains(&run.len()) {
                return Some(run.join(" "));
            } else {
                run.clear();
                continue;
            }
            if ends_phrase {
                if (2..=4).contains(&run.len()) {
                    return Some(run.join(" "));
                }
                run.clear();
            }
        }
        (2..=4).contains(&run.len()).then(|| run.join(" "))
    }
}

impl NameRecognizer for CapitalizedNameRecognizer {
    fn recognize(&self, text: &str) -> Option<String> {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .take(self.scan_lines)
            .find_map(|line| self.name_in_line(line))
    }
}

#[cfg(test)]
mod test {
    use super::{CapitalizedNameRecognizer, NameRecognizer};

    fn recognizer() -> CapitalizedNameRecognizer {
        CapitalizedNameRecognizer::new(5, ["python", "machine learning", "sql"])
    }

    #[test]
    fn first_capitalized_run_wins() {
        let recognizer = recognizer();
        assert_eq!(
            recognizer.recognize("Jane Doe\n+91 98765 43210\njane.doe@example.com"),
            Some("Jane Doe".to_string())
        );
        assert_eq!(
            recognizer.recognize("RESUME\n\nJohn Smith\nSoftware Engineer"),
            Some("John Smith".to_string())
        );
        assert_eq!(
            recognizer.recognize("Curriculum Vitae\nMaria Garcia Lopez, Berlin"),
            Some("Maria Garcia Lopez".to_string())
        );
    }

    #[test]
    fn skills_and_titles_are_no_names() {
        let recognizer = recognizer();
        assert_eq!(
            recognizer.recognize("Python Machine Learning\nSenior Data Scientist"),
            None
        );
        assert_eq!(
            recognizer.recognize("Python SQL\nAnna Bell"),
            Some("Anna Bell".to_string())
        );
    }

    #[test]
    fn only_leading_lines_are_scanned() {
        let recognizer = CapitalizedNameRecognizer::new(1, Vec::<String>::new());
        assert_eq!(recognizer.recognize("worked as a clerk\nJane Doe"), None);
        assert_eq!(recognizer.recognize(""), None);
    }
}
