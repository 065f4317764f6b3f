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

use std::collections::BTreeSet;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, BuildError, MatchKind};
use itertools::Itertools;

/// The curated skill vocabulary used when nothing else is configured.
pub const DEFAULT_SKILLS: &[&str] = &[
    "adaptability", "angular", "artificial intelligence", "aws", "azure", "bash", "bottle",
    "c++", "cherrypy", "css", "dash", "data analysis", "dbms", "deep learning", "django", "docker",
    "dsa", "excel", "falcon", "fastapi", "flask", "gcp", "github", "html", "java", "javascript",
    "kotlin", "kubernetes", "leadership", "linux", "machine learning", "nlp", "node.js", "oops",
    "perl", "php", "powerpoint", "problem-solving", "programming", "pyramid", "python", "pytorch",
    "rdbms", "react", "ruby", "scala", "sdlc", "sql", "swift", "teamwork", "tensorflow",
    "time management", "tornado", "typescript", "web2py",
];

/// Finds the skills of a fixed vocabulary in a text by case-insensitive substring containment.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    skills: Vec<String>,
    automaton: AhoCorasick,
}

impl SkillMatcher {
    /// Builds the matcher, blank skills are ignored and duplicates are merged.
    pub fn new<I, S>(skills: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .map(|skill| skill.as_ref().trim().to_string())
            .filter(|skill| !skill.is_empty())
            .unique_by(|skill| skill.to_lowercase())
            .collect_vec();
        // Patterns and haystack are lowercased with the unicode rules.
        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(skills.iter().map(|skill| skill.to_lowercase()))?;
        Ok(Self { skills, automaton })
    }

    /// The contained skills, sorted and without duplicates.
    pub fn find(&self, text: &str) -> Vec<String> {
        self.automaton
            .find_overlapping_iter(&text.to_lowercase())
            .map(|found| self.skills[found.pattern().as_usize()].as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::{SkillMatcher, DEFAULT_SKILLS};

    #[test]
    fn finds_sorted_skills() {
        let matcher = SkillMatcher::new(["python", "sql", "excel", "java"]).unwrap();
        assert_eq!(
            matcher.find("Proficient in Python, SQL and Excel"),
            vec!["excel", "python", "sql"]
        );
    }

    #[test]
    fn overlapping_skills_are_all_reported() {
        let matcher = SkillMatcher::new(["java", "javascript", "script"]).unwrap();
        assert_eq!(
            matcher.find("JavaScript developer"),
            vec!["java", "javascript", "script"]
        );
    }

    #[test]
    fn blanks_and_duplicates_are_dropped() {
        let matcher = SkillMatcher::new(["  sql ", "", "SQL", "   "]).unwrap();
        assert_eq!(matcher.len(), 1);
        assert_eq!(matcher.find("sql sql SQL"), vec!["sql"]);
        assert!(matcher.find("nothing to see").is_empty());
    }

    #[test]
    fn non_ascii_skills_ignore_case() {
        let matcher = SkillMatcher::new(["Résumé Writing", "Straße"]).unwrap();
        assert_eq!(
            matcher.find("RÉSUMÉ WRITING and straße planning"),
            vec!["Résumé Writing", "Straße"]
        );
    }

    #[test]
    fn default_skills_cover_multi_word_entries() {
        let matcher = SkillMatcher::new(DEFAULT_SKILLS).unwrap();
        let found = matcher.find("Worked on Machine Learning pipelines with Node.js and C++.");
        assert_eq!(found, vec!["c++", "machine learning", "node.js"]);
    }
}
