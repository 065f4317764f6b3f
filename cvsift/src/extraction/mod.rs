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

pub mod contact;
pub mod name;
pub mod skills;

use aho_corasick::BuildError;
use serde::{Deserialize, Serialize};
use crate::config::ExtractionConfig;
use crate::extraction::name::{CapitalizedNameRecognizer, NameRecognizer};
use crate::extraction::skills::SkillMatcher;

/// Glyphs used as list markers in résumés.
pub const BULLETS: &[char] = &['•', '➢', '▪', '●', '◦'];

/// The fields found in the raw text of a document. Missing fields are no error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
}

/// Heuristic extraction of the contact data and skills of a candidate.
pub struct InformationExtractor {
    skills: SkillMatcher,
    names: Box<dyn NameRecognizer>,
}

impl InformationExtractor {
    pub fn new(skills: SkillMatcher, names: Box<dyn NameRecognizer>) -> Self {
        Self { skills, names }
    }

    pub fn from_config(cfg: &ExtractionConfig) -> Result<Self, BuildError> {
        Ok(Self::new(
            SkillMatcher::new(&cfg.skills)?,
            Box::new(CapitalizedNameRecognizer::new(cfg.name_scan_lines, &cfg.skills)),
        ))
    }

    /// Extracts every field independently from the un-normalized [text].
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let text = text.replace(BULLETS, "");
        ExtractedFields {
            name: self.names.recognize(&text),
            email: contact::find_email(&text).map(str::to_string),
            phone: contact::find_phone(&text).map(str::to_string),
            skills: self.skills.find(&text),
        }
    }
}
