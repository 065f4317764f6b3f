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

use serde::{Deserialize, Serialize};
use crate::extraction::skills::DEFAULT_SKILLS;

/// Config of the field extraction
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename(serialize = "Extraction"))]
pub struct ExtractionConfig {
    /// The curated skill vocabulary, matched case-insensitively.
    #[serde(default = "_default_skills")]
    pub skills: Vec<String>,
    /// How many of the leading lines are scanned for the name of the candidate.
    #[serde(default = "_default_name_scan_lines")]
    pub name_scan_lines: usize,
}

fn _default_skills() -> Vec<String> {
    DEFAULT_SKILLS.iter().map(|skill| skill.to_string()).collect()
}

const fn _default_name_scan_lines() -> usize {
    5
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            skills: _default_skills(),
            name_scan_lines: _default_name_scan_lines(),
        }
    }
}
