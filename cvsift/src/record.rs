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
use strum::{AsRefStr, Display, EnumString};
use crate::extraction::ExtractedFields;

/// The verdict of comparing a predicted category with the requested role.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr)]
pub enum Suitability {
    #[strum(serialize = "Suitable")]
    #[serde(rename = "Suitable")]
    Suitable,
    #[strum(serialize = "Not Suitable")]
    #[serde(rename = "Not Suitable")]
    NotSuitable,
}

impl Suitability {
    /// Suitable iff both match after trimming, ignoring the case.
    pub fn judge(requested_role: &str, predicted_label: &str) -> Self {
        if requested_role.trim().to_lowercase() == predicted_label.trim().to_lowercase() {
            Self::Suitable
        } else {
            Self::NotSuitable
        }
    }

    pub fn is_suitable(self) -> bool {
        matches!(self, Self::Suitable)
    }
}

/// The outcome of screening a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub filename: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub job_role: String,
    pub predicted_designation: String,
    pub suitability: Suitability,
}

impl CandidateRecord {
    pub fn new(
        filename: impl Into<String>,
        fields: ExtractedFields,
        job_role: impl Into<String>,
        predicted_designation: impl Into<String>,
    ) -> Self {
        let job_role = job_role.into();
        let predicted_designation = predicted_designation.into();
        Self {
            filename: filename.into(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            skills: fields.skills,
            suitability: Suitability::judge(&job_role, &predicted_designation),
            job_role,
            predicted_designation,
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::Suitability;

    #[test]
    fn judging_ignores_case_and_whitespace() {
        assert_eq!(
            Suitability::judge(" Software Engineer ", "Software Engineer"),
            Suitability::judge("software engineer", "Software Engineer")
        );
        assert_eq!(Suitability::judge("software engineer\t", "Software Engineer"), Suitability::Suitable);
        assert_eq!(Suitability::judge("Software", "Software Engineer"), Suitability::NotSuitable);
        assert_eq!(Suitability::judge("", "Software Engineer"), Suitability::NotSuitable);
    }

    #[test]
    fn verdict_names() {
        assert_eq!(Suitability::NotSuitable.to_string(), "Not Suitable");
        assert_eq!(Suitability::from_str("Suitable").unwrap(), Suitability::Suitable);
        assert_eq!(serde_json::to_string(&Suitability::NotSuitable).unwrap(), "\"Not Suitable\"");
    }
}
