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

use std::io::Write;
use camino::Utf8Path;
use serde::Serialize;
use crate::record::{CandidateRecord, Suitability};

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Filename")]
    filename: &'a str,
    #[serde(rename = "Name")]
    name: Option<&'a str>,
    #[serde(rename = "Email")]
    email: Option<&'a str>,
    #[serde(rename = "Phone")]
    phone: Option<&'a str>,
    #[serde(rename = "Skills")]
    skills: String,
    #[serde(rename = "Job Role")]
    job_role: &'a str,
    #[serde(rename = "Predicted Designation")]
    predicted_designation: &'a str,
    #[serde(rename = "Suitability")]
    suitability: Suitability,
}

impl<'a> From<&'a CandidateRecord> for CsvRow<'a> {
    fn from(record: &'a CandidateRecord) -> Self {
        Self {
            filename: &record.filename,
            name: record.name.as_deref(),
            email: record.email.as_deref(),
            phone: record.phone.as_deref(),
            skills: record.skills.join("; "),
            job_role: &record.job_role,
            predicted_designation: &record.predicted_designation,
            suitability: record.suitability,
        }
    }
}

/// Writes the [records] as csv with a header row. Missing fields are empty cells.
pub fn write_csv<'a, W: Write>(writer: W, records: impl IntoIterator<Item = &'a CandidateRecord>) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_csv<'a>(path: impl AsRef<Utf8Path>, records: impl IntoIterator<Item = &'a CandidateRecord>) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(file, records)
}

#[cfg(test)]
mod test {
    use crate::extraction::ExtractedFields;
    use crate::record::CandidateRecord;
    use super::write_csv;

    #[test]
    fn writes_one_row_per_record() {
        let records = vec![
            CandidateRecord::new(
                "jane.pdf",
                ExtractedFields {
                    name: Some("Jane Doe".to_string()),
                    email: Some("jane.doe@example.com".to_string()),
                    phone: None,
                    skills: vec!["excel".to_string(), "sql".to_string()],
                },
                "Accountant",
                "Accountant",
            ),
            CandidateRecord::new("empty.txt", ExtractedFields::default(), "Accountant", "Data Scientist"),
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &records).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "Filename,Name,Email,Phone,Skills,Job Role,Predicted Designation,Suitability",
                "jane.pdf,Jane Doe,jane.doe@example.com,,excel; sql,Accountant,Accountant,Suitable",
                "empty.txt,,,,,Accountant,Data Scientist,Not Suitable",
            ]
        );
    }
}
