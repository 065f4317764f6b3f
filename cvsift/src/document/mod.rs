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

use std::panic::catch_unwind;
use camino::Utf8Path;
use strum::Display;
use thiserror::Error;

/// The magic bytes of a pdf file.
pub const PDF_MAGIC: &[u8] = b"%PDF-";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("The document is unreadable: {reason}")]
    ExtractionFailure { reason: String },
    #[error("The document does not contain any extractable text.")]
    EmptyText,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    fn failure(reason: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            reason: reason.into(),
        }
    }
}

/// The supported document formats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Guesses the format from the leading bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(Self::Pdf)
        } else if std::str::from_utf8(bytes).is_ok() {
            Some(Self::PlainText)
        } else {
            None
        }
    }
}

/// An ordered sequence of pages, some of them may be without text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Parses [bytes] as pdf or as utf-8 text.
    pub fn read(bytes: &[u8]) -> Result<Self, ExtractionError> {
        let format = DocumentFormat::sniff(bytes);
        if let Some(format) = format {
            log::trace!("Reading {} bytes as {format}.", bytes.len());
        }
        match format {
            Some(DocumentFormat::Pdf) => Self::read_pdf(bytes),
            Some(DocumentFormat::PlainText) => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                let text = String::from_utf8_lossy(bytes).into_owned();
                Ok(Self::from_pages(vec![text]))
            }
            None => Err(ExtractionError::failure("neither a pdf nor utf-8 text")),
        }
    }

    fn read_pdf(bytes: &[u8]) -> Result<Self, ExtractionError> {
        // The parser panics on some malformed files.
        match catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
            Ok(Ok(pages)) => Ok(Self::from_pages(pages)),
            Ok(Err(err)) => Err(ExtractionError::failure(err.to_string())),
            Err(_) => Err(ExtractionError::failure("the pdf parser crashed")),
        }
    }

    /// Reads the file at [path]. Blocks, use from a blocking context.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, ExtractionError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::read(&bytes)
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Concatenates the text of all pages in order. Pages are separated by a newline,
    /// pages without text are skipped.
    pub fn extract_text(&self) -> Result<String, ExtractionError> {
        let mut text = String::new();
        for page in self.pages.iter().filter(|page| !page.trim().is_empty()) {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(page);
        }
        if text.is_empty() {
            Err(ExtractionError::EmptyText)
        } else {
            Ok(text)
        }
    }
}

/// Extracts the text of the document in [bytes].
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    Document::read(bytes)?.extract_text()
}

#[cfg(test)]
mod test {
    use super::{extract_text, Document, DocumentFormat, ExtractionError};

    #[test]
    fn sniffs_formats() {
        assert_eq!(DocumentFormat::sniff(b"%PDF-1.7\n..."), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::sniff("Jane Doe".as_bytes()), Some(DocumentFormat::PlainText));
        assert_eq!(DocumentFormat::sniff(&[0xff, 0xfe, 0x00, 0xd8]), None);
    }

    #[test]
    fn pages_are_joined_in_order() {
        let document = Document::from_pages(vec![
            "Jane Doe".to_string(),
            "   ".to_string(),
            String::new(),
            "Python developer".to_string(),
        ]);
        assert_eq!(document.extract_text().unwrap(), "Jane Doe\nPython developer");
    }

    #[test]
    fn blank_documents_are_empty_not_failed() {
        assert!(matches!(
            Document::from_pages(Vec::new()).extract_text(),
            Err(ExtractionError::EmptyText)
        ));
        assert!(matches!(
            Document::from_pages(vec![" \n\t".to_string(), String::new()]).extract_text(),
            Err(ExtractionError::EmptyText)
        ));
        assert!(matches!(extract_text(b""), Err(ExtractionError::EmptyText)));
    }

    #[test]
    fn plain_text_is_a_single_page() {
        let document = Document::read(b"\xEF\xBB\xBFJane Doe\nPython").unwrap();
        assert_eq!(document.pages(), &["Jane Doe\nPython".to_string()]);
    }

    #[test]
    fn corrupt_documents_fail() {
        assert!(matches!(
            extract_text(b"%PDF-1.4\nthis is not a pdf at all"),
            Err(ExtractionError::ExtractionFailure { .. })
        ));
        assert!(matches!(
            extract_text(&[0x00, 0x9f, 0x92, 0x96, 0xff]),
            Err(ExtractionError::ExtractionFailure { .. })
        ));
    }

    #[test]
    fn missing_files_fail() {
        assert!(matches!(
            Document::open("/does/not/exist.pdf"),
            Err(ExtractionError::Io(_))
        ));
    }
}
