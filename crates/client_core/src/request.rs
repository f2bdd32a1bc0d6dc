//! Construction of the multipart body for `POST /dna_matching`.

use reqwest::multipart::{Form, Part};
use shared::protocol::{EXCEL_FILE_PART, TARGET_SEQUENCE_PART};

use crate::{error::SubmitError, selection::SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadPart {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    pub async fn read(file: &SelectedFile) -> Result<Self, SubmitError> {
        Ok(Self::new(file.name(), file.read().await?))
    }

    fn into_part(self) -> Result<Part, SubmitError> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

/// Fully materialised request: file contents have been read, so sending it
/// performs no further disk access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub target_sequence: UploadPart,
    pub excel_file: Option<UploadPart>,
}

impl AnalysisRequest {
    pub async fn from_files(
        primary: &SelectedFile,
        reference: Option<&SelectedFile>,
    ) -> Result<Self, SubmitError> {
        let target_sequence = UploadPart::read(primary).await?;
        let excel_file = match reference {
            Some(file) => Some(UploadPart::read(file).await?),
            None => None,
        };
        Ok(Self {
            target_sequence,
            excel_file,
        })
    }

    /// Names of the multipart parts this request will carry, in order.
    pub fn part_names(&self) -> Vec<&'static str> {
        let mut names = vec![TARGET_SEQUENCE_PART];
        if self.excel_file.is_some() {
            names.push(EXCEL_FILE_PART);
        }
        names
    }

    pub fn into_form(self) -> Result<Form, SubmitError> {
        let mut form = Form::new().part(TARGET_SEQUENCE_PART, self.target_sequence.into_part()?);
        if let Some(excel_file) = self.excel_file {
            form = form.part(EXCEL_FILE_PART, excel_file.into_part()?);
        }
        Ok(form)
    }
}
