//! Input model and the multipart payload sent to the matching service.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::ValidationError;

/// Multipart field carrying the uploaded resume file.
pub const FIELD_RESUME: &str = "resume";
/// Multipart field carrying pasted resume text.
pub const FIELD_RESUME_TEXT: &str = "resume_text";
/// Multipart field carrying the job description.
pub const FIELD_JD: &str = "jd";

/// Which resume source the form is currently using.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    File,
    Text,
}

impl InputMode {
    pub fn toggled(self) -> Self {
        match self {
            InputMode::File => InputMode::Text,
            InputMode::Text => InputMode::File,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InputMode::File => "Upload Resume",
            InputMode::Text => "Paste Resume",
        }
    }
}

/// A resume file held in memory, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a resume from disk. The file name (not the full path) is what
    /// gets sent to the service.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume.pdf".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Content type declared for the upload, guessed from the extension.
    pub fn mime(&self) -> &'static str {
        let ext = Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("txt") | Some("md") => "text/plain",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }
}

/// The resume actually sent with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    File(ResumeFile),
    Text(String),
}

/// A validated submission, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    pub resume: ResumeSource,
    pub job_description: String,
}

/// One multipart field, before it is handed to reqwest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPart<'a> {
    File {
        name: &'static str,
        file: &'a ResumeFile,
    },
    Text {
        name: &'static str,
        value: &'a str,
    },
}

impl FormPart<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::File { name, .. } | FormPart::Text { name, .. } => *name,
        }
    }
}

impl MatchRequest {
    /// Build a request from raw form input.
    ///
    /// Only the source belonging to `mode` is considered: a file chosen
    /// earlier is ignored while pasting text, and vice versa. Text is sent
    /// as typed; trimming is only used to decide whether it is blank.
    pub fn from_input(
        mode: InputMode,
        resume_file: Option<&ResumeFile>,
        resume_text: &str,
        job_description: &str,
    ) -> Result<Self, ValidationError> {
        let resume = match mode {
            InputMode::File => resume_file
                .cloned()
                .map(ResumeSource::File)
                .ok_or(ValidationError::MissingResume)?,
            InputMode::Text => {
                if resume_text.trim().is_empty() {
                    return Err(ValidationError::MissingResume);
                }
                ResumeSource::Text(resume_text.to_string())
            }
        };

        if job_description.trim().is_empty() {
            return Err(ValidationError::MissingJobDescription);
        }

        Ok(Self {
            resume,
            job_description: job_description.to_string(),
        })
    }

    /// Fields in the order they are written to the form.
    pub fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts = Vec::with_capacity(2);
        match &self.resume {
            ResumeSource::File(file) => parts.push(FormPart::File {
                name: FIELD_RESUME,
                file,
            }),
            ResumeSource::Text(text) => parts.push(FormPart::Text {
                name: FIELD_RESUME_TEXT,
                value: text,
            }),
        }
        parts.push(FormPart::Text {
            name: FIELD_JD,
            value: &self.job_description,
        });
        parts
    }

    pub fn to_form(&self) -> Result<Form, reqwest::Error> {
        let mut form = Form::new();
        for part in self.parts() {
            form = match part {
                FormPart::File { name, file } => {
                    let body = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(file.mime())?;
                    form.part(name, body)
                }
                FormPart::Text { name, value } => form.text(name, value.to_string()),
            };
        }
        Ok(form)
    }
}
