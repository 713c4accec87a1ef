//! # Certificate Records
//!
//! [`CertificateForm`] holds raw registration input exactly as the user typed
//! it. [`CertificateForm::to_request`] is the single construction path for a
//! [`RegistrationRequest`]: it trims every field and enforces that `id` and
//! `name` are present before anything reaches the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Example registration payload shown to operators.
pub const SAMPLE_PAYLOAD: &str = r#"{
  "id": "SUST-2020-0001",
  "name": "Jane Doe",
  "organization": "SUST",
  "program": "BSc in CSE",
  "cgpa": "3.95",
  "issueDate": "2020-09-15"
}"#;

/// A field of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Name,
    Organization,
    Program,
    Cgpa,
    IssueDate,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 6] = [
        Self::Id,
        Self::Name,
        Self::Organization,
        Self::Program,
        Self::Cgpa,
        Self::IssueDate,
    ];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Organization => "organization",
            Self::Program => "program",
            Self::Cgpa => "cgpa",
            Self::IssueDate => "issueDate",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Organization => "Organization",
            Self::Program => "Program",
            Self::Cgpa => "CGPA",
            Self::IssueDate => "Issue Date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = ValidationError;

    /// Accepts the wire name, case-insensitively, plus `issue-date` and
    /// `issue_date` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "organization" => Ok(Self::Organization),
            "program" => Ok(Self::Program),
            "cgpa" => Ok(Self::Cgpa),
            "issuedate" | "issue-date" | "issue_date" => Ok(Self::IssueDate),
            _ => Err(ValidationError::UnknownField(s.trim().to_string())),
        }
    }
}

/// Raw, untrimmed registration input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateForm {
    pub id: String,
    pub name: String,
    pub organization: String,
    pub program: String,
    pub cgpa: String,
    pub issue_date: String,
}

impl CertificateForm {
    /// Read a field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Name => &self.name,
            FormField::Organization => &self.organization,
            FormField::Program => &self.program,
            FormField::Cgpa => &self.cgpa,
            FormField::IssueDate => &self.issue_date,
        }
    }

    /// Overwrite a field with raw input.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Id => &mut self.id,
            FormField::Name => &mut self.name,
            FormField::Organization => &mut self.organization,
            FormField::Program => &mut self.program,
            FormField::Cgpa => &mut self.cgpa,
            FormField::IssueDate => &mut self.issue_date,
        };
        *slot = value.into();
    }

    /// Reset every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every field is the empty string.
    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Trim all fields and check the required ones.
    pub fn to_request(&self) -> Result<RegistrationRequest, ValidationError> {
        let request = RegistrationRequest {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            organization: self.organization.trim().to_string(),
            program: self.program.trim().to_string(),
            cgpa: self.cgpa.trim().to_string(),
            issue_date: self.issue_date.trim().to_string(),
        };
        if request.id.is_empty() || request.name.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        Ok(request)
    }
}

/// JSON body of `POST /api/certificates`.
///
/// Optional fields are always present, as empty strings when not supplied.
///
/// # Invariants
///
/// - `id` and `name` are non-empty.
/// - No field has leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    id: String,
    name: String,
    organization: String,
    program: String,
    cgpa: String,
    issue_date: String,
}

impl RegistrationRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn cgpa(&self) -> &str {
        &self.cgpa
    }

    pub fn issue_date(&self) -> &str {
        &self.issue_date
    }
}
