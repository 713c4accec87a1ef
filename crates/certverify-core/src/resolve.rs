//! # Field Resolution
//!
//! Lookup responses have no fixed schema: the same semantic value may arrive
//! under several keys (`id` / `certificateId` / `key` / `certId`, ...). Each
//! [`ViewField`] carries an ordered candidate list and a [`FallbackRule`];
//! resolution walks the candidates in priority order and takes the first
//! value the rule accepts.
//!
//! ## Candidate Table
//!
//! | Field | Candidates | Rule |
//! |-------|------------|------|
//! | id | `id`, `certificateId`, `key`, `certId` | non-empty |
//! | name | `name`, `studentName`, `holder` | non-empty |
//! | organization | `organization`, `org`, `issuer` | non-empty |
//! | program | `program`, `degree`, `title` | non-empty |
//! | cgpa | `cgpa`, `gpa`, `score` | non-null |
//! | issue date | `issueDate`, `issuedAt`, `date` | non-empty |

use serde::Serialize;
use serde_json::Value;

/// Rendered in place of a field no candidate key supplies.
pub const PLACEHOLDER: &str = "—";

/// Which candidate values count as "present".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackRule {
    /// Skips `null`, `false`, numeric zero and `""`.
    NonEmpty,
    /// Skips only `null`. A score of `0` is kept.
    NonNull,
}

impl FallbackRule {
    /// Whether `value` satisfies this rule.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::NonNull => !value.is_null(),
            Self::NonEmpty => match value {
                Value::Null => false,
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
                Value::String(s) => !s.is_empty(),
                Value::Array(_) | Value::Object(_) => true,
            },
        }
    }
}

/// A semantic field of a certificate as displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewField {
    Id,
    Name,
    Organization,
    Program,
    Cgpa,
    IssueDate,
}

impl ViewField {
    /// All fields in display order.
    pub const ALL: [ViewField; 6] = [
        Self::Id,
        Self::Name,
        Self::Organization,
        Self::Program,
        Self::Cgpa,
        Self::IssueDate,
    ];

    /// Response keys to try, highest priority first.
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            Self::Id => &["id", "certificateId", "key", "certId"],
            Self::Name => &["name", "studentName", "holder"],
            Self::Organization => &["organization", "org", "issuer"],
            Self::Program => &["program", "degree", "title"],
            Self::Cgpa => &["cgpa", "gpa", "score"],
            Self::IssueDate => &["issueDate", "issuedAt", "date"],
        }
    }

    pub fn rule(&self) -> FallbackRule {
        match self {
            Self::Cgpa => FallbackRule::NonNull,
            _ => FallbackRule::NonEmpty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "Certificate ID",
            Self::Name => "Name",
            Self::Organization => "Organization",
            Self::Program => "Program",
            Self::Cgpa => "CGPA / Score",
            Self::IssueDate => "Issued",
        }
    }

    /// Resolve this field from a response body.
    ///
    /// Returns `None` when `data` is not a JSON object or no candidate key
    /// holds an accepted value.
    pub fn resolve(&self, data: &Value) -> Option<String> {
        let obj = data.as_object()?;
        let rule = self.rule();
        self.candidates()
            .iter()
            .filter_map(|key| obj.get(*key))
            .find(|value| rule.accepts(value))
            .map(render_value)
    }
}

/// Strings verbatim; everything else in compact JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Display projection of a lookup response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateView {
    pub id: Option<String>,
    pub name: Option<String>,
    pub organization: Option<String>,
    pub program: Option<String>,
    pub cgpa: Option<String>,
    pub issue_date: Option<String>,
}

impl CertificateView {
    /// Resolve every field of `data`.
    pub fn from_json(data: &Value) -> Self {
        Self {
            id: ViewField::Id.resolve(data),
            name: ViewField::Name.resolve(data),
            organization: ViewField::Organization.resolve(data),
            program: ViewField::Program.resolve(data),
            cgpa: ViewField::Cgpa.resolve(data),
            issue_date: ViewField::IssueDate.resolve(data),
        }
    }

    /// Resolved value of `field`, if any.
    pub fn get(&self, field: ViewField) -> Option<&str> {
        let slot = match field {
            ViewField::Id => &self.id,
            ViewField::Name => &self.name,
            ViewField::Organization => &self.organization,
            ViewField::Program => &self.program,
            ViewField::Cgpa => &self.cgpa,
            ViewField::IssueDate => &self.issue_date,
        };
        slot.as_deref()
    }

    /// Resolved value of `field`, or [`PLACEHOLDER`].
    pub fn display(&self, field: ViewField) -> &str {
        self.get(field).unwrap_or(PLACEHOLDER)
    }

    /// `(field, display value)` pairs in display order.
    pub fn rows(&self) -> impl Iterator<Item = (ViewField, &str)> + '_ {
        ViewField::ALL.into_iter().map(move |f| (f, self.display(f)))
    }
}
