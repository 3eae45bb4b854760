//! Intake Types
//!
//! Closed option sets offered by the intake form and the metadata-only
//! resume reference. Ids are stable kebab-case strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const MEDIA_TYPE_PDF: &str = "application/pdf";
pub const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resume media types accepted by the intake form
pub const ACCEPTED_MEDIA_TYPES: [&str; 2] = [MEDIA_TYPE_PDF, MEDIA_TYPE_DOCX];

/// 10 MiB
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

// ============================================================
// INDUSTRY
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Consulting,
    Education,
    Retail,
    Manufacturing,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Technology,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Consulting,
        Industry::Education,
        Industry::Retail,
        Industry::Manufacturing,
        Industry::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::Finance => "finance",
            Industry::Healthcare => "healthcare",
            Industry::Consulting => "consulting",
            Industry::Education => "education",
            Industry::Retail => "retail",
            Industry::Manufacturing => "manufacturing",
            Industry::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Consulting => "Consulting",
            Industry::Education => "Education",
            Industry::Retail => "Retail",
            Industry::Manufacturing => "Manufacturing",
            Industry::Other => "Other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::ALL
            .iter()
            .copied()
            .find(|i| i.id() == s)
            .ok_or_else(|| UnknownOption::new("industry", s))
    }
}

// ============================================================
// ROLE
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SoftwareEngineer,
    DataScientist,
    ProductManager,
    UxDesigner,
    DevopsEngineer,
    BusinessAnalyst,
    MarketingManager,
    SalesExecutive,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::SoftwareEngineer,
        Role::DataScientist,
        Role::ProductManager,
        Role::UxDesigner,
        Role::DevopsEngineer,
        Role::BusinessAnalyst,
        Role::MarketingManager,
        Role::SalesExecutive,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Role::SoftwareEngineer => "software-engineer",
            Role::DataScientist => "data-scientist",
            Role::ProductManager => "product-manager",
            Role::UxDesigner => "ux-designer",
            Role::DevopsEngineer => "devops-engineer",
            Role::BusinessAnalyst => "business-analyst",
            Role::MarketingManager => "marketing-manager",
            Role::SalesExecutive => "sales-executive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::SoftwareEngineer => "Software Engineer",
            Role::DataScientist => "Data Scientist",
            Role::ProductManager => "Product Manager",
            Role::UxDesigner => "UX Designer",
            Role::DevopsEngineer => "DevOps Engineer",
            Role::BusinessAnalyst => "Business Analyst",
            Role::MarketingManager => "Marketing Manager",
            Role::SalesExecutive => "Sales Executive",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.id() == s)
            .ok_or_else(|| UnknownOption::new("role", s))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

// ============================================================
// RESUME FILE
// ============================================================

/// Reference to a user-chosen resume. Only metadata is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFile {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size_bytes,
            path: None,
        }
    }

    /// Build a reference from a local path using filesystem metadata.
    ///
    /// The media type is derived from the extension, the same way a browser
    /// fills in `File.type`. The file is never opened for reading.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            media_type: media_type_for_path(path).to_string(),
            size_bytes: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Guess a media type from a file extension. Unknown extensions map to an
/// empty string, which is what browsers report for unrecognised files.
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => MEDIA_TYPE_PDF,
        "docx" => MEDIA_TYPE_DOCX,
        "doc" => "application/msword",
        "txt" => "text/plain",
        "rtf" => "application/rtf",
        "odt" => "application/vnd.oasis.opendocument.text",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "",
    }
}
