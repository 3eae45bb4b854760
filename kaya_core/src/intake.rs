//! Intake Form
//!
//! Field-by-field editing of the target company, industry, up to three
//! roles and the resume attachment, with validation at attach and submit.
//! A successful submit yields an owned `IntakePayload`; it is the only way
//! to build one outside this module.

use crate::types::{Industry, ResumeFile, Role, ACCEPTED_MEDIA_TYPES, MAX_RESUME_BYTES};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub const ROLE_SLOTS: usize = 3;

/// Validation failures. `Display` is the user-facing notice text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please fill in company and industry")]
    MissingCompanyOrIndustry,

    #[error("Please select at least one job role")]
    MissingRole,

    #[error("Please upload your resume")]
    MissingResume,

    #[error("Please upload a PDF or DOCX file")]
    UnsupportedFileType { media_type: String },

    #[error("File size must be less than 10MB")]
    FileTooLarge { size_bytes: u64 },

    #[error("Could not read {path}: {reason}")]
    UnreadableFile { path: String, reason: String },

    #[error("Role slot {0} does not exist")]
    InvalidRoleSlot(usize),
}

/// A validated intake submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakePayload {
    target_company: String,
    industry: Industry,
    target_roles: [Option<Role>; ROLE_SLOTS],
    resume_file: ResumeFile,
}

impl IntakePayload {
    pub fn target_company(&self) -> &str {
        &self.target_company
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    /// All three slots, in order. Slot 0 is always set.
    pub fn role_slots(&self) -> &[Option<Role>; ROLE_SLOTS] {
        &self.target_roles
    }

    /// Chosen roles in slot order, skipping empty slots
    pub fn roles(&self) -> Vec<Role> {
        self.target_roles.iter().flatten().copied().collect()
    }

    pub fn resume_file(&self) -> &ResumeFile {
        &self.resume_file
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub company: String,
    pub industry: Option<Industry>,
    pub roles: [Option<Role>; ROLE_SLOTS],
    pub resume: Option<ResumeFile>,
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_company(&mut self, company: impl Into<String>) {
        self.company = company.into();
    }

    pub fn select_industry(&mut self, industry: Option<Industry>) {
        self.industry = industry;
    }

    /// Set or clear one of the three role slots
    pub fn select_role(&mut self, slot: usize, role: Option<Role>) -> Result<(), IntakeError> {
        let entry = self
            .roles
            .get_mut(slot)
            .ok_or(IntakeError::InvalidRoleSlot(slot))?;
        *entry = role;
        Ok(())
    }

    /// Attach a resume after checking type and size.
    ///
    /// A rejected file clears any previous attachment; every other field
    /// is left untouched.
    pub fn attach_resume(&mut self, file: ResumeFile) -> Result<(), IntakeError> {
        if let Err(e) = check_resume(&file) {
            log::info!("Rejected resume {}: {}", file.name, e);
            self.resume = None;
            return Err(e);
        }

        log::info!(
            "Attached resume {} ({} bytes, {})",
            file.name,
            file.size_bytes,
            file.media_type
        );
        self.resume = Some(file);
        Ok(())
    }

    /// Attach a local file, as picked in a file dialog or dropped on the
    /// terminal. An unreadable path leaves the current attachment in place.
    pub fn attach_resume_path(&mut self, path: &Path) -> Result<&ResumeFile, IntakeError> {
        let file = ResumeFile::from_path(path).map_err(|e| IntakeError::UnreadableFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        self.attach_resume(file)?;
        self.resume.as_ref().ok_or(IntakeError::MissingResume)
    }

    pub fn remove_resume(&mut self) -> Option<ResumeFile> {
        self.resume.take()
    }

    /// Validate the whole form. The form itself is never modified.
    pub fn submit(&self) -> Result<IntakePayload, IntakeError> {
        let company = self.company.trim();
        let industry = match self.industry {
            Some(industry) if !company.is_empty() => industry,
            _ => return Err(IntakeError::MissingCompanyOrIndustry),
        };

        if self.roles[0].is_none() {
            return Err(IntakeError::MissingRole);
        }

        let resume = self.resume.as_ref().ok_or(IntakeError::MissingResume)?;
        // Attachments are checked on attach; fields are public so recheck.
        check_resume(resume)?;

        Ok(IntakePayload {
            target_company: company.to_string(),
            industry,
            target_roles: self.roles,
            resume_file: resume.clone(),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn check_resume(file: &ResumeFile) -> Result<(), IntakeError> {
    if !ACCEPTED_MEDIA_TYPES.contains(&file.media_type.as_str()) {
        return Err(IntakeError::UnsupportedFileType {
            media_type: file.media_type.clone(),
        });
    }

    if file.size_bytes > MAX_RESUME_BYTES {
        return Err(IntakeError::FileTooLarge {
            size_bytes: file.size_bytes,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MEDIA_TYPE_DOCX, MEDIA_TYPE_PDF};

    fn pdf(size_bytes: u64) -> ResumeFile {
        ResumeFile::new("resume.pdf", MEDIA_TYPE_PDF, size_bytes)
    }

    fn filled_form() -> IntakeForm {
        let mut form = IntakeForm::new();
        form.set_company("Google");
        form.select_industry(Some(Industry::Technology));
        form.select_role(0, Some(Role::SoftwareEngineer)).unwrap();
        form.attach_resume(pdf(1_000_000)).unwrap();
        form
    }

    #[test]
    fn test_valid_form_produces_payload() {
        let payload = filled_form().submit().unwrap();
        assert_eq!(payload.target_company(), "Google");
        assert_eq!(payload.industry(), Industry::Technology);
        assert_eq!(payload.role_slots(), &[Some(Role::SoftwareEngineer), None, None]);
        assert_eq!(payload.roles(), vec![Role::SoftwareEngineer]);
        assert_eq!(payload.resume_file().size_bytes, 1_000_000);
    }

    #[test]
    fn test_every_missing_required_field_is_rejected() {
        // (company, industry, role, resume)
        for mask in 0u8..16 {
            if mask == 0b1111 {
                continue;
            }
            let mut form = IntakeForm::new();
            if mask & 0b1000 != 0 {
                form.set_company("Google");
            }
            if mask & 0b0100 != 0 {
                form.select_industry(Some(Industry::Finance));
            }
            if mask & 0b0010 != 0 {
                form.select_role(0, Some(Role::DataScientist)).unwrap();
            }
            if mask & 0b0001 != 0 {
                form.attach_resume(pdf(10)).unwrap();
            }
            let before = form.clone();
            assert!(form.submit().is_err(), "mask {:04b} should be rejected", mask);
            assert_eq!(form, before);
        }
    }

    #[test]
    fn test_rejection_order_matches_form_layout() {
        let mut form = IntakeForm::new();
        assert_eq!(form.submit(), Err(IntakeError::MissingCompanyOrIndustry));

        form.set_company("Acme");
        assert_eq!(form.submit(), Err(IntakeError::MissingCompanyOrIndustry));

        form.select_industry(Some(Industry::Retail));
        assert_eq!(form.submit(), Err(IntakeError::MissingRole));

        form.select_role(0, Some(Role::SalesExecutive)).unwrap();
        assert_eq!(form.submit(), Err(IntakeError::MissingResume));
    }

    #[test]
    fn test_whitespace_company_counts_as_missing() {
        let mut form = filled_form();
        form.set_company("   ");
        assert_eq!(form.submit(), Err(IntakeError::MissingCompanyOrIndustry));
    }

    #[test]
    fn test_optional_slots_without_first_role_are_rejected() {
        let mut form = filled_form();
        form.select_role(0, None).unwrap();
        form.select_role(1, Some(Role::ProductManager)).unwrap();
        assert_eq!(form.submit(), Err(IntakeError::MissingRole));
    }

    #[test]
    fn test_unsupported_type_clears_attachment_only() {
        let mut form = filled_form();
        let err = form
            .attach_resume(ResumeFile::new("cv.txt", "text/plain", 100))
            .unwrap_err();

        assert_eq!(err.to_string(), "Please upload a PDF or DOCX file");
        assert!(form.resume.is_none());
        assert_eq!(form.company, "Google");
        assert_eq!(form.industry, Some(Industry::Technology));
        assert_eq!(form.roles[0], Some(Role::SoftwareEngineer));
    }

    #[test]
    fn test_oversized_file_clears_attachment_only() {
        let mut form = filled_form();
        let err = form.attach_resume(pdf(MAX_RESUME_BYTES + 1)).unwrap_err();

        assert_eq!(
            err,
            IntakeError::FileTooLarge {
                size_bytes: MAX_RESUME_BYTES + 1
            }
        );
        assert!(form.resume.is_none());
        assert_eq!(form.company, "Google");
    }

    #[test]
    fn test_exact_size_limit_is_accepted() {
        let mut form = IntakeForm::new();
        assert!(form
            .attach_resume(ResumeFile::new("cv.docx", MEDIA_TYPE_DOCX, MAX_RESUME_BYTES))
            .is_ok());
    }

    #[test]
    fn test_attach_resume_path() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("cv.docx");
        std::fs::write(&good, b"PK").unwrap();
        let bad = dir.path().join("cv.txt");
        std::fs::write(&bad, b"plain").unwrap();

        let mut form = IntakeForm::new();
        let attached = form.attach_resume_path(&good).unwrap();
        assert_eq!(attached.media_type, MEDIA_TYPE_DOCX);
        assert_eq!(attached.size_bytes, 2);

        // Missing path keeps the current attachment
        let missing = dir.path().join("nope.pdf");
        assert!(matches!(
            form.attach_resume_path(&missing),
            Err(IntakeError::UnreadableFile { .. })
        ));
        assert!(form.resume.is_some());

        // Wrong type discards it
        assert!(matches!(
            form.attach_resume_path(&bad),
            Err(IntakeError::UnsupportedFileType { .. })
        ));
        assert!(form.resume.is_none());
    }

    #[test]
    fn test_remove_resume() {
        let mut form = filled_form();
        let removed = form.remove_resume().unwrap();
        assert_eq!(removed.name, "resume.pdf");
        assert_eq!(form.submit(), Err(IntakeError::MissingResume));
    }

    #[test]
    fn test_invalid_role_slot() {
        let mut form = IntakeForm::new();
        assert_eq!(
            form.select_role(3, Some(Role::UxDesigner)),
            Err(IntakeError::InvalidRoleSlot(3))
        );
    }

    #[test]
    fn test_submit_rechecks_directly_assigned_resume() {
        let mut form = filled_form();
        form.resume = Some(ResumeFile::new("cv.png", "image/png", 10));
        assert!(matches!(
            form.submit(),
            Err(IntakeError::UnsupportedFileType { .. })
        ));
    }
}
