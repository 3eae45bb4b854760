/// Screen module exports

pub mod intake;
pub mod landing;
pub mod processing;
pub mod report;

pub use intake::{normalize_dropped_path, IntakeField, IntakeScreen, IntakeScreenState};
pub use landing::LandingScreen;
pub use processing::{ProcessingScreen, ProcessingScreenState};
pub use report::{ReportScreen, ReportScreenState, ReportTab};
