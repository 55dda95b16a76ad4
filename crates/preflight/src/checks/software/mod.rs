pub mod command;
pub mod packages;
pub mod software_check;
pub use software_check::SoftwareChecker;
