//! Validate command: structural PDF check for a local file.

use ppd_core::integrity;
use std::path::Path;

/// Print the structural-PDF verdict for the given file.
pub fn run_validate(path: &Path) {
    if integrity::validate_pdf(path) {
        println!("{}: valid PDF", path.display());
    } else {
        println!("{}: not a valid PDF", path.display());
    }
}
