pub mod service;
pub mod share;

pub use service::{CertificateService, Verification, VERIFY_BASE_URL};
pub use share::{share_links, ShareLinks};
