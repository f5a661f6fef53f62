use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Issued,
    Verified,
    Expired,
}

/// Offset certificate issued for a settled match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub certificate_number: String,
    pub company_name: String,
    pub power_plant_name: String,
    pub offset_amount: f64,
    pub carbon_intensity: f64,
    pub time_slot: String,
    pub issued_date: DateTime<Utc>,
    pub blockchain_hash: String,
    /// QR image of the verification URL, as an SVG `data:` URL.
    pub qr_code: String,
    pub status: CertificateStatus,
}
