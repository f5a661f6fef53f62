use crate::model::{Certificate, CertificateStatus, Company, MatchResult};
use crate::prelude::{MarketError, MarketResult};
use crate::random::RandomSource;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Datelike, Utc};
use log::info;
use qrcode::render::svg;
use qrcode::QrCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const VERIFY_BASE_URL: &str = "https://carbonzero.platform.com/verify";

const FULL_DAY_SLOT: &str = "00:00-24:00";
const HASH_DIGITS: usize = 64;
const QR_SIZE: u32 = 200;
const QR_DARK: &str = "#2E7D32";
const QR_LIGHT: &str = "#FFFFFF";
const INVALID_THRESHOLD: f64 = 0.1;
const VALID_MESSAGE: &str = "Certificate confirmed on the blockchain.";
const INVALID_MESSAGE: &str = "Certificate not found or forged.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verification {
    pub valid: bool,
    pub message: String,
}

/// Issues certificates for settled matches and simulates their ledger checks.
#[derive(Debug, Clone)]
pub struct CertificateService {
    verification_delay: Duration,
    pdf_delay: Duration,
}

impl CertificateService {
    pub fn new(verification_delay: Duration, pdf_delay: Duration) -> Self {
        Self {
            verification_delay,
            pdf_delay,
        }
    }

    pub fn verification_url(certificate_id: &str) -> String {
        format!("{}/{}", VERIFY_BASE_URL, certificate_id)
    }

    /// SVG QR code of `url`, as a base64 `data:` URL.
    pub fn qr_data_url(url: &str) -> MarketResult<String> {
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| MarketError::Internal(format!("rendering QR code: {}", e)))?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(QR_SIZE, QR_SIZE)
            .dark_color(svg::Color(QR_DARK))
            .light_color(svg::Color(QR_LIGHT))
            .build();
        Ok(format!("data:image/svg+xml;base64,{}", STANDARD.encode(image)))
    }

    pub fn issue<R: RandomSource>(
        &self,
        result: &MatchResult,
        company: &Company,
        contract_id: &str,
        rng: &mut R,
    ) -> MarketResult<Certificate> {
        let issued = Utc::now();
        let millis = issued.timestamp_millis().to_string();
        let tail = &millis[millis.len().saturating_sub(6)..];
        let id = format!("cert_{}", millis);
        let qr_code = Self::qr_data_url(&Self::verification_url(&id))?;

        let blockchain_hash: String = std::iter::once("0x".to_string())
            .chain((0..HASH_DIGITS).map(|_| rng.hex_digit().to_string()))
            .collect();

        info!("issuing certificate {} under contract {}", id, contract_id);
        Ok(Certificate {
            certificate_number: format!("KCZ-{}-{}", issued.year(), tail),
            qr_code,
            id,
            company_name: company.name.clone(),
            power_plant_name: result.plant_name.clone(),
            offset_amount: result.offset_amount,
            carbon_intensity: result.carbon_intensity,
            time_slot: result
                .time_slots
                .first()
                .cloned()
                .unwrap_or_else(|| FULL_DAY_SLOT.to_string()),
            issued_date: issued,
            blockchain_hash,
            status: CertificateStatus::Issued,
        })
    }

    pub async fn verify<R: RandomSource>(&self, certificate_id: &str, rng: &mut R) -> Verification {
        if !self.verification_delay.is_zero() {
            tokio::time::sleep(self.verification_delay).await;
        }
        let valid = rng.next_unit() > INVALID_THRESHOLD;
        info!("verification of {} -> {}", certificate_id, valid);
        Verification {
            valid,
            message: if valid { VALID_MESSAGE } else { INVALID_MESSAGE }.to_string(),
        }
    }

    /// Placeholder document as a `data:` URL.
    pub async fn render_pdf(&self, certificate: &Certificate) -> String {
        if !self.pdf_delay.is_zero() {
            tokio::time::sleep(self.pdf_delay).await;
        }
        let body = format!("Certificate PDF for {}", certificate.certificate_number);
        format!("data:application/pdf;base64,{}", STANDARD.encode(body))
    }
}

impl Default for CertificateService {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000), Duration::from_millis(2000))
    }
}
