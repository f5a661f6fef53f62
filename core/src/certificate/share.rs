use crate::certificate::service::CertificateService;
use crate::model::Certificate;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareLinks {
    pub linkedin: String,
    pub twitter: String,
    pub facebook: String,
    pub email: String,
}

/// Groups the whole part with commas and keeps up to three decimals.
fn group_thousands(value: f64) -> String {
    let thousandths = (value.abs() * 1000.0).round() as u64;
    let digits = (thousandths / 1000).to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let fraction = thousandths % 1000;
    if fraction > 0 {
        grouped.push('.');
        grouped.push_str(format!("{:03}", fraction).trim_end_matches('0'));
    }
    if value < 0.0 && thousandths > 0 {
        grouped.insert(0, '-');
    }
    grouped
}

pub fn share_links(certificate: &Certificate) -> ShareLinks {
    let message = format!(
        "{} offset {} tCO2 through the CarbonZero platform! #CarbonNeutral #ESG #CarbonZero",
        certificate.company_name,
        group_thousands(certificate.offset_amount)
    );
    let url = CertificateService::verification_url(&certificate.id);
    let msg = encode(&message);
    let link = encode(&url);

    ShareLinks {
        linkedin: format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}&summary={}",
            link, msg
        ),
        twitter: format!("https://twitter.com/intent/tweet?text={}&url={}", msg, link),
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            link, msg
        ),
        email: format!(
            "mailto:?subject={}&body={}",
            encode("Carbon offset certificate"),
            encode(&format!("{}\n\nVerify certificate: {}", message, url))
        ),
    }
}
