//! Supplier safety scoring
//!
//! A supplier's safety rating is a weighted blend of five signals, normalised
//! to a 0-5 scale and rounded to one decimal place:
//!
//! | Signal              | Weight |
//! |---------------------|--------|
//! | License validity    | 30     |
//! | External rating     | 25     |
//! | Delivery success    | 20     |
//! | Account age         | 15     |
//! | Verification status | 10     |
//!
//! Every input is optional or defaulted, so scoring never fails.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Supplier, VerificationStatus};

pub const LICENSE_WEIGHT: f64 = 30.0;
pub const EXTERNAL_RATING_WEIGHT: f64 = 25.0;
pub const DELIVERY_SUCCESS_WEIGHT: f64 = 20.0;
pub const ACCOUNT_AGE_WEIGHT: f64 = 15.0;
pub const VERIFICATION_WEIGHT: f64 = 10.0;

/// Sum of all signal weights
pub const TOTAL_WEIGHT: f64 = LICENSE_WEIGHT
    + EXTERNAL_RATING_WEIGHT
    + DELIVERY_SUCCESS_WEIGHT
    + ACCOUNT_AGE_WEIGHT
    + VERIFICATION_WEIGHT;

/// Upper bound of the rating scale
pub const MAX_SAFETY_RATING: f64 = 5.0;

const VALID_LICENSE_POINTS: f64 = 30.0;
const EXPIRED_LICENSE_POINTS: f64 = 10.0;
const MISSING_LICENSE_POINTS: f64 = 5.0;
const MISSING_EXTERNAL_RATING_POINTS: f64 = 10.0;
/// Success rate assumed for suppliers without any listings yet
const NEUTRAL_SUCCESS_RATE: f64 = 0.5;
const DAYS_PER_MONTH: i64 = 30;
const MONTHS_FOR_FULL_AGE_CREDIT: f64 = 12.0;

// Analysis thresholds
const LOW_SUCCESS_RATE: f64 = 0.8;
const LOW_EXTERNAL_RATING: f64 = 3.5;
const NEW_ACCOUNT_MONTHS: i64 = 3;
const LICENSE_RENEWAL_WINDOW_DAYS: i64 = 30;

/// Points earned per signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyBreakdown {
    pub license: f64,
    pub external_rating: f64,
    pub delivery_success: f64,
    pub account_age: f64,
    pub verification: f64,
}

impl SafetyBreakdown {
    pub fn total(&self) -> f64 {
        self.license + self.external_rating + self.delivery_success + self.account_age + self.verification
    }

    /// Normalised 0-5 rating, rounded to one decimal place
    pub fn rating(&self) -> f64 {
        round_to_tenth((self.total() / TOTAL_WEIGHT) * MAX_SAFETY_RATING)
    }
}

/// Compute every signal for `supplier` as of `now`
pub fn score_breakdown(supplier: &Supplier, now: DateTime<Utc>) -> SafetyBreakdown {
    let license = if supplier.has_license_number() {
        match supplier.license_expiry_date {
            Some(expiry) if expiry > now => VALID_LICENSE_POINTS,
            Some(_) => EXPIRED_LICENSE_POINTS,
            None => MISSING_LICENSE_POINTS,
        }
    } else {
        MISSING_LICENSE_POINTS
    };

    let external_rating = match external_rating(supplier) {
        Some(rating) => (rating / MAX_SAFETY_RATING) * EXTERNAL_RATING_WEIGHT,
        None => MISSING_EXTERNAL_RATING_POINTS,
    };

    let success_rate = supplier.success_rate().unwrap_or(NEUTRAL_SUCCESS_RATE);
    let delivery_success = success_rate * DELIVERY_SUCCESS_WEIGHT;

    let months = account_age_months(supplier.created_at, now) as f64;
    let account_age = (months / MONTHS_FOR_FULL_AGE_CREDIT).min(1.0) * ACCOUNT_AGE_WEIGHT;

    let verification = match supplier.verification_status {
        VerificationStatus::Verified => VERIFICATION_WEIGHT,
        VerificationStatus::Pending => VERIFICATION_WEIGHT / 2.0,
        VerificationStatus::Rejected => 0.0,
    };

    SafetyBreakdown {
        license,
        external_rating,
        delivery_success,
        account_age,
        verification,
    }
}

/// Safety rating in `[0, 5]` with one decimal place
pub fn compute_safety_rating(supplier: &Supplier, now: DateTime<Utc>) -> f64 {
    score_breakdown(supplier, now).rating()
}

/// Round half away from zero to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whole 30-day months between `created_at` and `now`, never negative
pub fn account_age_months(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let age = (now - created_at).max(Duration::zero());
    age.num_days() / DAYS_PER_MONTH
}

/// Whole days between `created_at` and `now`, never negative
pub fn account_age_days(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - created_at).max(Duration::zero()).num_days()
}

/// License number present and expiry date strictly in the future
pub fn is_license_valid(supplier: &Supplier, now: DateTime<Utc>) -> bool {
    supplier.has_license_number()
        && supplier
            .license_expiry_date
            .map(|expiry| expiry > now)
            .unwrap_or(false)
}

/// The external rating, when one exists. A zero rating counts as missing.
fn external_rating(supplier: &Supplier) -> Option<f64> {
    supplier
        .google_rating
        .filter(|r| r.is_finite() && *r > 0.0)
        .map(|r| r.min(MAX_SAFETY_RATING))
}

// ============================================================================
// Supplier Analysis
// ============================================================================

/// Trust band shown next to a rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SafetyBand {
    /// 4.0 and above
    HighlyRecommended,
    /// 3.0 to 3.9
    ProceedWithCaution,
    /// Below 3.0
    ExtraVerificationRequired,
}

impl SafetyBand {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            SafetyBand::HighlyRecommended
        } else if rating >= 3.0 {
            SafetyBand::ProceedWithCaution
        } else {
            SafetyBand::ExtraVerificationRequired
        }
    }
}

impl std::fmt::Display for SafetyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyBand::HighlyRecommended => write!(f, "Highly Recommended"),
            SafetyBand::ProceedWithCaution => write!(f, "Proceed with Caution"),
            SafetyBand::ExtraVerificationRequired => write!(f, "Extra Verification Required"),
        }
    }
}

/// Concerns surfaced by [`analyze_supplier`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    MissingLicense,
    ExpiredLicense,
    LicenseExpiringSoon,
    NoOnlineRating,
    LowOnlineRating,
    LowDeliverySuccess,
    NoDeliveryHistory,
    NewAccount,
    VerificationPending,
    VerificationRejected,
}

impl RiskFactor {
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskFactor::MissingLicense | RiskFactor::ExpiredLicense => {
                "Request an up-to-date food safety license"
            }
            RiskFactor::LicenseExpiringSoon => "Remind the supplier to renew their license",
            RiskFactor::NoOnlineRating => "Check for customer reviews on other platforms",
            RiskFactor::LowOnlineRating => "Review recent customer feedback for hygiene complaints",
            RiskFactor::LowDeliverySuccess => "Confirm pickup details with the supplier in advance",
            RiskFactor::NoDeliveryHistory | RiskFactor::NewAccount => {
                "Start with small pickups to build a track record"
            }
            RiskFactor::VerificationPending => "Complete admin verification of this supplier",
            RiskFactor::VerificationRejected => {
                "Do not accept donations until verification is resolved"
            }
        }
    }
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RiskFactor::MissingLicense => "No food safety license on file",
            RiskFactor::ExpiredLicense => "Food safety license expired",
            RiskFactor::LicenseExpiringSoon => "License expires within 30 days",
            RiskFactor::NoOnlineRating => "No online reputation data",
            RiskFactor::LowOnlineRating => "Low online rating",
            RiskFactor::LowDeliverySuccess => "Delivery success rate below 80%",
            RiskFactor::NoDeliveryHistory => "No delivery history",
            RiskFactor::NewAccount => "Account younger than 3 months",
            RiskFactor::VerificationPending => "Verification pending",
            RiskFactor::VerificationRejected => "Verification rejected",
        };
        f.write_str(text)
    }
}

/// License section of a supplier analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationSummary {
    pub license_valid: bool,
    pub license_number: Option<String>,
    pub license_expiry_date: Option<DateTime<Utc>>,
    pub verification_status: VerificationStatus,
}

/// Delivery track record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_listings: u32,
    pub successful_deliveries: u32,
    /// 0.0-1.0, zero without history
    pub success_rate: f64,
}

/// Online reputation and tenure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationSummary {
    pub google_rating: Option<f64>,
    pub google_place_id: Option<String>,
    /// Days since the supplier registered
    pub account_age_days: i64,
}

/// Full safety report for one supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierAnalysis {
    pub supplier_id: uuid::Uuid,
    pub business_name: String,
    pub safety_rating: f64,
    pub band: SafetyBand,
    pub breakdown: SafetyBreakdown,
    pub verification: VerificationSummary,
    pub performance: PerformanceSummary,
    pub reputation: ReputationSummary,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Risk factors that apply to `supplier` as of `now`, in a stable order
pub fn risk_factors(supplier: &Supplier, now: DateTime<Utc>) -> Vec<RiskFactor> {
    let mut risks = Vec::new();

    match (supplier.has_license_number(), supplier.license_expiry_date) {
        (true, Some(expiry)) if expiry <= now => risks.push(RiskFactor::ExpiredLicense),
        (true, Some(expiry)) if expiry - now <= Duration::days(LICENSE_RENEWAL_WINDOW_DAYS) => {
            risks.push(RiskFactor::LicenseExpiringSoon)
        }
        (true, Some(_)) => {}
        _ => risks.push(RiskFactor::MissingLicense),
    }

    match external_rating(supplier) {
        None => risks.push(RiskFactor::NoOnlineRating),
        Some(rating) if rating < LOW_EXTERNAL_RATING => risks.push(RiskFactor::LowOnlineRating),
        Some(_) => {}
    }

    match supplier.success_rate() {
        None => risks.push(RiskFactor::NoDeliveryHistory),
        Some(rate) if rate < LOW_SUCCESS_RATE => risks.push(RiskFactor::LowDeliverySuccess),
        Some(_) => {}
    }

    if account_age_months(supplier.created_at, now) < NEW_ACCOUNT_MONTHS {
        risks.push(RiskFactor::NewAccount);
    }

    match supplier.verification_status {
        VerificationStatus::Pending => risks.push(RiskFactor::VerificationPending),
        VerificationStatus::Rejected => risks.push(RiskFactor::VerificationRejected),
        VerificationStatus::Verified => {}
    }

    risks
}

/// Build the safety report shown on the supplier analysis screen
pub fn analyze_supplier(supplier: &Supplier, now: DateTime<Utc>) -> SupplierAnalysis {
    let breakdown = score_breakdown(supplier, now);
    let safety_rating = breakdown.rating();
    let band = SafetyBand::from_rating(safety_rating);
    let risks = risk_factors(supplier, now);

    let mut recommendations: Vec<String> = vec![match band {
        SafetyBand::HighlyRecommended => "Safe to accept donations from this supplier",
        SafetyBand::ProceedWithCaution => "Inspect food on pickup before accepting",
        SafetyBand::ExtraVerificationRequired => "Verify food safety documents before every pickup",
    }
    .to_string()];
    for risk in &risks {
        let rec = risk.recommendation().to_string();
        if !recommendations.contains(&rec) {
            recommendations.push(rec);
        }
    }

    SupplierAnalysis {
        supplier_id: supplier.id,
        business_name: supplier.business_name.clone(),
        safety_rating,
        band,
        breakdown,
        verification: VerificationSummary {
            license_valid: is_license_valid(supplier, now),
            license_number: supplier.license_number.clone(),
            license_expiry_date: supplier.license_expiry_date,
            verification_status: supplier.verification_status,
        },
        performance: PerformanceSummary {
            total_listings: supplier.total_listings,
            successful_deliveries: supplier.successful_deliveries,
            success_rate: supplier.success_rate().unwrap_or(0.0),
        },
        reputation: ReputationSummary {
            google_rating: supplier.google_rating,
            google_place_id: supplier.google_place_id.clone(),
            account_age_days: account_age_days(supplier.created_at, now),
        },
        risk_factors: risks.iter().map(|r| r.to_string()).collect(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn blank_supplier() -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            business_name: "Corner Bakery".to_string(),
            business_type: "bakery".to_string(),
            email: "bakery@example.com".to_string(),
            phone: "+91-555-0100".to_string(),
            address: "1 Baker Lane, Delhi".to_string(),
            latitude: 28.6139,
            longitude: 77.2090,
            license_number: None,
            license_expiry_date: None,
            google_place_id: None,
            google_rating: None,
            total_listings: 0,
            successful_deliveries: 0,
            safety_rating: 0.0,
            verification_status: VerificationStatus::Pending,
            created_at: now(),
        }
    }

    #[test]
    fn test_weights_sum_to_100() {
        assert_eq!(TOTAL_WEIGHT, 100.0);
    }

    #[test]
    fn test_blank_supplier_breakdown() {
        let b = score_breakdown(&blank_supplier(), now());
        assert_eq!(b.license, 5.0);
        assert_eq!(b.external_rating, 10.0);
        assert_eq!(b.delivery_success, 10.0);
        assert_eq!(b.account_age, 0.0);
        assert_eq!(b.verification, 5.0);
        assert_eq!(b.rating(), 1.5);
    }

    #[test]
    fn test_blank_license_number_counts_as_missing() {
        let mut s = blank_supplier();
        s.license_number = Some("   ".to_string());
        s.license_expiry_date = Some(now() + Duration::days(365));
        assert_eq!(score_breakdown(&s, now()).license, MISSING_LICENSE_POINTS);
    }

    #[test]
    fn test_license_expiring_exactly_now_is_expired() {
        let mut s = blank_supplier();
        s.license_number = Some("FSSAI-1".to_string());
        s.license_expiry_date = Some(now());
        assert_eq!(score_breakdown(&s, now()).license, EXPIRED_LICENSE_POINTS);
        assert!(!is_license_valid(&s, now()));
    }

    #[test]
    fn test_zero_google_rating_counts_as_missing() {
        let mut s = blank_supplier();
        s.google_rating = Some(0.0);
        assert_eq!(score_breakdown(&s, now()).external_rating, 10.0);
    }

    #[test]
    fn test_account_age_months_floor() {
        let created = now() - Duration::days(59);
        assert_eq!(account_age_months(created, now()), 1);
        let created = now() - Duration::days(60);
        assert_eq!(account_age_months(created, now()), 2);
    }

    #[test]
    fn test_future_created_at_clamps_to_zero() {
        let created = now() + Duration::days(90);
        assert_eq!(account_age_months(created, now()), 0);
        assert_eq!(account_age_days(created, now()), 0);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(1.75), 1.8);
        assert_eq!(round_to_tenth(4.8083), 4.8);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(SafetyBand::from_rating(4.0), SafetyBand::HighlyRecommended);
        assert_eq!(SafetyBand::from_rating(3.9), SafetyBand::ProceedWithCaution);
        assert_eq!(SafetyBand::from_rating(3.0), SafetyBand::ProceedWithCaution);
        assert_eq!(SafetyBand::from_rating(2.9), SafetyBand::ExtraVerificationRequired);
    }

    #[test]
    fn test_license_expiring_soon_risk() {
        let mut s = blank_supplier();
        s.license_number = Some("FSSAI-1".to_string());
        s.license_expiry_date = Some(now() + Duration::days(10));
        let risks = risk_factors(&s, now());
        assert!(risks.contains(&RiskFactor::LicenseExpiringSoon));
        assert!(!risks.contains(&RiskFactor::ExpiredLicense));
    }

    #[test]
    fn test_reputation_reports_age_in_days() {
        let s = Supplier {
            created_at: now() - Duration::days(45),
            ..blank_supplier()
        };
        let analysis = analyze_supplier(&s, now());
        assert_eq!(analysis.reputation.account_age_days, 45);

        let json = serde_json::to_value(&analysis.reputation).unwrap();
        assert_eq!(json["accountAgeDays"], 45);
        assert!(json.get("accountAge").is_none());
    }
}
