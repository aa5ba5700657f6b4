use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An award of service units requested by a research group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "active")]
    pub active_date: NaiveDate,
    #[serde(rename = "expire")]
    pub expire_date: NaiveDate,
    pub status: RequestStatus,
}

/// Review status of an allocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "AP")]
    Approved,
    #[serde(rename = "PD")]
    Pending,
    #[serde(rename = "DC")]
    Declined,
    #[serde(rename = "CR")]
    ChangesRequested,
    #[serde(other)]
    Unknown,
}

impl AllocationRequest {
    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }

    /// Approved and `active_date <= today < expire_date`.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.is_approved() && self.active_date <= today && today < self.expire_date
    }

    /// Approved and no longer active because `expire_date <= today`.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.is_approved() && self.expire_date <= today
    }
}

/// Usage recorded before this date was reset and does not count against current awards.
pub fn usage_reset_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 7).unwrap_or_default()
}

/// Earliest active date among `requests`, never before [`usage_reset_date`].
///
/// Without requests the window starts `today`.
pub fn earliest_start_date(requests: &[AllocationRequest], today: NaiveDate) -> NaiveDate {
    requests
        .iter()
        .map(|r| r.active_date)
        .min()
        .unwrap_or(today)
        .max(usage_reset_date())
}
