//! Deal records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::draft::DraftRecord;
use super::id::DealId;

/// Progress status of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    /// Work is underway. The default for newly created deals.
    #[default]
    InProgress,
    Closed,
    Pending,
    Cancelled,
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "inprogress"),
            Self::Closed => write!(f, "closed"),
            Self::Pending => write!(f, "pending"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for DealStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            "pending" => Ok(Self::Pending),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid deal status: {s}")),
        }
    }
}

/// A deal (job) persisted in the document service.
///
/// `customer_name` is a deliberate point-in-time snapshot of the customer's
/// display name, not a foreign key: editing or deleting that customer later
/// never rewrites existing deals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Server-assigned identifier.
    pub id: DealId,
    /// Denormalized customer display name, captured when the deal was drafted.
    pub customer_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Numeric-as-text, exactly as entered on the intake form.
    pub room_area: String,
    /// Numeric-as-text, exactly as entered on the intake form.
    pub number_of_people: String,
    pub appointment_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub room_access: String,
    /// Travels as a string on the wire.
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: DealStatus,
    /// Assigned by the document service at creation.
    pub created_at: DateTime<Utc>,
}

/// The creatable field set for a deal.
///
/// The customer name is filled in by the customer picker (or typed
/// directly); the status defaults to [`DealStatus::InProgress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DealDraft {
    pub customer_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub room_area: String,
    pub number_of_people: String,
    pub appointment_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub room_access: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: DealStatus,
}

impl DraftRecord for DealDraft {
    const ENTITY: &'static str = "deal";

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.customer_name.trim().is_empty() {
            missing.push("customer_name");
        }
        if self.street_address.trim().is_empty() {
            missing.push("street_address");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.state.trim().is_empty() {
            missing.push("state");
        }
        if self.zip_code.trim().is_empty() {
            missing.push("zip_code");
        }
        if self.room_area.trim().is_empty() {
            missing.push("room_area");
        }
        if self.number_of_people.trim().is_empty() {
            missing.push("number_of_people");
        }
        if self.room_access.trim().is_empty() {
            missing.push("room_access");
        }
        missing
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft() -> DealDraft {
        DealDraft {
            customer_name: "Ann Lee".to_owned(),
            street_address: "1 Main St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
            room_area: "25".to_owned(),
            number_of_people: "10".to_owned(),
            appointment_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            special_instructions: None,
            room_access: "Keys with doorman".to_owned(),
            price: Decimal::from(6000),
            image_url: None,
            status: DealStatus::default(),
        }
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            serde_json::to_value(DealStatus::InProgress).unwrap(),
            "inprogress"
        );
        assert_eq!(
            serde_json::from_value::<DealStatus>("cancelled".into()).unwrap(),
            DealStatus::Cancelled
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("closed".parse::<DealStatus>(), Ok(DealStatus::Closed));
        assert!("done".parse::<DealStatus>().is_err());
    }

    #[test]
    fn test_new_draft_status_defaults_to_in_progress() {
        assert_eq!(draft().status, DealStatus::InProgress);
    }

    #[test]
    fn test_complete_draft_validates() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_special_instructions_not_required() {
        let no_notes = DealDraft {
            special_instructions: None,
            ..draft()
        };
        assert!(no_notes.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let incomplete = DealDraft {
            customer_name: String::new(),
            zip_code: " ".to_owned(),
            ..draft()
        };
        assert_eq!(
            incomplete.missing_fields(),
            vec!["customer_name", "zip_code"]
        );
    }

    #[test]
    fn test_draft_wire_shape() {
        let json = serde_json::to_value(draft()).unwrap();
        assert_eq!(json.get("customerName"), Some(&json!("Ann Lee")));
        assert_eq!(json.get("zipCode"), Some(&json!("62701")));
        assert_eq!(json.get("appointmentDate"), Some(&json!("2025-11-20")));
        // Price travels as a string, status as its lowercase label
        assert_eq!(json.get("price"), Some(&json!("6000")));
        assert_eq!(json.get("status"), Some(&json!("inprogress")));
    }

    #[test]
    fn test_draft_decodes_defaulted_status() {
        let mut json = serde_json::to_value(draft()).unwrap();
        json.as_object_mut().unwrap().remove("status");
        let decoded: DealDraft = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.status, DealStatus::InProgress);
    }
}
