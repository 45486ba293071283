//! Account models and related request payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Account model
///
/// `number` and `balance` are assigned by the store from independent
/// sequences at creation; callers never choose them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID, immutable after creation
    pub id: i64,
    /// Account holder first name
    pub first_name: String,
    /// Account holder last name
    pub last_name: String,
    /// Holder-facing account number, matched against token claims
    pub number: i64,
    /// Current balance
    pub balance: i64,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Name fields supplied when creating or updating an account
///
/// Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

/// Balance overwrite on a single account
///
/// Missing fields decode as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct TransferRequest {
    /// Target account id
    pub to_account: i64,
    /// New absolute balance, not a delta
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_serializes_with_camel_case_fields() {
        let account = Account {
            id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            number: 10,
            balance: 10,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn transfer_request_reads_to_account() {
        let req: TransferRequest = serde_json::from_str(r#"{"toAccount": 3, "amount": 500}"#).unwrap();
        assert_eq!(req, TransferRequest { to_account: 3, amount: 500 });
    }

    #[test]
    fn missing_request_fields_take_zero_values() {
        let req: TransferRequest = serde_json::from_str(r#"{"toAccount": 1}"#).unwrap();
        assert_eq!(req, TransferRequest { to_account: 1, amount: 0 });

        let req: CreateAccountRequest = serde_json::from_str(r#"{"firstName": "Ada"}"#).unwrap();
        assert_eq!(req.first_name, "Ada");
        assert_eq!(req.last_name, "");
    }
}
