// SPDX-License-Identifier: MIT
//
// Bitrain: Binary Stream Sidebar Engine
// Copyright (c) 2025 Bitrain Contributors

//! Data shapes exchanged by the bug-bounty platform
//!
//! These are contracts for entities owned elsewhere in the application. They
//! carry no behavior and enforce nothing beyond their types. JSON uses
//! camelCase field names, snake_case enum values and RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a platform account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Hacker,
    Company,
    Admin,
}

/// Platform account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub reputation: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProgramStatus {
    Active,
    Paused,
    Closed,
}

/// Payout range advertised by a program
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BountyRange {
    pub min: f64,
    pub max: f64,
}

/// Bug-bounty program run by a company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
    pub description: String,
    pub status: ProgramStatus,
    pub bounty_range: BountyRange,
    #[serde(default)]
    pub scope: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Triaged,
    Accepted,
    Rejected,
    Duplicate,
    Resolved,
}

/// Vulnerability report submitted to a program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub program_id: Uuid,
    pub reporter_id: Uuid,
    pub severity: Severity,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Report,
    Program,
    Payment,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Bounty,
    Fee,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Movement of funds in a user's wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Web,
    Mobile,
    Api,
    Source,
    Hardware,
    Other,
}

/// Target listed in a program's scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub program_id: Uuid,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub identifier: String,
    pub in_scope: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub username: String,
    pub reputation: i64,
    pub reports_accepted: u32,
    pub total_earnings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_user_wire_shape() {
        let user = User {
            id: Uuid::nil(),
            username: "n0ise".to_string(),
            email: "n0ise@example.com".to_string(),
            role: UserRole::Hacker,
            avatar_url: None,
            reputation: 420,
            created_at: ts(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "hacker");
        assert_eq!(value["createdAt"], "2025-03-01T12:00:00Z");
        assert!(value.get("avatarUrl").is_none());
    }

    #[test]
    fn test_report_from_frontend_json() {
        let value = json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "title": "Stored XSS in profile bio",
            "description": "Script tags are not escaped",
            "programId": "00000000-0000-0000-0000-000000000002",
            "reporterId": "00000000-0000-0000-0000-000000000003",
            "severity": "high",
            "status": "triaged",
            "createdAt": "2025-03-01T12:00:00Z",
            "updatedAt": "2025-03-02T08:30:00Z"
        });

        let report: Report = serde_json::from_value(value).unwrap();
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.status, ReportStatus::Triaged);
        assert_eq!(report.bounty_amount, None);
        assert!(Severity::Critical > Severity::High);
    }

    #[test]
    fn test_kind_fields_serialize_as_type() {
        let tx = WalletTransaction {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            kind: TransactionKind::Bounty,
            amount: 1500.0,
            currency: "USD".to_string(),
            status: TransactionStatus::Completed,
            created_at: ts(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "bounty");
        assert_eq!(value["status"], "completed");

        let asset: Asset = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "programId": Uuid::nil(),
            "type": "api",
            "identifier": "api.example.com",
            "inScope": true
        }))
        .unwrap();
        assert_eq!(asset.kind, AssetKind::Api);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let result: std::result::Result<Notification, _> = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "userId": Uuid::nil(),
            "type": "marketing",
            "title": "t",
            "message": "m",
            "createdAt": "2025-03-01T12:00:00Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_leaderboard_and_program_shapes() {
        let entry = LeaderboardEntry {
            rank: 1,
            user_id: Uuid::nil(),
            username: "n0ise".to_string(),
            reputation: 9001,
            reports_accepted: 42,
            total_earnings: 125_000.0,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["reportsAccepted"], 42);
        assert_eq!(value["totalEarnings"], 125_000.0);

        let program = Program {
            id: Uuid::new_v4(),
            name: "Acme VDP".to_string(),
            company_id: Uuid::new_v4(),
            description: "Public program".to_string(),
            status: ProgramStatus::Active,
            bounty_range: BountyRange { min: 100.0, max: 10_000.0 },
            scope: vec!["*.acme.test".to_string()],
            created_at: ts(),
        };
        let value = serde_json::to_value(&program).unwrap();
        assert_eq!(value["bountyRange"]["max"], 10_000.0);
        assert_eq!(value["status"], "active");
    }
}
