//! Soft-delete (trash) domain rules.
//!
//! A trash entry is a verbatim snapshot of a deleted record plus provenance.
//! This module owns the rules that do not need the database: the closed set
//! of item types, validation of a new entry, the retention cutoff used by the
//! purge sweep, and which entries a caller may see.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::{Timestamp, UserId};

/// Trash entries older than this many days are purged.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Longest accepted retention window (about a century). Keeps
/// `now - window` inside the representable timestamp range.
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Provenance tag stored when the caller does not name its flow.
pub const DEFAULT_ORIGIN: &str = "unknown";

crate::define_code_enum! {
    /// Kind of record captured in a trash entry.
    TrashItemType {
        Message = "message",
        Document = "document",
        Case = "case",
        Appointment = "appointment",
        Testimonial = "testimonial",
        User = "user",
        Task = "task",
        Notification = "notification",
        Other = "other",
    }
}

// ---------------------------------------------------------------------------
// New entries
// ---------------------------------------------------------------------------

/// Input for recording a deletion.
///
/// Missing string fields deserialize as empty and `item_data` as JSON `null`
/// so that absent values surface as validation errors rather than parse
/// failures.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrashEntry {
    #[serde(default)]
    #[validate(custom(function = "validate_item_type"))]
    pub item_type: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub original_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_item_data"))]
    pub item_data: serde_json::Value,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub deleted_by: UserId,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub original_owner: Option<UserId>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// A [`CreateTrashEntry`] that passed validation, with defaults applied.
///
/// Only [`validate_new_entry`] constructs this, so holding one proves the
/// input was checked before anything is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTrashEntry {
    pub item_type: TrashItemType,
    pub original_id: String,
    pub item_data: serde_json::Value,
    pub deleted_by: UserId,
    pub origin: String,
    pub original_owner: Option<UserId>,
    pub metadata: Option<serde_json::Value>,
}

/// Validate a new trash entry and normalize optional fields.
///
/// Every offending field is reported in one [`CoreError::Validation`].
pub fn validate_new_entry(input: &CreateTrashEntry) -> Result<ValidTrashEntry, CoreError> {
    let mut problems = match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => describe_errors(&errors),
    };

    if let Some(meta) = &input.metadata {
        if !meta.is_object() && !meta.is_null() {
            problems.push("metadata: must be a JSON object".to_string());
        }
    }

    if !problems.is_empty() {
        problems.sort();
        return Err(CoreError::Validation(problems.join("; ")));
    }

    // validate() already rejected unknown item types.
    let item_type = TrashItemType::from_code(&input.item_type)
        .ok_or_else(|| CoreError::Validation(format!("item_type: {}", input.item_type)))?;

    Ok(ValidTrashEntry {
        item_type,
        original_id: input.original_id.clone(),
        item_data: input.item_data.clone(),
        deleted_by: input.deleted_by.clone(),
        origin: non_blank(input.origin.as_deref())
            .unwrap_or(DEFAULT_ORIGIN)
            .to_string(),
        original_owner: non_blank(input.original_owner.as_deref()).map(str::to_string),
        metadata: input.metadata.clone().filter(|m| !m.is_null()),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn describe_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect()
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

fn validate_item_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TrashItemType>()
        .map(|_| ())
        .map_err(|msg| validation_error("item_type", msg))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(validation_error("required", "is required".to_string()))
    } else {
        Ok(())
    }
}

fn validate_item_data(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_null() {
        Err(validation_error(
            "required",
            "snapshot of the deleted record is required".to_string(),
        ))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

/// How long trash entries are kept before the sweep purges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retention_days: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl RetentionPolicy {
    /// Build a policy. The window must lie in `1..=MAX_RETENTION_DAYS`.
    pub fn new(retention_days: i64) -> Result<Self, CoreError> {
        if retention_days < 1 {
            return Err(CoreError::Validation(format!(
                "retention window must be at least 1 day, got {retention_days}"
            )));
        }
        if retention_days > MAX_RETENTION_DAYS {
            return Err(CoreError::Validation(format!(
                "retention window must be at most {MAX_RETENTION_DAYS} days, got {retention_days}"
            )));
        }
        Ok(Self { retention_days })
    }

    pub fn retention_days(self) -> i64 {
        self.retention_days
    }

    /// Entries deleted strictly before this instant are expired.
    pub fn cutoff(self, now: Timestamp) -> Timestamp {
        now - chrono::Duration::days(self.retention_days)
    }

    /// `deleted_at < cutoff(now)`. An entry exactly at the cutoff is kept.
    pub fn is_expired(self, deleted_at: Timestamp, now: Timestamp) -> bool {
        deleted_at < self.cutoff(now)
    }
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

/// Which trash entries a caller may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrashScope {
    /// Every entry (admin view).
    All,
    /// Entries the user deleted or originally owned (client / partner view).
    Party(UserId),
}

impl TrashScope {
    /// Derive the scope from an authenticated caller. Non-admin roles,
    /// including unrecognized ones, get the party view.
    pub fn for_user(user_id: &str, role: &str) -> Self {
        if role == ROLE_ADMIN {
            TrashScope::All
        } else {
            TrashScope::Party(user_id.to_string())
        }
    }

    pub fn permits(&self, deleted_by: &str, original_owner: Option<&str>) -> bool {
        match self {
            TrashScope::All => true,
            TrashScope::Party(user) => deleted_by == user || original_owner == Some(user.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    fn valid_input() -> CreateTrashEntry {
        CreateTrashEntry {
            item_type: "document".to_string(),
            original_id: "65f1c2a9e4b0a1d2c3f4e5a6".to_string(),
            item_data: json!({ "title": "Passeport.pdf", "size": 20480 }),
            deleted_by: "user-42".to_string(),
            origin: Some("client-documents".to_string()),
            original_owner: Some("client-7".to_string()),
            metadata: Some(json!({ "reason": "duplicate upload" })),
        }
    }

    #[test]
    fn valid_entry_is_accepted_verbatim() {
        let input = valid_input();
        let entry = validate_new_entry(&input).unwrap();
        assert_eq!(entry.item_type, TrashItemType::Document);
        assert_eq!(entry.item_data, input.item_data);
        assert_eq!(entry.origin, "client-documents");
        assert_eq!(entry.original_owner.as_deref(), Some("client-7"));
    }

    #[test]
    fn all_item_types_are_accepted() {
        for item_type in TrashItemType::ALL {
            let input = CreateTrashEntry {
                item_type: item_type.as_str().to_string(),
                ..valid_input()
            };
            assert_eq!(validate_new_entry(&input).unwrap().item_type, *item_type);
        }
    }

    #[test]
    fn unknown_item_type_is_rejected() {
        let input = CreateTrashEntry {
            item_type: "invoice".to_string(),
            ..valid_input()
        };
        let err = validate_new_entry(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("item_type"));
    }

    #[test]
    fn missing_snapshot_is_rejected() {
        let input = CreateTrashEntry {
            item_data: serde_json::Value::Null,
            ..valid_input()
        };
        let err = validate_new_entry(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("item_data"));
    }

    #[test]
    fn blank_deleted_by_is_rejected() {
        let input = CreateTrashEntry {
            deleted_by: "   ".to_string(),
            ..valid_input()
        };
        let err = validate_new_entry(&input).unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("deleted_by"));
    }

    #[test]
    fn every_problem_is_reported_at_once() {
        let input: CreateTrashEntry = serde_json::from_value(json!({})).unwrap();
        let CoreError::Validation(msg) = validate_new_entry(&input).unwrap_err() else {
            panic!("expected a validation error");
        };
        for field in ["item_type", "original_id", "item_data", "deleted_by"] {
            assert!(msg.contains(field), "{field} missing from: {msg}");
        }
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        let input = CreateTrashEntry {
            metadata: Some(json!(["not", "an", "object"])),
            ..valid_input()
        };
        assert_matches!(validate_new_entry(&input), Err(CoreError::Validation(_)));
    }

    #[test]
    fn optional_fields_get_defaults() {
        let input = CreateTrashEntry {
            origin: Some("  ".to_string()),
            original_owner: Some(String::new()),
            metadata: Some(serde_json::Value::Null),
            ..valid_input()
        };
        let entry = validate_new_entry(&input).unwrap();
        assert_eq!(entry.origin, DEFAULT_ORIGIN);
        assert_eq!(entry.original_owner, None);
        assert_eq!(entry.metadata, None);
    }

    #[test]
    fn snapshot_scalars_are_allowed() {
        let input = CreateTrashEntry {
            item_data: json!("plain text message body"),
            ..valid_input()
        };
        assert!(validate_new_entry(&input).is_ok());
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 6, 1, 3, 0, 0).unwrap()
    }

    #[test]
    fn default_retention_is_thirty_days() {
        let policy = RetentionPolicy::default();
        assert_eq!(policy.retention_days(), 30);
        assert_eq!(policy.cutoff(now()), now() - Duration::days(30));
    }

    #[test]
    fn cutoff_boundary_is_strict() {
        let policy = RetentionPolicy::default();
        let aged = |days: i64| now() - Duration::days(days);
        assert!(!policy.is_expired(aged(29), now()));
        assert!(!policy.is_expired(aged(30), now()));
        assert!(policy.is_expired(aged(30) - Duration::seconds(1), now()));
        assert!(policy.is_expired(aged(31), now()));
        assert!(policy.is_expired(aged(45), now()));
    }

    #[test]
    fn non_positive_retention_is_rejected() {
        assert_matches!(RetentionPolicy::new(0), Err(CoreError::Validation(_)));
        assert_matches!(RetentionPolicy::new(-3), Err(CoreError::Validation(_)));
        assert_eq!(RetentionPolicy::new(7).unwrap().retention_days(), 7);
    }

    #[test]
    fn oversized_retention_is_rejected() {
        assert_matches!(
            RetentionPolicy::new(MAX_RETENTION_DAYS + 1),
            Err(CoreError::Validation(_))
        );
        assert_matches!(RetentionPolicy::new(100_000_000), Err(CoreError::Validation(_)));
        assert_matches!(RetentionPolicy::new(i64::MAX), Err(CoreError::Validation(_)));
    }

    #[test]
    fn widest_window_has_a_cutoff() {
        let policy = RetentionPolicy::new(MAX_RETENTION_DAYS).unwrap();
        let cutoff = policy.cutoff(Utc::now());
        assert!(cutoff < Utc::now());
        assert!(!policy.is_expired(Utc::now(), Utc::now()));
    }

    #[test]
    fn admin_scope_sees_everything() {
        let scope = TrashScope::for_user("admin-1", "admin");
        assert_eq!(scope, TrashScope::All);
        assert!(scope.permits("someone-else", None));
    }

    #[test]
    fn party_scope_sees_own_deletions_and_owned_records() {
        let scope = TrashScope::for_user("client-7", "client");
        assert!(scope.permits("client-7", None));
        assert!(scope.permits("admin-1", Some("client-7")));
        assert!(!scope.permits("admin-1", Some("client-8")));
        assert!(!scope.permits("admin-1", None));
    }

    #[test]
    fn unknown_role_gets_party_scope() {
        assert_eq!(
            TrashScope::for_user("u-1", "auditor"),
            TrashScope::Party("u-1".to_string())
        );
    }
}
