//! Domain model for the barangay resident portal engine.
//!
//! This crate is pure: record kinds, status enums with their transition
//! tables, record and draft shapes, the validation gate, the static
//! catalogs (document types and the official roster), the error taxonomy,
//! and the UTC timestamp helpers. All state lives in
//! `barangay-portal-engine`; nothing here performs I/O.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};

time::serde::format_description!(date_format, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum EngineError {
    #[error("validation error: missing required fields: {}", missing_fields_list(.0))]
    Validation(BTreeSet<String>),
    #[error("payment proof is required when paying online")]
    PaymentProofMissing,
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),
    #[error("unknown official: {0}")]
    UnknownOfficial(String),
    #[error("illegal {kind} transition: {from} -> {to}")]
    IllegalTransition {
        kind: RecordKind,
        from: String,
        to: String,
    },
    #[error("a submission is already in flight for this form")]
    SubmissionInFlight,
    #[error("no {kind} record with id {id}")]
    RecordNotFound { kind: RecordKind, id: RecordId },
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

fn missing_fields_list(fields: &BTreeSet<String>) -> String {
    fields.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// The four request-like record categories the portal tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Document,
    Incident,
    Appointment,
    Invitation,
}

impl RecordKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Incident => "incident",
            Self::Appointment => "appointment",
            Self::Invitation => "invitation",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "document" => Some(Self::Document),
            "incident" => Some(Self::Incident),
            "appointment" => Some(Self::Appointment),
            "invitation" => Some(Self::Invitation),
            _ => None,
        }
    }

    /// Fixed three-letter id prefix per kind (`REQ-2025-004`).
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Document => "REQ",
            Self::Incident => "INC",
            Self::Appointment => "APT",
            Self::Invitation => "MTG",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable record id, `<PREFIX>-<YEAR>-<SEQ>`.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Formats an id from its parts. `seq` is 1-based and zero-padded to
    /// three digits; larger sequences widen, they are never truncated.
    #[must_use]
    pub fn format(kind: RecordKind, year: i32, seq: u32) -> Self {
        Self(format!("{}-{year}-{seq:03}", kind.prefix()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    None,
    InProgress,
    ForPickup,
    Rejected,
}

impl DocumentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::InProgress => "in_progress",
            Self::ForPickup => "for_pickup",
            Self::Rejected => "rejected",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "in_progress" => Some(Self::InProgress),
            "for_pickup" => Some(Self::ForPickup),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::ForPickup | Self::Rejected)
    }

    /// Legal outgoing edges. A self edge is not listed here; `transition`
    /// treats `to == from` as a no-op success.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::None, Self::InProgress)
                | (Self::InProgress, Self::ForPickup | Self::Rejected)
        )
    }

    /// Applies a status change through the transition table.
    ///
    /// # Errors
    /// Returns [`EngineError::IllegalTransition`] when `(self, to)` is not
    /// a legal edge and not a self edge.
    pub fn transition(self, to: Self) -> Result<Self, EngineError> {
        step(RecordKind::Document, self, to, self.as_str(), to.as_str(), Self::can_transition)
    }
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Submitted,
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(Self::Submitted),
            "investigating" => Some(Self::Investigating),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Strictly forward: submitted -> investigating -> resolved -> closed.
    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Submitted, Self::Investigating)
                | (Self::Investigating, Self::Resolved)
                | (Self::Resolved, Self::Closed)
        )
    }

    /// Applies a status change through the transition table.
    ///
    /// # Errors
    /// Returns [`EngineError::IllegalTransition`] when `(self, to)` is not
    /// a legal edge and not a self edge.
    pub fn transition(self, to: Self) -> Result<Self, EngineError> {
        step(RecordKind::Incident, self, to, self.as_str(), to.as_str(), Self::can_transition)
    }
}

impl Display for IncidentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rescheduled,
}

impl AppointmentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "rescheduled" => Some(Self::Rescheduled),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (
                    Self::Confirmed,
                    Self::Completed | Self::Rescheduled | Self::Cancelled
                )
                | (Self::Rescheduled, Self::Pending)
        )
    }

    /// Applies a status change through the transition table.
    ///
    /// # Errors
    /// Returns [`EngineError::IllegalTransition`] when `(self, to)` is not
    /// a legal edge and not a self edge.
    pub fn transition(self, to: Self) -> Result<Self, EngineError> {
        step(RecordKind::Appointment, self, to, self.as_str(), to.as_str(), Self::can_transition)
    }
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }

    #[must_use]
    pub fn can_transition(self, to: Self) -> bool {
        matches!((self, to), (Self::Pending, Self::Accepted | Self::Declined))
    }

    /// Applies a status change through the transition table.
    ///
    /// # Errors
    /// Returns [`EngineError::IllegalTransition`] when `(self, to)` is not
    /// a legal edge and not a self edge.
    pub fn transition(self, to: Self) -> Result<Self, EngineError> {
        step(RecordKind::Invitation, self, to, self.as_str(), to.as_str(), Self::can_transition)
    }
}

impl Display for InvitationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn step<S: Copy + PartialEq>(
    kind: RecordKind,
    from: S,
    to: S,
    from_str: &str,
    to_str: &str,
    table: impl Fn(S, S) -> bool,
) -> Result<S, EngineError> {
    if from == to {
        return Ok(from);
    }
    if table(from, to) {
        return Ok(to);
    }
    Err(EngineError::IllegalTransition {
        kind,
        from: from_str.to_string(),
        to: to_str.to_string(),
    })
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd)]
#[serde(rename_all = "snake_case")]
pub enum IncidentPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl IncidentPriority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// How the resident pays a document fee. Real payment processing is out of
/// scope; only the proof-attached flag matters to validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    PayAtOffice,
    PayNow { proof_attached: bool },
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::PayAtOffice
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRequest {
    pub id: RecordId,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
    pub document_type: String,
    pub purpose: String,
    /// Copied from the catalog at creation; never changes afterwards.
    pub fee: u32,
    pub processing_days: u32,
    pub payment: PaymentMethod,
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncidentReport {
    pub id: RecordId,
    #[serde(with = "time::serde::rfc3339")]
    pub reported_at: OffsetDateTime,
    pub incident_type: String,
    #[serde(with = "date_format")]
    pub incident_date: Date,
    pub location: String,
    pub description: String,
    pub priority: IncidentPriority,
    pub status: IncidentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: RecordId,
    #[serde(with = "time::serde::rfc3339")]
    pub requested_at: OffsetDateTime,
    pub meeting_with: String,
    #[serde(with = "date_format")]
    pub date: Date,
    pub time: String,
    pub subject: String,
    pub purpose: String,
    pub location: String,
    /// Set when this appointment was promoted from an accepted invitation.
    pub origin_invitation: Option<RecordId>,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeetingInvitation {
    pub id: RecordId,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
    pub from_official: String,
    #[serde(with = "date_format")]
    pub date: Date,
    pub time: String,
    pub location: String,
    pub purpose: String,
    pub status: InvitationStatus,
}

/// Result of the validation gate: pure, repeatable, never mutates.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ValidationResult {
    Ok,
    Missing { fields: BTreeSet<String> },
}

impl ValidationResult {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Converts the gate outcome into the submit-path error.
    ///
    /// # Errors
    /// Returns [`EngineError::Validation`] when fields are missing.
    pub fn into_result(self) -> Result<(), EngineError> {
        match self {
            Self::Ok => Ok(()),
            Self::Missing { fields } => Err(EngineError::Validation(fields)),
        }
    }
}

fn collect_missing(checks: &[(&str, bool)]) -> ValidationResult {
    let fields: BTreeSet<String> = checks
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| (*name).to_string())
        .collect();
    if fields.is_empty() {
        ValidationResult::Ok
    } else {
        ValidationResult::Missing { fields }
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentDraft {
    pub document_type: String,
    pub purpose: String,
    #[serde(default)]
    pub payment: PaymentMethod,
}

impl DocumentDraft {
    /// Required-field check only; the pay-now proof rule is a separate
    /// gate so the two surface as distinct errors.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        collect_missing(&[
            ("document_type", filled(&self.document_type)),
            ("purpose", filled(&self.purpose)),
        ])
    }

    /// Pay-now requires an attached proof; paying at the office does not.
    ///
    /// # Errors
    /// Returns [`EngineError::PaymentProofMissing`] for pay-now with no proof.
    pub fn check_payment(&self) -> Result<(), EngineError> {
        match self.payment {
            PaymentMethod::PayNow {
                proof_attached: false,
            } => Err(EngineError::PaymentProofMissing),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IncidentDraft {
    pub incident_type: String,
    #[serde(default, with = "date_format::option")]
    pub incident_date: Option<Date>,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub priority: IncidentPriority,
}

impl IncidentDraft {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        collect_missing(&[
            ("incident_type", filled(&self.incident_type)),
            ("incident_date", self.incident_date.is_some()),
            ("location", filled(&self.location)),
            ("description", filled(&self.description)),
        ])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDraft {
    pub meeting_with: String,
    #[serde(default, with = "date_format::option")]
    pub date: Option<Date>,
    #[serde(default)]
    pub time: String,
    pub subject: String,
    pub purpose: String,
    #[serde(default)]
    pub location: String,
}

impl AppointmentDraft {
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        collect_missing(&[
            ("meeting_with", filled(&self.meeting_with)),
            ("date", self.date.is_some()),
            ("subject", filled(&self.subject)),
            ("purpose", filled(&self.purpose)),
        ])
    }
}

/// Externally delivered invitation payload. Invitations are not submitted
/// through the sequencer; they arrive from the office side (or demo seed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvitationDelivery {
    pub from_official: String,
    #[serde(with = "date_format")]
    pub date: Date,
    pub time: String,
    pub location: String,
    pub purpose: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InvitationResponse {
    Accepted,
    Declined,
}

impl InvitationResponse {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }
}

/// One entry of the document-type catalog: the fee and processing time the
/// office publishes for a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentType {
    pub name: String,
    pub fee: u32,
    pub processing_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Official {
    pub name: String,
    pub position: String,
}

/// Immutable configuration the engine reads but does not own: document
/// types with fees, and the roster of officials a meeting can target.
/// Loaded once at startup and never mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub document_types: Vec<DocumentType>,
    pub officials: Vec<Official>,
}

impl Catalog {
    /// The built-in catalog the portal ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            document_types: vec![
                DocumentType {
                    name: "Barangay Clearance".to_string(),
                    fee: 50,
                    processing_days: 3,
                },
                DocumentType {
                    name: "Certificate of Residency".to_string(),
                    fee: 30,
                    processing_days: 2,
                },
                DocumentType {
                    name: "Certificate of Indigency".to_string(),
                    fee: 0,
                    processing_days: 2,
                },
                DocumentType {
                    name: "Barangay ID".to_string(),
                    fee: 75,
                    processing_days: 5,
                },
                DocumentType {
                    name: "Business Permit".to_string(),
                    fee: 100,
                    processing_days: 7,
                },
            ],
            officials: vec![
                Official {
                    name: "Hon. Ramon dela Cruz".to_string(),
                    position: "Barangay Captain".to_string(),
                },
                Official {
                    name: "Maria Santos".to_string(),
                    position: "Barangay Secretary".to_string(),
                },
                Official {
                    name: "Jose Reyes".to_string(),
                    position: "Barangay Treasurer".to_string(),
                },
                Official {
                    name: "Hon. Ana Lim".to_string(),
                    position: "Kagawad, Peace and Order".to_string(),
                },
                Official {
                    name: "Hon. Paolo Garcia".to_string(),
                    position: "SK Chairperson".to_string(),
                },
            ],
        }
    }

    /// Checks catalog shape: both lists non-empty, names unique.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] when the catalog is unusable.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.document_types.is_empty() {
            return Err(EngineError::Configuration(
                "catalog MUST list at least one document type".to_string(),
            ));
        }
        if self.officials.is_empty() {
            return Err(EngineError::Configuration(
                "catalog MUST list at least one official".to_string(),
            ));
        }

        let mut names = BTreeSet::new();
        for document_type in &self.document_types {
            if !filled(&document_type.name) {
                return Err(EngineError::Configuration(
                    "document type names MUST be non-empty".to_string(),
                ));
            }
            if !names.insert(document_type.name.as_str()) {
                return Err(EngineError::Configuration(format!(
                    "duplicate document type: {}",
                    document_type.name
                )));
            }
        }

        let mut officials = BTreeSet::new();
        for official in &self.officials {
            if !filled(&official.name) {
                return Err(EngineError::Configuration(
                    "official names MUST be non-empty".to_string(),
                ));
            }
            if !officials.insert(official.name.as_str()) {
                return Err(EngineError::Configuration(format!(
                    "duplicate official: {}",
                    official.name
                )));
            }
        }

        Ok(())
    }

    /// Decodes and validates a catalog from JSON.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] when JSON decoding fails or
    /// the decoded catalog violates shape constraints.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, EngineError> {
        let catalog: Self = serde_json::from_value(value.clone()).map_err(|err| {
            EngineError::Configuration(format!("invalid catalog JSON payload: {err}"))
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    #[must_use]
    pub fn document_type(&self, name: &str) -> Option<&DocumentType> {
        self.document_types.iter().find(|entry| entry.name == name)
    }

    #[must_use]
    pub fn official(&self, name: &str) -> Option<&Official> {
        self.officials.iter().find(|entry| entry.name == name)
    }
}

/// Parses an RFC3339 timestamp and requires UTC (`Z`) offset.
///
/// # Errors
/// Returns [`EngineError::InvalidTimestamp`] when parsing fails or the
/// input is not UTC.
pub fn parse_rfc3339_utc(value: &str) -> Result<OffsetDateTime, EngineError> {
    let parsed = OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339)
        .map_err(|err| EngineError::InvalidTimestamp(format!("invalid RFC3339 timestamp: {err}")))?;

    if parsed.offset() != UtcOffset::UTC {
        return Err(EngineError::InvalidTimestamp(
            "timestamp MUST use UTC offset Z".to_string(),
        ));
    }

    Ok(parsed)
}

/// Formats a timestamp as RFC3339 after normalizing to UTC.
///
/// # Errors
/// Returns [`EngineError::InvalidTimestamp`] when formatting fails.
pub fn format_rfc3339(value: OffsetDateTime) -> Result<String, EngineError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|err| {
            EngineError::InvalidTimestamp(format!("failed to format RFC3339 timestamp: {err}"))
        })
}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns [`EngineError::InvalidTimestamp`] when the value does not parse.
pub fn parse_date(value: &str) -> Result<Date, EngineError> {
    Date::parse(value, &time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|err| EngineError::InvalidTimestamp(format!("invalid date {value}: {err}")))
}

#[must_use]
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(UtcOffset::UTC)
}
