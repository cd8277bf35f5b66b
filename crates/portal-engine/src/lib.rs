//! Stateful request-lifecycle engine for the barangay resident portal.
//!
//! [`PortalEngine`] owns the only shared mutable resource in the system:
//! the per-kind in-memory record store. Everything reaches records through
//! it — the submission sequencer appends them, the query engine reads
//! snapshots of them, and status changes go through the transition tables
//! in `barangay-portal-core`.
//!
//! There is no async runtime. The simulated network latency of the
//! original portal is an explicit deadline on an injected clock: `submit`
//! registers an in-flight submission completing at `now + latency`, and
//! [`PortalEngine::poll`] performs the atomic id-generation/append step
//! for every submission whose deadline has passed. A record is never
//! observable before its completion, and an in-flight submission cannot
//! be cancelled — it always completes on a later poll.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use barangay_portal_core::{
    Appointment, AppointmentDraft, AppointmentStatus, Catalog, DocumentDraft, DocumentRequest,
    DocumentStatus, EngineError, IncidentDraft, IncidentPriority, IncidentReport, IncidentStatus,
    InvitationDelivery, InvitationResponse, InvitationStatus, MeetingInvitation, RecordId,
    RecordKind,
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use ulid::Ulid;

/// Handle for one open authoring surface (one form instance). The
/// at-most-one-in-flight guard is scoped to this handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct FormId(pub Ulid);

impl FormId {
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FormId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Sort direction for the single supported sort key (date).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Re-selecting the date key flips the direction.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentQuery {
    pub status: Option<DocumentStatus>,
    pub document_type: Option<String>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IncidentQuery {
    pub status: Option<IncidentStatus>,
    pub incident_type: Option<String>,
    pub priority: Option<IncidentPriority>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub meeting_with: Option<String>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvitationQuery {
    pub status: Option<InvitationStatus>,
    pub from_official: Option<String>,
    pub sort: Option<SortDirection>,
}

/// A record produced by a completed submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmittedRecord {
    Document(DocumentRequest),
    Incident(IncidentReport),
    Appointment(Appointment),
}

impl SubmittedRecord {
    #[must_use]
    pub fn id(&self) -> &RecordId {
        match self {
            Self::Document(record) => &record.id,
            Self::Incident(record) => &record.id,
            Self::Appointment(record) => &record.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletedSubmission {
    pub ticket: Ulid,
    pub form: FormId,
    pub record: SubmittedRecord,
}

/// Observable state of a submission ticket, for callers that poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    Pending {
        #[serde(with = "time::serde::rfc3339")]
        completes_at: OffsetDateTime,
    },
    Completed {
        record_id: RecordId,
    },
}

/// Result of responding to a meeting invitation. Accepting promotes the
/// invitation into exactly one appointment; declining never does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvitationOutcome {
    pub invitation: MeetingInvitation,
    pub appointment: Option<Appointment>,
}

/// Summary of the demo records seeded into a fresh session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoSeed {
    pub documents: Vec<RecordId>,
    pub incidents: Vec<RecordId>,
    pub appointments: Vec<RecordId>,
    pub invitations: Vec<RecordId>,
}

#[derive(Debug)]
enum PendingDraft {
    Document(DocumentDraft),
    Incident(IncidentDraft),
    Appointment(AppointmentDraft),
}

#[derive(Debug)]
struct PendingSubmission {
    ticket: Ulid,
    form: FormId,
    completes_at: OffsetDateTime,
    draft: PendingDraft,
}

/// Per-kind append logs. Insertion order is the canonical order; records
/// are never removed, only their status changes.
#[derive(Debug, Default)]
struct RecordStore {
    documents: Vec<DocumentRequest>,
    incidents: Vec<IncidentReport>,
    appointments: Vec<Appointment>,
    invitations: Vec<MeetingInvitation>,
}

impl RecordStore {
    /// Next id for a kind: 1-based count of that kind's records created in
    /// `year`, so id generation is a pure function of current store size.
    /// Caller must append in the same `&mut self` scope so the count and
    /// the append stay atomic.
    fn next_id(&self, kind: RecordKind, year: i32) -> RecordId {
        let count = match kind {
            RecordKind::Document => self
                .documents
                .iter()
                .filter(|record| record.requested_at.year() == year)
                .count(),
            RecordKind::Incident => self
                .incidents
                .iter()
                .filter(|record| record.reported_at.year() == year)
                .count(),
            RecordKind::Appointment => self
                .appointments
                .iter()
                .filter(|record| record.requested_at.year() == year)
                .count(),
            RecordKind::Invitation => self
                .invitations
                .iter()
                .filter(|record| record.received_at.year() == year)
                .count(),
        };
        let seq = u32::try_from(count).unwrap_or(u32::MAX).saturating_add(1);
        RecordId::format(kind, year, seq)
    }
}

/// The request lifecycle engine: submission sequencer, record store,
/// query engine, and status transitions behind one owner.
#[derive(Debug)]
pub struct PortalEngine {
    catalog: Catalog,
    latency: Duration,
    store: RecordStore,
    in_flight: Vec<PendingSubmission>,
    completed: BTreeMap<Ulid, RecordId>,
}

/// Default simulated completion latency, matching the portal's fake
/// network call.
pub const DEFAULT_LATENCY: Duration = Duration::milliseconds(600);

impl PortalEngine {
    /// Creates an engine over a validated catalog with the default
    /// simulated latency.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] when the catalog is unusable.
    pub fn new(catalog: Catalog) -> Result<Self, EngineError> {
        Self::with_latency(catalog, DEFAULT_LATENCY)
    }

    /// Creates an engine with an explicit simulated latency. Tests use
    /// `Duration::ZERO` so a submit completes on the next poll.
    ///
    /// # Errors
    /// Returns [`EngineError::Configuration`] when the catalog is unusable.
    pub fn with_latency(catalog: Catalog, latency: Duration) -> Result<Self, EngineError> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            latency,
            store: RecordStore::default(),
            in_flight: Vec::new(),
            completed: BTreeMap::new(),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Submits a document-request draft from the given form instance.
    ///
    /// The draft is consumed: on acceptance the form's draft is gone and a
    /// fresh one starts from `DocumentDraft::default()`. On error the
    /// caller still holds the field values it rendered the form from.
    ///
    /// # Errors
    /// [`EngineError::Validation`] / [`EngineError::PaymentProofMissing`] /
    /// [`EngineError::UnknownDocumentType`] before the in-flight flag is
    /// touched, and [`EngineError::SubmissionInFlight`] when this form
    /// already has an outstanding submission. None of these append a record.
    pub fn submit_document(
        &mut self,
        form: FormId,
        draft: DocumentDraft,
        now: OffsetDateTime,
    ) -> Result<Ulid, EngineError> {
        draft.validate().into_result()?;
        draft.check_payment()?;
        if self.catalog.document_type(&draft.document_type).is_none() {
            return Err(EngineError::UnknownDocumentType(draft.document_type));
        }
        self.register(form, PendingDraft::Document(draft), now)
    }

    /// Submits an incident-report draft from the given form instance.
    ///
    /// # Errors
    /// [`EngineError::Validation`] when required fields are blank, and
    /// [`EngineError::SubmissionInFlight`] when this form already has an
    /// outstanding submission.
    pub fn submit_incident(
        &mut self,
        form: FormId,
        draft: IncidentDraft,
        now: OffsetDateTime,
    ) -> Result<Ulid, EngineError> {
        draft.validate().into_result()?;
        self.register(form, PendingDraft::Incident(draft), now)
    }

    /// Submits an appointment draft from the given form instance.
    ///
    /// # Errors
    /// [`EngineError::Validation`] when required fields are blank,
    /// [`EngineError::UnknownOfficial`] when `meeting_with` is not on the
    /// roster, and [`EngineError::SubmissionInFlight`] when this form
    /// already has an outstanding submission.
    pub fn submit_appointment(
        &mut self,
        form: FormId,
        draft: AppointmentDraft,
        now: OffsetDateTime,
    ) -> Result<Ulid, EngineError> {
        draft.validate().into_result()?;
        if self.catalog.official(&draft.meeting_with).is_none() {
            return Err(EngineError::UnknownOfficial(draft.meeting_with));
        }
        self.register(form, PendingDraft::Appointment(draft), now)
    }

    fn register(
        &mut self,
        form: FormId,
        draft: PendingDraft,
        now: OffsetDateTime,
    ) -> Result<Ulid, EngineError> {
        if self.in_flight.iter().any(|pending| pending.form == form) {
            return Err(EngineError::SubmissionInFlight);
        }
        let ticket = Ulid::new();
        self.in_flight.push(PendingSubmission {
            ticket,
            form,
            completes_at: now + self.latency,
            draft,
        });
        Ok(ticket)
    }

    /// Completes every in-flight submission whose deadline has passed, in
    /// registration order. Completion is atomic per submission: generate
    /// the id, construct the record with its initial status, append it,
    /// and clear the in-flight flag. Queries only ever see the result of
    /// the full step.
    pub fn poll(&mut self, now: OffsetDateTime) -> Vec<CompletedSubmission> {
        let mut completions = Vec::new();
        let mut remaining = Vec::with_capacity(self.in_flight.len());
        for pending in self.in_flight.drain(..) {
            if pending.completes_at > now {
                remaining.push(pending);
                continue;
            }
            let created_at = pending.completes_at;
            let record = match pending.draft {
                PendingDraft::Document(draft) => {
                    let id = self.store.next_id(RecordKind::Document, created_at.year());
                    // Fee and processing time are fixed at creation from the
                    // catalog; the record never re-reads them.
                    let entry = self.catalog.document_type(&draft.document_type);
                    let (fee, processing_days) =
                        entry.map_or((0, 0), |entry| (entry.fee, entry.processing_days));
                    let record = DocumentRequest {
                        id,
                        requested_at: created_at,
                        document_type: draft.document_type,
                        purpose: draft.purpose,
                        fee,
                        processing_days,
                        payment: draft.payment,
                        status: DocumentStatus::InProgress,
                    };
                    self.store.documents.push(record.clone());
                    SubmittedRecord::Document(record)
                }
                PendingDraft::Incident(draft) => {
                    let id = self.store.next_id(RecordKind::Incident, created_at.year());
                    let record = IncidentReport {
                        id,
                        reported_at: created_at,
                        incident_type: draft.incident_type,
                        incident_date: draft.incident_date.unwrap_or_else(|| created_at.date()),
                        location: draft.location,
                        description: draft.description,
                        priority: draft.priority,
                        status: IncidentStatus::Submitted,
                    };
                    self.store.incidents.push(record.clone());
                    SubmittedRecord::Incident(record)
                }
                PendingDraft::Appointment(draft) => {
                    let id = self
                        .store
                        .next_id(RecordKind::Appointment, created_at.year());
                    let record = Appointment {
                        id,
                        requested_at: created_at,
                        meeting_with: draft.meeting_with,
                        date: draft.date.unwrap_or_else(|| created_at.date()),
                        time: draft.time,
                        subject: draft.subject,
                        purpose: draft.purpose,
                        location: draft.location,
                        origin_invitation: None,
                        status: AppointmentStatus::Pending,
                    };
                    self.store.appointments.push(record.clone());
                    SubmittedRecord::Appointment(record)
                }
            };
            self.completed.insert(pending.ticket, record.id().clone());
            completions.push(CompletedSubmission {
                ticket: pending.ticket,
                form: pending.form,
                record,
            });
        }
        self.in_flight = remaining;
        completions
    }

    /// Looks up a submission ticket. `None` for tickets this engine never
    /// issued.
    #[must_use]
    pub fn ticket(&self, ticket: Ulid) -> Option<SubmissionState> {
        if let Some(pending) = self
            .in_flight
            .iter()
            .find(|pending| pending.ticket == ticket)
        {
            return Some(SubmissionState::Pending {
                completes_at: pending.completes_at,
            });
        }
        self.completed
            .get(&ticket)
            .map(|record_id| SubmissionState::Completed {
                record_id: record_id.clone(),
            })
    }

    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Delivers an externally created meeting invitation into the session
    /// (the office side of the portal; also used by the demo seed).
    pub fn deliver_invitation(
        &mut self,
        delivery: InvitationDelivery,
        now: OffsetDateTime,
    ) -> MeetingInvitation {
        let id = self.store.next_id(RecordKind::Invitation, now.year());
        let record = MeetingInvitation {
            id,
            received_at: now,
            from_official: delivery.from_official,
            date: delivery.date,
            time: delivery.time,
            location: delivery.location,
            purpose: delivery.purpose,
            status: InvitationStatus::Pending,
        };
        self.store.invitations.push(record.clone());
        record
    }

    /// Responds to a pending invitation. Accepting atomically creates the
    /// promoted appointment (carrying date, time, location, and purpose)
    /// and marks the invitation accepted; declining only marks it. All
    /// fallible work happens before any mutation, so a failure leaves both
    /// collections untouched.
    ///
    /// # Errors
    /// [`EngineError::RecordNotFound`] for an unknown id and
    /// [`EngineError::IllegalTransition`] when the invitation is no longer
    /// pending.
    pub fn respond_to_invitation(
        &mut self,
        id: &RecordId,
        response: InvitationResponse,
        now: OffsetDateTime,
    ) -> Result<InvitationOutcome, EngineError> {
        let index = self
            .store
            .invitations
            .iter()
            .position(|record| &record.id == id)
            .ok_or_else(|| EngineError::RecordNotFound {
                kind: RecordKind::Invitation,
                id: id.clone(),
            })?;

        let target = match response {
            InvitationResponse::Accepted => InvitationStatus::Accepted,
            InvitationResponse::Declined => InvitationStatus::Declined,
        };
        let next_status = self.store.invitations[index].status.transition(target)?;

        let appointment = if matches!(response, InvitationResponse::Accepted) {
            let invitation = self.store.invitations[index].clone();
            let appointment_id = self.store.next_id(RecordKind::Appointment, now.year());
            let record = Appointment {
                id: appointment_id,
                requested_at: now,
                meeting_with: invitation.from_official,
                date: invitation.date,
                time: invitation.time,
                subject: format!("Meeting: {}", invitation.purpose),
                purpose: invitation.purpose,
                location: invitation.location,
                origin_invitation: Some(invitation.id),
                status: AppointmentStatus::Confirmed,
            };
            self.store.appointments.push(record.clone());
            Some(record)
        } else {
            None
        };

        self.store.invitations[index].status = next_status;
        Ok(InvitationOutcome {
            invitation: self.store.invitations[index].clone(),
            appointment,
        })
    }

    /// Moves a document request to a new status through the transition
    /// table.
    ///
    /// # Errors
    /// [`EngineError::RecordNotFound`] / [`EngineError::IllegalTransition`].
    pub fn transition_document(
        &mut self,
        id: &RecordId,
        to: DocumentStatus,
    ) -> Result<DocumentRequest, EngineError> {
        let record = find_mut(
            &mut self.store.documents,
            RecordKind::Document,
            id,
            |record| &record.id,
        )?;
        record.status = record.status.transition(to)?;
        Ok(record.clone())
    }

    /// Moves an incident report to a new status through the transition
    /// table.
    ///
    /// # Errors
    /// [`EngineError::RecordNotFound`] / [`EngineError::IllegalTransition`].
    pub fn transition_incident(
        &mut self,
        id: &RecordId,
        to: IncidentStatus,
    ) -> Result<IncidentReport, EngineError> {
        let record = find_mut(
            &mut self.store.incidents,
            RecordKind::Incident,
            id,
            |record| &record.id,
        )?;
        record.status = record.status.transition(to)?;
        Ok(record.clone())
    }

    /// Moves an appointment to a new status through the transition table.
    ///
    /// # Errors
    /// [`EngineError::RecordNotFound`] / [`EngineError::IllegalTransition`].
    pub fn transition_appointment(
        &mut self,
        id: &RecordId,
        to: AppointmentStatus,
    ) -> Result<Appointment, EngineError> {
        let record = find_mut(
            &mut self.store.appointments,
            RecordKind::Appointment,
            id,
            |record| &record.id,
        )?;
        record.status = record.status.transition(to)?;
        Ok(record.clone())
    }

    /// Reschedules a confirmed appointment to a new date and time slot.
    /// Walks Confirmed -> Rescheduled -> Pending, so the appointment ends
    /// up awaiting re-approval with the new schedule.
    ///
    /// # Errors
    /// [`EngineError::RecordNotFound`] / [`EngineError::IllegalTransition`]
    /// (the latter whenever the appointment is not currently confirmed).
    pub fn reschedule_appointment(
        &mut self,
        id: &RecordId,
        new_date: Date,
        new_time: String,
    ) -> Result<Appointment, EngineError> {
        let record = find_mut(
            &mut self.store.appointments,
            RecordKind::Appointment,
            id,
            |record| &record.id,
        )?;
        let rescheduled = record.status.transition(AppointmentStatus::Rescheduled)?;
        record.status = rescheduled.transition(AppointmentStatus::Pending)?;
        record.date = new_date;
        record.time = new_time;
        Ok(record.clone())
    }

    #[must_use]
    pub fn find_document(&self, id: &RecordId) -> Option<DocumentRequest> {
        self.store
            .documents
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    #[must_use]
    pub fn find_invitation(&self, id: &RecordId) -> Option<MeetingInvitation> {
        self.store
            .invitations
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    /// Snapshot of all document requests in insertion order.
    #[must_use]
    pub fn documents(&self) -> Vec<DocumentRequest> {
        self.store.documents.clone()
    }

    #[must_use]
    pub fn incidents(&self) -> Vec<IncidentReport> {
        self.store.incidents.clone()
    }

    #[must_use]
    pub fn appointments(&self) -> Vec<Appointment> {
        self.store.appointments.clone()
    }

    #[must_use]
    pub fn invitations(&self) -> Vec<MeetingInvitation> {
        self.store.invitations.clone()
    }

    /// Filters and sorts document requests. Filters AND together; absent
    /// axes are unconstrained. Sorting by date is stable, so equal dates
    /// keep their store order. An empty result is a valid empty vec.
    #[must_use]
    pub fn query_documents(&self, query: &DocumentQuery) -> Vec<DocumentRequest> {
        let mut records: Vec<DocumentRequest> = self
            .store
            .documents
            .iter()
            .filter(|record| {
                query.status.is_none_or(|status| record.status == status)
                    && query
                        .document_type
                        .as_deref()
                        .is_none_or(|name| record.document_type == name)
            })
            .cloned()
            .collect();
        sort_by_date(&mut records, query.sort, |record| {
            record.requested_at.date()
        });
        records
    }

    #[must_use]
    pub fn query_incidents(&self, query: &IncidentQuery) -> Vec<IncidentReport> {
        let mut records: Vec<IncidentReport> = self
            .store
            .incidents
            .iter()
            .filter(|record| {
                query.status.is_none_or(|status| record.status == status)
                    && query
                        .incident_type
                        .as_deref()
                        .is_none_or(|name| record.incident_type == name)
                    && query
                        .priority
                        .is_none_or(|priority| record.priority == priority)
            })
            .cloned()
            .collect();
        sort_by_date(&mut records, query.sort, |record| record.incident_date);
        records
    }

    #[must_use]
    pub fn query_appointments(&self, query: &AppointmentQuery) -> Vec<Appointment> {
        let mut records: Vec<Appointment> = self
            .store
            .appointments
            .iter()
            .filter(|record| {
                query.status.is_none_or(|status| record.status == status)
                    && query
                        .meeting_with
                        .as_deref()
                        .is_none_or(|name| record.meeting_with == name)
            })
            .cloned()
            .collect();
        sort_by_date(&mut records, query.sort, |record| record.date);
        records
    }

    #[must_use]
    pub fn query_invitations(&self, query: &InvitationQuery) -> Vec<MeetingInvitation> {
        let mut records: Vec<MeetingInvitation> = self
            .store
            .invitations
            .iter()
            .filter(|record| {
                query.status.is_none_or(|status| record.status == status)
                    && query
                        .from_official
                        .as_deref()
                        .is_none_or(|name| record.from_official == name)
            })
            .cloned()
            .collect();
        sort_by_date(&mut records, query.sort, |record| record.date);
        records
    }

    /// Seeds the demo records a fresh portal session shows: a couple of
    /// document requests (one with the pre-seeded `none` status), an
    /// incident under investigation, a confirmed appointment, and a
    /// pending meeting invitation.
    pub fn seed_demo(&mut self, now: OffsetDateTime) -> DemoSeed {
        let year = now.year();

        let mut documents = Vec::new();
        for (document_type, purpose, status) in [
            ("Barangay Clearance", "Employment", DocumentStatus::None),
            (
                "Certificate of Residency",
                "School enrollment",
                DocumentStatus::InProgress,
            ),
            ("Barangay ID", "Identification", DocumentStatus::ForPickup),
        ] {
            let id = self.store.next_id(RecordKind::Document, year);
            let entry = self.catalog.document_type(document_type);
            let (fee, processing_days) =
                entry.map_or((0, 0), |entry| (entry.fee, entry.processing_days));
            documents.push(id.clone());
            self.store.documents.push(DocumentRequest {
                id,
                requested_at: now,
                document_type: document_type.to_string(),
                purpose: purpose.to_string(),
                fee,
                processing_days,
                payment: barangay_portal_core::PaymentMethod::PayAtOffice,
                status,
            });
        }

        let incident_id = self.store.next_id(RecordKind::Incident, year);
        self.store.incidents.push(IncidentReport {
            id: incident_id.clone(),
            reported_at: now,
            incident_type: "Noise Complaint".to_string(),
            incident_date: now.date(),
            location: "Purok 3, Mabini St.".to_string(),
            description: "Karaoke past midnight on a weekday".to_string(),
            priority: IncidentPriority::Medium,
            status: IncidentStatus::Investigating,
        });

        let appointment_id = self.store.next_id(RecordKind::Appointment, year);
        self.store.appointments.push(Appointment {
            id: appointment_id.clone(),
            requested_at: now,
            meeting_with: "Maria Santos".to_string(),
            date: now.date(),
            time: "10:00".to_string(),
            subject: "Residency certificate follow-up".to_string(),
            purpose: "Follow up on pending request".to_string(),
            location: "Barangay Hall".to_string(),
            origin_invitation: None,
            status: AppointmentStatus::Confirmed,
        });

        let invitation = self.deliver_invitation(
            InvitationDelivery {
                from_official: "Hon. Ramon dela Cruz".to_string(),
                date: now.date(),
                time: "14:00".to_string(),
                location: "Barangay Hall, Session Room".to_string(),
                purpose: "Quarterly residents' assembly".to_string(),
            },
            now,
        );

        DemoSeed {
            documents,
            incidents: vec![incident_id],
            appointments: vec![appointment_id],
            invitations: vec![invitation.id],
        }
    }
}

fn find_mut<'a, T>(
    records: &'a mut [T],
    kind: RecordKind,
    id: &RecordId,
    record_id: impl Fn(&T) -> &RecordId,
) -> Result<&'a mut T, EngineError> {
    records
        .iter_mut()
        .find(|record| record_id(record) == id)
        .ok_or_else(|| EngineError::RecordNotFound {
            kind,
            id: id.clone(),
        })
}

/// Stable date sort; `Vec::sort_by` keeps equal keys in their filtered-in
/// (store) order for both directions.
fn sort_by_date<T>(records: &mut [T], direction: Option<SortDirection>, key: impl Fn(&T) -> Date) {
    match direction {
        None => {}
        Some(SortDirection::Asc) => records.sort_by(|a, b| key(a).cmp(&key(b))),
        Some(SortDirection::Desc) => records.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}
