//! Session-driver CLI for the barangay portal engine.
//!
//! The record store intentionally does not outlive the process (no
//! persistence is in scope), so the CLI models one portal session per
//! invocation: `brgy script` executes a JSON list of engine operations
//! against a fresh in-memory session and prints a versioned JSON report,
//! `brgy demo` seeds and dumps the showcase session, and `brgy catalog`
//! prints the static configuration the engine reads.
//!
//! Embedders can skip argument parsing and call [`run_script`] /
//! [`run_demo`] / [`catalog_payload`] directly.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use barangay_portal_core::{
    format_rfc3339, now_utc, parse_date, parse_rfc3339_utc, Appointment, AppointmentDraft,
    AppointmentStatus, Catalog, DocumentDraft, DocumentRequest, DocumentStatus, EngineError,
    IncidentDraft, IncidentReport, IncidentStatus, InvitationDelivery, InvitationResponse,
    MeetingInvitation, RecordId,
};
use barangay_portal_engine::{
    AppointmentQuery, DemoSeed, DocumentQuery, FormId, IncidentQuery, InvitationQuery,
    PortalEngine,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use ulid::Ulid;

#[derive(Debug, Parser)]
#[command(name = "brgy")]
#[command(about = "Barangay resident portal session CLI")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a JSON operation script against one in-memory session.
    Script(ScriptArgs),
    /// Seed the demo session and print its records.
    Demo(DemoArgs),
    /// Print the document-type catalog and official roster.
    Catalog(CatalogArgs),
}

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Script file; stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Simulated submission latency in milliseconds.
    #[arg(long, default_value_t = 600)]
    latency_ms: u64,
    /// Session start instant (RFC3339 UTC); wall clock when omitted.
    #[arg(long)]
    start: Option<String>,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Session start instant (RFC3339 UTC); wall clock when omitted.
    #[arg(long)]
    start: Option<String>,
}

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[arg(long)]
    json: bool,
}

/// One scripted engine operation. The session clock is virtual: it starts
/// at the session start instant and only `advance` moves it, so scripts
/// exercise the submission latency deterministically.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    SubmitDocument {
        #[serde(default)]
        form: Option<String>,
        draft: DocumentDraft,
    },
    SubmitIncident {
        #[serde(default)]
        form: Option<String>,
        draft: IncidentDraft,
    },
    SubmitAppointment {
        #[serde(default)]
        form: Option<String>,
        draft: AppointmentDraft,
    },
    /// Move the virtual clock forward.
    Advance { ms: u64 },
    /// Complete every due in-flight submission.
    Poll,
    DeliverInvitation { delivery: InvitationDelivery },
    RespondInvitation {
        id: String,
        response: InvitationResponse,
    },
    TransitionDocument { id: String, to: DocumentStatus },
    TransitionIncident { id: String, to: IncidentStatus },
    TransitionAppointment { id: String, to: AppointmentStatus },
    RescheduleAppointment {
        id: String,
        date: String,
        time: String,
    },
    /// Run the validation gate without submitting.
    ValidateDocument { draft: DocumentDraft },
    ValidateIncident { draft: IncidentDraft },
    ValidateAppointment { draft: AppointmentDraft },
    QueryDocuments {
        #[serde(default)]
        query: DocumentQuery,
    },
    QueryIncidents {
        #[serde(default)]
        query: IncidentQuery,
    },
    QueryAppointments {
        #[serde(default)]
        query: AppointmentQuery,
    },
    QueryInvitations {
        #[serde(default)]
        query: InvitationQuery,
    },
    SeedDemo,
}

impl ScriptOp {
    #[must_use]
    fn name(&self) -> &'static str {
        match self {
            Self::SubmitDocument { .. } => "submit_document",
            Self::SubmitIncident { .. } => "submit_incident",
            Self::SubmitAppointment { .. } => "submit_appointment",
            Self::Advance { .. } => "advance",
            Self::Poll => "poll",
            Self::DeliverInvitation { .. } => "deliver_invitation",
            Self::RespondInvitation { .. } => "respond_invitation",
            Self::TransitionDocument { .. } => "transition_document",
            Self::TransitionIncident { .. } => "transition_incident",
            Self::TransitionAppointment { .. } => "transition_appointment",
            Self::RescheduleAppointment { .. } => "reschedule_appointment",
            Self::ValidateDocument { .. } => "validate_document",
            Self::ValidateIncident { .. } => "validate_incident",
            Self::ValidateAppointment { .. } => "validate_appointment",
            Self::QueryDocuments { .. } => "query_documents",
            Self::QueryIncidents { .. } => "query_incidents",
            Self::QueryAppointments { .. } => "query_appointments",
            Self::QueryInvitations { .. } => "query_invitations",
            Self::SeedDemo => "seed_demo",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub op: String,
    pub ok: bool,
    pub outcome: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordsSnapshot {
    pub documents: Vec<DocumentRequest>,
    pub incidents: Vec<IncidentReport>,
    pub appointments: Vec<Appointment>,
    pub invitations: Vec<MeetingInvitation>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub contract_version: String,
    pub started_at: String,
    pub latency_ms: u64,
    pub steps: Vec<StepReport>,
    pub records: RecordsSnapshot,
}

#[derive(Debug, Serialize)]
struct SubmitOutcome {
    ticket: Ulid,
    form: FormId,
}

/// Executes the parsed top-level CLI command.
///
/// # Errors
/// Returns an error when script decoding fails, a scripted transition
/// violates the state machine, or output serialization fails.
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Script(args) => {
            let raw = read_script(args.file.as_deref())?;
            let ops: Vec<ScriptOp> =
                serde_json::from_str(&raw).context("script must be a JSON array of operations")?;
            let start = parse_optional_utc(args.start.as_deref())?;
            let report = run_script(&ops, start, args.latency_ms)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Demo(args) => {
            let start = parse_optional_utc(args.start.as_deref())?;
            let report = run_demo(start)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Catalog(args) => {
            let catalog = Catalog::builtin();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&catalog_payload(&catalog))?);
            } else {
                print_catalog(&catalog);
            }
            Ok(())
        }
    }
}

fn read_script(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed reading script {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed reading script from stdin")?;
            Ok(raw)
        }
    }
}

fn parse_optional_utc(raw: Option<&str>) -> Result<OffsetDateTime> {
    match raw {
        Some(value) => {
            parse_rfc3339_utc(value).map_err(|err| anyhow!("invalid --start value: {err}"))
        }
        None => Ok(now_utc()),
    }
}

/// Runs a script against a fresh session and returns the full report.
///
/// Recoverable errors (validation, payment proof, catalog misses, the
/// in-flight guard, unknown record ids) are recorded on their step and the
/// script continues — the portal re-presents the form in those cases. An
/// illegal status transition is a contract violation and aborts the run.
///
/// # Errors
/// Returns an error for illegal transitions, undecodable dates, or
/// serialization failures.
pub fn run_script(ops: &[ScriptOp], start: OffsetDateTime, latency_ms: u64) -> Result<SessionReport> {
    let latency = Duration::milliseconds(i64::try_from(latency_ms).unwrap_or(i64::MAX));
    let mut engine = PortalEngine::with_latency(Catalog::builtin(), latency)?;
    let mut now = start;
    let mut forms: BTreeMap<String, FormId> = BTreeMap::new();
    let mut steps = Vec::with_capacity(ops.len());

    for (index, op) in ops.iter().enumerate() {
        let step = index + 1;
        let name = op.name();
        let outcome = execute_op(&mut engine, &mut forms, &mut now, op.clone())
            .with_context(|| format!("step {step} ({name}) failed"))?;
        let (ok, outcome) = match outcome {
            Ok(value) => (true, value),
            Err(err) => (false, serde_json::json!({ "error": err.to_string() })),
        };
        steps.push(StepReport {
            step,
            op: name.to_string(),
            ok,
            outcome,
        });
    }

    Ok(SessionReport {
        contract_version: "portal_session.v1".to_string(),
        started_at: format_rfc3339(start)?,
        latency_ms,
        steps,
        records: snapshot(&engine),
    })
}

/// Inner result: `Ok(Err(..))` is a recoverable, recorded engine error;
/// the outer `Err` aborts the script.
fn execute_op(
    engine: &mut PortalEngine,
    forms: &mut BTreeMap<String, FormId>,
    now: &mut OffsetDateTime,
    op: ScriptOp,
) -> Result<std::result::Result<Value, EngineError>> {
    let outcome: std::result::Result<Value, EngineError> = match op {
        ScriptOp::SubmitDocument { form, draft } => {
            let form = form_id(forms, form);
            engine
                .submit_document(form, draft, *now)
                .map(|ticket| to_value(&SubmitOutcome { ticket, form }))
        }
        ScriptOp::SubmitIncident { form, draft } => {
            let form = form_id(forms, form);
            engine
                .submit_incident(form, draft, *now)
                .map(|ticket| to_value(&SubmitOutcome { ticket, form }))
        }
        ScriptOp::SubmitAppointment { form, draft } => {
            let form = form_id(forms, form);
            engine
                .submit_appointment(form, draft, *now)
                .map(|ticket| to_value(&SubmitOutcome { ticket, form }))
        }
        ScriptOp::Advance { ms } => {
            *now += Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX));
            format_rfc3339(*now).map(|now| serde_json::json!({ "now": now }))
        }
        ScriptOp::Poll => Ok(to_value(&engine.poll(*now))),
        ScriptOp::DeliverInvitation { delivery } => {
            Ok(to_value(&engine.deliver_invitation(delivery, *now)))
        }
        ScriptOp::RespondInvitation { id, response } => engine
            .respond_to_invitation(&RecordId(id), response, *now)
            .map(|outcome| to_value(&outcome)),
        ScriptOp::TransitionDocument { id, to } => engine
            .transition_document(&RecordId(id), to)
            .map(|record| to_value(&record)),
        ScriptOp::TransitionIncident { id, to } => engine
            .transition_incident(&RecordId(id), to)
            .map(|record| to_value(&record)),
        ScriptOp::TransitionAppointment { id, to } => engine
            .transition_appointment(&RecordId(id), to)
            .map(|record| to_value(&record)),
        ScriptOp::RescheduleAppointment { id, date, time } => parse_date(&date)
            .and_then(|date| engine.reschedule_appointment(&RecordId(id), date, time))
            .map(|record| to_value(&record)),
        ScriptOp::ValidateDocument { draft } => Ok(to_value(&draft.validate())),
        ScriptOp::ValidateIncident { draft } => Ok(to_value(&draft.validate())),
        ScriptOp::ValidateAppointment { draft } => Ok(to_value(&draft.validate())),
        ScriptOp::QueryDocuments { query } => Ok(to_value(&engine.query_documents(&query))),
        ScriptOp::QueryIncidents { query } => Ok(to_value(&engine.query_incidents(&query))),
        ScriptOp::QueryAppointments { query } => Ok(to_value(&engine.query_appointments(&query))),
        ScriptOp::QueryInvitations { query } => Ok(to_value(&engine.query_invitations(&query))),
        ScriptOp::SeedDemo => Ok(to_value(&engine.seed_demo(*now))),
    };

    match outcome {
        Ok(value) => Ok(Ok(value)),
        Err(err) if recoverable(&err) => Ok(Err(err)),
        Err(err) => Err(err.into()),
    }
}

// Engine payloads always serialize; a null stands in rather than a panic.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Errors the portal surfaces back to the resident's form; everything else
/// is an invariant violation.
fn recoverable(err: &EngineError) -> bool {
    matches!(
        err,
        EngineError::Validation(_)
            | EngineError::PaymentProofMissing
            | EngineError::UnknownDocumentType(_)
            | EngineError::UnknownOfficial(_)
            | EngineError::SubmissionInFlight
            | EngineError::RecordNotFound { .. }
    )
}

fn form_id(forms: &mut BTreeMap<String, FormId>, label: Option<String>) -> FormId {
    let label = label.unwrap_or_else(|| "default".to_string());
    *forms.entry(label).or_insert_with(FormId::new)
}

fn snapshot(engine: &PortalEngine) -> RecordsSnapshot {
    RecordsSnapshot {
        documents: engine.documents(),
        incidents: engine.incidents(),
        appointments: engine.appointments(),
        invitations: engine.invitations(),
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DemoReport {
    pub contract_version: String,
    pub started_at: String,
    pub seed: DemoSeed,
    pub records: RecordsSnapshot,
}

/// Seeds the showcase session and returns its report.
///
/// # Errors
/// Returns an error when timestamp formatting fails.
pub fn run_demo(start: OffsetDateTime) -> Result<DemoReport> {
    let mut engine = PortalEngine::new(Catalog::builtin())?;
    let seed = engine.seed_demo(start);
    Ok(DemoReport {
        contract_version: "portal_demo.v1".to_string(),
        started_at: format_rfc3339(start)?,
        seed,
        records: snapshot(&engine),
    })
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogPayload {
    pub contract_version: String,
    pub catalog: Catalog,
}

#[must_use]
pub fn catalog_payload(catalog: &Catalog) -> CatalogPayload {
    CatalogPayload {
        contract_version: "portal_catalog.v1".to_string(),
        catalog: catalog.clone(),
    }
}

fn print_catalog(catalog: &Catalog) {
    println!("{:<28} {:<6} processing_days", "document_type", "fee");
    println!("{}", "-".repeat(50));
    for entry in &catalog.document_types {
        println!(
            "{:<28} {:<6} {}",
            entry.name, entry.fee, entry.processing_days
        );
    }
    println!();
    println!("{:<24} position", "official");
    println!("{}", "-".repeat(50));
    for official in &catalog.officials {
        println!("{:<24} {}", official.name, official.position);
    }
}
