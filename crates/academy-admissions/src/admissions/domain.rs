use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review lifecycle of an application. Every submission starts as `Pending`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
    Waitlist,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Waitlist,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Waitlist => "WAITLIST",
        }
    }

    /// Exact, case-sensitive match against the wire labels.
    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남")]
    Male,
    #[serde(rename = "여")]
    Female,
}

impl Gender {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "남" => Some(Gender::Male),
            "여" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Whether the applicant joins the cohort's golf sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GolfParticipation {
    Yes,
    No,
}

impl GolfParticipation {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "Yes" => Some(GolfParticipation::Yes),
            "No" => Some(GolfParticipation::No),
            _ => None,
        }
    }
}

/// Tax invoice preference for the tuition payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxInvoice {
    #[serde(rename = "발행")]
    Issue,
    #[serde(rename = "미발행")]
    DoNotIssue,
}

impl TaxInvoice {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw {
            "발행" => Some(TaxInvoice::Issue),
            "미발행" => Some(TaxInvoice::DoNotIssue),
            _ => None,
        }
    }
}

/// Bounds-checked submission produced by the creation schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub name: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub company_position: String,
    pub address: Option<String>,
    pub interests: Vec<String>,
    pub golf: GolfParticipation,
    pub referrer: Option<String>,
    pub tax_invoice: TaxInvoice,
    pub generation: u16,
}

/// Reviewer decision produced by the update schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<String>,
}

/// Stored application record, serialized as the public JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
    pub phone: String,
    pub birth_date: Option<String>,
    pub gender: Option<Gender>,
    pub company_position: String,
    pub address: Option<String>,
    pub interests: Vec<String>,
    pub golf: GolfParticipation,
    pub referrer: Option<String>,
    pub tax_invoice: TaxInvoice,
    pub generation: u16,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub reviewer: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Application {
    /// New record in the `Pending` state, regardless of what the applicant asked for.
    pub fn from_submission(
        id: ApplicationId,
        submission: ApplicationSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let ApplicationSubmission {
            name,
            phone,
            birth_date,
            gender,
            company_position,
            address,
            interests,
            golf,
            referrer,
            tax_invoice,
            generation,
        } = submission;

        Self {
            id,
            name,
            phone,
            birth_date,
            gender,
            company_position,
            address,
            interests,
            golf,
            referrer,
            tax_invoice,
            generation,
            status: ApplicationStatus::Pending,
            admin_notes: None,
            reviewer: None,
            submitted_at,
            reviewed_at: None,
        }
    }

    /// Record a reviewer decision. Missing notes clear the previous notes; a missing
    /// reviewer keeps whoever reviewed last.
    pub fn apply_update(&mut self, update: &StatusUpdate, reviewed_at: DateTime<Utc>) {
        self.status = update.status;
        self.admin_notes = Some(update.admin_notes.clone().unwrap_or_default());
        if let Some(reviewer) = &update.reviewed_by {
            self.reviewer = Some(reviewer.clone());
        }
        self.reviewed_at = Some(reviewed_at);
    }

    /// Same applicant applying to the same cohort.
    pub fn conflicts_with(&self, other: &Application) -> bool {
        self.phone == other.phone && self.generation == other.generation
    }

    pub fn summary(&self) -> ApplicationSummary {
        ApplicationSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            generation: self.generation,
            status: self.status,
        }
    }
}

/// Minimal view returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub id: ApplicationId,
    pub name: String,
    pub generation: u16,
    pub status: ApplicationStatus,
}
