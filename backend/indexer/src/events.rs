//! Canonical event types emitted by the credit registry contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/credit_registry/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the registry contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new project was submitted (`submitted` topic).
    ProjectSubmitted,
    /// The validator approved a project (`approved` topic).
    ProjectApproved,
    /// The validator rejected a project (`rejected` topic).
    ProjectRejected,
    /// Credit tokens were minted to a submitter (`issued` topic).
    CreditsIssued,
    /// Tokens were escrowed into a new listing (`listed` topic).
    ListingCreated,
    /// A listing settled (`sold` topic).
    ListingSold,
    /// A listing was cancelled by its seller (`cancelled` topic).
    ListingCancelled,
    /// The admin assigned a validator (`val_set` topic).
    ValidatorSet,
    /// Contract administration changed hands (`adm_xfer` topic).
    AdminTransferred,
    /// The credit-asset token was bound (`token_set` topic).
    TokenBound,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "submitted" => Self::ProjectSubmitted,
            "approved" => Self::ProjectApproved,
            "rejected" => Self::ProjectRejected,
            "issued" => Self::CreditsIssued,
            "listed" => Self::ListingCreated,
            "sold" => Self::ListingSold,
            "cancelled" => Self::ListingCancelled,
            "val_set" => Self::ValidatorSet,
            "adm_xfer" => Self::AdminTransferred,
            "token_set" => Self::TokenBound,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectSubmitted => "project_submitted",
            Self::ProjectApproved => "project_approved",
            Self::ProjectRejected => "project_rejected",
            Self::CreditsIssued => "credits_issued",
            Self::ListingCreated => "listing_created",
            Self::ListingSold => "listing_sold",
            Self::ListingCancelled => "listing_cancelled",
            Self::ValidatorSet => "validator_set",
            Self::AdminTransferred => "admin_transferred",
            Self::TokenBound => "token_bound",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the second topic entry is a project ID.
    pub fn is_project_event(&self) -> bool {
        matches!(
            self,
            Self::ProjectSubmitted
                | Self::ProjectApproved
                | Self::ProjectRejected
                | Self::CreditsIssued
        )
    }

    /// Whether the second topic entry is a listing ID.
    pub fn is_listing_event(&self) -> bool {
        matches!(
            self,
            Self::ListingCreated | Self::ListingSold | Self::ListingCancelled
        )
    }
}

/// A fully decoded registry event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEvent {
    pub event_type: String,
    pub project_id: Option<String>,
    pub listing_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub project_id: Option<String>,
    pub listing_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
