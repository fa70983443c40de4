//! # Types
//!
//! Shared data structures used across all modules of the credit registry.
//!
//! ## Status as a Finite-State Machine
//!
//! [`ProjectStatus`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Pending ──► Verified ──► Issued
//!     └─────► Rejected
//! ```
//!
//! `Rejected` and `Issued` are terminal. Backward transitions and re-entry
//! into `Pending` are rejected by the lifecycle entry points; `issue_credits`
//! is reachable only from `Verified`, which makes double-issuance
//! structurally impossible.
//!
//! ## Listings are single-use
//!
//! A [`ListingRecord`] has no status enum — only the `active` flag, which
//! flips `true → false` exactly once (settlement or cancellation) and never
//! back. A new sale requires a new listing.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle status of a submitted project.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProjectStatus {
    /// Submitted, awaiting validator review.
    Pending,
    /// Approved by the validator; credit amount fixed.
    Verified,
    /// Rejected by the validator. Terminal.
    Rejected,
    /// Credit tokens minted to the submitter. Terminal.
    Issued,
}

/// One registered project.
///
/// Everything except `status` and `credit_amount` is immutable after
/// submission. `credit_amount` is `0` until approval, set exactly once by
/// `approve_project`, and never changes afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectRecord {
    /// Unique identifier (auto-incremented, 0-based).
    pub id: u64,
    /// Address that submitted the project and receives issued credits.
    pub submitter: Address,
    /// Human-readable project name.
    pub name: String,
    /// Free-text location description.
    pub location: String,
    /// Ecosystem category (e.g. "mangrove", "peatland").
    pub ecosystem_type: String,
    /// Opaque content identifier for off-chain evidence (e.g. an IPFS CID).
    pub evidence_ref: String,
    /// Current lifecycle status.
    pub status: ProjectStatus,
    /// Credits awarded at verification; 0 while `Pending` or `Rejected`.
    pub credit_amount: i128,
}

/// One marketplace sale offer.
///
/// The escrowed `amount` is pulled from the seller before the record is
/// written, so an active listing is always fully collateralized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingRecord {
    /// Unique identifier (auto-incremented, 0-based).
    pub id: u64,
    /// Address that created the listing and receives the sale proceeds.
    pub seller: Address,
    /// Quantity of credit tokens held in escrow. Immutable, > 0.
    pub amount: i128,
    /// Price per token in the payment token's unit. Immutable, > 0.
    pub unit_price: i128,
    /// `true` from creation until settlement or cancellation, then
    /// permanently `false`.
    pub active: bool,
}
