//! # Events
//!
//! Every mutating entry point publishes exactly one event so off-chain
//! consumers (the indexer, frontends) can follow registry and marketplace
//! activity without replaying storage.
//!
//! Topic layout: `(symbol_short!(topic), subject_id)` where `subject_id` is
//! the project or listing ID the event concerns; admin events carry the
//! affected address as the second topic instead. The data payload is one of
//! the `#[contracttype]` structs below.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Emitted by `submit_project` (`submitted` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectSubmitted {
    pub project_id: u64,
    pub submitter: Address,
}

/// Emitted by `approve_project` (`approved` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectApproved {
    pub project_id: u64,
    pub validator: Address,
    pub credit_amount: i128,
}

/// Emitted by `reject_project` (`rejected` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectRejected {
    pub project_id: u64,
    pub validator: Address,
}

/// Emitted by `issue_credits` (`issued` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditsIssued {
    pub project_id: u64,
    pub submitter: Address,
    pub amount: i128,
}

/// Emitted by `list_for_sale` (`listed` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingCreated {
    pub listing_id: u64,
    pub seller: Address,
    pub amount: i128,
    pub unit_price: i128,
}

/// Emitted by `buy_listing` (`sold` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingSold {
    pub listing_id: u64,
    pub buyer: Address,
    pub total_cost: i128,
}

/// Emitted by `cancel_listing` (`cancelled` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingCancelled {
    pub listing_id: u64,
    pub seller: Address,
}

/// Emitted by `set_validator` (`val_set` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatorSet {
    pub validator: Address,
}

/// Emitted by `transfer_admin` (`adm_xfer` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferred {
    pub old_admin: Address,
    pub new_admin: Address,
}

/// Emitted by `ensure_token` on first binding (`token_set` topic).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBound {
    pub token: Address,
}

pub fn project_submitted(env: &Env, project_id: u64, submitter: Address) {
    env.events().publish(
        (symbol_short!("submitted"), project_id),
        ProjectSubmitted {
            project_id,
            submitter,
        },
    );
}

pub fn project_approved(env: &Env, project_id: u64, validator: Address, credit_amount: i128) {
    env.events().publish(
        (symbol_short!("approved"), project_id),
        ProjectApproved {
            project_id,
            validator,
            credit_amount,
        },
    );
}

pub fn project_rejected(env: &Env, project_id: u64, validator: Address) {
    env.events().publish(
        (symbol_short!("rejected"), project_id),
        ProjectRejected {
            project_id,
            validator,
        },
    );
}

pub fn credits_issued(env: &Env, project_id: u64, submitter: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("issued"), project_id),
        CreditsIssued {
            project_id,
            submitter,
            amount,
        },
    );
}

pub fn listing_created(env: &Env, listing_id: u64, seller: Address, amount: i128, unit_price: i128) {
    env.events().publish(
        (symbol_short!("listed"), listing_id),
        ListingCreated {
            listing_id,
            seller,
            amount,
            unit_price,
        },
    );
}

pub fn listing_sold(env: &Env, listing_id: u64, buyer: Address, total_cost: i128) {
    env.events().publish(
        (symbol_short!("sold"), listing_id),
        ListingSold {
            listing_id,
            buyer,
            total_cost,
        },
    );
}

pub fn listing_cancelled(env: &Env, listing_id: u64, seller: Address) {
    env.events().publish(
        (symbol_short!("cancelled"), listing_id),
        ListingCancelled {
            listing_id,
            seller,
        },
    );
}

pub fn validator_set(env: &Env, validator: Address) {
    env.events().publish(
        (symbol_short!("val_set"), validator.clone()),
        ValidatorSet { validator },
    );
}

pub fn admin_transferred(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("adm_xfer"), new_admin.clone()),
        AdminTransferred {
            old_admin,
            new_admin,
        },
    );
}

pub fn token_bound(env: &Env, token: Address) {
    env.events().publish(
        (symbol_short!("token_set"), token.clone()),
        TokenBound { token },
    );
}
