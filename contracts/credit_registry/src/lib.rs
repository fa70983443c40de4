//! # Credit Registry Contract
//!
//! This is the root crate of the **environmental-credit registry and
//! marketplace**. It exposes the single Soroban contract [`CreditRegistry`]
//! whose entry points cover the full project and listing lifecycle:
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`CreditRegistry::init`]                              |
//! | Role admin   | `set_validator`, `transfer_admin`                     |
//! | Credit asset | [`CreditRegistry::ensure_token`]                      |
//! | Lifecycle    | `submit_project`, `approve_project`, `reject_project`, `issue_credits` |
//! | Marketplace  | `list_for_sale`, `buy_listing`, `cancel_listing`      |
//! | Queries      | `get_project`, `get_listing`, counters and addresses  |
//!
//! ## Architecture
//!
//! Storage access is fully delegated to [`storage`]; event payloads live in
//! [`events`]. This file contains the public entry points, the two
//! authorization gates (admin / validator equality checks), and the token
//! interactions — every token movement is a single fallible step, and a
//! failed step traps the whole call so no storage write survives it.
//!
//! ## Escrow model
//!
//! `list_for_sale` pulls the offered tokens into the contract address
//! *before* the listing record is written, so an active listing is always
//! fully collateralized: a buyer can never race a seller who has since spent
//! the underlying tokens.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, token, Address, Env, String,
};

mod events;
mod storage;
mod types;

#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_lifecycle;

pub use types::{ListingRecord, ProjectRecord, ProjectStatus};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// `init` called a second time.
    AlreadyInitialized = 1,
    /// Caller fails an authorization gate.
    Unauthorized = 2,
    /// Project or listing index past its counter.
    NotFound = 3,
    /// Operation attempted from a state that does not permit it.
    InvalidState = 4,
    /// Zero/invalid numeric input, arithmetic overflow, or insufficient payment.
    InvalidArgument = 5,
    /// Required global resource (the credit asset) not yet bound.
    Precondition = 6,
    /// An underlying token transfer could not complete.
    TransferFailure = 7,
}

#[contract]
pub struct CreditRegistry;

// ─────────────────────────────────────────────────────────
// Authorization gates
// ─────────────────────────────────────────────────────────

/// Caller must have authorized the call and match the stored admin.
fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    match storage::get_admin(env) {
        Some(admin) if admin == *caller => {}
        _ => panic_with_error!(env, Error::Unauthorized),
    }
}

/// Caller must have authorized the call and match the stored validator.
/// While no validator is assigned, every validator-gated call fails.
fn require_validator(env: &Env, caller: &Address) {
    caller.require_auth();
    match storage::get_validator(env) {
        Some(validator) if validator == *caller => {}
        _ => panic_with_error!(env, Error::Unauthorized),
    }
}

/// The credit asset must already be bound.
fn require_credit_asset(env: &Env) -> Address {
    storage::get_credit_asset(env).unwrap_or_else(|| panic_with_error!(env, Error::Precondition))
}

/// The settlement token is bound at `init` and never cleared, so it is
/// present in every initialised contract.
fn require_payment_token(env: &Env) -> Address {
    storage::get_payment_token(env).unwrap_or_else(|| panic_with_error!(env, Error::Precondition))
}

/// Move `amount` credit tokens, trapping the call on any transfer failure
/// (insufficient balance, missing trustline). A trapped call rolls back
/// every prior storage write and sub-call.
fn transfer_credits(env: &Env, asset: &Address, from: &Address, to: &Address, amount: i128) {
    let client = token::Client::new(env, asset);
    if client.try_transfer(from, to, &amount).is_err() {
        panic_with_error!(env, Error::TransferFailure);
    }
}

#[contractimpl]
impl CreditRegistry {
    // ─────────────────────────────────────────────────────────
    // Bootstrap / role administration
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: set the admin and bind the settlement token.
    ///
    /// Must be called exactly once immediately after deployment. Subsequent
    /// calls panic with `Error::AlreadyInitialized`.
    ///
    /// `payment_token` is the token listings settle in — on Stellar the
    /// native asset is itself a token contract, so its address is bound here.
    pub fn init(env: Env, admin: Address, payment_token: Address) {
        if storage::has_admin(&env) {
            panic_with_error!(&env, Error::AlreadyInitialized);
        }
        admin.require_auth();
        storage::set_admin(&env, &admin);
        storage::set_payment_token(&env, &payment_token);
    }

    /// Assign the validator responsible for project reviews.
    ///
    /// Admin-gated. May be called any number of times; each call replaces
    /// the previous validator.
    pub fn set_validator(env: Env, caller: Address, validator: Address) {
        require_admin(&env, &caller);
        storage::set_validator(&env, &validator);
        events::validator_set(&env, validator);
    }

    /// Transfer contract administration to `new_admin`.
    ///
    /// Admin-gated. The previous admin loses the role immediately.
    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) {
        require_admin(&env, &caller);
        storage::set_admin(&env, &new_admin);
        events::admin_transferred(&env, caller, new_admin);
    }

    // ─────────────────────────────────────────────────────────
    // Credit asset
    // ─────────────────────────────────────────────────────────

    /// Bind the credit-asset token, idempotently. Returns the bound address.
    ///
    /// Admin-gated. The first call records `token` — a token contract whose
    /// mint authority is held by this contract's address. Every later call
    /// ignores the argument and returns the existing binding, so a retried
    /// call (e.g. after an ambiguous ledger response) can never bind a
    /// second asset.
    pub fn ensure_token(env: Env, caller: Address, token: Address) -> Address {
        require_admin(&env, &caller);
        if let Some(existing) = storage::get_credit_asset(&env) {
            return existing;
        }
        storage::set_credit_asset(&env, &token);
        events::token_bound(&env, token.clone());
        token
    }

    // ─────────────────────────────────────────────────────────
    // Project lifecycle
    // ─────────────────────────────────────────────────────────

    /// Submit a new project for review. Returns the allocated project ID.
    ///
    /// Open to anyone; the record starts `Pending` with zero credits.
    pub fn submit_project(
        env: Env,
        submitter: Address,
        name: String,
        location: String,
        ecosystem_type: String,
        evidence_ref: String,
    ) -> u64 {
        submitter.require_auth();

        let id = storage::next_project_id(&env);
        let project = ProjectRecord {
            id,
            submitter: submitter.clone(),
            name,
            location,
            ecosystem_type,
            evidence_ref,
            status: ProjectStatus::Pending,
            credit_amount: 0,
        };
        storage::save_project(&env, &project);

        events::project_submitted(&env, id, submitter);
        id
    }

    /// Approve a pending project and fix its credit amount.
    ///
    /// Validator-gated. `credit_amount` must be positive and is set exactly
    /// once; the project moves `Pending → Verified`.
    pub fn approve_project(env: Env, caller: Address, project_id: u64, credit_amount: i128) {
        require_validator(&env, &caller);

        let mut project = storage::load_project(&env, project_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound));
        if credit_amount <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }
        if project.status != ProjectStatus::Pending {
            panic_with_error!(&env, Error::InvalidState);
        }

        project.status = ProjectStatus::Verified;
        project.credit_amount = credit_amount;
        storage::save_project(&env, &project);

        events::project_approved(&env, project_id, caller, credit_amount);
    }

    /// Reject a pending project. Terminal.
    ///
    /// Validator-gated; the project moves `Pending → Rejected`.
    pub fn reject_project(env: Env, caller: Address, project_id: u64) {
        require_validator(&env, &caller);

        let mut project = storage::load_project(&env, project_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound));
        if project.status != ProjectStatus::Pending {
            panic_with_error!(&env, Error::InvalidState);
        }

        project.status = ProjectStatus::Rejected;
        storage::save_project(&env, &project);

        events::project_rejected(&env, project_id, caller);
    }

    /// Mint a verified project's credits to its submitter.
    ///
    /// Validator-gated. The project moves `Verified → Issued`; this is the
    /// sole point where tokens enter circulation for a project, and a second
    /// call finds `Issued` and fails with `InvalidState`. Returns the issued
    /// amount.
    pub fn issue_credits(env: Env, caller: Address, project_id: u64) -> i128 {
        require_validator(&env, &caller);
        let asset = require_credit_asset(&env);

        let mut project = storage::load_project(&env, project_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound));
        if project.status != ProjectStatus::Verified {
            panic_with_error!(&env, Error::InvalidState);
        }

        // Mint-equivalent reserve transfer; fails the whole call if the
        // submitter cannot receive the asset.
        let sac = token::StellarAssetClient::new(&env, &asset);
        if sac.try_mint(&project.submitter, &project.credit_amount).is_err() {
            panic_with_error!(&env, Error::TransferFailure);
        }

        project.status = ProjectStatus::Issued;
        storage::save_project(&env, &project);
        storage::add_credits_issued(&env, project.credit_amount);

        events::credits_issued(&env, project_id, project.submitter, project.credit_amount);
        project.credit_amount
    }

    // ─────────────────────────────────────────────────────────
    // Marketplace
    // ─────────────────────────────────────────────────────────

    /// List credit tokens for sale. Returns the allocated listing ID.
    ///
    /// Pulls `amount` tokens from the seller into contract-controlled escrow
    /// *before* the listing record is written; the record is only created
    /// once the escrow transfer has completed.
    pub fn list_for_sale(env: Env, seller: Address, amount: i128, unit_price: i128) -> u64 {
        seller.require_auth();
        let asset = require_credit_asset(&env);

        if amount <= 0 || unit_price <= 0 {
            panic_with_error!(&env, Error::InvalidArgument);
        }

        transfer_credits(
            &env,
            &asset,
            &seller,
            &env.current_contract_address(),
            amount,
        );

        let id = storage::next_listing_id(&env);
        let listing = ListingRecord {
            id,
            seller: seller.clone(),
            amount,
            unit_price,
            active: true,
        };
        storage::save_listing(&env, &listing);

        events::listing_created(&env, id, seller, amount, unit_price);
        id
    }

    /// Buy out an active listing.
    ///
    /// `payment_amount` must cover `amount * unit_price` (overflow is
    /// rejected, never wrapped). Settlement is atomic: the computed total
    /// cost moves buyer → seller, the escrowed tokens move contract → buyer,
    /// and the listing deactivates — or nothing happens at all.
    pub fn buy_listing(env: Env, buyer: Address, listing_id: u64, payment_amount: i128) {
        buyer.require_auth();
        let asset = require_credit_asset(&env);

        let mut listing = storage::load_listing(&env, listing_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound));
        if !listing.active {
            panic_with_error!(&env, Error::InvalidState);
        }

        let total_cost = listing
            .amount
            .checked_mul(listing.unit_price)
            .unwrap_or_else(|| panic_with_error!(&env, Error::InvalidArgument));
        if payment_amount < total_cost {
            panic_with_error!(&env, Error::InvalidArgument);
        }

        // Payment leg: buyer pays the seller the computed total.
        let payment = require_payment_token(&env);
        let payment_client = token::Client::new(&env, &payment);
        if payment_client
            .try_transfer(&buyer, &listing.seller, &total_cost)
            .is_err()
        {
            panic_with_error!(&env, Error::TransferFailure);
        }

        // Release leg: escrowed tokens leave the contract for the buyer.
        transfer_credits(
            &env,
            &asset,
            &env.current_contract_address(),
            &buyer,
            listing.amount,
        );

        listing.active = false;
        storage::save_listing(&env, &listing);

        events::listing_sold(&env, listing_id, buyer, total_cost);
    }

    /// Cancel an active listing and return the escrowed tokens.
    ///
    /// Only the listing's seller may cancel.
    pub fn cancel_listing(env: Env, caller: Address, listing_id: u64) {
        caller.require_auth();
        let asset = require_credit_asset(&env);

        let mut listing = storage::load_listing(&env, listing_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound));
        if !listing.active {
            panic_with_error!(&env, Error::InvalidState);
        }
        if caller != listing.seller {
            panic_with_error!(&env, Error::Unauthorized);
        }

        transfer_credits(
            &env,
            &asset,
            &env.current_contract_address(),
            &listing.seller,
            listing.amount,
        );

        listing.active = false;
        storage::save_listing(&env, &listing);

        events::listing_cancelled(&env, listing_id, listing.seller);
    }

    // ─────────────────────────────────────────────────────────
    // Read-only queries
    // ─────────────────────────────────────────────────────────

    /// Number of projects ever submitted (also the next free project ID).
    pub fn get_project_count(env: Env) -> u64 {
        storage::get_project_count(&env)
    }

    /// Number of listings ever created (also the next free listing ID).
    pub fn get_listing_count(env: Env) -> u64 {
        storage::get_listing_count(&env)
    }

    /// The credit-asset token address, or `None` before `ensure_token`.
    pub fn get_asset_id(env: Env) -> Option<Address> {
        storage::get_credit_asset(&env)
    }

    /// The settlement token bound at `init`.
    pub fn get_payment_token(env: Env) -> Option<Address> {
        storage::get_payment_token(&env)
    }

    /// The current admin. Panics before `init`.
    pub fn get_admin(env: Env) -> Address {
        storage::get_admin(&env).unwrap_or_else(|| panic_with_error!(&env, Error::Precondition))
    }

    /// The assigned validator, or `None` while unset.
    pub fn get_validator(env: Env) -> Option<Address> {
        storage::get_validator(&env)
    }

    /// Sum of credits issued across all projects, ever.
    pub fn get_total_credits_issued(env: Env) -> i128 {
        storage::get_total_credits_issued(&env)
    }

    /// Retrieve a project record by ID.
    pub fn get_project(env: Env, project_id: u64) -> ProjectRecord {
        storage::load_project(&env, project_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound))
    }

    /// Retrieve a listing record by ID.
    pub fn get_listing(env: Env, listing_id: u64) -> ListingRecord {
        storage::load_listing(&env, listing_id)
            .unwrap_or_else(|| panic_with_error!(&env, Error::NotFound))
    }
}
