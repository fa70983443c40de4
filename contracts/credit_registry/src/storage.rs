//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                  | Type      | Description                          |
//! |----------------------|-----------|--------------------------------------|
//! | `Admin`              | `Address` | Contract administrator               |
//! | `Validator`          | `Address` | Project reviewer (absent until set)  |
//! | `CreditAsset`        | `Address` | Credit token (absent until bound)    |
//! | `PaymentToken`       | `Address` | Settlement token, bound at init      |
//! | `ProjectCount`       | `u64`     | Auto-increment project ID counter    |
//! | `ListingCount`       | `u64`     | Auto-increment listing ID counter    |
//! | `TotalCreditsIssued` | `i128`    | Monotonic issuance accumulator       |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key           | Type            | Description            |
//! |---------------|-----------------|------------------------|
//! | `Project(id)` | `ProjectRecord` | One submitted project  |
//! | `Listing(id)` | `ListingRecord` | One marketplace offer  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! Projects and listings deliberately live under two distinct `DataKey`
//! variants rather than a shared prefixed namespace — the type system rules
//! out key collisions between the two collections.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{ListingRecord, ProjectRecord};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract administrator (Instance).
    Admin,
    /// Assigned validator; absent while unset (Instance).
    Validator,
    /// Credit-asset token address; absent until `ensure_token` (Instance).
    CreditAsset,
    /// Settlement token address, bound at init (Instance).
    PaymentToken,
    /// Global auto-increment counter for project IDs (Instance).
    ProjectCount,
    /// Global auto-increment counter for listing IDs (Instance).
    ListingCount,
    /// Sum of all credits ever issued (Instance).
    TotalCreditsIssued,
    /// One project record keyed by ID (Persistent).
    Project(u64),
    /// One listing record keyed by ID (Persistent).
    Listing(u64),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

/// Retrieve the admin address. `None` only before `init`.
pub fn get_admin(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_validator(env: &Env, validator: &Address) {
    env.storage().instance().set(&DataKey::Validator, validator);
    bump_instance(env);
}

/// Retrieve the validator address. `None` while no validator is assigned.
pub fn get_validator(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Validator)
}

/// Bind the credit-asset token. Written at most once (`ensure_token` checks
/// for an existing binding first).
pub fn set_credit_asset(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::CreditAsset, token);
    bump_instance(env);
}

/// Retrieve the credit-asset token. `None` until `ensure_token` has run.
pub fn get_credit_asset(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::CreditAsset)
}

pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
    bump_instance(env);
}

pub fn get_payment_token(env: &Env) -> Option<Address> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::PaymentToken)
}

/// Atomically reads, increments, and stores the project counter.
/// Returns the ID to use for the *current* project (pre-increment value).
pub fn next_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ProjectCount, &(current + 1));
    current
}

pub fn get_project_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

/// Atomically reads, increments, and stores the listing counter.
pub fn next_listing_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::ListingCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::ListingCount, &(current + 1));
    current
}

pub fn get_listing_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::ListingCount)
        .unwrap_or(0)
}

pub fn get_total_credits_issued(env: &Env) -> i128 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalCreditsIssued)
        .unwrap_or(0)
}

/// Add a successful issuance to the monotonic accumulator.
pub fn add_credits_issued(env: &Env, amount: i128) {
    let total = get_total_credits_issued(env);
    env.storage()
        .instance()
        .set(&DataKey::TotalCreditsIssued, &(total + amount));
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Write a project record (whole-record write; records are small and mutate
/// at most twice over their lifetime).
pub fn save_project(env: &Env, project: &ProjectRecord) {
    let key = DataKey::Project(project.id);
    env.storage().persistent().set(&key, project);
    bump_persistent(env, &key);
}

/// Load a project record. `None` when the ID was never allocated.
pub fn load_project(env: &Env, id: u64) -> Option<ProjectRecord> {
    let key = DataKey::Project(id);
    let project: Option<ProjectRecord> = env.storage().persistent().get(&key);
    if project.is_some() {
        bump_persistent(env, &key);
    }
    project
}

/// Write a listing record.
pub fn save_listing(env: &Env, listing: &ListingRecord) {
    let key = DataKey::Listing(listing.id);
    env.storage().persistent().set(&key, listing);
    bump_persistent(env, &key);
}

/// Load a listing record. `None` when the ID was never allocated.
pub fn load_listing(env: &Env, id: u64) -> Option<ListingRecord> {
    let key = DataKey::Listing(id);
    let listing: Option<ListingRecord> = env.storage().persistent().get(&key);
    if listing.is_some() {
        bump_persistent(env, &key);
    }
    listing
}
