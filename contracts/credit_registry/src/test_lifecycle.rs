extern crate std;

use soroban_sdk::{testutils::Address as _, token, Address, Env, String};

use crate::invariants;
use crate::{CreditRegistry, CreditRegistryClient, Error, ProjectStatus};

fn setup() -> (Env, CreditRegistryClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CreditRegistry, ());
    let client = CreditRegistryClient::new(&env, &contract_id);
    (env, client)
}

fn setup_with_roles() -> (Env, CreditRegistryClient<'static>, Address, Address) {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    let validator = Address::generate(&env);
    let payment_admin = Address::generate(&env);
    let payment = env.register_stellar_asset_contract_v2(payment_admin);
    client.init(&admin, &payment.address());
    client.set_validator(&admin, &validator);
    (env, client, admin, validator)
}

/// Bind a credit token whose mint authority is the registry contract itself.
fn bind_credit_token<'a>(
    env: &Env,
    client: &CreditRegistryClient<'static>,
    admin: &Address,
) -> token::Client<'a> {
    let sac = env.register_stellar_asset_contract_v2(client.address.clone());
    client.ensure_token(admin, &sac.address());
    token::Client::new(env, &sac.address())
}

fn submit(env: &Env, client: &CreditRegistryClient<'static>, submitter: &Address) -> u64 {
    client.submit_project(
        submitter,
        &String::from_str(env, "Mangrove A"),
        &String::from_str(env, "Bay"),
        &String::from_str(env, "mangrove"),
        &String::from_str(env, "cid123"),
    )
}

#[test]
fn test_submit_project() {
    let (env, client, _admin, _validator) = setup_with_roles();
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);
    assert_eq!(id, 0);
    assert_eq!(client.get_project_count(), 1);

    let project = client.get_project(&id);
    assert_eq!(project.id, 0);
    assert_eq!(project.submitter, submitter);
    assert_eq!(project.name, String::from_str(&env, "Mangrove A"));
    assert_eq!(project.location, String::from_str(&env, "Bay"));
    assert_eq!(project.ecosystem_type, String::from_str(&env, "mangrove"));
    assert_eq!(project.evidence_ref, String::from_str(&env, "cid123"));
    assert_eq!(project.status, ProjectStatus::Pending);
    assert_eq!(project.credit_amount, 0);
}

#[test]
fn test_submit_allocates_sequential_ids() {
    let (env, client, _admin, _validator) = setup_with_roles();
    let submitter = Address::generate(&env);

    assert_eq!(submit(&env, &client, &submitter), 0);
    assert_eq!(submit(&env, &client, &submitter), 1);
    assert_eq!(submit(&env, &client, &submitter), 2);
    assert_eq!(client.get_project_count(), 3);

    let projects: std::vec::Vec<_> = (0..3).map(|i| client.get_project(&i)).collect();
    invariants::assert_sequential_ids(&projects);
}

#[test]
fn test_get_project_unknown_id_fails() {
    let (_env, client, _admin, _validator) = setup_with_roles();
    let res = client.try_get_project(&7);
    assert_eq!(res, Err(Ok(Error::NotFound)));
}

#[test]
fn test_approve_project() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    let before = client.get_project(&id);
    client.approve_project(&validator, &id, &500);

    let project = client.get_project(&id);
    assert_eq!(project.status, ProjectStatus::Verified);
    assert_eq!(project.credit_amount, 500);

    invariants::assert_valid_status_transition(&before.status, &project.status);
    invariants::assert_project_immutable_fields(&before, &project);
    invariants::assert_credit_amount_consistent(&project);
}

#[test]
fn test_approve_unknown_id_fails() {
    let (_env, client, _admin, validator) = setup_with_roles();
    let res = client.try_approve_project(&validator, &0, &500);
    assert_eq!(res, Err(Ok(Error::NotFound)));
}

#[test]
fn test_approve_non_validator_fails() {
    let (env, client, admin, _validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    // Neither a random address nor the admin passes the validator gate.
    let intruder = Address::generate(&env);
    let res = client.try_approve_project(&intruder, &id, &500);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));

    let res = client.try_approve_project(&admin, &id, &500);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));

    assert_eq!(client.get_project(&id).status, ProjectStatus::Pending);
}

#[test]
fn test_approve_zero_credits_fails() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    let res = client.try_approve_project(&validator, &id, &0);
    assert_eq!(res, Err(Ok(Error::InvalidArgument)));
    assert_eq!(client.get_project(&id).status, ProjectStatus::Pending);
}

#[test]
fn test_reject_project() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    client.reject_project(&validator, &id);
    let project = client.get_project(&id);
    assert_eq!(project.status, ProjectStatus::Rejected);
    assert_eq!(project.credit_amount, 0);
    invariants::assert_credit_amount_consistent(&project);
}

#[test]
fn test_reject_twice_fails() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    client.reject_project(&validator, &id);
    let res = client.try_reject_project(&validator, &id);
    assert_eq!(res, Err(Ok(Error::InvalidState)));
}

#[test]
fn test_approve_rejected_project_fails() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    client.reject_project(&validator, &id);
    let res = client.try_approve_project(&validator, &id, &500);
    assert_eq!(res, Err(Ok(Error::InvalidState)));
    assert_eq!(client.get_project(&id).status, ProjectStatus::Rejected);
}

#[test]
fn test_validator_ops_fail_while_validator_unset() {
    let (env, client) = setup();
    let admin = Address::generate(&env);
    let payment_admin = Address::generate(&env);
    let payment = env.register_stellar_asset_contract_v2(payment_admin);
    client.init(&admin, &payment.address());

    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    let caller = Address::generate(&env);
    let res = client.try_approve_project(&caller, &id, &500);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
    let res = client.try_reject_project(&caller, &id);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
    let res = client.try_issue_credits(&caller, &id);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
}

#[test]
fn test_issue_credits_without_token_fails() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);
    client.approve_project(&validator, &id, &500);

    let res = client.try_issue_credits(&validator, &id);
    assert_eq!(res, Err(Ok(Error::Precondition)));
    assert_eq!(client.get_project(&id).status, ProjectStatus::Verified);
}

#[test]
fn test_full_lifecycle_submit_approve_issue() {
    let (env, client, admin, validator) = setup_with_roles();
    let credit = bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);
    client.approve_project(&validator, &id, &500);

    let issued = client.issue_credits(&validator, &id);
    assert_eq!(issued, 500);

    let project = client.get_project(&id);
    assert_eq!(project.status, ProjectStatus::Issued);
    assert_eq!(project.credit_amount, 500);
    assert_eq!(client.get_total_credits_issued(), 500);
    assert_eq!(credit.balance(&submitter), 500);
}

#[test]
fn test_issue_twice_fails() {
    let (env, client, admin, validator) = setup_with_roles();
    let credit = bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);
    client.approve_project(&validator, &id, &500);
    client.issue_credits(&validator, &id);

    let res = client.try_issue_credits(&validator, &id);
    assert_eq!(res, Err(Ok(Error::InvalidState)));

    // No tokens minted twice, accumulator untouched.
    assert_eq!(credit.balance(&submitter), 500);
    assert_eq!(client.get_total_credits_issued(), 500);
}

#[test]
fn test_approve_after_issue_fails() {
    let (env, client, admin, validator) = setup_with_roles();
    bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);
    client.approve_project(&validator, &id, &500);
    client.issue_credits(&validator, &id);

    let before = client.get_project(&id);
    let res = client.try_approve_project(&validator, &id, &500);
    assert_eq!(res, Err(Ok(Error::InvalidState)));
    assert_eq!(client.get_project(&id), before);
}

#[test]
fn test_issue_pending_project_fails() {
    let (env, client, admin, validator) = setup_with_roles();
    bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);
    let res = client.try_issue_credits(&validator, &id);
    assert_eq!(res, Err(Ok(Error::InvalidState)));
}

#[test]
fn test_issuance_accounting_across_projects() {
    let (env, client, admin, validator) = setup_with_roles();
    bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);

    // Three projects: issued, rejected, issued.
    let a = submit(&env, &client, &submitter);
    let b = submit(&env, &client, &submitter);
    let c = submit(&env, &client, &submitter);

    client.approve_project(&validator, &a, &300);
    client.issue_credits(&validator, &a);

    client.reject_project(&validator, &b);

    client.approve_project(&validator, &c, &700);
    client.issue_credits(&validator, &c);

    assert_eq!(client.get_total_credits_issued(), 1_000);

    let projects: std::vec::Vec<_> = (0..3).map(|i| client.get_project(&i)).collect();
    invariants::assert_issuance_accounting(&projects, client.get_total_credits_issued());
}
