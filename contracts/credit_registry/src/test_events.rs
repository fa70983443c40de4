extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{CreditsIssued, ListingCreated, ListingSold, ProjectApproved, ProjectSubmitted};
use crate::{CreditRegistry, CreditRegistryClient};

fn setup_with_roles() -> (Env, CreditRegistryClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CreditRegistry, ());
    let client = CreditRegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let validator = Address::generate(&env);
    let payment_admin = Address::generate(&env);
    let payment = env.register_stellar_asset_contract_v2(payment_admin);
    client.init(&admin, &payment.address());
    client.set_validator(&admin, &validator);
    (env, client, admin, validator)
}

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
fn test_project_submitted_event() {
    let (env, client, _admin, _validator) = setup_with_roles();
    let submitter = Address::generate(&env);

    let id = submit(&env, &client, &submitter);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("submitted").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectSubmitted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectSubmitted {
            project_id: id,
            submitter: submitter.clone(),
        }
    );
}

#[test]
fn test_project_approved_event() {
    let (env, client, _admin, validator) = setup_with_roles();
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    client.approve_project(&validator, &id, &500);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("approved").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ProjectApproved = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ProjectApproved {
            project_id: id,
            validator: validator.clone(),
            credit_amount: 500,
        }
    );
}

#[test]
fn test_credits_issued_event() {
    let (env, client, admin, validator) = setup_with_roles();
    bind_credit_token(&env, &client, &admin);
    let submitter = Address::generate(&env);
    let id = submit(&env, &client, &submitter);

    client.approve_project(&validator, &id, &500);
    client.issue_credits(&validator, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("issued").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: CreditsIssued = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        CreditsIssued {
            project_id: id,
            submitter: submitter.clone(),
            amount: 500,
        }
    );
}

#[test]
fn test_listing_created_event() {
    let (env, client, admin, _validator) = setup_with_roles();
    let credit = bind_credit_token(&env, &client, &admin);
    let seller = Address::generate(&env);
    token::StellarAssetClient::new(&env, &credit.address).mint(&seller, &100);

    let id = client.list_for_sale(&seller, &100, &5);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("listed").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ListingCreated = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ListingCreated {
            listing_id: id,
            seller: seller.clone(),
            amount: 100,
            unit_price: 5,
        }
    );
}

#[test]
fn test_listing_sold_event() {
    let (env, client, admin, _validator) = setup_with_roles();
    let credit = bind_credit_token(&env, &client, &admin);
    let seller = Address::generate(&env);
    let buyer = Address::generate(&env);
    token::StellarAssetClient::new(&env, &credit.address).mint(&seller, &100);

    let payment = client.get_payment_token().expect("payment token bound");
    token::StellarAssetClient::new(&env, &payment).mint(&buyer, &500);

    let id = client.list_for_sale(&seller, &100, &5);
    client.buy_listing(&buyer, &id, &500);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("sold").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ListingSold = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ListingSold {
            listing_id: id,
            buyer: buyer.clone(),
            total_cost: 500,
        }
    );
}
