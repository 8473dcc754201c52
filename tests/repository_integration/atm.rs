use std::str::FromStr;

use bank_locator::error::AppError;
use bank_locator::infrastructure::repositories::{
    AtmRepository, AtmRepositoryImpl, BranchRepository, BranchRepositoryImpl,
};
use rust_decimal::Decimal;

use super::common::fixtures::*;
use super::common::TestDb;
use super::insert_atm_location;

#[tokio::test]
async fn atm_repository_crud_round_trip() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let branches = BranchRepositoryImpl::new(db.pool().clone());
    let repo = AtmRepositoryImpl::new(db.pool().clone());
    branches.create(&branch(4, "Moorgate")).await.unwrap();

    let mut machine = atm(40, Some(4));
    machine.minimum_withdrawal = Decimal::from_str("20.00").unwrap();
    assert_eq!(repo.create(&machine).await.unwrap(), machine);

    machine.open_24_hours = true;
    assert_eq!(repo.update(&machine).await.unwrap(), Some(machine.clone()));
    assert_eq!(repo.find_all().await.unwrap(), vec![machine.clone()]);

    assert!(repo.delete(40).await.unwrap());
    assert_eq!(repo.find_by_id(40).await.unwrap(), None);
    assert_eq!(repo.update(&machine).await.unwrap(), None);
}

#[tokio::test]
async fn atm_referencing_unknown_branch_is_rejected() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repo = AtmRepositoryImpl::new(db.pool().clone());

    let error = repo.create(&atm(41, Some(999))).await.unwrap_err();

    assert!(matches!(error, AppError::BadRequest(_)), "{error:?}");
}

#[tokio::test]
async fn deleting_owning_branch_detaches_atm() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let branches = BranchRepositoryImpl::new(db.pool().clone());
    let repo = AtmRepositoryImpl::new(db.pool().clone());
    branches.create(&branch(6, "Aldgate")).await.unwrap();
    repo.create(&atm(60, Some(6))).await.unwrap();
    insert_atm_location(db.pool(), 60, CANARY_WHARF).await;

    assert!(branches.delete(6).await.unwrap());

    let detached = repo.find_by_id(60).await.unwrap().unwrap();
    assert_eq!(detached.branch_id, None);
    let locations = repo.find_all_locations().await.unwrap();
    assert_eq!(locations, vec![atm_location(60, CANARY_WHARF)]);
}
