pub mod audit;
pub mod election;
pub mod identity;
pub mod ledger;
