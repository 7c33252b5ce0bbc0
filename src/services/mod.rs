pub mod capacity;
pub mod ledger;
pub mod policy;
pub mod slots;

#[cfg(test)]
mod capacity_test;
