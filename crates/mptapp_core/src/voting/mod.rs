//! Weekly teacher voting: window rules, the vote ledger and ranked views.

pub mod ledger;
pub mod ranking;
pub mod window;
