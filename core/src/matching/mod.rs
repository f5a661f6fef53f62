pub mod contract;
pub mod matcher;

pub use contract::{ContractDesk, ContractReceipt, CONTRACT_FAILURE_MESSAGE};
pub use matcher::{find_matches, find_matches_at, time_slot_label};
