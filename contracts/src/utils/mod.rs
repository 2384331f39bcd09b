//! Common Smart Contracts utilities.
pub mod create;
pub mod rlp;
pub mod storage_slot;

pub use create::AddressPredictor;
pub use storage_slot::StorageSlot;
