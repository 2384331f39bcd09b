//! Authorization policy which provides a basic access control mechanism,
//! where there is an account (an owner) that can be granted exclusive access
//! to specific functions.
//!
//! The initial owner is either set explicitly or defaults to the deployer of
//! the protected contract. This can later be changed with
//! [`Ownable::transfer_ownership`].
//!
//! A multisig is supported by making the multisig contract the owner.
use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolError, SolInterface, SolValue};
use host::{CallResult, Context};
pub use sol::*;

use crate::{access::IAuthority, utils::storage_slot::StorageSlot};

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Management functions of an [`super::Ownable`] policy.
        #[allow(missing_docs)]
        interface IOwnable {
            function owner() external view returns (address);
            function transferOwnership(address newOwner) external;
            function renounceOwnership() external;
        }
    }

    sol! {
        /// Emitted when ownership gets transferred between accounts.
        ///
        /// * `previous_owner` - Address of the previous owner.
        /// * `new_owner` - Address of the new owner.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        event OwnershipTransferred(address indexed previous_owner, address indexed new_owner);
    }

    sol! {
        /// The caller account is not authorized to perform an operation.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error OwnableUnauthorizedAccount(address account);
        /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
        ///
        /// * `owner` - Account that's not allowed to become the owner.
        ///
        /// [`Address::ZERO`]: alloy_primitives::Address::ZERO
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error OwnableInvalidOwner(address owner);
    }
}

/// An error that occurred in the implementation of an [`Ownable`] policy.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The caller account is not authorized to perform an operation.
    UnauthorizedAccount(OwnableUnauthorizedAccount),
    /// The owner is not a valid owner account. (eg. [`Address::ZERO`])
    InvalidOwner(OwnableInvalidOwner),
    /// The host refused a state change.
    Host(host::Error),
}

impl From<host::Error> for Error {
    fn from(value: host::Error) -> Self {
        Error::Host(value)
    }
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::InvalidOwner(e) => e.abi_encode(),
            Error::Host(e) => e.into(),
        }
    }
}

/// Slot of the current owner.
fn owner_slot() -> U256 {
    StorageSlot::namespaced("openzeppelin.access.ownable.owner")
}

/// Single-owner authorization policy.
#[derive(Clone, Debug, Default)]
pub struct Ownable {
    initial_owner: Option<Address>,
}

impl Ownable {
    /// Creates a policy owned by `initial_owner`.
    #[must_use]
    pub fn new(initial_owner: Address) -> Self {
        Self { initial_owner: Some(initial_owner) }
    }

    /// Returns the address of the current owner.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Read access to the contract's state.
    #[must_use]
    pub fn owner(ctx: &Context<'_>) -> Address {
        StorageSlot::get_address(ctx, owner_slot())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Can only be called by the current owner.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Write access to the contract's state.
    /// * `new_owner` - The next owner of this contract.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    /// * [`Error::InvalidOwner`] - If `new_owner` is the [`Address::ZERO`].
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn transfer_ownership(
        ctx: &mut Context<'_>,
        new_owner: Address,
    ) -> Result<(), Error> {
        Self::only_owner(ctx)?;

        if new_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }

        Self::_transfer_ownership(ctx, new_owner)
    }

    /// Leaves the contract without owner. It will not be possible to call
    /// functions that require `only_owner`. Can only be called by the current
    /// owner.
    ///
    /// NOTE: Renouncing ownership will leave the contract without an owner,
    /// thereby disabling any functionality that is only available to the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If not called by the owner.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn renounce_ownership(ctx: &mut Context<'_>) -> Result<(), Error> {
        Self::only_owner(ctx)?;
        Self::_transfer_ownership(ctx, Address::ZERO)
    }

    /// Checks if the [`Context::msg_sender`] is set as the owner.
    ///
    /// # Errors
    ///
    /// * [`Error::UnauthorizedAccount`] - If called by any account other than
    ///   the owner.
    pub fn only_owner(ctx: &Context<'_>) -> Result<(), Error> {
        Self::check_owner(ctx, ctx.msg_sender())
    }

    /// Transfers ownership of the contract to a new account (`new_owner`).
    /// Internal function without access restriction.
    ///
    /// # Events
    ///
    /// * [`OwnershipTransferred`].
    pub fn _transfer_ownership(
        ctx: &mut Context<'_>,
        new_owner: Address,
    ) -> Result<(), Error> {
        let previous_owner = Self::owner(ctx);
        StorageSlot::set_address(ctx, owner_slot(), new_owner)?;
        ctx.emit(&OwnershipTransferred { previous_owner, new_owner })?;
        Ok(())
    }

    fn check_owner(ctx: &Context<'_>, account: Address) -> Result<(), Error> {
        if Self::owner(ctx) != account {
            return Err(Error::UnauthorizedAccount(
                OwnableUnauthorizedAccount { account },
            ));
        }

        Ok(())
    }
}

impl IAuthority for Ownable {
    type Error = Error;

    fn initialize(&self, ctx: &mut Context<'_>) -> Result<(), Error> {
        let initial_owner = self.initial_owner.unwrap_or(ctx.msg_sender());
        if initial_owner.is_zero() {
            return Err(Error::InvalidOwner(OwnableInvalidOwner {
                owner: Address::ZERO,
            }));
        }
        Self::_transfer_ownership(ctx, initial_owner)
    }

    fn authorize(
        &self,
        ctx: &Context<'_>,
        account: Address,
    ) -> Result<(), Error> {
        Self::check_owner(ctx, account)
    }

    fn route(
        &self,
        ctx: &mut Context<'_>,
        calldata: &[u8],
    ) -> Option<CallResult> {
        let call = IOwnable::IOwnableCalls::abi_decode(calldata).ok()?;
        let result = match call {
            IOwnable::IOwnableCalls::owner(_) => {
                Ok(Self::owner(ctx).abi_encode())
            }
            IOwnable::IOwnableCalls::transferOwnership(call) => {
                Self::transfer_ownership(ctx, call.newOwner).map(|()| vec![])
            }
            IOwnable::IOwnableCalls::renounceOwnership(_) => {
                Self::renounce_ownership(ctx).map(|()| vec![])
            }
        };
        Some(result.map_err(Into::into))
    }
}
