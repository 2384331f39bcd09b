//! Authorization policy granting administrative access to a fixed set of
//! accounts, any one of which may act alone.
use alloy_primitives::Address;
use alloy_sol_types::{SolError, SolInterface, SolValue};
use host::{CallResult, Context};
pub use sol::*;

use crate::access::IAuthority;

mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Read functions of a [`super::Council`] policy.
        #[allow(missing_docs)]
        interface ICouncil {
            function isMember(address account) external view returns (bool);
            function members() external view returns (address[]);
        }
    }

    sol! {
        /// The caller account is not a member of the council.
        ///
        /// * `account` - Account that was found to not be authorized.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error CouncilUnauthorizedAccount(address account);
        /// The council has no valid member.
        #[derive(Debug, PartialEq)]
        #[allow(missing_docs)]
        error CouncilInvalidMembers();
    }
}

/// An error that occurred in the implementation of a [`Council`] policy.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// The caller account is not a member of the council.
    UnauthorizedAccount(CouncilUnauthorizedAccount),
    /// The council is empty or lists [`Address::ZERO`].
    InvalidMembers(CouncilInvalidMembers),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::UnauthorizedAccount(e) => e.abi_encode(),
            Error::InvalidMembers(e) => e.abi_encode(),
        }
    }
}

/// Role-set authorization policy. Membership is immutable.
#[derive(Clone, Debug)]
pub struct Council {
    members: Vec<Address>,
}

impl Council {
    /// Creates a council of `members`.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = Address>) -> Self {
        Self { members: members.into_iter().collect() }
    }

    /// Whether `account` belongs to the council.
    #[must_use]
    pub fn is_member(&self, account: Address) -> bool {
        self.members.contains(&account)
    }

    /// Members of the council.
    #[must_use]
    pub fn members(&self) -> &[Address] {
        &self.members
    }
}

impl IAuthority for Council {
    type Error = Error;

    fn initialize(&self, _ctx: &mut Context<'_>) -> Result<(), Error> {
        let has_zero = self.members.iter().any(|member| member.is_zero());
        if self.members.is_empty() || has_zero {
            return Err(Error::InvalidMembers(CouncilInvalidMembers {}));
        }
        Ok(())
    }

    fn authorize(
        &self,
        _ctx: &Context<'_>,
        account: Address,
    ) -> Result<(), Error> {
        if !self.is_member(account) {
            return Err(Error::UnauthorizedAccount(
                CouncilUnauthorizedAccount { account },
            ));
        }
        Ok(())
    }

    fn route(
        &self,
        _ctx: &mut Context<'_>,
        calldata: &[u8],
    ) -> Option<CallResult> {
        let call = ICouncil::ICouncilCalls::abi_decode(calldata).ok()?;
        let output = match call {
            ICouncil::ICouncilCalls::isMember(call) => {
                self.is_member(call.account).abi_encode()
            }
            ICouncil::ICouncilCalls::members(_) => self.members.abi_encode(),
        };
        Some(Ok(output))
    }
}
