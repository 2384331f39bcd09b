//! A single call frame and the operations contract code performs through it.
use std::rc::Rc;

use alloy_primitives::{Address, Log, U256};
use alloy_sol_types::SolEvent;
use tracing::{debug, trace};

use crate::{world::World, CallResult, Error, Program, CONTRACT_NONCE_BASE};

mod frame;

pub(crate) use frame::Frame;

/// Execution context handed to a [`Program`] for the duration of one frame.
///
/// Storage reads and writes, logs and deployments all act on behalf of
/// [`Context::address`], which differs from [`Context::code_address`] when the
/// program runs through [`Context::delegate_call`].
pub struct Context<'w> {
    world: &'w mut World,
    frame: Frame,
}

impl<'w> Context<'w> {
    pub(crate) fn new(world: &'w mut World, frame: Frame) -> Self {
        Self { world, frame }
    }

    /// Address whose storage and identity the frame acts for.
    #[must_use]
    pub fn address(&self) -> Address {
        self.frame.address
    }

    /// Address the executing code was loaded from.
    #[must_use]
    pub fn code_address(&self) -> Address {
        self.frame.code_address
    }

    /// Account that called into this frame.
    #[must_use]
    pub fn msg_sender(&self) -> Address {
        self.frame.sender
    }

    /// Current nonce of `account`, i.e. the value its next deployment will
    /// consume.
    #[must_use]
    pub fn nonce(&self, account: Address) -> u64 {
        self.world.nonce(account)
    }

    /// Whether `account` holds code.
    #[must_use]
    pub fn has_code(&self, account: Address) -> bool {
        self.world.has_code(account)
    }

    /// Reads `slot` from the storage of [`Context::address`].
    #[must_use]
    pub fn sload(&self, slot: U256) -> U256 {
        self.world.sload(self.frame.address, slot)
    }

    /// Writes `value` to `slot` in the storage of [`Context::address`].
    ///
    /// # Errors
    ///
    /// * [`Error::StaticStateChange`] - If the frame is static.
    pub fn sstore(&mut self, slot: U256, value: U256) -> Result<(), Error> {
        self.ensure_mutable()?;
        self.world.sstore(self.frame.address, slot, value);
        Ok(())
    }

    /// Emits `event` as a log of [`Context::address`].
    ///
    /// # Errors
    ///
    /// * [`Error::StaticStateChange`] - If the frame is static.
    pub fn emit<E: SolEvent>(&mut self, event: &E) -> Result<(), Error> {
        self.ensure_mutable()?;
        let log =
            Log { address: self.frame.address, data: event.encode_log_data() };
        self.world.logs.push(log);
        Ok(())
    }

    /// Calls `to` with `calldata`, inheriting the static flag.
    ///
    /// # Errors
    ///
    /// Revert data of the callee, or of the host when the call depth is
    /// exhausted.
    pub fn call(&mut self, to: Address, calldata: &[u8]) -> CallResult {
        let frame = self.frame.child(to, to, self.frame.address, false);
        execute(self.world, frame, calldata)
    }

    /// Calls `to` with `calldata` in a static frame.
    ///
    /// # Errors
    ///
    /// Revert data of the callee, including host errors raised when it tries
    /// to modify state.
    pub fn static_call(&mut self, to: Address, calldata: &[u8]) -> CallResult {
        let frame = self.frame.child(to, to, self.frame.address, true);
        execute(self.world, frame, calldata)
    }

    /// Runs the code of `implementation` on behalf of [`Context::address`],
    /// keeping the current sender.
    ///
    /// # Errors
    ///
    /// Revert data of the delegated code.
    pub fn delegate_call(
        &mut self,
        implementation: Address,
        calldata: &[u8],
    ) -> CallResult {
        let frame = self.frame.child(
            self.frame.address,
            implementation,
            self.frame.sender,
            false,
        );
        execute(self.world, frame, calldata)
    }

    /// Deploys `program` from [`Context::address`], consuming one of its
    /// nonces.
    ///
    /// # Errors
    ///
    /// Revert data of the constructor, or a host error when the frame is
    /// static or the target address is taken.
    pub fn deploy<P: Program>(
        &mut self,
        program: P,
    ) -> Result<Address, Vec<u8>> {
        self.ensure_mutable()?;
        let code: Rc<dyn Program> = Rc::new(program);
        create(self.world, self.frame.address, Some(code), self.frame.depth + 1)
    }

    /// Creates a code-less account from [`Context::address`], consuming one
    /// of its nonces without installing anything.
    ///
    /// # Errors
    ///
    /// A host error when the frame is static or the target address is taken.
    pub fn deploy_empty(&mut self) -> Result<Address, Vec<u8>> {
        self.ensure_mutable()?;
        create(self.world, self.frame.address, None, self.frame.depth + 1)
    }

    fn ensure_mutable(&self) -> Result<(), Error> {
        if self.frame.is_static {
            return Err(Error::StaticStateChange(self.frame.address));
        }
        Ok(())
    }
}

/// Executes `frame`, rolling the world back if it reverts.
pub(crate) fn execute(
    world: &mut World,
    frame: Frame,
    calldata: &[u8],
) -> CallResult {
    if frame.depth > crate::MAX_CALL_DEPTH {
        return Err(Error::DepthExceeded.into());
    }

    // Calling an account without code succeeds with no return data.
    let Some(code) = world.code(frame.code_address) else {
        trace!(callee = %frame.code_address, "call to account without code");
        return Ok(Vec::new());
    };

    let checkpoint = world.clone();
    let result = code.call(&mut Context::new(world, frame), calldata);
    if let Err(revert) = &result {
        debug!(
            address = %frame.address,
            code = %frame.code_address,
            revert = %alloy_primitives::hex::encode(revert),
            "frame reverted"
        );
        *world = checkpoint;
    }
    result
}

/// Creates an account at the next address of `deployer` and, if `code` is
/// given, runs its constructor before installing it.
pub(crate) fn create(
    world: &mut World,
    deployer: Address,
    code: Option<Rc<dyn Program>>,
    depth: usize,
) -> Result<Address, Vec<u8>> {
    if depth > crate::MAX_CALL_DEPTH {
        return Err(Error::DepthExceeded.into());
    }

    let nonce = world.consume_nonce(deployer)?;
    let address = deployer.create(nonce);
    if world.is_occupied(address) {
        return Err(Error::AddressCollision(address).into());
    }

    let checkpoint = world.clone();
    world.account_mut(address).nonce = CONTRACT_NONCE_BASE;

    if let Some(program) = &code {
        let frame = Frame {
            address,
            code_address: address,
            sender: deployer,
            is_static: false,
            depth,
        };
        let result = program.constructor(&mut Context::new(world, frame));
        if let Err(revert) = result {
            debug!(%deployer, nonce, %address, "constructor reverted");
            *world = checkpoint;
            return Err(revert);
        }
    }

    debug!(%deployer, nonce, %address, empty = code.is_none(), "deployed");
    world.account_mut(address).code = code;
    Ok(address)
}
