use alloy_primitives::Address;

/// Identity and permissions of a call frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    /// Account whose storage the frame reads and writes.
    pub(crate) address: Address,
    /// Account the executing code was loaded from.
    pub(crate) code_address: Address,
    /// Caller of the frame.
    pub(crate) sender: Address,
    /// Whether state changes are forbidden.
    pub(crate) is_static: bool,
    /// Number of frames below this one.
    pub(crate) depth: usize,
}

impl Frame {
    /// Top-level frame of a transaction sent by `sender` to `to`.
    pub(crate) fn top(sender: Address, to: Address, is_static: bool) -> Self {
        Self { address: to, code_address: to, sender, is_static, depth: 0 }
    }

    /// Frame nested directly below `self`. A static parent always yields a
    /// static child.
    pub(crate) fn child(
        &self,
        address: Address,
        code_address: Address,
        sender: Address,
        is_static: bool,
    ) -> Self {
        Self {
            address,
            code_address,
            sender,
            is_static: self.is_static || is_static,
            depth: self.depth + 1,
        }
    }
}
