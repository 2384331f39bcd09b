//! Assertions over emitted events.
use alloy_primitives::Address;
use alloy_sol_types::SolEvent;

use crate::Host;

impl Host {
    /// Whether the `expected` event was emitted by `emitter`.
    #[must_use]
    pub fn emitted_by<E: SolEvent>(
        &self,
        emitter: Address,
        expected: &E,
    ) -> bool {
        let expected = expected.encode_log_data();
        self.logs()
            .iter()
            .rev()
            .any(|log| log.address == emitter && log.data == expected)
    }
}
