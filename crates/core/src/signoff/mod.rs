//! Per-transaction admin sign-off state machine.
//!
//! A transaction carries a `requires_auth` flag plus the actor/timestamp
//! pair recording who signed it off and when. Transitions are reversible
//! indefinitely; there is no terminal state.

pub mod state;

#[cfg(test)]
mod state_props;

pub use state::SignOff;
