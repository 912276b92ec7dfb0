//! Decision logic run once per control tick.
//!
//! Zone classification, the warning tone, the puff controller and the
//! indicator arbiter.  Nothing in here touches hardware or sleeps.

pub mod actuation;
pub mod indicator;
pub mod warning;
pub mod zone;
