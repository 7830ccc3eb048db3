//! Various shared functions that ldwm uses.
pub mod child_process;
pub mod modmask_lookup;
