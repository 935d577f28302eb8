// Application layer: wires CLI commands to the tournament store and the pairing engine.

#[cfg(feature = "cli")]
pub mod commands;
