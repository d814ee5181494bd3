// Composition root for the leave application client.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the concrete leave backend (HTTP, or in memory for dry runs).
// - Wire it into the submission coordinator and the form controller.

pub mod cli;
pub mod config;
