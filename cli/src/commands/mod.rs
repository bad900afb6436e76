pub mod cli;
pub mod launch;
pub mod state;
