//! Board commands

mod get;
mod init;
mod update;

pub use get::GetBoard;
pub use init::InitBoard;
pub use update::UpdateBoard;
