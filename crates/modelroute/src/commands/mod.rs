pub mod analyze;
pub mod decisions;
pub mod diagnostic;
pub mod init;
pub mod record;
pub mod select;
pub mod version;
