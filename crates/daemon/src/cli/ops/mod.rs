pub mod daemon;
pub mod health;
pub mod init;
pub mod note;
pub mod strength;
pub mod version;

pub use daemon::Daemon;
pub use health::Health;
pub use init::Init;
pub use note::Note;
pub use strength::Strength;
pub use version::Version;
