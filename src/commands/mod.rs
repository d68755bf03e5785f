//! Command implementations
//!
//! Each command is a module with an execute function that takes the loaded
//! [`Album`](crate::Album) and parsed CLI args.

pub mod avatars;
pub mod cache;
pub mod check;
pub mod config;
pub mod download;
pub mod export;
pub mod feedback;
pub mod gallery;
pub mod save;
pub mod stats;
pub mod tag;
pub mod transliterate;

pub use avatars::execute as avatars;
pub use cache::execute as cache;
pub use check::execute as check;
pub use download::execute as download;
pub use export::execute as export;
pub use gallery::execute as gallery;
pub use save::execute as save;
pub use stats::execute as stats;
pub use tag::execute as tag;
pub use transliterate::execute as transliterate;
