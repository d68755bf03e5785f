//! Gallery search: photo filtering, selection state and pagination

pub mod filter;
pub mod page;
pub mod state;

pub use filter::{FilterEngine, SelectionQuery};
pub use page::{DEFAULT_PER_PAGE, page_count, paginate};
pub use state::GallerySelection;
