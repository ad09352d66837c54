pub mod listing;
pub mod node;
pub mod path;
pub mod size;

pub use listing::{ListingPolicy, visible_children};
pub use node::{ObjectEntry, VisibleEntry};
pub use path::{Crumb, breadcrumbs, display_name, drill_down, drill_up, prefix_from_path};
pub use size::format_size;
