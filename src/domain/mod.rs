//! Domain layer: hierarchy, layout and focus logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod focus;
pub mod layout;
pub mod palette;
pub mod record;
pub mod view;

pub use arena::{HierarchyArena, NodeData, TreeNode};
pub use builder::{flatten, to_document, HierarchyBuilder};
pub use error::{DomainError, DomainResult};
pub use focus::{
    label_placement, FocusController, LabelAnchor, LabelPlacement, LabelStyle, TransitionPlan,
    ViewState,
};
pub use layout::RadialLayout;
pub use palette::{assign_colors, Rgb};
pub use record::Record;
pub use view::{font_size, project, ArcGeometry, FontSizing, Interval, ViewDomain};
