//! Server-rendered page: view selection, input coercion and HTML output.

pub mod html;
mod metadata;
mod render;
mod state;
mod view;

pub use metadata::{PageMetadata, PAGE_METADATA};
pub use render::{PageRenderer, STYLESHEET, STYLESHEET_PATH};
pub use state::{coerce_property_value, PageQuery, PageState};
pub use view::View;
