//! Services layer - Business logic
//!
//! Services sit between the HTTP handlers and the repositories. They own
//! request-level rules and turn store failures into typed errors.

pub mod post;
pub mod tag;

pub use post::{PostService, PostServiceError};
pub use tag::{TagService, TagServiceError};
