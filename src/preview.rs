//! Terminal rendition of a dashboard session.

pub mod render;
pub mod timer;

pub use render::render_plan;
pub use timer::TokioTimer;
