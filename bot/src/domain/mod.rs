//! Domain layer
//!
//! Pure news-pipeline concepts with no external dependencies.
//! - `entities`: channel posts and rendered-card models
//! - `ports`: trait definitions for external systems

pub mod entities;
pub mod ports;
