//! Application layer
//!
//! Services orchestrating the ports: text cleanup, the sync pass, the
//! history page and crossposting.

pub mod cleaner;
pub mod crosspost_service;
pub mod history_service;
pub mod sync_service;

pub use crosspost_service::CrosspostService;
pub use history_service::HistoryService;
pub use sync_service::SyncService;
