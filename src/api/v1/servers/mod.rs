//! Server resources

pub mod images;
pub mod snapshots;
pub mod virtual_servers;
