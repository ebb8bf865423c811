mod list_source_port;
mod notification_port;
mod storage_port;

#[cfg(test)]
pub use list_source_port::MockListSourcePort;
pub use list_source_port::ListSourcePort;
pub use notification_port::NotificationPort;
pub use storage_port::StoragePort;
