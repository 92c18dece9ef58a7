// Client module organization

pub mod management;

// Re-export main types
pub use management::EdgeManagementClient;
