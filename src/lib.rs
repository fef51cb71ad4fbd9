// Library for tests to access modules

pub mod config;
pub mod format;
pub mod log_repo;
pub mod models;
pub mod process_repo;
pub mod routes;
pub mod sysinfo_repo;
pub mod version;
