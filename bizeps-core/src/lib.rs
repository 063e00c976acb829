pub mod db;
pub mod logging;
pub mod session;
pub mod summary;
pub mod worker;
