//! Command implementations.

pub mod config;
pub mod show;
pub mod template;

pub use self::config::execute_config;
pub use self::show::execute_show;
pub use self::template::execute_template;
