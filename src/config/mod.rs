//! Configuration module

mod site;

pub use site::ElementIds;
pub use site::Messages;
pub use site::SiteConfig;
