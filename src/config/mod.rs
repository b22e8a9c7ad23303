//! Configuration module

mod site;

pub use site::AdsConfig;
pub use site::MediaConfig;
pub use site::PublisherConfig;
pub use site::SiteConfig;
pub use site::ViewsConfig;
