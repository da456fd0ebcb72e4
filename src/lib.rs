pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::errors::CuraError;
pub use domain::ports::{Mapping, Transport};
pub use frameworks::config::SessionConfig;
pub use interface_adapters::clients::ReqwestTransport;
pub use use_cases::session::Session;
