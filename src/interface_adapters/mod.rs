// Interface adapters: URL layout of the Cura API and the HTTP transport.

pub mod clients;
pub mod urls;
