pub mod bridge_config;
pub mod credentials;
pub mod pairing;
pub mod store;
