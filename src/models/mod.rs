pub mod directory;
pub mod light_state;
pub mod pairing;
