pub mod b32_hex;
pub mod cli;
pub mod networks;
