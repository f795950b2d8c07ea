pub mod config;
pub mod driver;
pub mod errors;
pub mod fps;
pub mod lights;
pub mod logging;
pub mod opc;
pub mod patterns;
