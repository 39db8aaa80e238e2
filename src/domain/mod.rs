pub mod errors;
pub mod forecast;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod status;
