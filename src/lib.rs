#[allow(non_snake_case)]
pub mod CSTR;
#[allow(non_snake_case)]
pub mod ODEsolvers;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
pub mod config;
