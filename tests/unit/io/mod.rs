mod cli;
mod configuration;
mod error;
