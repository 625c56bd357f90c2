#![forbid(unsafe_code)]

pub mod cli;
pub mod command;
pub mod config;
pub mod formats;
pub mod http;
pub mod index;
pub mod logging;
pub mod navigation;
pub mod normalize;
pub mod render;
pub mod resolver;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;
