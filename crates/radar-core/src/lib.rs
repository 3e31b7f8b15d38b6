#![cfg_attr(not(test), no_std)]

pub mod consts;
pub mod engine;
pub mod indicator;
pub mod input;
pub mod mapper;
pub mod motion;
pub mod ranger;
pub mod render;
