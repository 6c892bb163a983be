pub mod mapf_service;

pub use mapf_service::*;
