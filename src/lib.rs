pub mod config;
pub mod constants;
pub mod coordinates;
pub mod dimension;
pub mod irsa;
pub mod irsa_env;
pub mod irsa_errors;
pub mod query;
pub mod units;
pub mod votable;
