//! Integration test suite modules

mod countdown;
mod home_flow;
mod persistence;
