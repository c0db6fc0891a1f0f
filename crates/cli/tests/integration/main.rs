//! End-to-end tests driving the extforge binary against stand-in
//! `rustup` and `cargo` scripts.

#![cfg(unix)]

mod build_tests;
mod clean_tests;
mod common;
mod install_tests;
mod setup_tests;
