//! Integration tests for the ttykit library and binary.

mod helpers;

mod cli_test;
mod command_test;
mod session_test;
