//! Integration tests

mod common;
mod indicators_test;
mod pipeline_test;
