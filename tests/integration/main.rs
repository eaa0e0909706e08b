//! Integration tests driving the `clef` binary.

mod basic_decode;
mod color_control;
mod config_custom;
mod error_policy;
