//! Purpose: Card element object model shared by the `placard` CLI, C ABI, and tests.
//! Exports: `api` (stable Rust surface) and `abi` (C-callable surface).
//! Role: Internal core modules stay behind `api`; the ABI mirrors it for bindings.
//! Invariants: Parsing is stateless per call; registries and warning sinks are
//! caller-owned collaborators.
pub mod abi;
pub mod api;
mod core;
mod json;
