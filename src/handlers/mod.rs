//! MCP tool handlers for the FlowPilot server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each handler is in a separate file for better organization.

pub mod extract;
pub mod health;
