//! Application services and ports.

#![forbid(unsafe_code)]

mod gate_ports;
mod maintenance_gate_service;

pub use gate_ports::{TokenReleasePort, TokenStore, WorkflowMetadataLookup};
pub use maintenance_gate_service::{MaintenanceGateConfig, MaintenanceGateService};
