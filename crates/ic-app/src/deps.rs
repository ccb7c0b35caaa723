//! Application dependency grouping.
//!
//! This is NOT a builder: no build steps, no default values, no hidden
//! logic. Just a struct to group the ports a workflow needs.

use std::sync::Arc;

use ic_core::ports::{ImageAcquisitionPort, InvoiceServicePort};

/// The collaborators one capture workflow runs against.
///
/// All dependencies are required. The bearer-token collaborator is owned
/// by the service adapter itself, not passed through here.
#[derive(Clone)]
pub struct EngineDeps {
    pub service: Arc<dyn InvoiceServicePort>,
    pub images: Arc<dyn ImageAcquisitionPort>,
}
