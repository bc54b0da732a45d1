//! Pure conversions between persisted models and transfer objects
//!
//! Nothing in here touches storage or the network; every function is a
//! plain transformation that can be tested in isolation.

pub mod gene;
pub mod report;
pub mod variant;
