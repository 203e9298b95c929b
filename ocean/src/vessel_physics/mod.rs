mod util;
mod types;
mod buoyancy;
mod terms;
mod dynamics;

pub use types::{ForceAccumulator, VesselInputs, VesselState, VesselStepDebug};
pub use buoyancy::probe_depths;
pub use dynamics::{integrate_body, register_impact, step_vessel, step_vessel_dbg};
