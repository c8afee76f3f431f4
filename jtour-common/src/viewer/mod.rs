//! Street-view / map embed viewer with fallback chain

pub mod approach;
pub mod chain;
pub mod session;

pub use approach::{default_approaches, external_map_url, resolve_approaches, Approach, ResolvedApproach};
pub use chain::{Attempt, FallbackChain, Transition, ViewerEvent, ViewerState};
pub use session::{ViewerSession, ViewerSnapshot, DEFAULT_LOAD_TIMEOUT};
