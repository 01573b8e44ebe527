pub mod clamp;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod result;
pub mod selection;
pub mod traits;

pub use clamp::{clamp, clamp_index};
pub use config::PagerConfig;
pub use error::PagerError;
pub use geometry::PageGeometry;
pub use history::{SelectCause, SelectionLog, SelectionRecord};
pub use result::PagerResult;
pub use selection::{GesturePhase, SelectionRequest, SelectionState, Settle};
pub use traits::{ScrollAnimation, ScrollTarget};
