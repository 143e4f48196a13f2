//! Two-body simulation kernel
//!
//! All physics lives here. Nothing in this module touches rendering, audio
//! or platform state:
//! - Fixed step per admitted frame
//! - Exactly two bodies, indexed by `BodyId`
//! - Field sampling is read-only

pub mod body;
pub mod field;
pub mod pair;

pub use body::{Body, BodyId, BodyInit, PhysicalConstants};
pub use field::{FieldSample, FieldSampler, GridPoint};
pub use pair::{BodySnapshot, FrameSnapshot, PairInit, PairSimulator, StepOutcome, mutual_acceleration};
