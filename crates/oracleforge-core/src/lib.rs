//! OracleForge Core - Core types for three-valued oracle evaluation
//!
//! This crate provides the fundamental abstractions shared by every oracle:
//! - Truth values with strong Kleene connectives
//! - Values, facts and tuples observed from the host
//! - Partial assignments and read-only views over them
//! - Answers (definite / possible output tuples)
//! - Nogoods and the learner side channel
//! - Oracle descriptors with declared monotonicity

pub mod answer;
pub mod assignment;
pub mod descriptor;
pub mod error;
pub mod fact;
pub mod input;
pub mod nogood;
pub mod truth;
pub mod value;

pub use answer::{Answer, AnswerError, Verdict};
pub use assignment::{Assignment, AssignmentError, AssignmentView, OverlayView, RestrictedView};
pub use descriptor::{MonotonicitySpec, OracleDescriptor, OracleProperties, Wellordering};
pub use error::{OracleError, Result};
pub use fact::{Fact, FactParseError};
pub use input::{Input, InputKind};
pub use nogood::{Atom, Literal, Nogood, NogoodLearner, OutputAtom};
pub use truth::TruthValue;
pub use value::{Tuple, Value, ValueError, ValueKind};
