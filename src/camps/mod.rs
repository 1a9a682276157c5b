pub mod workflow;

pub use workflow::{CampId, CampParticipant, CampRoster, CampStatus, ParticipantStatus};
