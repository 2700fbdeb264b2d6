pub mod filter;
pub mod job;
pub mod team;

// Re-export commonly used types
pub use filter::{FilterSelection, Selection};
pub use job::{Job, JobId, JobStatus, NewJob};
pub use team::{Roster, TeamMember};
