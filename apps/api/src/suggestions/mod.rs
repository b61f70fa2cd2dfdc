// Suggestion handling: lifecycle state machine, quick-edit rewriting, recency marks
// and the notification/clipboard collaborators.

pub mod collaborators;
pub mod lifecycle;
pub mod quick_edit;
pub mod recency;
