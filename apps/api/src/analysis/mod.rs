// Coverage analysis: requirement matching, skill evidence, resume insights, highlighting.
// Everything here is a pure function of its inputs; callers recompute after each write.

pub mod handlers;
pub mod highlighter;
pub mod insights;
pub mod requirement_matcher;
pub mod skill_evidence;
