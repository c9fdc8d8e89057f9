//! tutorbench-tools — tutoring resources served to the tutor agent.
//!
//! File-based section notes, a WolframAlpha solving proxy, and the MCP
//! server that exposes both as callable tools.

pub mod notes;
pub mod server;
pub mod solver;

pub use notes::NotesStore;
pub use server::TutorToolServer;
pub use solver::MathSolver;
