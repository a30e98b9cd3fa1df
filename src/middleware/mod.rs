pub mod instrument;
pub mod recorder;

pub use instrument::instrument;
pub use recorder::StatusRecorder;
