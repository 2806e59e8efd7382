pub mod recorder;
pub mod session;

pub use recorder::{RecorderClient, RecordingService};
pub use session::{RegistrationSession, SubmissionEvent, SubmissionStatus, SubmitError};
