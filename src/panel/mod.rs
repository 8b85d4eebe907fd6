pub mod dashboard;
pub mod generation;
pub mod messages;
pub mod projects;

pub use dashboard::{ActiveView, Dashboard};
pub use messages::MessagePanel;
pub use projects::ProjectPanel;
