pub mod quiz_session;
pub mod upload;
