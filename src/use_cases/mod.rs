// Use cases: the auth exchanges, the poll loop, and the session that drives them.

pub mod poll;
pub mod protocol;
pub mod session;
