/// The editor session a host drives.
pub mod session;
