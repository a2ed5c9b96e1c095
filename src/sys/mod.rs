//! Operating system introspection helpers.
//!
//! # Responsibilities
//! - Locate the running executable's directory and program name
//! - Probe whether a path is a directory
//! - Find the first non-loopback local IPv4 address
//!
//! # Design Decisions
//! - Path handling goes through `std::path` components, never string splitting
//! - Network and directory probes degrade silently instead of erroring
//! - Executable location is fatal on failure; `try_executable_dir` is the fallible form

pub mod fs;
pub mod net;
pub mod path;
pub mod process;

pub use fs::{dir_status, is_directory, DirStatus};
pub use net::{local_ipv4, local_ipv4_addr};
pub use path::clean_path;
pub use process::{executable_dir, program_name, try_executable_dir, ProcessError};
