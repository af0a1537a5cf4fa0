mod cli;
mod parsers;
mod types;


pub use cli::{Command, ServeArgs, VolleyArgs};
pub use types::{HttpMethod, LogFormat};
