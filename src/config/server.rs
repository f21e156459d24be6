//! HTTP server configuration constants.

/// Environment variable consulted for the listen port.
pub const PORT_ENV_VAR: &str = "PORT";

/// Listen port used when the environment does not provide one.
pub const DEFAULT_PORT: u16 = 3000;
