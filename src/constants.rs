/// Field names reported back in `FieldError`s
pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

/// Usernames and passwords must be strictly longer than this many characters
pub const MIN_CREDENTIAL_LEN: usize = 3;

// Messages are part of the client contract; keep them byte-for-byte.
pub const USERNAME_TOO_SHORT: &str = "username should be greater than 3 characters";
pub const PASSWORD_TOO_SHORT: &str = "password should be greater than 3 characters";
pub const USERNAME_TAKEN: &str = "username already taken";
pub const USERNAME_NOT_FOUND: &str = "username doesnot exist";
pub const INCORRECT_PASSWORD: &str = "incorrect password";

/// Reply of the `hello` query
pub const HELLO_REPLY: &str = "hello world";

/// Body served on `/`
pub const ROOT_GREETING: &str = "Hello client!";

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_DATABASE_URL: &str = "reddit.db";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILTER: &str = "reddit_server=debug,info";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
