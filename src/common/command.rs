//! IMU command definitions.
//!
//! A command is a short ASCII token sent as one line (`e\n`, `q\n`). The
//! sensor answers by echoing the token, then `=`, then the values.

use arrayvec::ArrayString;
use core::fmt;

use super::error::CommandError;

/// Longest accepted command name, excluding the newline.
pub const MAX_COMMAND_NAME_LEN: usize = 31;

/// Line terminator appended to every command on the wire.
pub const COMMAND_TERMINATOR: u8 = b'\n';

/// A validated request line.
///
/// Stores the command name; [`Command::wire_bytes`] renders it with its
/// trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: ArrayString<MAX_COMMAND_NAME_LEN>,
}

impl Command {
    /// Reads Euler angles (`e`).
    pub fn euler() -> Self {
        Self::from_static("e")
    }

    /// Reads the orientation quaternion (`q`).
    pub fn quaternion() -> Self {
        Self::from_static("q")
    }

    /// Creates a command from its bare name (no terminator).
    pub fn new(name: &str) -> Result<Self, CommandError> {
        if name.is_empty() {
            return Err(CommandError::Empty);
        }
        if name.len() > MAX_COMMAND_NAME_LEN {
            return Err(CommandError::TooLong {
                len: name.len(),
                max: MAX_COMMAND_NAME_LEN,
            });
        }
        if let Some(&bad) = name.as_bytes().iter().find(|b| !is_name_byte(**b)) {
            return Err(CommandError::InvalidCharacter(bad));
        }
        // Length and charset checked above, so this cannot fail
        let name = ArrayString::from(name).map_err(|_| CommandError::TooLong {
            len: name.len(),
            max: MAX_COMMAND_NAME_LEN,
        })?;
        Ok(Command { name })
    }

    /// Creates a command from a raw request line such as `"e\n"`.
    ///
    /// Exactly one trailing `\n` is stripped; everything before it is the name.
    pub fn from_line(line: &str) -> Result<Self, CommandError> {
        let name = line
            .strip_suffix(COMMAND_TERMINATOR as char)
            .ok_or(CommandError::MissingTerminator)?;
        Self::new(name)
    }

    // Built-in names are known valid
    fn from_static(name: &'static str) -> Self {
        let mut buf = ArrayString::new();
        buf.push_str(name);
        Command { name: buf }
    }

    /// The command name the device must echo back.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Bytes to put on the wire: name followed by `\n`.
    pub fn wire_bytes(&self) -> ArrayString<{ MAX_COMMAND_NAME_LEN + 1 }> {
        let mut line = ArrayString::new();
        line.push_str(self.name.as_str());
        line.push(COMMAND_TERMINATOR as char);
        line
    }
}

// Printable ASCII minus the bytes that carry meaning in replies
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !matches!(b, b'=' | b',' | b'!')
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_commands() {
        assert_eq!(Command::euler().name(), "e");
        assert_eq!(Command::quaternion().name(), "q");
        assert_eq!(Command::euler().wire_bytes().as_str(), "e\n");
        assert_eq!(Command::quaternion().wire_bytes().as_bytes(), b"q\n");
    }

    #[test]
    fn from_line_strips_single_newline() {
        let cmd = Command::from_line("e\n").unwrap();
        assert_eq!(cmd, Command::euler());
        assert_eq!(Command::from_line("e"), Err(CommandError::MissingTerminator));
        // A CR before the newline is not part of a valid name
        assert_eq!(Command::from_line("e\r\n"), Err(CommandError::InvalidCharacter(b'\r')));
    }

    #[test]
    fn custom_names() {
        let cmd = Command::new("gyro").unwrap();
        assert_eq!(cmd.wire_bytes().as_str(), "gyro\n");
        assert_eq!(cmd.to_string(), "gyro");
    }

    #[test]
    fn invalid_names() {
        assert_eq!(Command::new(""), Err(CommandError::Empty));
        assert_eq!(Command::new("a=b"), Err(CommandError::InvalidCharacter(b'=')));
        assert_eq!(Command::new("a,b"), Err(CommandError::InvalidCharacter(b',')));
        assert_eq!(Command::new("!e"), Err(CommandError::InvalidCharacter(b'!')));
        assert_eq!(Command::new("e q"), Err(CommandError::InvalidCharacter(b' ')));
        let long = "x".repeat(MAX_COMMAND_NAME_LEN + 1);
        assert_eq!(
            Command::new(&long),
            Err(CommandError::TooLong { len: MAX_COMMAND_NAME_LEN + 1, max: MAX_COMMAND_NAME_LEN })
        );
        assert!(Command::new(&long[..MAX_COMMAND_NAME_LEN]).is_ok());
    }
}
