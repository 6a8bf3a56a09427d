//! Classification of connection-class failures.
//!
//! Every `sqlx::Error` is mapped here, once, to either a [`TransientKind`]
//! (the connection is suspect and a reconnect may help) or `None` (a query or
//! data error that must reach the caller untouched).

use std::io;

/// Recoverable transport failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    /// The peer reset or aborted the connection
    Reset,
    /// The server refused or could not accept the connection
    Refused,
    /// An established connection went away
    Lost,
    /// Connecting or acquiring a connection took too long
    TimedOut,
}

impl TransientKind {
    /// Classify a driver error
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        match err {
            sqlx::Error::Io(e) => Self::from_io(e.kind()),
            sqlx::Error::PoolTimedOut => Some(TransientKind::TimedOut),
            sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => Some(TransientKind::Lost),
            sqlx::Error::Database(db) => db.code().and_then(|code| Self::from_sqlstate(&code)),
            _ => None,
        }
    }

    fn from_io(kind: io::ErrorKind) -> Option<Self> {
        match kind {
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                Some(TransientKind::Reset)
            }
            io::ErrorKind::ConnectionRefused => Some(TransientKind::Refused),
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
            | io::ErrorKind::UnexpectedEof => Some(TransientKind::Lost),
            io::ErrorKind::TimedOut => Some(TransientKind::TimedOut),
            _ => None,
        }
    }

    /// Map a PostgreSQL SQLSTATE to a transient kind.
    ///
    /// Class 08 is "connection exception"; 57P01..57P03 are server
    /// shutdown/startup conditions that drop or refuse sessions.
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            "08001" | "08004" | "57P03" => Some(TransientKind::Refused),
            "57P01" | "57P02" => Some(TransientKind::Lost),
            c if c.starts_with("08") => Some(TransientKind::Lost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransientKind::Reset => "connection_reset",
            TransientKind::Refused => "connection_refused",
            TransientKind::Lost => "connection_lost",
            TransientKind::TimedOut => "timed_out",
        }
    }
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error(kind: io::ErrorKind) -> sqlx::Error {
        sqlx::Error::Io(io::Error::from(kind))
    }

    #[test]
    fn transport_errors_are_transient() {
        assert_eq!(
            TransientKind::classify(&io_error(io::ErrorKind::ConnectionReset)),
            Some(TransientKind::Reset)
        );
        assert_eq!(
            TransientKind::classify(&io_error(io::ErrorKind::ConnectionRefused)),
            Some(TransientKind::Refused)
        );
        assert_eq!(
            TransientKind::classify(&io_error(io::ErrorKind::BrokenPipe)),
            Some(TransientKind::Lost)
        );
        assert_eq!(
            TransientKind::classify(&io_error(io::ErrorKind::TimedOut)),
            Some(TransientKind::TimedOut)
        );
        assert_eq!(
            TransientKind::classify(&sqlx::Error::PoolTimedOut),
            Some(TransientKind::TimedOut)
        );
        assert_eq!(
            TransientKind::classify(&sqlx::Error::PoolClosed),
            Some(TransientKind::Lost)
        );
    }

    #[test]
    fn query_errors_are_not_transient() {
        assert_eq!(TransientKind::classify(&sqlx::Error::RowNotFound), None);
        assert_eq!(
            TransientKind::classify(&sqlx::Error::Protocol("unexpected message".into())),
            None
        );
        assert_eq!(
            TransientKind::classify(&io_error(io::ErrorKind::PermissionDenied)),
            None
        );
        assert_eq!(
            TransientKind::classify(&sqlx::Error::ColumnNotFound("nope".into())),
            None
        );
    }

    #[test]
    fn sqlstate_mapping() {
        assert_eq!(TransientKind::from_sqlstate("08006"), Some(TransientKind::Lost));
        assert_eq!(TransientKind::from_sqlstate("08001"), Some(TransientKind::Refused));
        assert_eq!(TransientKind::from_sqlstate("57P01"), Some(TransientKind::Lost));
        // unique_violation, syntax_error
        assert_eq!(TransientKind::from_sqlstate("23505"), None);
        assert_eq!(TransientKind::from_sqlstate("42601"), None);
    }
}
