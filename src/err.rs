use std::{cmp, fmt, error, io};

/// Native diagnostics captured after a failed OCI call.
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Oracle error number, as reported by `OCIErrorGet`
    pub code: i32,
    /// Message text with trailing whitespace removed
    pub message: String,
    /// What the shim was trying to do, e.g. "prepare SQL"
    pub action: &'static str,
    /// Name of the entry point that failed
    pub entry: &'static str,
}

/// Represents possible errors returned from ocilink
#[derive(Debug)]
pub enum Error {
    Interface(String),
    LoadLibrary(String),
    UnsupportedClient(String),
    NotAvailable(&'static str),
    ClientTooOld { required: (i32, i32), actual: (i32, i32) },
    NoMemory(&'static str),
    Oracle(ErrorInfo),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Oracle(info) => write!(f, "ORA-{:05}: {}", info.code, info.message),
            Error::Interface(msg) => write!(f, "{}", msg),
            Error::LoadLibrary(msg) => write!(f, "{}", msg),
            Error::UnsupportedClient(msg) => write!(f, "Oracle Client library is not supported: {}", msg),
            Error::NotAvailable(name) => write!(f, "{} is not available in the loaded Oracle Client library", name),
            Error::ClientTooOld { required, actual } => write!(f,
                "Oracle Client library is at version {}.{} but version {}.{} or higher is needed",
                actual.0, actual.1, required.0, required.1
            ),
            Error::NoMemory(action) => write!(f, "out of memory while trying to {}", action),
        }
    }
}

impl error::Error for Error {}

impl cmp::PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        match (self, other) {
            (Error::Oracle(this), Error::Oracle(that)) => this.code == that.code,
            (Error::Interface(this), Error::Interface(that)) => this == that,
            (Error::LoadLibrary(this), Error::LoadLibrary(that)) => this == that,
            (Error::UnsupportedClient(this), Error::UnsupportedClient(that)) => this == that,
            (Error::NotAvailable(this), Error::NotAvailable(that)) => this == that,
            (Error::NoMemory(this), Error::NoMemory(that)) => this == that,
            (Error::ClientTooOld { required: r1, actual: a1 }, Error::ClientTooOld { required: r2, actual: a2 }) => r1 == r2 && a1 == a2,
            _ => false,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

impl Error {
    pub(crate) fn new(msg: &str) -> Self {
        Error::Interface( msg.to_owned() )
    }

    pub(crate) fn msg(msg: String) -> Self {
        Error::Interface(msg)
    }

    /**
    Returns the native error number. Errors raised by the shim itself, such as
    a missing entry point or a library that could not be loaded, report 0.
    */
    pub fn code(&self) -> i32 {
        match self {
            Error::Oracle(info) => info.code,
            _ => 0,
        }
    }

    /// Returns the diagnostic message without the `ORA-nnnnn` prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Oracle(info) => info.message.clone(),
            _ => self.to_string(),
        }
    }

    /// Returns native diagnostics if this error came from a failed OCI call.
    pub fn info(&self) -> Option<&ErrorInfo> {
        match self {
            Error::Oracle(info) => Some(info),
            _ => None,
        }
    }

    /// Whether the error reports an entry point absent from the loaded client.
    pub fn is_not_available(&self) -> bool {
        matches!(self, Error::NotAvailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_errors_compare_by_code() {
        let a = Error::Oracle(ErrorInfo { code: 1017, message: "invalid username/password".into(), action: "begin session", entry: "OCISessionBegin" });
        let b = Error::Oracle(ErrorInfo { code: 1017, message: "other text".into(), action: "get session", entry: "OCISessionGet" });
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "ORA-01017: invalid username/password");
        assert_eq!(a.code(), 1017);
    }

    #[test]
    fn shim_errors_report_code_zero() {
        let err = Error::NotAvailable("OCIVectorFromArray");
        assert_eq!(err.code(), 0);
        assert!(err.is_not_available());
        assert!(!err.message().is_empty());

        let err = Error::ClientTooOld { required: (23, 7), actual: (19, 3) };
        assert_eq!(err.code(), 0);
        assert_eq!(err.to_string(), "Oracle Client library is at version 19.3 but version 23.7 or higher is needed");
    }
}
