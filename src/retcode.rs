//! Service return codes.
//!
//! Services report their outcome as a small numeric return code alongside
//! any marshalled result. The meanings are fixed by the protocol, so the
//! table lives here as compile-time data: [`name`] and [`strerror`] look a
//! code up, and [`codes`] holds a constant per code for callers that match
//! on specific outcomes.
//!
//! # Example
//!
//! ```
//! use sdt::retcode;
//!
//! assert_eq!(retcode::strerror(retcode::codes::OK), Some("No error"));
//! assert_eq!(retcode::name(5), Some("HandleDoesNotExist"));
//! assert_eq!(retcode::strerror(4000), None);
//! ```

/// Return-code table, indexed by numeric code: symbolic name and
/// human-readable message.
static RETURN_CODES: [(&str, &str); 61] = [
    ("Ok", "No error"),
    ("InvalidAPI", "Invalid API"),
    ("UnknownService", "Unknown service"),
    ("InvalidHandle", "Invalid handle"),
    ("HandleAlreadyExists", "Handle already exists"),
    ("HandleDoesNotExist", "Handle does not exist"),
    ("UnknownError", "Unknown error"),
    ("InvalidRequestString", "Invalid request string"),
    ("InvalidServiceResult", "Invalid service result"),
    ("REXXError", "REXX Error"),
    ("BaseOSError", "Base operating system error"),
    ("ProcessAlreadyComplete", "Process already complete"),
    ("ProcessNotComplete", "Process not complete"),
    ("VariableDoesNotExist", "Variable does not exist"),
    ("UnResolvableString", "Unresolvable string"),
    ("InvalidResolveString", "Invalid resolve string"),
    ("NoPathToMachine", "No path to endpoint"),
    ("FileOpenError", "File open error"),
    ("FileReadError", "File read error"),
    ("FileWriteError", "File write error"),
    ("FileDeleteError", "File delete error"),
    ("STAFNotRunning", "STAF not running"),
    ("CommunicationError", "Communication error"),
    ("TrusteeDoesNotExist", "Trusteee does not exist"),
    ("InvalidTrustLevel", "Invalid trust level"),
    ("AccessDenied", "Insufficient trust level"),
    ("STAFRegistrationError", "Registration error"),
    ("ServiceConfigurationError", "Service configuration error"),
    ("QueueFull", "Queue full"),
    ("NoQueueElement", "No queue element"),
    ("NotifieeDoesNotExist", "Notifiee does not exist"),
    ("InvalidAPILevel", "Invalid API level"),
    ("ServiceNotUnregisterable", "Service not unregisterable"),
    ("ServiceNotAvailable", "Service not available"),
    ("SemaphoreDoesNotExist", "Semaphore does not exist"),
    ("NotSemaphoreOwner", "Not semaphore owner"),
    ("SemaphoreHasPendingRequests", "Semaphore has pending requests"),
    ("Timeout", "Timeout"),
    ("JavaError", "Java error"),
    ("ConverterError", "Converter error"),
    ("MoveError", "Move error"),
    ("InvalidObject", "Invalid object"),
    ("InvalidParm", "Invalid parm"),
    ("RequestNumberNotFound", "Request number not found"),
    ("InvalidAsynchOption", "Invalid asynchronous option"),
    ("RequestNotComplete", "Request not complete"),
    ("ProcessAuthenticationDenied", "Process authentication denied"),
    ("InvalidValue", "Invalid value"),
    ("DoesNotExist", "Does not exist"),
    ("AlreadyExists", "Already exists"),
    ("DirectoryNotEmpty", "Directory Not Empty"),
    ("DirectoryCopyError", "Directory Copy Error"),
    ("DiagnosticsNotEnabled", "Diagnostics Not Enabled"),
    ("HandleAuthenticationDenied", "Handle Authentication Denied"),
    ("HandleAlreadyAuthenticated", "Handle Already Authenticated"),
    ("InvalidSTAFVersion", "Invalid STAF Version"),
    ("RequestCancelled", "Request Cancelled"),
    ("CreateThreadError", "Create Thread Error"),
    ("MaximumSizeExceeded", "Maximum Size Exceeded"),
    ("MaximumHandlesExceeded", "Maximum Handles Exceeded"),
    ("NotRequester", "Not Pending Requester"),
];

/// Returns the symbolic name for a return code, or `None` if the code is
/// not in the table. Services may return codes of their own above 4000;
/// those have no fixed meaning here.
pub fn name(rc: usize) -> Option<&'static str> { RETURN_CODES.get(rc).map(|(name, _)| *name) }

/// Returns the human-readable message for a return code, or `None` if the
/// code is not in the table.
pub fn strerror(rc: usize) -> Option<&'static str> { RETURN_CODES.get(rc).map(|(_, msg)| *msg) }

/// One constant per return code.
pub mod codes {
    pub const OK: usize = 0;
    pub const INVALID_API: usize = 1;
    pub const UNKNOWN_SERVICE: usize = 2;
    pub const INVALID_HANDLE: usize = 3;
    pub const HANDLE_ALREADY_EXISTS: usize = 4;
    pub const HANDLE_DOES_NOT_EXIST: usize = 5;
    pub const UNKNOWN_ERROR: usize = 6;
    pub const INVALID_REQUEST_STRING: usize = 7;
    pub const INVALID_SERVICE_RESULT: usize = 8;
    pub const REXX_ERROR: usize = 9;
    pub const BASE_OS_ERROR: usize = 10;
    pub const PROCESS_ALREADY_COMPLETE: usize = 11;
    pub const PROCESS_NOT_COMPLETE: usize = 12;
    pub const VARIABLE_DOES_NOT_EXIST: usize = 13;
    pub const UNRESOLVABLE_STRING: usize = 14;
    pub const INVALID_RESOLVE_STRING: usize = 15;
    pub const NO_PATH_TO_MACHINE: usize = 16;
    pub const FILE_OPEN_ERROR: usize = 17;
    pub const FILE_READ_ERROR: usize = 18;
    pub const FILE_WRITE_ERROR: usize = 19;
    pub const FILE_DELETE_ERROR: usize = 20;
    pub const STAF_NOT_RUNNING: usize = 21;
    pub const COMMUNICATION_ERROR: usize = 22;
    pub const TRUSTEE_DOES_NOT_EXIST: usize = 23;
    pub const INVALID_TRUST_LEVEL: usize = 24;
    pub const ACCESS_DENIED: usize = 25;
    pub const STAF_REGISTRATION_ERROR: usize = 26;
    pub const SERVICE_CONFIGURATION_ERROR: usize = 27;
    pub const QUEUE_FULL: usize = 28;
    pub const NO_QUEUE_ELEMENT: usize = 29;
    pub const NOTIFIEE_DOES_NOT_EXIST: usize = 30;
    pub const INVALID_API_LEVEL: usize = 31;
    pub const SERVICE_NOT_UNREGISTERABLE: usize = 32;
    pub const SERVICE_NOT_AVAILABLE: usize = 33;
    pub const SEMAPHORE_DOES_NOT_EXIST: usize = 34;
    pub const NOT_SEMAPHORE_OWNER: usize = 35;
    pub const SEMAPHORE_HAS_PENDING_REQUESTS: usize = 36;
    pub const TIMEOUT: usize = 37;
    pub const JAVA_ERROR: usize = 38;
    pub const CONVERTER_ERROR: usize = 39;
    pub const MOVE_ERROR: usize = 40;
    pub const INVALID_OBJECT: usize = 41;
    pub const INVALID_PARM: usize = 42;
    pub const REQUEST_NUMBER_NOT_FOUND: usize = 43;
    pub const INVALID_ASYNCH_OPTION: usize = 44;
    pub const REQUEST_NOT_COMPLETE: usize = 45;
    pub const PROCESS_AUTHENTICATION_DENIED: usize = 46;
    pub const INVALID_VALUE: usize = 47;
    pub const DOES_NOT_EXIST: usize = 48;
    pub const ALREADY_EXISTS: usize = 49;
    pub const DIRECTORY_NOT_EMPTY: usize = 50;
    pub const DIRECTORY_COPY_ERROR: usize = 51;
    pub const DIAGNOSTICS_NOT_ENABLED: usize = 52;
    pub const HANDLE_AUTHENTICATION_DENIED: usize = 53;
    pub const HANDLE_ALREADY_AUTHENTICATED: usize = 54;
    pub const INVALID_STAF_VERSION: usize = 55;
    pub const REQUEST_CANCELLED: usize = 56;
    pub const CREATE_THREAD_ERROR: usize = 57;
    pub const MAXIMUM_SIZE_EXCEEDED: usize = 58;
    pub const MAXIMUM_HANDLES_EXCEEDED: usize = 59;
    pub const NOT_REQUESTER: usize = 60;
}
