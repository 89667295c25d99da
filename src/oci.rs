//! Oracle OCI

#![allow(dead_code)]

pub mod ptr;
pub mod attr;
pub mod handle;
pub mod entry;
pub mod symbols;
pub mod platform;
pub mod loader;
pub mod version;
pub mod config;
pub mod dispatch;
mod calls;

pub use ptr::Ptr;
pub use handle::{Handle, HandleType};
pub use entry::{Entry, EntryPoint};
pub use dispatch::ErrorContext;
pub use calls::*;

pub const OCI_DEFAULT                : u32 = 0;

// OCI Error Codes
pub const OCI_SUCCESS                : i32 = 0;
pub const OCI_SUCCESS_WITH_INFO      : i32 = 1;
pub const OCI_NEED_DATA              : i32 = 99;
pub const OCI_NO_DATA                : i32 = 100;
pub const OCI_ERROR                  : i32 = -1;
pub const OCI_INVALID_HANDLE         : i32 = -2;
pub const OCI_STILL_EXECUTING        : i32 = -3123;
pub const OCI_CONTINUE               : i32 = -24200;

// Handle Types
pub const OCI_HTYPE_ENV              : u32 = 1;
pub const OCI_HTYPE_ERROR            : u32 = 2;
pub const OCI_HTYPE_SVCCTX           : u32 = 3;
pub const OCI_HTYPE_STMT             : u32 = 4;
pub const OCI_HTYPE_BIND             : u32 = 5;
pub const OCI_HTYPE_DEFINE           : u32 = 6;
pub const OCI_HTYPE_DESCRIBE         : u32 = 7;
pub const OCI_HTYPE_SERVER           : u32 = 8;
pub const OCI_HTYPE_SESSION          : u32 = 9;
pub const OCI_HTYPE_AUTHINFO         : u32 = OCI_HTYPE_SESSION;
pub const OCI_HTYPE_TRANS            : u32 = 10;
pub const OCI_HTYPE_SUBSCRIPTION     : u32 = 13;
pub const OCI_HTYPE_CPOOL            : u32 = 26;
pub const OCI_HTYPE_SPOOL            : u32 = 27;
pub const OCI_HTYPE_ADMIN            : u32 = 28;

// Descriptor Types
pub const OCI_DTYPE_LOB              : u32 = 50;  // lob locator
pub const OCI_DTYPE_RSET             : u32 = 52;  // result set descriptor
pub const OCI_DTYPE_PARAM            : u32 = 53;  // a parameter descriptor obtained from ocigparm
pub const OCI_DTYPE_ROWID            : u32 = 54;  // rowid descriptor
pub const OCI_DTYPE_FILE             : u32 = 56;  // File Lob locator
pub const OCI_DTYPE_AQENQ_OPTIONS    : u32 = 57;
pub const OCI_DTYPE_AQDEQ_OPTIONS    : u32 = 58;
pub const OCI_DTYPE_AQMSG_PROPERTIES : u32 = 59;
pub const OCI_DTYPE_INTERVAL_YM      : u32 = 62;  // Interval year month
pub const OCI_DTYPE_INTERVAL_DS      : u32 = 63;  // Interval day second
pub const OCI_DTYPE_TIMESTAMP        : u32 = 68;  // Timestamp
pub const OCI_DTYPE_TIMESTAMP_TZ     : u32 = 69;  // Timestamp with timezone
pub const OCI_DTYPE_TIMESTAMP_LTZ    : u32 = 70;  // Timestamp with local tz

// Attributes
pub const OCI_ATTR_CACHE_OPT_SIZE    : u32 = 34;
pub const OCI_ATTR_CACHE_MAX_SIZE    : u32 = 35;
pub const OCI_ATTR_STMTCACHESIZE     : u32 = 176;
pub const OCI_ATTR_ENV_CHARSET_ID    : u32 = 31;
pub const OCI_ATTR_ENV_NCHARSET_ID   : u32 = 262;
pub const OCI_ATTR_ENV_NLS_LANGUAGE  : u32 = 424;
pub const OCI_ATTR_ENV_NLS_TERRITORY : u32 = 425;

// Initialization Modes
pub const OCI_THREADED               : u32 = 1;
pub const OCI_OBJECT                 : u32 = 2;
pub const OCI_EVENTS                 : u32 = 4;

// Character Sets
pub const AL32UTF8                   : u16 = 873;
pub const UTF8                       : u16 = 871;
pub const UTF16                      : u16 = 1000;

// Bind, define and prepare modes
pub const OCI_DATA_AT_EXEC           : u32 = 0x0000_0002;
pub const OCI_DYNAMIC_FETCH          : u32 = 0x0000_0002;
pub const OCI_BIND_DEDICATED_REF_CURSOR : u32 = 0x0001_0000;
pub const OCI_NTV_SYNTAX             : u32 = 1;
pub const OCI_PREP2_GET_SQL_ID       : u32 = 0x2000;
pub const OCI_STRLS_CACHE_DELETE     : u32 = 0x0010;
pub const OCI_SECURE_NOTIFICATION    : u32 = 0x2000_0000;

// Fetch orientation
pub const OCI_FETCH_CURRENT          : u16 = 0x01;
pub const OCI_FETCH_NEXT             : u16 = 0x02;
pub const OCI_FETCH_FIRST            : u16 = 0x04;
pub const OCI_FETCH_LAST             : u16 = 0x08;
pub const OCI_FETCH_PRIOR            : u16 = 0x10;
pub const OCI_FETCH_ABSOLUTE         : u16 = 0x20;
pub const OCI_FETCH_RELATIVE         : u16 = 0x40;

// LOBs
pub const OCI_TEMP_BLOB              : u8 = 1;
pub const OCI_TEMP_CLOB              : u8 = 2;
pub const OCI_LOB_READONLY           : u8 = 1;
pub const OCI_LOB_READWRITE          : u8 = 2;
pub const OCI_ONE_PIECE              : u8 = 0;

// char set "form" information
pub const SQLCS_IMPLICIT             : u8 = 1;
pub const SQLCS_NCHAR                : u8 = 2;

// Object cache
pub const OCI_DURATION_SESSION       : u16 = 10;
pub const OCI_DURATION_STATEMENT     : u16 = 13;
pub const OCI_PIN_ANY                : i32 = 3;
pub const OCI_LOCK_NONE              : i32 = 1;
pub const OCI_TYPEGET_ALL            : i32 = 1;
pub const OCI_OTYPE_PTR              : u8 = 3;
pub const OCI_PTYPE_TYPE             : u8 = 6;
pub const OCI_MEMORY_CLEARED         : u32 = 1;
pub const OCI_OBJECTFREE_FORCE       : u16 = 0x0001;

// SODA
pub const OCI_SODA_AS_AL32UTF8       : u32 = 4;

// Vector element formats
pub const OCI_ATTR_VECTOR_FORMAT_FLOAT32 : u8 = 2;
pub const OCI_ATTR_VECTOR_FORMAT_FLOAT64 : u8 = 3;
pub const OCI_ATTR_VECTOR_FORMAT_INT8    : u8 = 4;
pub const OCI_ATTR_VECTOR_FORMAT_BINARY  : u8 = 5;

// Diagnostics
pub const OCI_ERROR_MAXMSG_SIZE      : usize = 3072;

// Handle Definitions
#[repr(C)] pub struct OCIEnv                { _private: [u8; 0] }
#[repr(C)] pub struct OCIError              { _private: [u8; 0] }
#[repr(C)] pub struct OCISvcCtx             { _private: [u8; 0] }
#[repr(C)] pub struct OCIStmt               { _private: [u8; 0] }
#[repr(C)] pub struct OCIBind               { _private: [u8; 0] }
#[repr(C)] pub struct OCIDefine             { _private: [u8; 0] }
#[repr(C)] pub struct OCIDescribe           { _private: [u8; 0] }
#[repr(C)] pub struct OCIServer             { _private: [u8; 0] }
#[repr(C)] pub struct OCISession            { _private: [u8; 0] }
#[repr(C)] pub struct OCIAuthInfo           { _private: [u8; 0] }
#[repr(C)] pub struct OCISPool              { _private: [u8; 0] }
#[repr(C)] pub struct OCICPool              { _private: [u8; 0] }
#[repr(C)] pub struct OCISubscription       { _private: [u8; 0] }

// Descriptor and data Definitions
#[repr(C)] pub struct OCILobLocator         { _private: [u8; 0] }
#[repr(C)] pub struct OCIParam              { _private: [u8; 0] }
#[repr(C)] pub struct OCIRowid              { _private: [u8; 0] }
#[repr(C)] pub struct OCIDateTime           { _private: [u8; 0] }
#[repr(C)] pub struct OCIInterval           { _private: [u8; 0] }
#[repr(C)] pub struct OCIRaw                { _private: [u8; 0] }
#[repr(C)] pub struct OCIString             { _private: [u8; 0] }
#[repr(C)] pub struct OCIType               { _private: [u8; 0] }

/// C mapping of the Oracle NUMBER
#[repr(C)] pub struct OCINumber {
    pub bytes: [u8; 22]
}

/// Marker trait for OCI handles and descriptors
pub trait OCIStruct {}

macro_rules! mark_as_oci {
    ($($t:ty),+) => {
        $(
            impl OCIStruct for $t {}
        )+
    };
}

mark_as_oci!(OCIEnv, OCIError, OCISvcCtx, OCIStmt, OCIBind, OCIDefine, OCIDescribe, OCIServer, OCISession, OCIAuthInfo, OCISPool, OCICPool, OCISubscription);
mark_as_oci!(OCILobLocator, OCIParam, OCIRowid, OCIDateTime, OCIInterval, OCIRaw, OCIString, OCIType, OCINumber);
