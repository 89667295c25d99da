//! Typed registry of OCI entry points.
//!
//! Every function the shim may call is listed once below with its exported
//! name and C signature. The macro derives an [`Entry`] id per function and a
//! marker type in [`ep`] that carries the function-pointer type, so that the
//! dispatcher can resolve a symbol and hand the caller a correctly typed
//! pointer without any string lookups at the call sites.

use libc::c_void;
use super::*;

type Dvoid  = *mut c_void;
type Cvoid  = *const c_void;
type Text   = *const u8;
type Envp   = *mut OCIEnv;
type Errp   = *mut OCIError;
type Svcp   = *mut OCISvcCtx;
type Stmtp  = *mut OCIStmt;
type Lobp   = *mut OCILobLocator;
type Dtp    = *mut OCIDateTime;
type Intvp  = *mut OCIInterval;
type Typep  = *mut OCIType;

/// Associates an entry point marker with its native function type.
pub trait EntryPoint {
    type Fn: Copy;
    const ENTRY: Entry;
}

macro_rules! entry_points {
    ($( $id:ident => $name:literal : fn( $($arg:ty),* ) -> $ret:ty; )+) => {
        /// OCI entry point identifiers
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Entry {
            $( $id, )+
        }

        impl Entry {
            /// All known entry points in declaration order
            pub const ALL: &'static [Entry] = &[ $( Entry::$id, )+ ];

            /// Exported symbol name
            pub fn name(self) -> &'static str {
                match self {
                    $( Entry::$id => $name, )+
                }
            }

            pub(crate) fn c_name(self) -> &'static [u8] {
                match self {
                    $( Entry::$id => concat!($name, "\0").as_bytes(), )+
                }
            }

            pub(crate) fn index(self) -> usize {
                self as usize
            }
        }

        /// Marker types, one per entry point
        pub mod ep {
            use super::*;
            $(
                pub struct $id;
                impl EntryPoint for $id {
                    type Fn = unsafe extern "C" fn( $($arg),* ) -> $ret;
                    const ENTRY: Entry = Entry::$id;
                }
            )+
        }
    };
}

entry_points! {
    AqDeq                       => "OCIAQDeq"                       : fn(Svcp, Errp, Text, Dvoid, Dvoid, Dvoid, *mut Dvoid, *mut Dvoid, *mut Dvoid, u32) -> i32;
    AqDeqArray                  => "OCIAQDeqArray"                  : fn(Svcp, Errp, Text, Dvoid, *mut u32, *mut Dvoid, Dvoid, *mut Dvoid, *mut Dvoid, *mut Dvoid, Dvoid, Dvoid, u32) -> i32;
    AqEnq                       => "OCIAQEnq"                       : fn(Svcp, Errp, Text, Dvoid, Dvoid, Dvoid, *mut Dvoid, *mut Dvoid, *mut Dvoid, u32) -> i32;
    AqEnqArray                  => "OCIAQEnqArray"                  : fn(Svcp, Errp, Text, Dvoid, *mut u32, *mut Dvoid, Dvoid, *mut Dvoid, *mut Dvoid, *mut Dvoid, Dvoid, Dvoid, u32) -> i32;
    ArrayDescriptorAlloc        => "OCIArrayDescriptorAlloc"        : fn(Cvoid, *mut Dvoid, u32, u32, usize, *mut Dvoid) -> i32;
    ArrayDescriptorFree         => "OCIArrayDescriptorFree"         : fn(*mut Dvoid, u32) -> i32;
    AttrGet                     => "OCIAttrGet"                     : fn(Cvoid, u32, Dvoid, *mut u32, u32, Errp) -> i32;
    AttrSet                     => "OCIAttrSet"                     : fn(Dvoid, u32, Dvoid, u32, u32, Errp) -> i32;
    BindByName                  => "OCIBindByName"                  : fn(Stmtp, *mut *mut OCIBind, Errp, Text, i32, Dvoid, i32, u16, Dvoid, *mut u16, *mut u16, u32, *mut u32, u32) -> i32;
    BindByName2                 => "OCIBindByName2"                 : fn(Stmtp, *mut *mut OCIBind, Errp, Text, i32, Dvoid, i64, u16, Dvoid, *mut u32, *mut u16, u32, *mut u32, u32) -> i32;
    BindByPos                   => "OCIBindByPos"                   : fn(Stmtp, *mut *mut OCIBind, Errp, u32, Dvoid, i32, u16, Dvoid, *mut u16, *mut u16, u32, *mut u32, u32) -> i32;
    BindByPos2                  => "OCIBindByPos2"                  : fn(Stmtp, *mut *mut OCIBind, Errp, u32, Dvoid, i64, u16, Dvoid, *mut u32, *mut u16, u32, *mut u32, u32) -> i32;
    BindDynamic                 => "OCIBindDynamic"                 : fn(*mut OCIBind, Errp, Dvoid, Dvoid, Dvoid, Dvoid) -> i32;
    BindObject                  => "OCIBindObject"                  : fn(*mut OCIBind, Errp, *const OCIType, *mut Dvoid, *mut u32, *mut Dvoid, *mut u32) -> i32;
    Break                       => "OCIBreak"                       : fn(Dvoid, Errp) -> i32;
    ClientVersion               => "OCIClientVersion"               : fn(*mut i32, *mut i32, *mut i32, *mut i32, *mut i32) -> ();
    CollAppend                  => "OCICollAppend"                  : fn(Envp, Errp, Cvoid, Cvoid, Dvoid) -> i32;
    CollAssignElem              => "OCICollAssignElem"              : fn(Envp, Errp, i32, Cvoid, Cvoid, Dvoid) -> i32;
    CollGetElem                 => "OCICollGetElem"                 : fn(Envp, Errp, Cvoid, i32, *mut i32, *mut Dvoid, *mut Dvoid) -> i32;
    CollSize                    => "OCICollSize"                    : fn(Envp, Errp, Cvoid, *mut i32) -> i32;
    CollTrim                    => "OCICollTrim"                    : fn(Envp, Errp, i32, Dvoid) -> i32;
    ContextGetValue             => "OCIContextGetValue"             : fn(Dvoid, Errp, Text, u8, *mut Dvoid) -> i32;
    ContextSetValue             => "OCIContextSetValue"             : fn(Dvoid, Errp, u16, Text, u8, Dvoid) -> i32;
    DateTimeConstruct           => "OCIDateTimeConstruct"           : fn(Dvoid, Errp, Dtp, i16, u8, u8, u8, u8, u8, u32, Text, usize) -> i32;
    DateTimeConvert             => "OCIDateTimeConvert"             : fn(Dvoid, Errp, Dtp, Dtp) -> i32;
    DateTimeGetDate             => "OCIDateTimeGetDate"             : fn(Dvoid, Errp, *const OCIDateTime, *mut i16, *mut u8, *mut u8) -> i32;
    DateTimeGetTime             => "OCIDateTimeGetTime"             : fn(Dvoid, Errp, Dtp, *mut u8, *mut u8, *mut u8, *mut u32) -> i32;
    DateTimeGetTimeZoneOffset   => "OCIDateTimeGetTimeZoneOffset"   : fn(Dvoid, Errp, *const OCIDateTime, *mut i8, *mut i8) -> i32;
    DateTimeIntervalAdd         => "OCIDateTimeIntervalAdd"         : fn(Dvoid, Errp, Dtp, Intvp, Dtp) -> i32;
    DateTimeSubtract            => "OCIDateTimeSubtract"            : fn(Dvoid, Errp, Dtp, Dtp, Intvp) -> i32;
    DbShutdown                  => "OCIDBShutdown"                  : fn(Svcp, Errp, Dvoid, u32) -> i32;
    DbStartup                   => "OCIDBStartup"                   : fn(Svcp, Errp, Dvoid, u32, u32) -> i32;
    DefineByPos                 => "OCIDefineByPos"                 : fn(Stmtp, *mut *mut OCIDefine, Errp, u32, Dvoid, i32, u16, Dvoid, *mut u16, *mut u16, u32) -> i32;
    DefineByPos2                => "OCIDefineByPos2"                : fn(Stmtp, *mut *mut OCIDefine, Errp, u32, Dvoid, u64, u16, Dvoid, *mut u32, *mut u16, u32) -> i32;
    DefineDynamic               => "OCIDefineDynamic"               : fn(*mut OCIDefine, Errp, Dvoid, Dvoid) -> i32;
    DefineObject                => "OCIDefineObject"                : fn(*mut OCIDefine, Errp, *const OCIType, *mut Dvoid, *mut u32, *mut Dvoid, *mut u32) -> i32;
    DescribeAny                 => "OCIDescribeAny"                 : fn(Svcp, Errp, Dvoid, u32, u8, u8, u8, *mut OCIDescribe) -> i32;
    DescriptorAlloc             => "OCIDescriptorAlloc"             : fn(Cvoid, *mut Dvoid, u32, usize, *mut Dvoid) -> i32;
    DescriptorFree              => "OCIDescriptorFree"              : fn(Dvoid, u32) -> i32;
    EnvNlsCreate                => "OCIEnvNlsCreate"                : fn(*mut Envp, u32, Dvoid, Dvoid, Dvoid, Dvoid, usize, *mut Dvoid, u16, u16) -> i32;
    ErrorGet                    => "OCIErrorGet"                    : fn(Dvoid, u32, *mut u8, *mut i32, *mut u8, u32, u32) -> i32;
    HandleAlloc                 => "OCIHandleAlloc"                 : fn(Cvoid, *mut Dvoid, u32, usize, *mut Dvoid) -> i32;
    HandleFree                  => "OCIHandleFree"                  : fn(Dvoid, u32) -> i32;
    IntervalGetDaySecond        => "OCIIntervalGetDaySecond"        : fn(Dvoid, Errp, *mut i32, *mut i32, *mut i32, *mut i32, *mut i32, *const OCIInterval) -> i32;
    IntervalGetYearMonth        => "OCIIntervalGetYearMonth"        : fn(Dvoid, Errp, *mut i32, *mut i32, *const OCIInterval) -> i32;
    IntervalSetDaySecond        => "OCIIntervalSetDaySecond"        : fn(Dvoid, Errp, i32, i32, i32, i32, i32, Intvp) -> i32;
    IntervalSetYearMonth        => "OCIIntervalSetYearMonth"        : fn(Dvoid, Errp, i32, i32, Intvp) -> i32;
    JsonDomDocGet               => "OCIJsonDomDocGet"               : fn(Svcp, Dvoid, *mut Dvoid, Errp, u32) -> i32;
    JsonTextBufferParse         => "OCIJsonTextBufferParse"         : fn(Dvoid, Dvoid, Dvoid, u64, u32, u16, Errp, u32) -> i32;
    LobClose                    => "OCILobClose"                    : fn(Svcp, Errp, Lobp) -> i32;
    LobCreateTemporary          => "OCILobCreateTemporary"          : fn(Svcp, Errp, Lobp, u16, u8, u8, i32, u16) -> i32;
    LobFileExists               => "OCILobFileExists"               : fn(Svcp, Errp, Lobp, *mut i32) -> i32;
    LobFileGetName              => "OCILobFileGetName"              : fn(Envp, Errp, *const OCILobLocator, *mut u8, *mut u16, *mut u8, *mut u16) -> i32;
    LobFileSetName              => "OCILobFileSetName"              : fn(Envp, Errp, *mut Lobp, Text, u16, Text, u16) -> i32;
    LobFreeTemporary            => "OCILobFreeTemporary"            : fn(Svcp, Errp, Lobp) -> i32;
    LobGetChunkSize             => "OCILobGetChunkSize"             : fn(Svcp, Errp, Lobp, *mut u32) -> i32;
    LobGetLength2               => "OCILobGetLength2"               : fn(Svcp, Errp, Lobp, *mut u64) -> i32;
    LobIsOpen                   => "OCILobIsOpen"                   : fn(Svcp, Errp, Lobp, *mut i32) -> i32;
    LobIsTemporary              => "OCILobIsTemporary"              : fn(Envp, Errp, Lobp, *mut i32) -> i32;
    LobLocatorAssign            => "OCILobLocatorAssign"            : fn(Svcp, Errp, *const OCILobLocator, *mut Lobp) -> i32;
    LobOpen                     => "OCILobOpen"                     : fn(Svcp, Errp, Lobp, u8) -> i32;
    LobRead2                    => "OCILobRead2"                    : fn(Svcp, Errp, Lobp, *mut u64, *mut u64, u64, Dvoid, u64, u8, Dvoid, Dvoid, u16, u8) -> i32;
    LobTrim2                    => "OCILobTrim2"                    : fn(Svcp, Errp, Lobp, u64) -> i32;
    LobWrite2                   => "OCILobWrite2"                   : fn(Svcp, Errp, Lobp, *mut u64, *mut u64, u64, Dvoid, u64, u8, Dvoid, Dvoid, u16, u8) -> i32;
    MemoryAlloc                 => "OCIMemoryAlloc"                 : fn(Dvoid, Errp, *mut Dvoid, u16, u32, u32) -> i32;
    MemoryFree                  => "OCIMemoryFree"                  : fn(Dvoid, Errp, Dvoid) -> i32;
    NlsCharSetConvert           => "OCINlsCharSetConvert"           : fn(Dvoid, Errp, u16, Dvoid, usize, u16, Cvoid, usize, *mut usize) -> i32;
    NlsCharSetIdToName          => "OCINlsCharSetIdToName"          : fn(Dvoid, *mut u8, usize, u16) -> i32;
    NlsCharSetNameToId          => "OCINlsCharSetNameToId"          : fn(Dvoid, Text) -> u16;
    NlsEnvironmentVariableGet   => "OCINlsEnvironmentVariableGet"   : fn(Dvoid, usize, u16, u16, *mut usize) -> i32;
    NlsNameMap                  => "OCINlsNameMap"                  : fn(Dvoid, *mut u8, usize, Text, u32) -> i32;
    NlsNumericInfoGet           => "OCINlsNumericInfoGet"           : fn(Dvoid, Errp, *mut i32, u16) -> i32;
    NumberFromInt               => "OCINumberFromInt"               : fn(Errp, Cvoid, u32, u32, *mut OCINumber) -> i32;
    NumberFromReal              => "OCINumberFromReal"              : fn(Errp, Cvoid, u32, *mut OCINumber) -> i32;
    NumberToInt                 => "OCINumberToInt"                 : fn(Errp, *const OCINumber, u32, u32, Dvoid) -> i32;
    NumberToReal                => "OCINumberToReal"                : fn(Errp, *const OCINumber, u32, Dvoid) -> i32;
    ObjectCopy                  => "OCIObjectCopy"                  : fn(Envp, Errp, *const OCISvcCtx, Dvoid, Dvoid, Dvoid, Dvoid, Typep, u16, u8) -> i32;
    ObjectFree                  => "OCIObjectFree"                  : fn(Envp, Errp, Dvoid, u16) -> i32;
    ObjectGetAttr               => "OCIObjectGetAttr"               : fn(Envp, Errp, Dvoid, Dvoid, Typep, *const Text, *const u32, u32, *const u32, u32, *mut i16, *mut Dvoid, *mut Dvoid, *mut Typep) -> i32;
    ObjectGetInd                => "OCIObjectGetInd"                : fn(Envp, Errp, Dvoid, *mut Dvoid) -> i32;
    ObjectNew                   => "OCIObjectNew"                   : fn(Envp, Errp, *const OCISvcCtx, u16, Typep, Dvoid, u16, i32, *mut Dvoid) -> i32;
    ObjectPin                   => "OCIObjectPin"                   : fn(Envp, Errp, Dvoid, Dvoid, i32, u16, i32, *mut Dvoid) -> i32;
    ObjectSetAttr               => "OCIObjectSetAttr"               : fn(Envp, Errp, Dvoid, Dvoid, Typep, *const Text, *const u32, u32, *const u32, u32, i16, Cvoid, Cvoid) -> i32;
    ParamGet                    => "OCIParamGet"                    : fn(Cvoid, u32, Errp, *mut Dvoid, u32) -> i32;
    PasswordChange              => "OCIPasswordChange"              : fn(Svcp, Errp, Text, u32, Text, u32, Text, u32, u32) -> i32;
    Ping                        => "OCIPing"                        : fn(Svcp, Errp, u32) -> i32;
    RawAssignBytes              => "OCIRawAssignBytes"              : fn(Envp, Errp, Text, u32, *mut *mut OCIRaw) -> i32;
    RawPtr                      => "OCIRawPtr"                      : fn(Envp, *const OCIRaw) -> *mut u8;
    RawResize                   => "OCIRawResize"                   : fn(Envp, Errp, u32, *mut *mut OCIRaw) -> i32;
    RawSize                     => "OCIRawSize"                     : fn(Envp, *const OCIRaw) -> u32;
    RowidToChar                 => "OCIRowidToChar"                 : fn(*mut OCIRowid, *mut u8, *mut u16, Errp) -> i32;
    ServerAttach                => "OCIServerAttach"                : fn(*mut OCIServer, Errp, Text, i32, u32) -> i32;
    ServerDetach                => "OCIServerDetach"                : fn(*mut OCIServer, Errp, u32) -> i32;
    ServerRelease               => "OCIServerRelease"               : fn(Dvoid, Errp, *mut u8, u32, u8, *mut u32) -> i32;
    ServerRelease2              => "OCIServerRelease2"              : fn(Dvoid, Errp, *mut u8, u32, u8, *mut u32, u32) -> i32;
    SessionBegin                => "OCISessionBegin"                : fn(Svcp, Errp, *mut OCISession, u32, u32) -> i32;
    SessionEnd                  => "OCISessionEnd"                  : fn(Svcp, Errp, *mut OCISession, u32) -> i32;
    SessionGet                  => "OCISessionGet"                  : fn(Envp, Errp, *mut Svcp, *mut OCIAuthInfo, Text, u32, Text, u32, *mut Text, *mut u32, *mut i32, u32) -> i32;
    SessionPoolCreate           => "OCISessionPoolCreate"           : fn(Envp, Errp, *mut OCISPool, *mut Text, *mut u32, Text, u32, u32, u32, u32, Text, u32, Text, u32, u32) -> i32;
    SessionPoolDestroy          => "OCISessionPoolDestroy"          : fn(*mut OCISPool, Errp, u32) -> i32;
    SessionRelease              => "OCISessionRelease"              : fn(Svcp, Errp, Text, u32, u32) -> i32;
    ShardingKeyColumnAdd        => "OCIShardingKeyColumnAdd"        : fn(Dvoid, Errp, Dvoid, u32, u16, u32) -> i32;
    SodaBulkInsert              => "OCISodaBulkInsert"              : fn(Svcp, Dvoid, *mut Dvoid, u32, Dvoid, Errp, u32) -> i32;
    SodaBulkInsertAndGet        => "OCISodaBulkInsertAndGet"        : fn(Svcp, Dvoid, *mut Dvoid, u32, Dvoid, Errp, u32) -> i32;
    SodaBulkInsertAndGetWithOpts => "OCISodaBulkInsertAndGetWithOpts" : fn(Svcp, Dvoid, *mut Dvoid, u32, Dvoid, Dvoid, Errp, u32) -> i32;
    SodaCollCreateWithMetadata  => "OCISodaCollCreateWithMetadata"  : fn(Svcp, Text, u32, Text, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaCollDrop                => "OCISodaCollDrop"                : fn(Svcp, Dvoid, *mut i32, Errp, u32) -> i32;
    SodaCollGetNext             => "OCISodaCollGetNext"             : fn(Svcp, Cvoid, *mut Dvoid, Errp, u32) -> i32;
    SodaCollList                => "OCISodaCollList"                : fn(Svcp, Text, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaCollOpen                => "OCISodaCollOpen"                : fn(Svcp, Text, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaCollTruncate            => "OCISodaCollTruncate"            : fn(Svcp, Dvoid, Errp, u32) -> i32;
    SodaDataGuideGet            => "OCISodaDataGuideGet"            : fn(Svcp, Cvoid, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaDocCount                => "OCISodaDocCount"                : fn(Svcp, Cvoid, Cvoid, *mut u64, Errp, u32) -> i32;
    SodaDocGetNext              => "OCISodaDocGetNext"              : fn(Svcp, Cvoid, *mut Dvoid, Errp, u32) -> i32;
    SodaFind                    => "OCISodaFind"                    : fn(Svcp, Cvoid, Cvoid, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaFindOne                 => "OCISodaFindOne"                 : fn(Svcp, Cvoid, Cvoid, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaIndexCreate             => "OCISodaIndexCreate"             : fn(Svcp, Cvoid, Text, u32, Errp, u32) -> i32;
    SodaIndexDrop               => "OCISodaIndexDrop"               : fn(Svcp, Text, u32, *mut i32, Errp, u32) -> i32;
    SodaIndexList               => "OCISodaIndexList"               : fn(Svcp, Cvoid, u32, *mut Dvoid, Errp, u32) -> i32;
    SodaInsert                  => "OCISodaInsert"                  : fn(Svcp, Dvoid, Dvoid, Errp, u32) -> i32;
    SodaInsertAndGet            => "OCISodaInsertAndGet"            : fn(Svcp, Dvoid, *mut Dvoid, Errp, u32) -> i32;
    SodaInsertAndGetWithOpts    => "OCISodaInsertAndGetWithOpts"    : fn(Svcp, Dvoid, *mut Dvoid, Dvoid, Errp, u32) -> i32;
    SodaOperKeysSet             => "OCISodaOperKeysSet"             : fn(Cvoid, *const Text, *mut u32, u32, Errp, u32) -> i32;
    SodaRemove                  => "OCISodaRemove"                  : fn(Svcp, Cvoid, Cvoid, *mut u64, Errp, u32) -> i32;
    SodaReplOne                 => "OCISodaReplOne"                 : fn(Svcp, Cvoid, Cvoid, Dvoid, *mut i32, Errp, u32) -> i32;
    SodaReplOneAndGet           => "OCISodaReplOneAndGet"           : fn(Svcp, Cvoid, Cvoid, *mut Dvoid, *mut i32, Errp, u32) -> i32;
    SodaSave                    => "OCISodaSave"                    : fn(Svcp, Dvoid, Dvoid, Errp, u32) -> i32;
    SodaSaveAndGet              => "OCISodaSaveAndGet"              : fn(Svcp, Dvoid, *mut Dvoid, Errp, u32) -> i32;
    SodaSaveAndGetWithOpts      => "OCISodaSaveAndGetWithOpts"      : fn(Svcp, Dvoid, *mut Dvoid, Dvoid, Errp, u32) -> i32;
    StmtExecute                 => "OCIStmtExecute"                 : fn(Svcp, Stmtp, Errp, u32, u32, Cvoid, Dvoid, u32) -> i32;
    StmtFetch2                  => "OCIStmtFetch2"                  : fn(Stmtp, Errp, u32, u16, i32, u32) -> i32;
    StmtGetBindInfo             => "OCIStmtGetBindInfo"             : fn(Stmtp, Errp, u32, u32, *mut i32, *mut *mut u8, *mut u8, *mut *mut u8, *mut u8, *mut u8, *mut *mut OCIBind) -> i32;
    StmtGetNextResult           => "OCIStmtGetNextResult"           : fn(Stmtp, Errp, *mut Dvoid, *mut u32, u32) -> i32;
    StmtPrepare2                => "OCIStmtPrepare2"                : fn(Svcp, *mut Stmtp, Errp, Text, u32, Text, u32, u32, u32) -> i32;
    StmtRelease                 => "OCIStmtRelease"                 : fn(Stmtp, Errp, Text, u32, u32) -> i32;
    StringAssignText            => "OCIStringAssignText"            : fn(Envp, Errp, Text, u32, *mut *mut OCIString) -> i32;
    StringPtr                   => "OCIStringPtr"                   : fn(Envp, *const OCIString) -> *mut u8;
    StringResize                => "OCIStringResize"                : fn(Envp, Errp, u32, *mut *mut OCIString) -> i32;
    StringSize                  => "OCIStringSize"                  : fn(Envp, *const OCIString) -> u32;
    SubscriptionRegister        => "OCISubscriptionRegister"        : fn(Svcp, *mut *mut OCISubscription, u16, Errp, u32) -> i32;
    SubscriptionUnRegister      => "OCISubscriptionUnRegister"      : fn(Svcp, *mut OCISubscription, Errp, u32) -> i32;
    TableDelete                 => "OCITableDelete"                 : fn(Envp, Errp, i32, Dvoid) -> i32;
    TableExists                 => "OCITableExists"                 : fn(Envp, Errp, Cvoid, i32, *mut i32) -> i32;
    TableFirst                  => "OCITableFirst"                  : fn(Envp, Errp, Cvoid, *mut i32) -> i32;
    TableLast                   => "OCITableLast"                   : fn(Envp, Errp, Cvoid, *mut i32) -> i32;
    TableNext                   => "OCITableNext"                   : fn(Envp, Errp, i32, Cvoid, *mut i32, *mut i32) -> i32;
    TablePrev                   => "OCITablePrev"                   : fn(Envp, Errp, i32, Cvoid, *mut i32, *mut i32) -> i32;
    TableSize                   => "OCITableSize"                   : fn(Envp, Errp, Cvoid, *mut i32) -> i32;
    ThreadKeyDestroy            => "OCIThreadKeyDestroy"            : fn(Dvoid, Errp, *mut Dvoid) -> i32;
    ThreadKeyGet                => "OCIThreadKeyGet"                : fn(Dvoid, Errp, Dvoid, *mut Dvoid) -> i32;
    ThreadKeyInit               => "OCIThreadKeyInit"               : fn(Dvoid, Errp, *mut Dvoid, Dvoid) -> i32;
    ThreadKeySet                => "OCIThreadKeySet"                : fn(Dvoid, Errp, Dvoid, Dvoid) -> i32;
    ThreadProcessInit           => "OCIThreadProcessInit"           : fn() -> ();
    TransCommit                 => "OCITransCommit"                 : fn(Svcp, Errp, u32) -> i32;
    TransDetach                 => "OCITransDetach"                 : fn(Svcp, Errp, u32) -> i32;
    TransForget                 => "OCITransForget"                 : fn(Svcp, Errp, u32) -> i32;
    TransPrepare                => "OCITransPrepare"                : fn(Svcp, Errp, u32) -> i32;
    TransRollback               => "OCITransRollback"               : fn(Svcp, Errp, u32) -> i32;
    TransStart                  => "OCITransStart"                  : fn(Svcp, Errp, u32, u32) -> i32;
    TypeByFullName              => "OCITypeByFullName"              : fn(Envp, Errp, *const OCISvcCtx, Text, u32, Text, u32, u16, i32, *mut Typep) -> i32;
    TypeByName                  => "OCITypeByName"                  : fn(Envp, Errp, *const OCISvcCtx, Text, u32, Text, u32, Text, u32, u16, i32, *mut Typep) -> i32;
    VectorFromArray             => "OCIVectorFromArray"             : fn(Dvoid, Errp, u8, u32, Dvoid, u32) -> i32;
    VectorFromSparseArray       => "OCIVectorFromSparseArray"       : fn(Dvoid, Errp, u8, u32, u32, Dvoid, Dvoid, u32) -> i32;
    VectorToArray               => "OCIVectorToArray"               : fn(Dvoid, Errp, u8, *mut u32, Dvoid, u32) -> i32;
    VectorToSparseArray         => "OCIVectorToSparseArray"         : fn(Dvoid, Errp, u8, *mut u32, *mut u32, Dvoid, Dvoid, u32) -> i32;
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_prefixed() {
        let mut seen = HashSet::new();
        for entry in Entry::ALL {
            assert!(entry.name().starts_with("OCI"), "{}", entry);
            assert!(seen.insert(entry.name()), "duplicate {}", entry);
        }
        assert_eq!(seen.len(), 165);
    }

    #[test]
    fn indexes_follow_declaration_order() {
        for (i, entry) in Entry::ALL.iter().enumerate() {
            assert_eq!(entry.index(), i);
        }
    }

    #[test]
    fn c_names_are_nul_terminated() {
        let name = Entry::StmtPrepare2.c_name();
        assert_eq!(name, b"OCIStmtPrepare2\0");
        assert_eq!(<ep::Ping as EntryPoint>::ENTRY, Entry::Ping);
    }
}
