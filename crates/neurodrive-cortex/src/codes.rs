//! Numeric codes reported by the Cortex service.

/// JSON-RPC error: the profile is owned by another application or user.
pub const ERR_PROFILE_ACCESS_DENIED: i64 = -32046;

// Warning codes (`{"warning": {"code": .., "message": ..}}`)
pub const CORTEX_STOP_ALL_STREAMS: i64 = 0;
pub const CORTEX_CLOSE_SESSION: i64 = 1;
pub const USER_LOGIN: i64 = 2;
pub const USER_LOGOUT: i64 = 3;
pub const ACCESS_RIGHT_GRANTED: i64 = 9;
pub const ACCESS_RIGHT_REJECTED: i64 = 10;
pub const PROFILE_LOADED: i64 = 13;
pub const PROFILE_UNLOADED: i64 = 14;
pub const CORTEX_AUTO_UNLOAD_PROFILE: i64 = 15;
pub const HEADSET_CANNOT_CONNECT_TIMEOUT: i64 = 102;
pub const HEADSET_DISCONNECTED_TIMEOUT: i64 = 103;
pub const HEADSET_CONNECTED: i64 = 104;
pub const HEADSET_SCANNING_FINISHED: i64 = 142;
