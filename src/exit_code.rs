use crate::error::CookieError;

/// Exit status when a looked-up cookie does not exist
pub const NOT_FOUND: i32 = 1;

pub fn exit_code_for_error(err: &CookieError) -> i32 {
    match err {
        CookieError::Config(_) | CookieError::InvalidDate(_) => 2,
        CookieError::Unavailable => 4,
        CookieError::Io(_) => 23,
        CookieError::Json(_) => 26,
        CookieError::FileNotFound(_) => 37,
    }
}
