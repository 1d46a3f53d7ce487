//! Defines functions for handling the session cookie.
//!
//! The session is a single private (signed + encrypted) cookie whose value
//! is its own expiry date-time. A request is authenticated when the cookie
//! is present, decrypts, parses, and has not expired.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::Error;

/// The name of the session cookie.
pub const COOKIE_SESSION: &str = "session";
/// How long a session lasts after logging in. The expiry is fixed at login
/// time; it is not extended on access.
pub const SESSION_DURATION: Duration = Duration::days(7);

/// Date time format for the session expiry, e.g. "2021-01-01 00:00:00.000000 +00:00:00".
const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond] [offset_hour \
         sign:mandatory]:[offset_minute]:[offset_second]"
);

/// Add a session cookie to the cookie jar, indicating a successful login.
///
/// Sets the expiry of the session to `duration` from the current time.
/// Use [SESSION_DURATION] for the default duration.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns a [time::error::Format] if the expiry time cannot be formatted.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, time::error::Format> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string to avoid errors at midnight when the hour is printed as
    // a single digit when [DATE_TIME_FORMAT] expects two digits.
    let expiry_string = expiry.format(DATE_TIME_FORMAT)?;

    Ok(jar.add(
        Cookie::build((COOKIE_SESSION, expiry_string))
            .expires(expiry)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero,
/// which should delete the cookie on the client side.
pub fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_SESSION, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Check that `jar` holds a live session.
///
/// # Errors
///
/// Returns:
/// - [Error::SessionMissing] if there is no session cookie in the jar.
/// - [Error::InvalidSessionCookie] if the cookie value does not parse as a
///   date-time.
/// - [Error::SessionExpired] if the session's expiry has passed.
pub fn verify_session(jar: &PrivateCookieJar) -> Result<(), Error> {
    let cookie = jar.get(COOKIE_SESSION).ok_or(Error::SessionMissing)?;

    let expiry = OffsetDateTime::parse(cookie.value_trimmed(), DATE_TIME_FORMAT)
        .map_err(|_| Error::InvalidSessionCookie)?;

    if expiry <= OffsetDateTime::now_utc() {
        return Err(Error::SessionExpired);
    }

    Ok(())
}

#[cfg(test)]
mod cookie_tests {
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::Error;

    use super::{
        COOKIE_SESSION, SESSION_DURATION, invalidate_session_cookie, set_session_cookie,
        verify_session,
    };

    fn get_jar() -> PrivateCookieJar {
        let hash = Sha512::digest(b"foobar");
        let key = Key::from(&hash);

        PrivateCookieJar::new(key)
    }

    #[test]
    fn set_session_cookie_creates_a_live_session() {
        let jar = set_session_cookie(get_jar(), SESSION_DURATION).unwrap();

        assert_eq!(verify_session(&jar), Ok(()));
    }

    #[test]
    fn session_cookie_expires_seven_days_from_login() {
        let jar = set_session_cookie(get_jar(), SESSION_DURATION).unwrap();
        let cookie = jar.get(COOKIE_SESSION).unwrap();

        let want = OffsetDateTime::now_utc() + Duration::days(7);
        let got = cookie.expires_datetime().unwrap();

        assert!(
            (got - want).abs() < Duration::seconds(1),
            "got expiry {got:?}, want {want:?}"
        );
    }

    #[test]
    fn verify_session_fails_on_empty_jar() {
        assert_eq!(verify_session(&get_jar()), Err(Error::SessionMissing));
    }

    #[test]
    fn verify_session_fails_on_garbage_cookie_value() {
        let jar = get_jar().add(Cookie::build((COOKIE_SESSION, "not a date")).build());

        assert_eq!(verify_session(&jar), Err(Error::InvalidSessionCookie));
    }

    #[test]
    fn verify_session_fails_once_expired() {
        let jar = set_session_cookie(get_jar(), Duration::seconds(-1)).unwrap();

        assert_eq!(verify_session(&jar), Err(Error::SessionExpired));
    }

    #[test]
    fn invalidate_session_cookie_ends_the_session() {
        let jar = set_session_cookie(get_jar(), SESSION_DURATION).unwrap();

        let jar = invalidate_session_cookie(jar);
        let cookie = jar.get(COOKIE_SESSION).unwrap();

        assert_eq!(cookie.value(), "deleted");
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(verify_session(&jar), Err(Error::InvalidSessionCookie));
    }
}
