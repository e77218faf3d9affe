//! Classify curl errors into request error kinds.

use crate::error::RequestError;

/// Map a libcurl error for `url` to a [`RequestError`].
pub(crate) fn classify_curl_error(url: &str, e: &curl::Error) -> RequestError {
    let url = url.to_string();
    if e.is_operation_timedout() {
        return RequestError::Timeout { url };
    }
    let message = e.to_string();
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return RequestError::Connection { url, message };
    }
    RequestError::Other { url, message }
}
