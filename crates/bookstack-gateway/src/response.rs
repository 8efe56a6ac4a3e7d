//! Success response envelope.
//!
//! Every success body carries `{"status": "Success", "data": ...}` so
//! clients can branch on the `status` discriminator alone.

use serde::Serialize;

/// Success envelope wrapping a response payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// Always `"Success"` for this type.
    pub status: &'static str,
    /// The operation's payload.
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a payload in the success envelope.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self {
            status: "Success",
            data,
        }
    }
}
