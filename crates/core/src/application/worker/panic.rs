// Panic isolation for worker safety
use std::any::Any;

/// Extract a readable message from a panic payload
///
/// Jobs run in their own spawned task; when one panics the payload comes back
/// through the JoinError and is turned into a failed result instead of a lost one.
pub fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
