use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Wraps a future to catch panics and convert them to errors.
///
/// Spawned background tasks report a panic as `Err(message)` instead of
/// silently disappearing inside the runtime.
///
/// # Example
///
/// ```ignore
/// tokio::spawn(async move {
///     match catch_task_panic(async { do_work().await }).await {
///         Ok(result) => handle_result(result),
///         Err(panic_msg) => {
///             let _ = tx.send(AppEvent::TaskPanicked { task: "work", error: panic_msg }).await;
///         }
///     }
/// });
/// ```
pub async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ok_future_passes_through() {
        let result = catch_task_panic(async { 41 + 1 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_str_panic_is_captured() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom"); }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_formatted_panic_is_captured() {
        let code = 7;
        let result: Result<(), String> =
            catch_task_panic(async move { panic!("failed with {}", code); }).await;
        assert_eq!(result, Err("failed with 7".to_string()));
    }
}
