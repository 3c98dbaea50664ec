use std::time::Instant;

/// Run `f` once and return how long it took, in seconds
///
/// The value produced by `f` is dropped. If `f` fails, its error is returned
/// and no duration is measured.
///
/// # Example
///
/// ```
/// use vqa_hub::timing::measure_duration;
///
/// let add = |a: i32, b: i32, key: i32| a + b + key;
/// let secs = measure_duration(|| Ok::<_, std::convert::Infallible>(add(1, 2, 3))).unwrap();
/// assert!(secs >= 0.0);
/// ```
pub fn measure_duration<F, T, E>(f: F) -> Result<f64, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let start = Instant::now();
    f()?;
    let elapsed = start.elapsed().as_secs_f64();
    tracing::debug!("Call took {elapsed:.4}s");
    Ok(elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Duration;

    #[test]
    fn test_calls_once_with_arguments() {
        let calls = RefCell::new(Vec::new());
        let f = |a: i32, b: i32, key: i32| {
            calls.borrow_mut().push((a, b, key));
            Ok::<_, String>(a + b + key)
        };

        let secs = measure_duration(|| f(1, 2, 3)).unwrap();
        assert!(secs >= 0.0);
        assert_eq!(*calls.borrow(), vec![(1, 2, 3)]);
    }

    #[test]
    fn test_propagates_error() {
        let mut calls = 0;
        let result = measure_duration(|| {
            calls += 1;
            Err::<(), _>("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_measures_sleep() {
        let secs = measure_duration(|| {
            std::thread::sleep(Duration::from_millis(20));
            Ok::<_, ()>(())
        })
        .unwrap();
        assert!(secs >= 0.02, "{secs}");
    }
}
