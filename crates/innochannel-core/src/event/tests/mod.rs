#[cfg(test)]
mod types_tests;

#[cfg(test)]
mod tests {
    use crate::event::{IntoListenerResult, ListenerOutcome, PRIORITY_HIGH, PRIORITY_LOW, PRIORITY_NORMAL};
    use crate::event::error::ListenerError;

    #[test]
    fn test_priority_constants_are_ordered() {
        assert!(PRIORITY_HIGH > PRIORITY_NORMAL);
        assert!(PRIORITY_NORMAL > PRIORITY_LOW);
        assert_eq!(PRIORITY_NORMAL, 0);
    }

    #[test]
    fn test_listener_return_conversions() {
        assert_eq!(().into_listener_result().unwrap(), ListenerOutcome::Continue);
        assert_eq!(true.into_listener_result().unwrap(), ListenerOutcome::Continue);
        assert_eq!(false.into_listener_result().unwrap(), ListenerOutcome::Stop);
        assert_eq!(None::<bool>.into_listener_result().unwrap(), ListenerOutcome::Continue);
        assert_eq!(Some(false).into_listener_result().unwrap(), ListenerOutcome::Stop);

        let ok: Result<bool, String> = Ok(false);
        assert_eq!(ok.into_listener_result().unwrap(), ListenerOutcome::Stop);

        let err: Result<(), String> = Err("boom".to_string());
        assert!(matches!(err.into_listener_result(), Err(ListenerError::Failed(reason)) if reason == "boom"));
    }
}
