use gbapp::error::ErrorKind;
use gbapp::event::{CloseFlag, Disposition, HostMessage, WindowRegistry};
use gbapp::lifecycle::{Lifecycle, WindowState};

#[test]
fn close_flag_never_reverts() {
    let flag = CloseFlag::new();
    assert!(!flag.is_requested());

    flag.request();
    flag.request();
    assert!(flag.is_requested());
}

#[test]
fn paint_and_unknown_messages_leave_the_flag_alone() {
    let mut registry = WindowRegistry::new();
    let flag = registry.register(0x1234isize);

    for message in [HostMessage::Paint, HostMessage::Other(0x0200), HostMessage::Other(0x000F)] {
        registry.dispatch(0x1234, message);
    }

    assert!(!flag.is_requested());
    assert!(registry.is_registered(0x1234));
    assert_eq!(registry.len(), 1);
}

#[test]
fn messages_during_creation_take_the_default_path() {
    let mut registry = WindowRegistry::new();

    // The OS sends messages before the handle is known to the registry.
    assert_eq!(registry.dispatch(0x10isize, HostMessage::Other(0x0081)), Disposition::Default);
    assert_eq!(registry.dispatch(0x10, HostMessage::CloseRequested), Disposition::Default);

    let flag = registry.register(0x10);
    assert!(!flag.is_requested());
}

#[test]
fn close_request_is_sticky_across_polls() {
    let mut registry = WindowRegistry::new();
    let flag = registry.register(0x20isize);

    assert_eq!(registry.dispatch(0x20, HostMessage::CloseRequested), Disposition::Consumed);
    assert_eq!(registry.dispatch(0x20, HostMessage::Paint), Disposition::AcknowledgePaint);
    assert_eq!(registry.dispatch(0x20, HostMessage::Other(0x0100)), Disposition::Default);
    assert!(flag.is_requested());
}

#[test]
fn reused_handle_starts_fresh() {
    let mut registry = WindowRegistry::new();
    let old = registry.register(0x30isize);
    registry.dispatch(0x30, HostMessage::CloseRequested);
    assert!(registry.unregister(0x30));

    let new = registry.register(0x30);
    assert!(old.is_requested());
    assert!(!new.is_requested());
}

#[test]
fn window_lifecycle_with_close_flag() {
    let flag = CloseFlag::new();
    let mut lifecycle = Lifecycle::new();
    assert_eq!(lifecycle.state(flag.is_requested()), WindowState::Created);

    lifecycle.show().unwrap();
    assert_eq!(lifecycle.state(flag.is_requested()), WindowState::Shown);

    // Showing again keeps the window shown.
    lifecycle.show().unwrap();
    assert_eq!(lifecycle.state(flag.is_requested()), WindowState::Shown);

    flag.request();
    assert_eq!(lifecycle.state(flag.is_requested()), WindowState::Closing);

    assert!(lifecycle.destroy());
    assert!(!lifecycle.destroy());
    assert_eq!(lifecycle.state(flag.is_requested()), WindowState::Destroyed);
    assert_eq!(lifecycle.check_alive().unwrap_err().error_kind(), ErrorKind::InvalidArgs);
}
