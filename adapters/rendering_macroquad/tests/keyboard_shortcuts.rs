use macroquad::input::KeyCode;
use tiger_run_core::Direction;
use tiger_run_rendering_macroquad::KeyboardShortcuts;

fn pressing(keys: &[KeyCode]) -> KeyboardShortcuts {
    KeyboardShortcuts::from_pressed(|key| keys.contains(&key))
}

#[test]
fn arrow_keys_and_wasd_map_to_directions() {
    assert_eq!(pressing(&[KeyCode::Up]).direction, Some(Direction::Up));
    assert_eq!(pressing(&[KeyCode::S]).direction, Some(Direction::Down));
    assert_eq!(pressing(&[KeyCode::A]).direction, Some(Direction::Left));
    assert_eq!(pressing(&[KeyCode::Right]).direction, Some(Direction::Right));
}

#[test]
fn simultaneous_directions_resolve_in_stable_order() {
    let shortcuts = pressing(&[KeyCode::Right, KeyCode::Down]);
    assert_eq!(shortcuts.direction, Some(Direction::Down));
}

#[test]
fn idle_keyboard_requests_nothing() {
    assert_eq!(pressing(&[]), KeyboardShortcuts::default());
}

#[test]
fn enter_starts_and_escape_quits() {
    let shortcuts = pressing(&[KeyCode::Enter, KeyCode::Escape]);
    assert!(shortcuts.start_requested);
    assert!(shortcuts.quit_requested);
    assert_eq!(shortcuts.direction, None);
}
