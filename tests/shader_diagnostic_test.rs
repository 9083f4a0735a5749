use spin_demos::resources::shader::{MAX_DIAGNOSTIC_LEN, Stage, bounded, collect_diagnostic};

#[test]
fn short_messages_are_kept() {
    assert_eq!(bounded("2:5: expected ';'"), "2:5: expected ';'");
}

#[test]
fn long_messages_are_cut_to_the_bound() {
    let message = "x".repeat(MAX_DIAGNOSTIC_LEN * 3);
    let cut = bounded(&message);
    assert_eq!(cut.len(), MAX_DIAGNOSTIC_LEN);
    assert_eq!(MAX_DIAGNOSTIC_LEN, 512);
}

#[test]
fn cut_respects_char_boundaries() {
    // 'é' is two bytes, so byte 512 falls inside a character.
    let message = format!("a{}", "é".repeat(400));
    let cut = bounded(&message);
    assert!(cut.len() <= MAX_DIAGNOSTIC_LEN);
    assert_eq!(cut.len(), 511);
    assert!(message.starts_with(&cut));
}

#[test]
fn compiler_messages_are_joined() {
    let diagnostic = collect_diagnostic(["1:1: first", "  ", "3:4: second "], None);
    assert_eq!(diagnostic.as_deref(), Some("1:1: first\n3:4: second"));
}

#[test]
fn scope_error_is_a_fallback() {
    let none: [&str; 0] = [];
    assert_eq!(collect_diagnostic(none, None), None);
    assert_eq!(
        collect_diagnostic(none, Some(" Validation Error ".to_string())).as_deref(),
        Some("Validation Error")
    );
    assert_eq!(
        collect_diagnostic(["1:1: parse"], Some("Validation Error".to_string())).as_deref(),
        Some("1:1: parse")
    );
}

#[test]
fn joined_diagnostic_is_bounded() {
    let lines: Vec<String> = (0..100).map(|i| format!("{}:1: unexpected token", i)).collect();
    let diagnostic = collect_diagnostic(&lines, None).expect("messages were given");
    assert!(diagnostic.len() <= MAX_DIAGNOSTIC_LEN);
}

#[test]
fn stages_have_distinct_entry_points() {
    assert_eq!(Stage::Vertex.entry_point(), "vs_main");
    assert_eq!(Stage::Fragment.entry_point(), "fs_main");
}
