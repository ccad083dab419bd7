use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(parse_css_color("#ff0000"), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(parse_css_color("#0000ff80"), Some(Rgba8::new(0, 0, 255, 128)));
    assert_eq!(parse_css_color("#ccc"), Some(Rgba8::new(204, 204, 204, 255)));
    assert_eq!(parse_css_color("#0fa"), Some(Rgba8::new(0, 255, 170, 255)));
    assert_eq!(parse_css_color("#12345"), None);
}

#[test]
fn parses_rgba_function_with_spaces() {
    assert_eq!(
        parse_css_color("rgba(56, 189, 248, 0.5)"),
        Some(Rgba8::new(56, 189, 248, 128))
    );
    assert_eq!(
        parse_css_color("rgb(0,0,0)"),
        Some(Rgba8::new(0, 0, 0, 255))
    );
    assert_eq!(
        parse_css_color("rgba(0,0,0,0)"),
        Some(Rgba8::TRANSPARENT)
    );
}

#[test]
fn parses_hsl_pure_red() {
    assert_eq!(
        parse_css_color("hsl(0, 100%, 50%)"),
        Some(Rgba8::new(255, 0, 0, 255))
    );
    assert_eq!(
        parse_css_color("hsl(360, 100%, 50%)"),
        Some(Rgba8::new(255, 0, 0, 255))
    );
}

#[test]
fn keywords_and_garbage() {
    assert_eq!(parse_css_color("transparent"), Some(Rgba8::TRANSPARENT));
    assert_eq!(parse_css_color(" White "), Some(Rgba8::WHITE));
    assert_eq!(parse_css_color("chartreuse-ish"), None);
    assert_eq!(parse_css_color("rgb(1,2)"), None);
    assert_eq!(parse_css_color("hsl(10, 80%, 65%)cc"), None);
}
