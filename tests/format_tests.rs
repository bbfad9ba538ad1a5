mod common;

use logtree::Level;

#[test]
fn unknown_placeholders_are_escaped() {
    let (registry, _) = common::registry();
    let logger = registry.get_logger("fmt").unwrap();

    logger.set_format("{user}{msg}");
    assert_eq!(logger.format(), "{open}user{close}{msg}");
}

#[test]
fn time_format_without_group_is_wrapped() {
    let (registry, _) = common::registry();
    let logger = registry.get_logger("fmt").unwrap();

    logger.set_format_time("%H:%M");
    assert_eq!(logger.format_time(), "{:%H:%M}");

    logger.set_format_time("}{ {:%Y} {");
    assert_eq!(logger.format_time(), " {:%Y} ");
}

#[test]
fn literal_braces_reach_the_output() {
    let (registry, capture) = common::registry();
    let logger = registry.get_logger("svc").unwrap();
    logger.set_format("{{level}} {json: {msg}}");

    logger.error("x");
    assert_eq!(capture.lines(), vec!["{ERROR} {json: x}".to_string()]);
}

#[test]
fn message_braces_are_not_substituted() {
    let (registry, capture) = common::registry();
    let logger = registry.get_logger("svc").unwrap();
    logger.set_format("{msg}");

    logger.warning("{name} {time}");
    assert_eq!(capture.lines(), vec!["{name} {time}".to_string()]);
}

#[test]
fn default_template_renders_every_field() {
    let (registry, capture) = common::registry();
    let logger = registry.get_logger("app/db").unwrap();
    logger.set_level(Level::Debug).unwrap();

    logger.debug("ready");
    assert_eq!(
        capture.lines(),
        vec!["[01-07-2022 09:30:00] [DEBUG] [app/db]: ready\n".to_string()]
    );
}

#[test]
fn time_template_text_around_group() {
    let (registry, capture) = common::registry();
    let logger = registry.get_logger("t").unwrap();
    logger.set_format("{time}|{msg}");
    logger.set_format_time("day {:%d} at %H");

    logger.critical("m");
    assert_eq!(capture.lines(), vec!["day 01 at %H|m".to_string()]);
}
