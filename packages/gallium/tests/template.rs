use pistonite_ga as ga;

use ga::{FieldMap, Template, Value};

fn render(template: &str, value: impl Into<Value>) -> ga::Result<String> {
    let mut fields = FieldMap::new();
    fields.insert("x".to_string(), value.into());
    fields.insert("w".to_string(), Value::Int(6));
    Template::parse(template)?.render(&fields)
}

#[test]
fn test_numbers() {
    assert_eq!(render("{x}", 42).unwrap(), "42");
    assert_eq!(render("{x:>5}", 42).unwrap(), "   42");
    assert_eq!(render("{x:5d}", -42).unwrap(), "  -42");
    assert_eq!(render("{x:05d}", -42).unwrap(), "-0042");
    assert_eq!(render("{x:<5d}|", 42).unwrap(), "42   |");
    assert_eq!(render("{x:+d}", 5).unwrap(), "+5");
    assert_eq!(render("{x: d}", 5).unwrap(), " 5");
    assert_eq!(render("{x:,}", 1234567).unwrap(), "1,234,567");
    assert_eq!(render("{x:_d}", -1234).unwrap(), "-1_234");
    assert_eq!(render("{x:{w}d}", 7).unwrap(), "     7");
}

#[test]
fn test_floats() {
    assert_eq!(render("{x}", 2.0).unwrap(), "2.0");
    assert_eq!(render("{x}", 0.25).unwrap(), "0.25");
    assert_eq!(render("{x:.2f}", 3.14159).unwrap(), "3.14");
    assert_eq!(render("{x:f}", 1.5).unwrap(), "1.500000");
    assert_eq!(render("{x:3.0f}", 22.77).unwrap(), " 23");
    assert_eq!(render("{x:.1%}", 0.256).unwrap(), "25.6%");
    assert_eq!(render("{x:08.2f}", -3.5).unwrap(), "-0003.50");
    assert_eq!(render("{x:,.1f}", 12345.67).unwrap(), "12,345.7");
    assert_eq!(render("{x:.1}", 2.26).unwrap(), "2.3");
    // integers can be formatted as floats
    assert_eq!(render("{x:.1f}", 3).unwrap(), "3.0");
}

#[test]
fn test_strings() {
    assert_eq!(render("{x}", "abc").unwrap(), "abc");
    assert_eq!(render("{x:6}|", "ab").unwrap(), "ab    |");
    assert_eq!(render("{x:>6}", "ab").unwrap(), "    ab");
    assert_eq!(render("{x:^7}", "abc").unwrap(), "  abc  ");
    assert_eq!(render("{x:*^8}", "abc").unwrap(), "**abc***");
    assert_eq!(render("{x:.2}", "hello").unwrap(), "he");
    assert_eq!(render("{x:s}", "hello").unwrap(), "hello");
    // width is measured in columns
    assert_eq!(render("{x:4}|", "中").unwrap(), "中  |");
    assert_eq!(render("{x}|", Value::None).unwrap(), "|");
    assert_eq!(render("{x:3}|", Value::None).unwrap(), "   |");
}

#[test]
fn test_unsupported_spec() {
    let error = render("{x:d}", 1.5).unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:.2d}", 1).unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:d}", "abc").unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:+}", "abc").unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:q}", 1).unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:.f}", 1).unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
    let error = render("{x:d}", Value::None).unwrap_err();
    assert!(matches!(error, ga::Error::Template(_)));
}

#[test]
fn test_syntax() {
    assert_eq!(render("{{x}} {x}", 1).unwrap(), "{x} 1");
    assert_eq!(render("{{{x:{w}d}}}", 7).unwrap(), "{     7}");
    for bad in ["{x", "x}", "{}", "{x!r}", "{x:{w:d}}", "{x:{w}"] {
        let error = Template::parse(bad).unwrap_err();
        assert!(matches!(error, ga::Error::Template(_)), "{bad}");
    }
}

#[test]
fn test_missing_fields() {
    let error = render("{y}", 1).unwrap_err();
    assert!(matches!(error, ga::Error::MissingField(name) if name == "y"));
    // nested field in the spec
    let error = render("{x:{y}d}", 1).unwrap_err();
    assert!(matches!(error, ga::Error::MissingField(name) if name == "y"));
}

#[test]
fn test_from_str() {
    let template: Template = "{bar}|{desc}|{bar}".parse().unwrap();
    assert_eq!(template.as_str(), "{bar}|{desc}|{bar}");
    let rendered = template.render_split(&FieldMap::new(), "desc");
    assert!(matches!(rendered, Err(ga::Error::MissingField(name)) if name == "bar"));
}

#[test]
fn test_render_split() {
    let template = Template::parse("[{bar:>9}] {desc} ({bar})").unwrap();
    let mut fields = FieldMap::new();
    fields.insert("desc".to_string(), "copy".into());
    let rendered = template.render_split(&fields, "bar").unwrap();
    assert_eq!(rendered.split_points(), 2);
    assert_eq!(rendered.text(), "[] copy ()");
    let joined = rendered.join_with(|i| format!("#{i}"));
    assert_eq!(joined, "[#0] copy (#1)");
}
