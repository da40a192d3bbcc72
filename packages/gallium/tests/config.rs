#![cfg(feature = "toml")]

use std::time::Duration;

use pistonite_ga as ga;

use ga::{Color, CounterConfig};

mod common;
use common::{FakeManager, ms};

#[test]
fn test_parse() {
    let config = CounterConfig::from_toml(
        r#"
bar_format = "{bar}"
counter_format = "{count}"
series = " =#"
fill = "."
unit = "files"
color = [255, 0, 0]
min_delta = 0.5
leave = false
"#,
    )
    .unwrap();
    assert_eq!(config.bar_format.as_deref(), Some("{bar}"));
    assert_eq!(config.fill, Some('.'));
    assert_eq!(config.color, Some(Color::Rgb(255, 0, 0)));
    assert_eq!(config.min_delta(), Some(Duration::from_millis(500)));
    assert_eq!(config.leave, Some(false));

    let config = CounterConfig::from_toml("color = 208").unwrap();
    assert_eq!(config.color, Some(Color::Ansi256(208)));
    let config = CounterConfig::from_toml("").unwrap();
    assert_eq!(config, CounterConfig::default());
}

#[test]
fn test_invalid() {
    let error = CounterConfig::from_toml("colour = \"red\"").unwrap_err();
    assert!(matches!(error, ga::Error::InvalidConfig(_)));
    let error = CounterConfig::from_toml("fill = \"ab\"").unwrap_err();
    assert!(matches!(error, ga::Error::InvalidConfig(_)));
    // negative durations are ignored
    let config = CounterConfig::from_toml("min_delta = -1.0").unwrap();
    assert_eq!(config.min_delta(), None);
}

#[test]
fn test_apply() {
    let config = CounterConfig::from_toml(
        r#"
bar_format = "{bar}"
series = " =#"
"#,
    )
    .unwrap();
    let manager = FakeManager::new(10);
    let mut counter = ga::counter("Config")
        .total(10)
        .config(&config)
        .spawn(manager.clone())
        .unwrap();
    counter.update(5).unwrap();
    assert_eq!(counter.render(None, ms(1_000)).unwrap(), "#####     ");

    // invalid options are reported when spawning
    let config = CounterConfig::from_toml("color = \"seagreen\"").unwrap();
    let result = ga::counter("Config").config(&config).spawn(manager.clone());
    assert!(matches!(result, Err(ga::Error::InvalidConfig(_))));
}
