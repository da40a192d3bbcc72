use pistonite_ga as ga;

use ga::term::ansi;
use ga::{AnsiTerminal, Color, GlyphSupport, Series, Terminal};

#[test]
fn test_series_validation() {
    assert!(Series::new(" #").is_ok());
    assert!(matches!(Series::new("#"), Err(ga::Error::InvalidConfig(_))));
    assert!(matches!(Series::new(""), Err(ga::Error::InvalidConfig(_))));
    // wide glyph
    assert!(matches!(Series::new(" 中"), Err(ga::Error::InvalidConfig(_))));

    let series = Series::new(Series::STD).unwrap();
    assert_eq!(series.len(), 9);
    assert_eq!(series.empty(), ' ');
    assert_eq!(series.full(), '█');
    assert_eq!(series.glyph(4), '▌');
    assert_eq!(series.glyph(100), '█');
    assert_eq!(series.to_string(), Series::STD);
}

#[test]
fn test_series_resolve() {
    let full = AnsiTerminal::new(false, GlyphSupport::Full);
    let block = AnsiTerminal::new(false, GlyphSupport::Block);
    let ascii = AnsiTerminal::new(false, GlyphSupport::Ascii);

    assert_eq!(Series::resolve(&full, None).to_string(), Series::STD);
    assert_eq!(Series::resolve(&block, None).to_string(), Series::BLOCK);
    assert_eq!(Series::resolve(&ascii, None).to_string(), Series::ASCII);

    let user = Series::new(" ▌█").unwrap();
    assert_eq!(Series::resolve(&full, Some(user.clone())), user);
    assert_eq!(Series::resolve(&ascii, Some(user)).to_string(), Series::ASCII);
    let user = Series::new(" =#").unwrap();
    assert_eq!(Series::resolve(&ascii, Some(user.clone())), user);
}

#[test]
fn test_colorize() {
    let term = AnsiTerminal::new(true, GlyphSupport::Full).with_width(33);
    assert_eq!(term.width(), 33);
    let red = term.colorize("██", &Color::from("red"));
    assert_eq!(red, "\x1b[31m██\x1b[0m");
    assert_eq!(term.visible_len(&red), 2);
    assert_eq!(term.colorize("", &Color::from("red")), "");
    assert_eq!(term.colorize("x", &Color::from(208u8)), "\x1b[38;5;208mx\x1b[0m");

    let term = AnsiTerminal::new(false, GlyphSupport::Full);
    assert_eq!(term.colorize("██", &Color::from("red")), "██");
}

#[test]
fn test_color_names() {
    assert_eq!(Color::from("bright_green").sgr().unwrap(), "92");
    assert_eq!(Color::from("underline_cyan_on_black").sgr().unwrap(), "4;36;40");
    for bad in ["", "bright", "on_", "bright_bold", "on_on_red", "purple"] {
        assert!(Color::from(bad).validate().is_err(), "{bad}");
    }
}

#[test]
fn test_visible_width() {
    assert_eq!(ansi::visible_width("abc"), 3);
    assert_eq!(ansi::visible_width("\x1b[1;31mabc\x1b[0m"), 3);
    assert_eq!(ansi::visible_width("中文"), 4);
    assert_eq!(ansi::visible_width("▏▎█"), 3);
}
