use super::*;

#[test]
fn resolution_parses_width_x_height() {
    let r: Resolution = "1280x720".parse().unwrap();
    assert_eq!(r, Resolution::new(1280, 720).unwrap());
    assert_eq!(r.to_string(), "1280x720");

    let r: Resolution = " 640X360 ".parse().unwrap();
    assert_eq!((r.width, r.height), (640, 360));
}

#[test]
fn resolution_rejects_malformed_and_odd_values() {
    assert!("1920".parse::<Resolution>().is_err());
    assert!("axb".parse::<Resolution>().is_err());
    assert!("0x1080".parse::<Resolution>().is_err());
    assert!("1921x1080".parse::<Resolution>().is_err());
}

#[test]
fn resolution_default_is_full_hd() {
    assert_eq!(Resolution::default().to_string(), "1920x1080");
}

#[test]
fn rgb_formats_as_ffmpeg_hex() {
    assert_eq!(Rgb::CARD_BACKGROUND.to_ffmpeg(), "0x1e293b");
    assert_eq!(Rgb::LIGHT_GRAY.to_ffmpeg(), "0xcccccc");
}

#[test]
fn truncate_chars_respects_char_boundaries() {
    assert_eq!(truncate_chars("héllo", 2), "hé");
    assert_eq!(truncate_chars("short", 10), "short");
    assert_eq!(truncate_chars("", 3), "");
    assert_eq!(truncate_chars("abc", 0), "");
}
