use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#00BFFF")).unwrap();
    assert_eq!(c, Rgba8::rgb(0, 191, 255));

    let c: Rgba8 = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert_eq!(c.b, 255);
    assert_eq!(c.a, 128);
}

#[test]
fn parses_names_and_transparent() {
    assert_eq!("red".parse::<Rgba8>().unwrap(), Rgba8::rgb(255, 0, 0));
    assert_eq!("Black".parse::<Rgba8>().unwrap(), Rgba8::rgb(0, 0, 0));
    assert!("transparent".parse::<Rgba8>().unwrap().is_transparent());
}

#[test]
fn parses_arrays() {
    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3])).unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c.a, 4);
    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn rejects_garbage() {
    assert!("#12345".parse::<Rgba8>().is_err());
    assert!("#GG0000".parse::<Rgba8>().is_err());
    assert!("not-a-color".parse::<Rgba8>().is_err());
}

#[test]
fn serializes_as_hex_string() {
    let v = serde_json::to_value(Rgba8::rgb(255, 215, 0)).unwrap();
    assert_eq!(v, json!("#FFD700FF"));
    assert_eq!(Rgba8::rgb(255, 215, 0).to_ffmpeg(), "0xFFD700FF");
}
