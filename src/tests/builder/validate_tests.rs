use crate::builder::validate::{is_email, is_phone, sha1_hex};

#[test]
fn email_shapes() {
    assert!(is_email("a@x.io"));
    assert!(is_email("first.last+tag@sub.example.com"));
    assert!(!is_email("a@x"));
    assert!(!is_email("@x.io"));
    assert!(!is_email("a@@x.io"));
    assert!(!is_email("a b@x.io"));
    assert!(!is_email("a@.io"));
}

#[test]
fn phones_need_a_leading_plus() {
    assert!(is_phone("+15551234567"));
    assert!(is_phone("+44 (20) 7946-0958"));
    assert!(!is_phone("0123456"));
    assert!(!is_phone("+"));
    assert!(!is_phone("+1 555 CALL"));
}

#[test]
fn sha1_hex_matches_known_digests() {
    assert_eq!(sha1_hex("p"), "516b9783fca517eecbd1d064da2d165310b19759");
    assert_eq!(sha1_hex("q"), "22ea1c649c82946aa6e479e1ffd321e4a318b1b0");
    assert_eq!(sha1_hex(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
}
