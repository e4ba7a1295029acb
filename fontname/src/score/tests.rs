use super::*;
use crate::{
    charset::Framing,
    record::{mac_language, name_id},
};
use hex_literal::hex;
use test_case::test_case;
use test_log::test;

fn record(platform: u16, encoding: u16, language: u16, raw: &[u8]) -> NameRecord<'_> {
    NameRecord::new(platform, encoding, language, name_id::FAMILY, raw)
}

fn result(text: &str, issue: IssueLevel, encoding: Option<Charset>) -> DecodeResult {
    DecodeResult {
        text: text.to_owned(),
        issue,
        encoding,
    }
}

#[test]
fn issue_level_order() {
    assert!(IssueLevel::Clean < IssueLevel::Mark);
    assert!(IssueLevel::Mark < IssueLevel::Data);
    assert!(IssueLevel::Data < IssueLevel::Fail);
}

#[test_case(0, 3, 0; "unicode platform")]
#[test_case(3, 1, 0x409; "windows bmp")]
#[test_case(3, 10, 0x409; "windows full repertoire")]
fn unicode_platform_is_clean(platform: u16, encoding: u16, language: u16) {
    let raw = hex!("004D 0069 0063 0072 006F 0073 006F 0066 0074 0020 0059 0061 0068 0065 0069 0020 0055 0049");
    assert_eq!(
        result("Microsoft Yahei UI", IssueLevel::Clean, None),
        decode_name(&record(platform, encoding, language, &raw))
    );
}

#[test]
fn mac_japanese_is_clean() {
    // 丸ゴシック
    let raw = hex!("8ADB 8353 8356 8362 834E");
    assert_eq!(
        result("丸ゴシック", IssueLevel::Clean, None),
        decode_name(&record(1, 1, mac_language::JAPANESE, &raw))
    );
}

#[test]
fn japanese_under_mac_roman_is_mark() {
    let raw = hex!("8ADB 8353 8356 8362 834E");
    assert_eq!(
        result("丸ゴシック", IssueLevel::Mark, Some(Charset::ShiftJis)),
        decode_name(&record(1, 0, mac_language::JAPANESE, &raw))
    );
}

#[test]
fn shift_jis_marked_mac_roman_english() {
    // EPSON 丸ゴシック体Ｍ
    let raw = hex!("4550 534F 4E20 8ADB 8353 8356 8362 834E 91CC 826C");
    assert_eq!(
        result("EPSON 丸ゴシック体Ｍ", IssueLevel::Mark, Some(Charset::ShiftJis)),
        decode_name(&record(1, 0, mac_language::ENGLISH, &raw))
    );
}

#[test]
fn big5_marked_mac_roman() {
    // 華康布丁體
    let raw = hex!("B5D8 B164 A5AC A442 C5E9");
    assert_eq!(
        result("華康布丁體", IssueLevel::Mark, Some(Charset::Big5)),
        decode_name(&record(1, 0, mac_language::ENGLISH, &raw))
    );
}

#[test]
fn simplified_chinese_is_clean() {
    // 微软雅黑
    let raw = hex!("CEA2 C8ED D1C5 BADA");
    assert_eq!(
        result("微软雅黑", IssueLevel::Clean, None),
        decode_name(&record(1, 25, mac_language::CHINESE_SIMPLIFIED, &raw))
    );
}

#[test_case(&hex!("BBAA BFB5 BFAC CCE5"), "华康楷体", Charset::Gb2312; "gb2312 vendor")]
#[test_case(&hex!("B5D8 B164 A4A4 B6C2 C5E9"), "華康中黑體", Charset::Big5; "big5 vendor")]
#[test_case(b"HanDing", "HanDing", Charset::Ascii; "ascii vendor")]
fn legacy_marked_utf16(raw: &[u8], text: &str, charset: Charset) {
    assert_eq!(
        result(text, IssueLevel::Mark, Some(charset)),
        decode_name(&record(3, 1, 0x804, raw))
    );
}

#[test]
fn utf16_marked_legacy() {
    // 麗流隷書
    let raw = hex!("9E97 6D41 96B7 66F8");
    assert_eq!(
        result("麗流隷書", IssueLevel::Mark, Some(Charset::Utf16Be)),
        decode_name(&record(3, 2, 0x411, &raw))
    );

    // HG半古印体
    let raw = hex!("0048 0047 534A 53E4 5370 4F53");
    assert_eq!(
        result("HG半古印体", IssueLevel::Mark, Some(Charset::Utf16Be)),
        decode_name(&record(1, 1, mac_language::JAPANESE, &raw))
    );
}

#[test]
fn gb2312_marked_shift_jis() {
    // 森泽
    let raw = hex!("C9AD D4F3");
    assert_eq!(
        result("森泽", IssueLevel::Mark, Some(Charset::Gb2312)),
        decode_name(&record(1, 1, mac_language::JAPANESE, &raw))
    );
}

#[test]
fn gb2312_marked_shift_jis_without_prefix() {
    // 方正准圆
    let raw = hex!("B7BD D5FD D7BC D4B2");
    assert_eq!(
        result("方正准圆", IssueLevel::Mark, Some(Charset::Gb2312)),
        decode_name(&record(1, 1, mac_language::JAPANESE, &raw))
    );
}

#[test]
fn zero_interleaved_is_data() {
    // 微软简中圆
    let raw = hex!("00CE 00A2 00C8 00ED 00BC 00F2 00D6 00D0 00D4 00B2");
    assert_eq!(
        result("微软简中圆", IssueLevel::Data, Some(Charset::Gb2312)),
        decode_name(&record(1, 25, mac_language::CHINESE_SIMPLIFIED, &raw))
    );
}

#[test]
fn big5_misread_is_data() {
    let raw = hex!("6045 968B");
    assert_eq!(
        result("文鼎", IssueLevel::Data, Some(Charset::Big5Misread)),
        decode_name(&record(3, 1, 0x804, &raw))
    );
}

#[test]
fn gbk_marked_gb2312_is_data() {
    let raw = hex!("B7BD D5FD 86B4");
    assert_eq!(
        result("方正喆", IssueLevel::Data, Some(Charset::Gbk)),
        decode_name(&record(1, 25, mac_language::CHINESE_SIMPLIFIED, &raw))
    );
}

#[test]
fn truncated_is_data() {
    // 文鼎勘亭流, last byte lost
    let raw = hex!("A4E5 B9A9 B0C9 AB46 AC");
    assert_eq!(
        result("文鼎勘亭", IssueLevel::Data, Some(Charset::Big5)),
        decode_name(&record(3, 4, 0x404, &raw))
    );
}

#[test]
fn control_garbage_fails() {
    let raw = hex!("0001 0002 0003 1B");
    assert_eq!(
        result("", IssueLevel::Fail, None),
        decode_name(&record(3, 1, 0x409, &raw))
    );
}

#[test_case(0, 3, 0; "unicode platform")]
#[test_case(3, 1, 0x409; "windows bmp")]
fn noncharacter_noise_fails(platform: u16, encoding: u16, language: u16) {
    let raw = hex!("FFFF FFFE 0000 01");
    assert_eq!(
        result("", IssueLevel::Fail, None),
        decode_name(&record(platform, encoding, language, &raw))
    );
}

#[test]
fn empty_fails() {
    assert_eq!(
        result("", IssueLevel::Fail, None),
        decode_name(&record(3, 1, 0x409, b""))
    );
}

#[test]
fn decode_is_idempotent() {
    let raw = hex!("A4E5 B9A9 B0C9 AB46 AC");
    let r = record(3, 4, 0x404, &raw);
    assert_eq!(decode_name(&r), decode_name(&r));
}

#[test]
fn declared_clean_short_circuits() {
    // the fallback decodes as well, but is never consulted
    let candidates = [
        Candidate::new(Charset::MacRoman, Source::Declared),
        Candidate::new(Charset::Ascii, Source::Fallback),
    ];
    assert_eq!(
        result("Arial", IssueLevel::Clean, None),
        score(b"Arial", &candidates)
    );
}

#[test]
fn first_clean_in_order_wins() {
    let candidates = [
        Candidate::new(Charset::Utf16Be, Source::Declared),
        Candidate::new(Charset::Gb2312, Source::Fallback),
        Candidate::new(Charset::Big5, Source::Fallback),
    ];
    // odd length, GB2312 and Big5 both decode it
    let raw = hex!("BBAA BFB5 BFAC 41");
    let r = score(&raw, &candidates);
    assert_eq!(IssueLevel::Mark, r.issue);
    assert_eq!(Some(Charset::Gb2312), r.encoding);
}

#[test]
fn last_resort_never_clean() {
    let candidates = [Candidate::new(Charset::Latin1, Source::LastResort)];
    assert_eq!(
        result("Café", IssueLevel::Data, Some(Charset::Latin1)),
        score(&hex!("4361 66E9"), &candidates)
    );
}

#[test]
fn data_strips_anomalies() {
    let candidates = [Candidate::framed(
        Charset::Utf16Be,
        Framing::Whole,
        Source::Declared,
    )];
    // one unpaired surrogate in five chars
    let raw = hex!("0041 0042 D800 0043 0044");
    assert_eq!(
        result("ABCD", IssueLevel::Data, Some(Charset::Utf16Be)),
        score(&raw, &candidates)
    );

    // too many anomalies
    let raw = hex!("0041 D800 0043");
    assert_eq!(result("", IssueLevel::Fail, None), score(&raw, &candidates));
}
