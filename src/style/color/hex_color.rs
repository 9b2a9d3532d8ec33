use super::Color;

pub(crate) fn parse_hex(raw: &str) -> Option<Color> {
    let bytes = raw.as_bytes();
    if !validate(bytes) {
        return None;
    }

    let color = match bytes.len() {
        4 => Color::rgb(
            hex_1_to_u8(bytes[1]) * 17,
            hex_1_to_u8(bytes[2]) * 17,
            hex_1_to_u8(bytes[3]) * 17,
        ),
        5 => Color::rgba(
            hex_1_to_u8(bytes[1]) * 17,
            hex_1_to_u8(bytes[2]) * 17,
            hex_1_to_u8(bytes[3]) * 17,
            hex_1_to_u8(bytes[4]) * 17,
        ),
        7 => Color::rgb(
            hex_2_to_u8(bytes[1], bytes[2]),
            hex_2_to_u8(bytes[3], bytes[4]),
            hex_2_to_u8(bytes[5], bytes[6]),
        ),
        9 => Color::rgba(
            hex_2_to_u8(bytes[1], bytes[2]),
            hex_2_to_u8(bytes[3], bytes[4]),
            hex_2_to_u8(bytes[5], bytes[6]),
            hex_2_to_u8(bytes[7], bytes[8]),
        ),
        _ => return None,
    };
    Some(color)
}

fn validate(bytes: &[u8]) -> bool {
    let length = bytes.len();

    if length == 0 || bytes[0] != b'#' {
        return false;
    }

    if length != 4 && length != 5 && length != 7 && length != 9 {
        return false;
    }

    bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

fn hex_1_to_u8(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

fn hex_2_to_u8(c1: u8, c2: u8) -> u8 {
    (hex_1_to_u8(c1) << 4) | hex_1_to_u8(c2)
}
