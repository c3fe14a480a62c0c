pub(crate) fn from_hex(value: &str) -> Result<u16, std::num::ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u16::from_str_radix(digits, 16)
}
