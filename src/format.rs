/// Left-pads the decimal form of `value` with `width - len` copies of `pad`.
///
/// Nothing is truncated: a value already `width` digits or wider comes back
/// unchanged. A multi-character `pad` is repeated as a unit.
pub fn pad(value: u64, width: usize, pad: &str) -> String {
    let digits = value.to_string();
    let missing = width.saturating_sub(digits.len());
    let mut out = pad.repeat(missing);
    out.push_str(&digits);
    out
}
/// Fixed-point label: at least four columns wide, two decimals.
pub fn fixed(value: f32) -> String {
    format!("{:4.2}", value)
}
