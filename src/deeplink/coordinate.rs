/* Coordinates and their fixed-precision rendering
 * Coordinate: packing latitude and longitude
 * format_coordinate: exactly six fractional digits, half-up
 */

/// Number of fractional digits every coordinate is rendered with.
pub const FRACTION_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components rendered by [`format_coordinate`].
    pub fn formatted(&self) -> (String, String) {
        (
            format_coordinate(self.latitude),
            format_coordinate(self.longitude),
        )
    }

    /// Parse a `lat,lng` literal typed in place of an address.
    ///
    /// Only pairs that look like real positions are accepted, so that
    /// something like `10, Downing Street` stays an address.
    pub fn parse_literal(input: &str) -> Option<Self> {
        let (lat, lng) = input.split_once(',')?;
        let latitude = lat.trim().parse::<f64>().ok()?;
        let longitude = lng.trim().parse::<f64>().ok()?;

        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        in_range.then(|| Self::new(latitude, longitude))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (lat, lng) = self.formatted();
        write!(f, "{},{}", lat, lng)
    }
}

/// Render a coordinate component with exactly [`FRACTION_DIGITS`] digits
/// after a `.`, rounding half-up on the next digit.
///
/// Rounding works on the shortest decimal form that reads back as the same
/// `f64`, so `151.2092955` rounds up to `151.209296` even though its binary
/// value is slightly below the midpoint.
pub fn format_coordinate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // `Display` for f64 never switches to exponent notation
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(
            frac_part
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(FRACTION_DIGITS),
        )
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(FRACTION_DIGITS)
        .is_some_and(|d| *d >= b'5');

    if round_up {
        carry_one(&mut digits);
    }

    let is_zero = digits.iter().all(|d| *d == 0);
    let split = digits.len() - FRACTION_DIGITS;
    let render = |part: &[u8]| part.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    format!(
        "{}{}.{}",
        if value < 0.0 && !is_zero { "-" } else { "" },
        render(&digits[..split]),
        render(&digits[split..]),
    )
}

/// Add one unit in the last place of a decimal digit string.
fn carry_one(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, 1);
}
