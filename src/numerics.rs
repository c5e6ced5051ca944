//! Component B: word <-> number conversion and rational arithmetic.
//!
//! Every value in the language is a string ("word"). This module interprets
//! such strings as positional-notation numbers in a base defined by the
//! active [`Charset`], performs arithmetic on them as [`Fraction`]s, and
//! renders results back into words.

/// The three character classes a lexicon defines: `digits` fixes the base
/// (its length is B) and the index of each digit character; `decimals` and
/// `signs` mark the fraction boundary and negative sign respectively. Only
/// characters drawn from the union of these three participate in numeric
/// parsing or fuzzy matching.
#[derive(Clone, Debug)]
pub struct Charset {
    digits: Vec<char>,
    decimals: Vec<char>,
    signs: Vec<char>,
}

impl Charset {
    pub fn new(digits: Vec<char>, decimals: Vec<char>, signs: Vec<char>) -> Self {
        Self { digits, decimals, signs }
    }

    pub fn base(&self) -> i64 {
        self.digits.len() as i64
    }

    pub fn digits(&self) -> &[char] {
        &self.digits
    }

    pub fn decimals(&self) -> &[char] {
        &self.decimals
    }

    pub fn signs(&self) -> &[char] {
        &self.signs
    }

    /// All characters this charset recognises, for [`crate::fuzzy::FuzzyMap`] trimming.
    pub fn chars(&self) -> Vec<char> {
        let mut all = self.digits.clone();
        all.extend(self.decimals.iter());
        all.extend(self.signs.iter());
        all
    }

    fn digit_index(&self, c: char) -> Option<i64> {
        self.digits.iter().position(|&d| d == c).map(|i| i as i64)
    }

    fn is_decimal(&self, c: char) -> bool {
        self.decimals.contains(&c)
    }

    fn is_sign(&self, c: char) -> bool {
        self.signs.contains(&c)
    }

    fn negative(&self, word: &str) -> bool {
        word.chars().filter(|c| self.is_sign(*c)).count() % 2 == 1
    }

    /// Scans the integer portion of `word`, stopping at the first decimal
    /// marker. Sign is determined by the total count of sign characters
    /// anywhere in the word.
    pub fn int(&self, word: &str) -> i64 {
        let mut acc: i64 = 0;
        for c in word.chars() {
            if self.is_decimal(c) {
                break;
            }
            if let Some(d) = self.digit_index(c) {
                acc = acc * self.base() + d;
            }
        }
        if self.negative(word) {
            -acc
        } else {
            acc
        }
    }

    /// Scans `word` into a `(whole, numerator, denominator)` triple. The
    /// denominator is always a nonnegative power of the base.
    pub fn fraction(&self, word: &str) -> Fraction {
        let mut whole: i64 = 0;
        let mut num: i64 = 0;
        let mut den: i64 = 1;
        let mut past_decimal = false;

        for c in word.chars() {
            if self.is_decimal(c) {
                past_decimal = true;
                continue;
            }
            if let Some(d) = self.digit_index(c) {
                if past_decimal {
                    num = num * self.base() + d;
                    den *= self.base();
                } else {
                    whole = whole * self.base() + d;
                }
            }
        }

        if self.negative(word) {
            whole = -whole;
        }

        Fraction { whole, num, den }
    }

    pub fn float(&self, word: &str) -> f64 {
        self.fraction(word).to_f64()
    }

    /// `float` if the fraction has a nonzero numerator, else the signed
    /// integer whole part — matching the language's "numbers render as
    /// integers unless they actually have a fractional part" convention.
    pub fn num(&self, word: &str) -> Number {
        let f = self.fraction(word);
        if f.num != 0 {
            Number::Float(f.to_f64())
        } else {
            Number::Int(f.whole)
        }
    }

    /// Renders a fraction back into a word: the magnitude of `whole` in
    /// base B, then (if `num` is nonzero) a decimal marker, zero-padding so
    /// the fractional digits carry the right magnitude, then the magnitude
    /// of `num`; a sign character is appended last if the value is negative.
    pub fn word(&self, f: &Fraction) -> String {
        let mut out = String::new();

        out.push_str(&self.render_digits(f.whole.unsigned_abs() as i64));

        if f.num != 0 {
            out.push(self.decimals[0]);
            let den_magnitude = self.magnitude(f.den);
            let num_digits = self.render_digits(f.num.unsigned_abs() as i64);
            for _ in 0..den_magnitude.saturating_sub(num_digits.len()) {
                out.push(self.digits[0]);
            }
            out.push_str(&num_digits);
        }

        if f.whole < 0 && !self.signs.is_empty() {
            out.push(self.signs[0]);
        }

        out
    }

    fn render_digits(&self, mut n: i64) -> String {
        if n == 0 {
            return String::new();
        }
        let mut digits = Vec::new();
        while n > 0 {
            digits.push(self.digits[(n % self.base()) as usize]);
            n /= self.base();
        }
        digits.iter().rev().collect()
    }

    /// Number of base-B digits needed to represent `den` as a power of B
    /// (i.e. log base B of `den`).
    fn magnitude(&self, mut den: i64) -> usize {
        let mut count = 0;
        while den > 1 {
            den /= self.base();
            count += 1;
        }
        count
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fraction {
    pub whole: i64,
    pub num: i64,
    pub den: i64,
}

impl Fraction {
    pub fn to_f64(self) -> f64 {
        self.whole as f64 + (self.num as f64 / self.den as f64)
    }

    /// Equalizes two fractions' denominators by repeatedly scaling the
    /// smaller one by the base. Terminates because both denominators are
    /// powers of the same base.
    pub fn conform(self, other: Fraction, base: i64) -> (Fraction, Fraction) {
        let mut a = self;
        let mut b = other;
        while a.den < b.den {
            a.num *= base;
            a.den *= base;
        }
        while b.den < a.den {
            b.num *= base;
            b.den *= base;
        }
        (a, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn is_truthy(self) -> bool {
        match self {
            Number::Int(i) => i != 0,
            Number::Float(f) => f != 0.0,
        }
    }

    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(i) => i,
            Number::Float(f) => f as i64,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

fn split(total_num: i64, total_den: i64) -> (i64, i64) {
    if total_num.abs() >= total_den {
        (total_num / total_den, total_num % total_den)
    } else {
        (0, total_num)
    }
}

pub fn add(charset: &Charset, a: &str, b: &str) -> String {
    let (x, y) = charset.fraction(a).conform(charset.fraction(b), charset.base());
    let (carry, num) = split(x.num + y.num, x.den);
    charset.word(&Fraction { whole: x.whole + y.whole + carry, num, den: x.den })
}

pub fn subtract(charset: &Charset, a: &str, b: &str) -> String {
    let (x, y) = charset.fraction(a).conform(charset.fraction(b), charset.base());
    let (carry, num) = split(x.num - y.num, x.den);
    charset.word(&Fraction { whole: x.whole - y.whole + carry, num, den: x.den })
}

pub fn multiply(charset: &Charset, a: &str, b: &str) -> String {
    let x = charset.fraction(a);
    let y = charset.fraction(b);
    let numerator = (x.whole * x.den + x.num) * (y.whole * y.den + y.num);
    let denominator = x.den * y.den;
    let (whole, num) = split(numerator, denominator);
    charset.word(&Fraction { whole, num, den: denominator })
}

pub fn divide(charset: &Charset, a: &str, b: &str) -> String {
    let (x, y) = charset.fraction(a).conform(charset.fraction(b), charset.base());
    let numerator = x.whole * x.den + x.num;
    let denominator = y.whole * y.den + y.num;
    let r = numerator / denominator;
    let rem = numerator % denominator;

    let base2 = charset.base() * charset.base();
    let (whole, num, den) = if rem != 0 {
        (r, rem * x.den * base2 / denominator, x.den * base2)
    } else {
        (r, 0, x.den)
    };

    charset.word(&Fraction { whole, num, den: den.max(1) })
}

pub fn modulus(charset: &Charset, a: &str, b: &str) -> String {
    let x = charset.fraction(a);
    let wy = charset.int(b);
    charset.word(&Fraction { whole: python_mod(x.whole, wy), num: x.num, den: x.den })
}

/// Floored modulus: result takes the sign of the divisor, matching the
/// language's source semantics rather than Rust's truncating `%`.
fn python_mod(a: i64, b: i64) -> i64 {
    if b == 0 {
        return 0;
    }
    ((a % b) + b) % b
}

pub fn power(charset: &Charset, a: &str, b: &str) -> String {
    let fa = charset.fraction(a);
    let fb = charset.fraction(b);
    let r = fa.to_f64().powf(fb.to_f64());
    let den = fa.den.max(fb.den);

    let whole = r.trunc() as i64;
    let mut num = ((r - r.trunc()) * den as f64).round() as i64;
    let mut denom = den;

    if num != 0 && (r - r.trunc()).abs() * den as f64 % 1.0 > 1.0 / (charset.base() * charset.base()) as f64 {
        let base2 = charset.base() * charset.base();
        num = ((r - r.trunc()) * (den * base2) as f64).round() as i64;
        denom = den * base2;
    }

    charset.word(&Fraction { whole, num, den: denom.max(1) })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn charset() -> Charset {
        Charset::new(
            "abcdefghij".chars().collect(),
            vec!['.'],
            vec!['-'],
        )
    }

    #[test]
    fn int_reads_leading_digits_in_base() {
        let cs = charset();
        assert_eq!(cs.int("bc"), 12); // b=1, c=2 -> 1*10+2
    }

    #[test]
    fn int_applies_odd_sign_count() {
        let cs = charset();
        assert_eq!(cs.int("b-"), -1);
        assert_eq!(cs.int("b--"), 1);
    }

    #[test]
    fn fraction_splits_on_decimal() {
        let cs = charset();
        let f = cs.fraction("b.c");
        assert_eq!(f, Fraction { whole: 1, num: 2, den: 10 });
    }

    #[test]
    fn word_renders_whole_only() {
        let cs = charset();
        assert_eq!(cs.word(&Fraction { whole: 12, num: 0, den: 1 }), "bc");
    }

    #[test]
    fn word_renders_negative_sign_last() {
        let cs = charset();
        assert_eq!(cs.word(&Fraction { whole: -12, num: 0, den: 1 }), "bc-");
    }

    #[test]
    fn add_whole_numbers() {
        let cs = charset();
        // a=0 b=1 c=2 d=3 e=4: add(b, c) = 1 + 2 = 3 -> "d"
        assert_eq!(add(&cs, "b", "c"), "d");
    }

    #[test]
    fn subtract_to_zero_is_empty_word() {
        let cs = charset();
        assert_eq!(subtract(&cs, "c", "c"), "");
    }

    #[test]
    fn num_reports_integer_when_no_fraction() {
        let cs = charset();
        assert_eq!(cs.num("bc"), Number::Int(12));
    }

    #[test]
    fn multiply_whole_numbers() {
        let cs = charset();
        // c=2 d=3: multiply(c, d) = 6 -> "g"
        assert_eq!(multiply(&cs, "c", "d"), "g");
    }

    #[test]
    fn multiply_fraction_by_whole() {
        let cs = charset();
        // b.f = 1.5, c = 2: 1.5 * 2 = 3 -> "d"
        assert_eq!(multiply(&cs, "b.f", "c"), "d");
    }

    #[test]
    fn divide_widens_denominator_by_a_power_of_base() {
        let cs = charset();
        // b = 1, baa = 100: 1/100 = 0.01 -> ".ab"
        assert_eq!(divide(&cs, "b", "baa"), ".ab");
    }
}
