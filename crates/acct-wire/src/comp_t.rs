use std::num::NonZeroU32;
use std::time::Duration;

/// Clock ticks per second used by the accounting subsystem (`AHZ`).
pub const AHZ: NonZeroU32 = match NonZeroU32::new(64) {
    Some(rate) => rate,
    None => unreachable!(),
};

/// Number of mantissa bits in a `comp_t`.
pub const MANTISSA_BITS: u32 = 13;

/// Number of exponent bits in a `comp_t`. Each exponent step is a base-8
/// (3-bit) shift of the mantissa.
pub const EXPONENT_BITS: u32 = 3;

/// Mask selecting the 13-bit mantissa.
pub const MANTISSA_MASK: u16 = (1 << MANTISSA_BITS) - 1;

const MAX_EXPONENT: u16 = (1 << EXPONENT_BITS) - 1;

/// OpenBSD's compressed 16-bit time and count encoding.
///
/// Bit layout:
///   bits 0-12  = mantissa
///   bits 13-15 = base-8 exponent
///
/// The decoded value is `mantissa << (3 * exponent)` clock ticks. Divide
/// by the tick rate to get seconds.
///
/// ```text
///   raw 0x2001  →  exponent 1, mantissa 1  →  1 << 3 = 8 ticks = 0.125 s
///   raw 0x1FFF  →  exponent 0, mantissa 8191         = 127.984375 s
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompT(u16);

impl CompT {
    pub const ZERO: Self = Self(0);

    /// Largest encodable value: mantissa 8191 shifted by 21 bits.
    pub const MAX: Self = Self(u16::MAX);

    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn mantissa(self) -> u16 {
        self.0 & MANTISSA_MASK
    }

    pub fn exponent(self) -> u16 {
        self.0 >> MANTISSA_BITS
    }

    /// Expand to clock ticks.
    ///
    /// Pure integer arithmetic. The largest result is `8191 << 21`, which
    /// fits comfortably in a `u64` and is exactly representable as `f64`.
    pub fn ticks(self) -> u64 {
        let mut value = u64::from(self.mantissa());
        for _ in 0..self.exponent() {
            value <<= EXPONENT_BITS;
        }
        value
    }

    /// Convert to seconds at the given tick rate.
    ///
    /// The division happens once, after the integer expansion, so every
    /// one of the 65536 inputs maps to a single well-defined value.
    #[allow(clippy::cast_precision_loss)]
    pub fn seconds(self, tick_rate: NonZeroU32) -> f64 {
        self.ticks() as f64 / f64::from(tick_rate.get())
    }

    /// Compress a tick count, rounding the way the kernel's
    /// `encode_comp_t` does.
    ///
    /// While the value needs more than 13 bits it is shifted right by 3
    /// and the exponent bumped; the last bit shifted out at position 2
    /// decides whether to round up. Rounding can overflow the mantissa,
    /// which costs one more shift. Values past [`CompT::MAX`] saturate.
    pub fn from_ticks(ticks: u64) -> Self {
        let max_mantissa = u64::from(MANTISSA_MASK);
        let mut mantissa = ticks;
        let mut exponent: u16 = 0;
        let mut round_up = false;

        while mantissa > max_mantissa {
            round_up = mantissa & (1 << (EXPONENT_BITS - 1)) != 0;
            mantissa >>= EXPONENT_BITS;
            exponent += 1;
        }

        if round_up {
            mantissa += 1;
            if mantissa > max_mantissa {
                mantissa >>= EXPONENT_BITS;
                exponent += 1;
            }
        }

        if exponent > MAX_EXPONENT {
            return Self::MAX;
        }

        #[allow(clippy::cast_possible_truncation)]
        let mantissa = mantissa as u16;
        Self((exponent << MANTISSA_BITS) | mantissa)
    }

    /// Compress a duration at the given tick rate.
    ///
    /// Sub-tick remainders are truncated before compression, matching the
    /// kernel which adds `usec / (1000000 / AHZ)` whole ticks.
    pub fn from_duration(duration: Duration, tick_rate: NonZeroU32) -> Self {
        let rate = u64::from(tick_rate.get());
        let whole = duration.as_secs().saturating_mul(rate);
        let fractional = u64::from(duration.subsec_nanos()) * rate / 1_000_000_000;
        Self::from_ticks(whole.saturating_add(fractional))
    }
}

// A few things worth noting:
// `ticks()` shifts in a loop rather than computing `3 * exponent` once.
// Both are the same thing for an exponent of at most 7, but the loop reads
// like the kernel's definition ("shift left by 3, exponent times") which
// makes it easy to check against `acct(5)`.
// Nothing here touches floating point until `seconds()`. Doing the
// conversion in integers first keeps results bit-exact across platforms.
