//! Genome codec
//!
//! A candidate is a 36-bit vector: spindle speed in bits [0..16), feed
//! rate in bits [16..29), axial depth in bits [29..36). Fields are
//! big-endian: the first bit of a field carries the highest weight. The
//! field integer maps linearly onto [0, upper] where upper is the
//! corresponding search-range upper bound; the same weighting is used by
//! the scalar decoder and the batched fitness path.

use rand::Rng;

/// Bits encoding the spindle speed
pub const SPEED_BITS: usize = 16;
/// Bits encoding the feed rate
pub const FEED_BITS: usize = 13;
/// Bits encoding the axial depth of cut
pub const CUT_DEPTH_BITS: usize = 7;
/// Total genome length
pub const DNA_BITS: usize = SPEED_BITS + FEED_BITS + CUT_DEPTH_BITS;

/// One individual: a fixed-length bit vector, each slot 0 or 1
pub type Genome = [u8; DNA_BITS];

/// Decoded parameter triple in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingParams {
    /// Spindle speed in r/min
    pub speed: f64,
    /// Feed rate in mm/min
    pub feed: f64,
    /// Axial depth of cut in mm
    pub cut_depth: f64,
}

/// Upper bounds the genome fields scale onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenomeScale {
    /// Speed range upper bound in r/min
    pub speed_max: f64,
    /// Feed range upper bound in mm/min
    pub feed_max: f64,
    /// Depth range upper bound in mm
    pub cut_depth_max: f64,
}

/// Decode a genome into its parameter triple.
///
/// Total on all bit patterns; identical genomes decode identically.
pub fn decode(genome: &Genome, scale: &GenomeScale) -> CuttingParams {
    CuttingParams {
        speed: field_fraction(&genome[..SPEED_BITS]) * scale.speed_max,
        feed: field_fraction(&genome[SPEED_BITS..SPEED_BITS + FEED_BITS]) * scale.feed_max,
        cut_depth: field_fraction(&genome[SPEED_BITS + FEED_BITS..]) * scale.cut_depth_max,
    }
}

/// Encode a parameter triple, quantizing each axis onto its grid.
///
/// `decode(encode(x))` is the identity for values on the representable
/// grid; off-grid values snap to the nearest grid point.
pub fn encode(params: &CuttingParams, scale: &GenomeScale) -> Genome {
    let mut genome = [0u8; DNA_BITS];
    write_field(
        &mut genome[..SPEED_BITS],
        quantize(params.speed, scale.speed_max, SPEED_BITS),
    );
    write_field(
        &mut genome[SPEED_BITS..SPEED_BITS + FEED_BITS],
        quantize(params.feed, scale.feed_max, FEED_BITS),
    );
    write_field(
        &mut genome[SPEED_BITS + FEED_BITS..],
        quantize(params.cut_depth, scale.cut_depth_max, CUT_DEPTH_BITS),
    );
    genome
}

/// Draw a genome with uniform random bits
pub fn random_genome<R: Rng>(rng: &mut R) -> Genome {
    std::array::from_fn(|_| rng.gen_range(0..=1u8))
}

/// Field integer, most significant bit first
fn field_value(bits: &[u8]) -> u64 {
    bits.iter().fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Field integer normalized onto [0, 1]
fn field_fraction(bits: &[u8]) -> f64 {
    let span = (1u64 << bits.len()) - 1;
    field_value(bits) as f64 / span as f64
}

fn quantize(value: f64, upper: f64, bits: usize) -> u64 {
    let span = (1u64 << bits) - 1;
    if upper <= 0.0 {
        return 0;
    }
    ((value / upper).clamp(0.0, 1.0) * span as f64).round() as u64
}

fn write_field(bits: &mut [u8], mut value: u64) {
    for slot in bits.iter_mut().rev() {
        *slot = (value & 1) as u8;
        value >>= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALE: GenomeScale = GenomeScale {
        speed_max: 8000.0,
        feed_max: 4000.0,
        cut_depth_max: 2.0,
    };

    #[test]
    fn msb_carries_the_highest_weight() {
        let mut genome = [0u8; DNA_BITS];
        genome[0] = 1;
        let decoded = decode(&genome, &SCALE);
        let expected = 2f64.powi(15) / (2f64.powi(16) - 1.0) * 8000.0;
        assert!((decoded.speed - expected).abs() < 1e-9);
        assert_eq!(decoded.feed, 0.0);
        assert_eq!(decoded.cut_depth, 0.0);
    }

    #[test]
    fn all_ones_decodes_to_the_upper_bounds() {
        let genome = [1u8; DNA_BITS];
        let decoded = decode(&genome, &SCALE);
        assert!((decoded.speed - 8000.0).abs() < 1e-9);
        assert!((decoded.feed - 4000.0).abs() < 1e-9);
        assert!((decoded.cut_depth - 2.0).abs() < 1e-9);
    }

    #[test]
    fn encode_then_decode_is_identity_on_the_grid() {
        for step in [0u64, 1, 255, 4095, 65535] {
            let speed = step as f64 / 65535.0 * SCALE.speed_max;
            let params = CuttingParams {
                speed,
                feed: 0.0,
                cut_depth: 0.0,
            };
            let decoded = decode(&encode(&params, &SCALE), &SCALE);
            assert!((decoded.speed - speed).abs() < 1e-9);
        }
    }
}
